// Fixed copy and coordinates for the seven brochure pages.
// Empty strings inside a block keep their line of vertical space.

use super::{BrochurePage, Overlay};
use crate::layout::font_metrics::Font;
use crate::layout::page::{Align, Color, A4_HEIGHT, A4_WIDTH};

const CENTER_X: f32 = A4_WIDTH / 2.0;

pub static PAGES: &[BrochurePage] = &[
    BrochurePage {
        background: "1.jpg",
        overlays: COVER,
    },
    BrochurePage {
        background: "2.png",
        overlays: ABOUT_US,
    },
    BrochurePage {
        background: "3.png",
        overlays: PRODUCT_LIST,
    },
    BrochurePage {
        background: "4.png",
        overlays: RAW_SUGAR,
    },
    BrochurePage {
        background: "5.png",
        overlays: REFINED_SUGAR,
    },
    BrochurePage {
        background: "6.png",
        overlays: CHICKPEAS,
    },
    BrochurePage {
        background: "7.png",
        overlays: THANK_YOU,
    },
];

const COVER: &[Overlay] = &[
    Overlay::Line {
        text: "CODEX AUTOMATION KEY",
        x: CENTER_X,
        y: A4_HEIGHT - 200.0,
        font: Font::HelveticaBold,
        size: 30.0,
        color: Color::WHITE,
        align: Align::Center,
    },
    Overlay::Line {
        text: "COMPANY CATALOG",
        x: CENTER_X,
        y: A4_HEIGHT - 230.0,
        font: Font::Helvetica,
        size: 20.0,
        color: Color::WHITE,
        align: Align::Center,
    },
];

const ABOUT_US: &[Overlay] = &[
    Overlay::Line {
        text: "ABOUT US",
        x: CENTER_X,
        y: A4_HEIGHT - 50.0,
        font: Font::HelveticaBold,
        size: 24.0,
        color: Color::DARK_BLUE,
        align: Align::Center,
    },
    Overlay::Block {
        lines: &[
            "Codex Automation Key stands as a symbol of innovation, precision,",
            "and excellence in the field of industrial automation.",
            "",
            "We cater to a wide range of sectors, delivering tailor-made solutions that align",
            "with evolving industry needs and global standards.",
            "",
            "\u{2022} Expertise across multiple domains with efficient and innovative products.",
            "",
            "\u{2022} Integration of advanced sensors, industrial controllers, and automation solutions.",
            "",
            "\u{2022} Focus on enhancing productivity, safety, and operational efficiency.",
            "",
            "\u{2022} Customized solutions from a dedicated team of engineers and professionals.",
        ],
        x: 20.0,
        y: 300.0,
        font: Font::Helvetica,
        size: 15.7,
        color: Color::BLACK,
    },
];

const PRODUCT_LIST: &[Overlay] = &[
    Overlay::Line {
        text: "PRODUCT LIST",
        x: 520.0,
        y: 790.0,
        font: Font::HelveticaBold,
        size: 24.0,
        color: Color::BLACK,
        align: Align::Right,
    },
    Overlay::Line {
        text: "\u{2022} RAW SUGAR",
        x: 450.0,
        y: 725.0,
        font: Font::HelveticaBold,
        size: 14.0,
        color: Color::BLACK,
        align: Align::Right,
    },
    Overlay::Line {
        text: "\u{2022} CHICKPEAS",
        x: 450.0,
        y: 475.0,
        font: Font::HelveticaBold,
        size: 14.0,
        color: Color::BLACK,
        align: Align::Right,
    },
    Overlay::Line {
        text: "\u{2022} REFINED SUGAR",
        x: 480.0,
        y: 275.0,
        font: Font::HelveticaBold,
        size: 14.0,
        color: Color::BLACK,
        align: Align::Right,
    },
];

const fn product_title(text: &'static str) -> Overlay {
    Overlay::Line {
        text,
        x: 50.0,
        y: 800.0,
        font: Font::HelveticaBold,
        size: 24.0,
        color: Color::DARK_RED,
        align: Align::Left,
    }
}

const fn description(lines: &'static [&'static str], size: f32) -> Overlay {
    Overlay::Block {
        lines,
        x: 50.0,
        y: 780.0,
        font: Font::HelveticaBold,
        size,
        color: Color::BLACK,
    }
}

const fn specifications(lines: &'static [&'static str]) -> Overlay {
    Overlay::Block {
        lines,
        x: 350.0,
        y: 500.0,
        font: Font::HelveticaBold,
        size: 17.0,
        color: Color::BLACK,
    }
}

const RAW_SUGAR: &[Overlay] = &[
    product_title("RAW SUGAR"),
    description(
        &[
            "",
            "Description:",
            "",
            "\u{2022} Raw sugar is partially refined sugar with",
            "natural molasses content,",
            "giving it a distinct color and flavor.",
            "\u{2022} It serves as a crucial intermediate product",
            "in sugar refining industries and is also",
            "used in bakeries, confectioneries, and",
            "certain specialty food products.",
            "\u{2022} Its versatility makes it suitable for both",
            "industrial and limited direct consumption.",
        ],
        13.0,
    ),
    specifications(&[
        "Specifications:",
        "",
        "\u{2022} Brownish crystals",
        "\u{2022} Color: Light Brown",
        "\u{2022} Moisture: Max 0.10%",
        "\u{2022} Polarity: 98.50% Min",
        "\u{2022} ICUMSA: 600-1200",
        "\u{2022} Ash Content: Max 0.25%",
        "\u{2022} Grain Size: Medium",
        "\u{2022} HS Code: 1709671",
    ]),
];

const REFINED_SUGAR: &[Overlay] = &[
    product_title("REFINED SUGAR"),
    description(
        &[
            "",
            "Description:",
            "",
            "\u{2022} Refined sugar, also known as white sugar,",
            "is the most commonly used sweetener.",
            "\u{2022} It is produced through a multi-stage",
            "purification process that removes molasses,",
            "and color, resulting in pure sucrose crystals.",
            "\u{2022} Refined sugar adheres to stringent quality",
            "standards ensuring optimal taste, texture,",
            "and hygiene.",
            "\u{2022} Its long shelf life and high purity make it a",
            "key ingredient in various international market.",
        ],
        12.6,
    ),
    specifications(&[
        "Specifications:",
        "",
        "\u{2022} White crystals",
        "\u{2022} HS Code: 170190",
        "\u{2022} Type: Human Consumption",
        "\u{2022} ICUMSA Rating: 45 RBU",
        "\u{2022} Color: Sparkling White",
        "\u{2022} Polarity: 99.80% Minimum",
        "\u{2022} Moisture: 0.04% Maximum",
    ]),
];

const CHICKPEAS: &[Overlay] = &[
    product_title("CHICKPEAS"),
    description(
        &[
            "",
            "Description:",
            "",
            "\u{2022} Chickpeas, also known as Garbanzo Beans,",
            "are a highly nutritious legume cultivated and",
            "consumed worldwide.",
            "\u{2022} They are a rich source of plant-based protein,",
            "dietary fiber, vitamins (such as B6, folate), and",
            "essential minerals including iron, magnesium.",
            "\u{2022} Strict quality control measures ensure proper",
            "sorting, cleaning, drying, and packaging to meet",
            "international standards.",
        ],
        12.6,
    ),
    specifications(&[
        "Specifications:",
        "",
        "\u{2022} Whole, dried",
        "\u{2022} HS Code: 07132000",
        "\u{2022} Product Name: Chickpeas",
        "\u{2022} Size: 8 mm - 12 mm",
        "\u{2022} Color: Beige / Light Brown",
        "\u{2022} Moisture: Max 12%",
        "\u{2022} Admixture: Max 0.5%",
        "\u{2022} Foreign Matter: Max 0.5%",
    ]),
];

const fn contact(text: &'static str, y: f32) -> Overlay {
    Overlay::Line {
        text,
        x: 350.0,
        y,
        font: Font::HelveticaBold,
        size: 13.0,
        color: Color::WHITE,
        align: Align::Left,
    }
}

const THANK_YOU: &[Overlay] = &[
    Overlay::Line {
        text: "Thank you!",
        x: 50.0,
        y: 800.0,
        font: Font::HelveticaBold,
        size: 30.0,
        color: Color::DARK_RED,
        align: Align::Left,
    },
    Overlay::Block {
        lines: &[
            "Thank you for choosing Codex Automation Key.",
            "",
            "\u{2022} We're honored to have the opportunity to",
            "serve you.",
            "",
            "\u{2022} At Codex Automation Key, we believe that",
            "true progress lies at the convergence of",
            "global trade and intelligent automation.",
            "",
            "\u{2022} As a team of tech-driven professionals,",
            "we specialize in building reliable, cutting-edge",
            "solutions that power industries across borders.",
            "",
            "\u{2022} Whether it's optimizing operations through",
            "automation software or streamlining complex",
            "import-export processes, our goal is to",
            "provide seamless, smart, and scalable services.",
            "",
            "\u{2022} Over the years, we have built a reputation",
            "for being a trusted partner, valued for",
            "our commitment to quality, integrity,",
            "and timely execution.",
            "",
            "\u{2022} Innovation isn't just a buzzword for us;",
            "it's a daily practice.",
            "",
            "\u{2022} Every solution we design is crafted",
            "to meet the unique challenges of modern",
            "businesses and the fast-paced international",
            "market.",
            "",
            "\u{2022} As we continue to grow, we are thankful",
            "for clients and collaborators who share",
            "our vision.",
            "",
            "\u{2022} Your trust is the foundation of everything",
            "we do, and we look forward to achieving",
            "even greater milestones together.",
            "",
            "\u{2022} Behind every system we build is a",
            "relationship we value.",
            "",
            "\u{2022} We envision a world where smart automation",
            "bridges borders and transforms businesses.",
            "",
            "\u{2022} Your partnership fuels our purpose.",
        ],
        x: 50.0,
        y: 750.0,
        font: Font::HelveticaBold,
        size: 12.0,
        color: Color::BLACK,
    },
    contact("techcodexautomation@gmail.com", 400.0),
    contact("docwise.codexautomationkey.com", 300.0),
    contact("123-456-7890", 200.0),
    contact("Crystal IT Park, Indore (M.P.)", 100.0),
];
