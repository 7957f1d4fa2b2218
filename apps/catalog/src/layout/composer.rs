//! Page Composer: lays a `ProductRecord` out on a single A4 page.
//!
//! Draw order is fixed: header band → title → product details → description →
//! specifications → images → footer. The details and description blocks share a
//! running cursor; the specifications box and the image slots sit at absolute
//! positions. The footer is always drawn last so it stays on top.

use std::sync::Arc;

use tracing::debug;

use crate::images::RasterImage;
use crate::layout::font_metrics::Font;
use crate::layout::page::{Align, Color, Page, Rect, A4_HEIGHT, A4_WIDTH};
use crate::layout::placement::PlacementTable;
use crate::models::ProductRecord;

// ────────────────────────────────────────────────────────────────────────────
// Layout configuration
// ────────────────────────────────────────────────────────────────────────────

/// A centered footer line at an absolute baseline.
#[derive(Debug, Clone)]
pub struct FooterLine {
    pub text: String,
    pub y: f32,
}

/// Every literal the product page depends on. `Default` is the production layout.
///
/// Offsets named `*_from_top` are measured down from the top edge of the page.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_x: f32,

    pub brand: String,
    pub company: String,
    pub subtitle: String,
    pub header_from_top: f32,
    pub subtitle_from_top: f32,
    pub brand_size: f32,
    pub company_size: f32,
    pub subtitle_size: f32,

    pub title_from_top: f32,
    pub title_size: f32,
    pub title_color: Color,

    pub details_from_top: f32,
    pub section_header_size: f32,
    pub body_size: f32,
    pub item_indent: f32,
    /// Distance from a section header to its first line.
    pub header_gap: f32,
    pub line_pitch: f32,
    /// Extra drop from one pitch below the last detail line to the description header.
    pub section_gap: f32,

    /// Left edge of the specifications box, measured from the right page edge.
    pub spec_from_right: f32,
    pub spec_top: f32,
    pub spec_indent: f32,
    pub spec_pitch: f32,

    pub footer_lines: Vec<FooterLine>,
    pub footer_size: f32,

    pub slots: PlacementTable,
    pub max_image_box: (f32, f32),
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
            margin_x: 40.0,

            brand: "docwise.codexautomationkey.com".to_string(),
            company: "CODEX AUTOMATION KEY".to_string(),
            subtitle: "Product Catalog".to_string(),
            header_from_top: 30.0,
            subtitle_from_top: 43.0,
            brand_size: 12.0,
            company_size: 14.0,
            subtitle_size: 8.0,

            title_from_top: 80.0,
            title_size: 18.0,
            title_color: Color::DARK_BLUE,

            details_from_top: 110.0,
            section_header_size: 10.0,
            body_size: 9.0,
            item_indent: 50.0,
            header_gap: 15.0,
            line_pitch: 13.0,
            section_gap: 20.0,

            spec_from_right: 200.0,
            spec_top: 490.0,
            spec_indent: 10.0,
            spec_pitch: 12.0,

            footer_lines: vec![
                FooterLine {
                    text: "Codex Automation Key, Indore, M.P., India".to_string(),
                    y: 30.0,
                },
                FooterLine {
                    text: "Tel: (+91) 731 2515151 \u{2022} Email: info@codexautomationkey.com"
                        .to_string(),
                    y: 18.0,
                },
            ],
            footer_size: 8.0,

            slots: PlacementTable::production(),
            max_image_box: (300.0, 200.0),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Composition
// ────────────────────────────────────────────────────────────────────────────

/// An image that already has a rectangle and decoded pixels.
#[derive(Debug, Clone)]
pub struct PlacedImage {
    pub name: String,
    pub rect: Rect,
    pub image: Arc<RasterImage>,
}

/// Builds the single product page. Images are drawn in the order given.
pub fn compose_product_page(
    record: &ProductRecord,
    images: &[PlacedImage],
    layout: &LayoutConfig,
) -> Page {
    let mut page = Page::new(layout.page_width, layout.page_height);
    let width = layout.page_width;
    let height = layout.page_height;

    draw_header(&mut page, layout);

    page.text(
        record.name.to_uppercase(),
        width / 2.0,
        height - layout.title_from_top,
        Font::HelveticaBold,
        layout.title_size,
        layout.title_color,
        Align::Center,
    );

    // Details and description share one running cursor.
    let mut cursor = height - layout.details_from_top;

    let details = record.details();
    if !details.is_empty() {
        cursor = draw_section(
            &mut page,
            layout,
            "PRODUCT DETAILS:",
            details.iter().map(|(label, value)| format!("{label}: {value}")),
            cursor,
        );
        cursor -= layout.section_gap;
    }

    if !record.description.is_empty() {
        draw_section(
            &mut page,
            layout,
            "DESCRIPTION:",
            record.description.iter().cloned(),
            cursor,
        );
    }

    if !record.specifications.is_empty() {
        let spec_x = width - layout.spec_from_right;
        let mut spec_y = layout.spec_top;
        page.text(
            "SPECIFICATIONS:",
            spec_x,
            spec_y,
            Font::HelveticaBold,
            layout.section_header_size,
            Color::BLACK,
            Align::Left,
        );
        spec_y -= layout.header_gap;
        for item in &record.specifications {
            page.text(
                format!("\u{2022} {item}"),
                spec_x + layout.spec_indent,
                spec_y,
                Font::Helvetica,
                layout.body_size,
                Color::BLACK,
                Align::Left,
            );
            spec_y -= layout.spec_pitch;
        }
    }

    for placed in images {
        let fitted = placed
            .rect
            .fit_centered(placed.image.width as f32, placed.image.height as f32);
        page.image(placed.name.clone(), fitted, Arc::clone(&placed.image));
    }

    draw_footer(&mut page, layout);

    debug!(
        "Composed product page '{}': {} ops, {} images",
        record.name,
        page.ops.len(),
        page.image_count()
    );

    page
}

fn draw_header(page: &mut Page, layout: &LayoutConfig) {
    let right = layout.page_width - layout.margin_x;
    let header_y = layout.page_height - layout.header_from_top;

    page.text(
        layout.brand.clone(),
        layout.margin_x,
        header_y,
        Font::HelveticaBold,
        layout.brand_size,
        Color::GREY,
        Align::Left,
    );
    page.text(
        layout.company.clone(),
        right,
        header_y,
        Font::HelveticaBold,
        layout.company_size,
        Color::BLACK,
        Align::Right,
    );
    page.text(
        layout.subtitle.clone(),
        right,
        layout.page_height - layout.subtitle_from_top,
        Font::Helvetica,
        layout.subtitle_size,
        Color::BLACK,
        Align::Right,
    );
}

/// Draws a bold header and its lines starting at `top`. Returns the baseline one
/// pitch below the last line.
fn draw_section(
    page: &mut Page,
    layout: &LayoutConfig,
    header: &str,
    lines: impl Iterator<Item = String>,
    top: f32,
) -> f32 {
    page.text(
        header,
        layout.margin_x,
        top,
        Font::HelveticaBold,
        layout.section_header_size,
        Color::BLACK,
        Align::Left,
    );
    let mut y = top - layout.header_gap;
    for line in lines {
        page.text(
            line,
            layout.item_indent,
            y,
            Font::Helvetica,
            layout.body_size,
            Color::BLACK,
            Align::Left,
        );
        y -= layout.line_pitch;
    }
    y
}

fn draw_footer(page: &mut Page, layout: &LayoutConfig) {
    for line in &layout.footer_lines {
        page.text(
            line.text.clone(),
            layout.page_width / 2.0,
            line.y,
            Font::Helvetica,
            layout.footer_size,
            Color::BLACK,
            Align::Center,
        );
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
