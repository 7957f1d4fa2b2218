//! PDF serialization of composed pages.
//!
//! Pages are replayed op by op into content streams. Text uses the two standard
//! Helvetica fonts (not embedded, WinAnsi encoded); images become RGB image
//! XObjects with an optional grayscale soft mask. Everything is built in memory
//! and returned as bytes, so a failure never leaves a partial document behind.
//! CPU-bound: call from `tokio::task::spawn_blocking`.

pub mod encoding;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use thiserror::Error;

use crate::images::RasterImage;
use crate::layout::font_metrics::{get_metrics, Font};
use crate::layout::page::{Align, Color, DrawOp, Page, Rect};

use self::encoding::encode_win_ansi;

const PRODUCER: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("document has no pages")]
    Empty,

    #[error("PDF encoding failed: {0}")]
    Lopdf(#[from] lopdf::Error),

    #[error("PDF write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Document-level metadata written to the info dictionary.
#[derive(Debug, Clone)]
pub struct DocumentMeta {
    pub title: String,
}

/// Serializes `pages` into a complete PDF.
pub fn write_document(meta: &DocumentMeta, pages: &[Page]) -> Result<Vec<u8>, PdfError> {
    if pages.is_empty() {
        return Err(PdfError::Empty);
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary(Font::Helvetica));
    let bold_id = doc.add_object(font_dictionary(Font::HelveticaBold));
    let fonts = dictionary! {
        Font::Helvetica.resource_name() => regular_id,
        Font::HelveticaBold.resource_name() => bold_id,
    };

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let page_id = write_page(&mut doc, pages_id, &fonts, page)?;
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(&meta.title)),
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

fn font_dictionary(font: Font) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn write_page(
    doc: &mut Document,
    pages_id: ObjectId,
    fonts: &Dictionary,
    page: &Page,
) -> Result<ObjectId, PdfError> {
    let mut operations = Vec::new();
    let mut xobjects = Dictionary::new();

    for op in &page.ops {
        match op {
            DrawOp::Text {
                text,
                x,
                y,
                font,
                size,
                color,
                align,
            } => {
                let start_x = anchor_x(text, *x, *font, *size, *align);
                operations.push(fill_color(*color));
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![font.resource_name().into(), Object::Real(*size)],
                ));
                operations.push(Operation::new(
                    "Td",
                    vec![Object::Real(start_x), Object::Real(*y)],
                ));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(encode_win_ansi(text))],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            DrawOp::Image { rect, image, .. } => {
                let name = format!("Im{}", xobjects.len());
                let image_id = add_image(doc, image);
                xobjects.set(name.as_bytes().to_vec(), image_id);
                operations.push(Operation::new("q", vec![]));
                operations.push(Operation::new(
                    "cm",
                    vec![
                        Object::Real(rect.w),
                        Object::Real(0.0),
                        Object::Real(0.0),
                        Object::Real(rect.h),
                        Object::Real(rect.x),
                        Object::Real(rect.y),
                    ],
                ));
                operations.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
                operations.push(Operation::new("Q", vec![]));
            }
            DrawOp::Rect { rect, color, fill } => {
                operations.extend(rect_operations(*rect, *color, *fill));
            }
        }
    }

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            Object::Real(0.0),
            Object::Real(0.0),
            Object::Real(page.width),
            Object::Real(page.height),
        ],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "Font" => fonts.clone(),
            "XObject" => xobjects,
        },
    });

    Ok(page_id)
}

/// Left edge of a text run given its alignment anchor.
fn anchor_x(text: &str, x: f32, font: Font, size: f32, align: Align) -> f32 {
    let width = get_metrics(font).text_width(text, size);
    match align {
        Align::Left => x,
        Align::Center => x - width / 2.0,
        Align::Right => x - width,
    }
}

fn fill_color(color: Color) -> Operation {
    Operation::new(
        "rg",
        vec![
            Object::Real(color.r),
            Object::Real(color.g),
            Object::Real(color.b),
        ],
    )
}

fn rect_operations(rect: Rect, color: Color, fill: bool) -> Vec<Operation> {
    let (color_op, paint_op) = if fill { ("rg", "f") } else { ("RG", "S") };
    vec![
        Operation::new("q", vec![]),
        Operation::new(
            color_op,
            vec![
                Object::Real(color.r),
                Object::Real(color.g),
                Object::Real(color.b),
            ],
        ),
        Operation::new(
            "re",
            vec![
                Object::Real(rect.x),
                Object::Real(rect.y),
                Object::Real(rect.w),
                Object::Real(rect.h),
            ],
        ),
        Operation::new(paint_op, vec![]),
        Operation::new("Q", vec![]),
    ]
}

fn add_image(doc: &mut Document, image: &RasterImage) -> ObjectId {
    let width = i64::from(image.width);
    let height = i64::from(image.height);

    let mut dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => width,
        "Height" => height,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
    };

    if let Some(alpha) = &image.alpha {
        let smask_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width,
                "Height" => height,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            alpha.clone(),
        ));
        dict.set("SMask", smask_id);
    }

    doc.add_object(Stream::new(dict, image.rgb.clone()))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
