//! Company catalog: a fixed seven-page brochure.
//!
//! Every page is a full-bleed background image (`1.jpg`, `2.png` … `7.png` in the
//! brochure directory) with hardcoded overlay text. A missing background is
//! replaced by a grey panel and a red notice; the rest of the brochure still renders.

mod content;

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::images::{ImageLoader, RasterImage};
use crate::layout::font_metrics::Font;
use crate::layout::page::{Align, Color, Page, Rect, A4_HEIGHT, A4_WIDTH};
use crate::pdf::{write_document, DocumentMeta};

pub use content::PAGES;

/// Line spacing of multi-line blocks, relative to font size.
const LEADING_FACTOR: f32 = 1.2;

/// Overlay drawn on top of a page background.
#[derive(Debug)]
pub enum Overlay {
    Line {
        text: &'static str,
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Color,
        align: Align,
    },
    /// Left-aligned lines starting at `(x, y)`, each one leading below the last.
    Block {
        lines: &'static [&'static str],
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Color,
    },
}

#[derive(Debug)]
pub struct BrochurePage {
    pub background: &'static str,
    pub overlays: &'static [Overlay],
}

/// Builds one brochure page. `background` is `None` when the image could not be loaded.
pub fn compose_brochure_page(sheet: &BrochurePage, background: Option<Arc<RasterImage>>) -> Page {
    let mut page = Page::new(A4_WIDTH, A4_HEIGHT);

    match background {
        Some(image) => {
            page.image(sheet.background, Rect::new(0.0, 0.0, A4_WIDTH, A4_HEIGHT), image);
        }
        None => {
            page.rect(
                Rect::new(0.0, 0.0, A4_WIDTH, A4_HEIGHT),
                Color::LIGHT_GREY,
                true,
            );
            page.text(
                format!("Missing image: {}", sheet.background),
                100.0,
                A4_HEIGHT - 100.0,
                Font::Helvetica,
                12.0,
                Color::RED,
                Align::Left,
            );
        }
    }

    for overlay in sheet.overlays {
        match overlay {
            Overlay::Line {
                text,
                x,
                y,
                font,
                size,
                color,
                align,
            } => page.text(*text, *x, *y, *font, *size, *color, *align),
            Overlay::Block {
                lines,
                x,
                y,
                font,
                size,
                color,
            } => {
                let leading = size * LEADING_FACTOR;
                for (i, line) in lines.iter().enumerate() {
                    if line.is_empty() {
                        continue;
                    }
                    let baseline = y - leading * i as f32;
                    page.text(*line, *x, baseline, *font, *size, *color, Align::Left);
                }
            }
        }
    }

    page
}

/// Renders the full brochure from the backgrounds in `dir`.
pub async fn render_brochure(dir: &Path, loader: &ImageLoader) -> Result<Vec<u8>, AppError> {
    let mut pages = Vec::with_capacity(PAGES.len());

    for sheet in PAGES {
        let background = match loader.load_file(&dir.join(sheet.background)).await {
            Ok(raster) => Some(Arc::new(raster)),
            Err(e) => {
                warn!("Brochure background '{}' unavailable: {e}", sheet.background);
                None
            }
        };
        pages.push(compose_brochure_page(sheet, background));
    }

    let meta = DocumentMeta {
        title: "Company Catalog".to_string(),
    };
    let bytes = tokio::task::spawn_blocking(move || write_document(&meta, &pages))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF write: {e}")))??;

    info!("Rendered company catalog: {} pages, {} bytes", PAGES.len(), bytes.len());
    Ok(bytes)
}
