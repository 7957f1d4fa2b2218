//! Page model: an ordered list of draw operations on a fixed canvas.
//!
//! Operations are replayed in insertion order by the PDF writer, so anything pushed
//! later paints over what came before. Nothing reads the canvas back.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::images::RasterImage;
use crate::layout::font_metrics::Font;

/// A4 in PostScript points.
pub const A4_WIDTH: f32 = 595.0;
pub const A4_HEIGHT: f32 = 842.0;

/// Axis-aligned rectangle in PDF user space (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Largest rectangle with the given aspect that fits inside `self`, centered.
    pub fn fit_centered(&self, content_w: f32, content_h: f32) -> Rect {
        if content_w <= 0.0 || content_h <= 0.0 {
            return *self;
        }
        let scale = (self.w / content_w).min(self.h / content_h);
        let w = content_w * scale;
        let h = content_h * scale;
        Rect {
            x: self.x + (self.w - w) / 2.0,
            y: self.y + (self.h - h) / 2.0,
            w,
            h,
        }
    }
}

/// RGB fill colour, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const GREY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const LIGHT_GREY: Color = Color::rgb(0.83, 0.83, 0.83);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const DARK_RED: Color = Color::rgb(0.545, 0.0, 0.0);
    pub const DARK_BLUE: Color = Color::rgb(0.0, 0.0, 0.545);
}

/// Horizontal anchor of a text run relative to its `x` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A single drawing instruction.
#[derive(Debug, Clone)]
pub enum DrawOp {
    Text {
        text: String,
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Color,
        align: Align,
    },
    /// `rect` is the exact box the raster is painted into; aspect fitting has
    /// already happened.
    Image {
        name: String,
        rect: Rect,
        image: Arc<RasterImage>,
    },
    Rect {
        rect: Rect,
        color: Color,
        fill: bool,
    },
}

/// One page of output.
#[derive(Debug, Clone)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn a4() -> Self {
        Self::new(A4_WIDTH, A4_HEIGHT)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn text(
        &mut self,
        text: impl Into<String>,
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Color,
        align: Align,
    ) {
        self.ops.push(DrawOp::Text {
            text: text.into(),
            x,
            y,
            font,
            size,
            color,
            align,
        });
    }

    pub fn image(&mut self, name: impl Into<String>, rect: Rect, image: Arc<RasterImage>) {
        self.ops.push(DrawOp::Image {
            name: name.into(),
            rect,
            image,
        });
    }

    pub fn rect(&mut self, rect: Rect, color: Color, fill: bool) {
        self.ops.push(DrawOp::Rect { rect, color, fill });
    }

    /// Text runs in draw order.
    #[cfg(test)]
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn image_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Image { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_centered_wide_content_in_square_box() {
        let slot = Rect::new(0.0, 0.0, 100.0, 100.0);
        let fitted = slot.fit_centered(200.0, 100.0);
        assert!((fitted.w - 100.0).abs() < 1e-4);
        assert!((fitted.h - 50.0).abs() < 1e-4);
        assert!((fitted.y - 25.0).abs() < 1e-4, "should be vertically centered");
        assert!(fitted.x.abs() < 1e-4);
    }

    #[test]
    fn test_fit_centered_upscales_small_content() {
        let slot = Rect::new(10.0, 10.0, 300.0, 160.0);
        let fitted = slot.fit_centered(30.0, 16.0);
        assert!((fitted.w - 300.0).abs() < 1e-3);
        assert!((fitted.h - 160.0).abs() < 1e-3);
    }

    #[test]
    fn test_fit_centered_degenerate_content_keeps_slot() {
        let slot = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(slot.fit_centered(0.0, 10.0), slot);
    }

    #[test]
    fn test_page_texts_preserve_draw_order() {
        let mut page = Page::a4();
        page.text("first", 0.0, 0.0, Font::Helvetica, 9.0, Color::BLACK, Align::Left);
        page.rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::GREY, true);
        page.text("second", 0.0, 0.0, Font::Helvetica, 9.0, Color::BLACK, Align::Left);
        let texts: Vec<&str> = page.texts().collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(page.image_count(), 0);
    }
}
