//! Placement Resolver: decides where (and whether) each product image is drawn.
//!
//! Resolution order for one `ImageRef`:
//! 1. normalized filename matches a registered slot → slot rectangle
//!    (explicit coordinates are ignored)
//! 2. all four explicit coordinates present and non-zero → used verbatim
//! 3. otherwise the image is skipped
//!
//! When scaling is requested the chosen rectangle is shrunk uniformly to fit the
//! configured maximum box. It is never enlarged.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, warn};

use crate::images::is_remote;
use crate::layout::page::Rect;
use crate::models::ImageRef;

// ────────────────────────────────────────────────────────────────────────────
// Slot table
// ────────────────────────────────────────────────────────────────────────────

/// Immutable `normalized key -> rectangle` mapping.
#[derive(Debug, Clone, Default)]
pub struct PlacementTable {
    slots: HashMap<String, Rect>,
}

impl PlacementTable {
    /// Builds a table, normalizing every key the same way image paths are.
    pub fn new<K: AsRef<str>>(slots: impl IntoIterator<Item = (K, Rect)>) -> Self {
        Self {
            slots: slots
                .into_iter()
                .map(|(key, rect)| (normalize_key(key.as_ref()), rect))
                .collect(),
        }
    }

    /// The four slots of the production single-product layout.
    pub fn production() -> Self {
        Self::new([
            ("su2.jpg", Rect::new(430.0, 690.0, 140.0, 110.0)),
            ("raw29.jpg", Rect::new(60.0, 370.0, 300.0, 160.0)),
            ("raw12.jpg", Rect::new(400.0, 140.0, 140.0, 90.0)),
            ("su1.jpg", Rect::new(40.0, 160.0, 350.0, 160.0)),
        ])
    }

    /// Loads a table from a JSON object of `key -> {x, y, w, h}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read placements file {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("Invalid placements file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let slots: HashMap<String, Rect> = serde_json::from_str(raw)?;
        Ok(Self::new(slots))
    }

    pub fn get(&self, key: &str) -> Option<Rect> {
        self.slots.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Normalization and scaling
// ────────────────────────────────────────────────────────────────────────────

/// Reduces an image path or URL to its slot key: the filename stem, lowercased,
/// with all whitespace removed.
///
/// `"RAW29.PNG"`, `"raw29.png"`, `" raw29 .png"` and `"C:\\imgs\\raw29.jpg"`
/// all become `"raw29"`.
pub fn normalize_key(path: &str) -> String {
    let path = if is_remote(path) {
        path.split(['?', '#']).next().unwrap_or(path)
    } else {
        path
    };
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let stem = match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    };
    stem.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Shrinks `rect` uniformly so it fits inside `max_w × max_h`; origin unchanged.
/// `scale = min(max_w / w, max_h / h, 1.0)`.
pub fn scale_to_fit(rect: Rect, max_w: f32, max_h: f32) -> Rect {
    if rect.w <= 0.0 || rect.h <= 0.0 {
        return rect;
    }
    let scale = (max_w / rect.w).min(max_h / rect.h).min(1.0);
    Rect {
        w: rect.w * scale,
        h: rect.h * scale,
        ..rect
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resolver
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PlacementSource {
    Slot,
    Explicit,
}

/// The outcome of resolving one image.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub key: String,
    pub rect: Rect,
    pub source: PlacementSource,
}

#[derive(Debug, Clone)]
pub struct PlacementResolver {
    table: PlacementTable,
    max_box: (f32, f32),
}

impl PlacementResolver {
    pub fn new(table: PlacementTable, max_box: (f32, f32)) -> Self {
        Self { table, max_box }
    }

    /// Returns `None` (and logs why) when the image has neither a slot nor a
    /// complete explicit rectangle.
    pub fn resolve(&self, image: &ImageRef, scale: bool) -> Option<Placement> {
        let key = normalize_key(&image.path);

        let (rect, source) = if let Some(rect) = self.table.get(&key) {
            (rect, PlacementSource::Slot)
        } else if let Some(rect) = image.explicit_rect() {
            (rect, PlacementSource::Explicit)
        } else {
            warn!(
                "Skipping image '{}': no slot for key '{key}' and no complete explicit rectangle",
                image.path
            );
            return None;
        };

        let rect = if scale {
            scale_to_fit(rect, self.max_box.0, self.max_box.1)
        } else {
            rect
        };

        debug!("Placed image '{}' as {key} via {source:?} at {rect:?}", image.path);

        Some(Placement { key, rect, source })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
