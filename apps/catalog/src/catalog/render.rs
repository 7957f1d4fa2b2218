//! Product render pipeline: resolve placements → load images → compose → serialize.
//!
//! Image problems (no placement, missing file, bad URL, undecodable bytes) are
//! logged per image and the page is rendered without it. Only a PDF
//! serialization failure fails the request, and then no bytes are returned.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::images::ImageLoader;
use crate::layout::composer::{compose_product_page, LayoutConfig, PlacedImage};
use crate::layout::page::{DrawOp, Page};
use crate::layout::placement::PlacementResolver;
use crate::models::{ImageRef, ProductRecord};
use crate::pdf::{write_document, DocumentMeta};

/// Per-call switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Shrink resolved rectangles into the layout's maximum image box.
    pub scale_to_fit: bool,
}

pub struct CatalogRenderer {
    layout: Arc<LayoutConfig>,
    resolver: PlacementResolver,
    loader: ImageLoader,
    verbose: bool,
}

impl CatalogRenderer {
    pub fn new(layout: LayoutConfig, loader: ImageLoader, verbose: bool) -> Self {
        let resolver = PlacementResolver::new(layout.slots.clone(), layout.max_image_box);
        Self {
            layout: Arc::new(layout),
            resolver,
            loader,
            verbose,
        }
    }

    pub fn loader(&self) -> &ImageLoader {
        &self.loader
    }

    /// Resolves and loads every image, keeping input order and dropping failures.
    pub async fn place_images(
        &self,
        images: &[ImageRef],
        options: RenderOptions,
        render_id: Uuid,
    ) -> Vec<PlacedImage> {
        let mut placed = Vec::with_capacity(images.len());

        for image in images {
            let Some(placement) = self.resolver.resolve(image, options.scale_to_fit) else {
                continue;
            };

            match self.loader.load(&image.path).await {
                Ok(raster) => placed.push(PlacedImage {
                    name: placement.key,
                    rect: placement.rect,
                    image: Arc::new(raster),
                }),
                Err(e) => {
                    warn!("[{render_id}] Skipping image '{}': {e}", image.path);
                }
            }
        }

        placed
    }

    /// Builds the product page without serializing it.
    pub async fn build_page(
        &self,
        record: &ProductRecord,
        options: RenderOptions,
        render_id: Uuid,
    ) -> Page {
        let placed = self.place_images(&record.images, options, render_id).await;
        let page = compose_product_page(record, &placed, &self.layout);

        if self.verbose {
            for op in &page.ops {
                log_op(render_id, op);
            }
        }

        page
    }

    /// Renders a complete single-page PDF for `record`.
    pub async fn render(
        &self,
        record: &ProductRecord,
        options: RenderOptions,
    ) -> Result<Vec<u8>, AppError> {
        let render_id = Uuid::new_v4();
        info!(
            "[{render_id}] Rendering catalog page for '{}' ({} images requested, scale_to_fit={})",
            record.name,
            record.images.len(),
            options.scale_to_fit
        );

        let page = self.build_page(record, options, render_id).await;
        let drawn = page.image_count();
        let meta = DocumentMeta {
            title: record.name.clone(),
        };

        let bytes = tokio::task::spawn_blocking(move || write_document(&meta, &[page]))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF write: {e}")))??;

        info!(
            "[{render_id}] Rendered {} bytes, {drawn}/{} images drawn",
            bytes.len(),
            record.images.len()
        );
        Ok(bytes)
    }
}

fn log_op(render_id: Uuid, op: &DrawOp) {
    match op {
        DrawOp::Text { text, x, y, font, .. } => {
            info!("[{render_id}] text {font:?} ({x:.1}, {y:.1}) {text:?}");
        }
        DrawOp::Image { name, rect, .. } => {
            info!("[{render_id}] image {name} at {rect:?}");
        }
        DrawOp::Rect { rect, fill, .. } => {
            debug!("[{render_id}] rect fill={fill} at {rect:?}");
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
