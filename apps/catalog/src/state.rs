use std::sync::Arc;

use crate::catalog::naming::SequenceProvider;
use crate::catalog::render::CatalogRenderer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Slot table, layout constants and image loader for product pages.
    pub renderer: Arc<CatalogRenderer>,
    /// Source of catalog numbers. Default: counter file. Swap via FILENAME_POLICY / tests.
    pub sequence: Arc<dyn SequenceProvider>,
}
