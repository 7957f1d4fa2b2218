mod brochure;
mod catalog;
mod config;
mod errors;
mod images;
mod layout;
mod models;
mod pdf;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::naming::FileSequence;
use crate::catalog::render::CatalogRenderer;
use crate::config::Config;
use crate::images::ImageLoader;
use crate::layout::{LayoutConfig, PlacementTable};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Catalog API v{}", env!("CARGO_PKG_VERSION"));

    // Placement slots: built-in production table unless a file overrides it
    let slots = match &config.placements_file {
        Some(path) => PlacementTable::from_json_file(path)?,
        None => PlacementTable::production(),
    };
    if slots.is_empty() {
        warn!("Placement table is empty; only images with explicit rectangles will be drawn");
    } else {
        info!("Placement table loaded ({} slots)", slots.len());
    }

    let layout = LayoutConfig {
        slots,
        max_image_box: config.max_image_box,
        ..LayoutConfig::default()
    };

    // Image loader (shared HTTP client with bounded fetch timeout)
    let loader = ImageLoader::new(
        &config.image_base_dir,
        Duration::from_secs(config.image_fetch_timeout_secs),
    )?;
    info!(
        "Image loader initialized (base dir: {}, timeout: {}s)",
        config.image_base_dir.display(),
        config.image_fetch_timeout_secs
    );

    let renderer = Arc::new(CatalogRenderer::new(
        layout,
        loader,
        config.verbose_render_log,
    ));

    let sequence = Arc::new(FileSequence::new(&config.counter_file, config.counter_start));
    info!(
        "Filename policy: {:?} (counter file: {})",
        config.filename_policy,
        config.counter_file.display()
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        renderer,
        sequence,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
