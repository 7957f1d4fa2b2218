pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::home_handler))
        .route("/health", get(health::health_handler))
        // Product pages
        .route(
            "/generate-catalog-pdf",
            post(handlers::handle_generate_catalog_pdf),
        )
        .route(
            "/generate-catalog-pdf/",
            post(handlers::handle_generate_catalog_pdf),
        )
        .route(
            "/generate-product-page",
            post(handlers::handle_generate_product_page),
        )
        // Company catalog
        .route("/generate-pdf", post(handlers::handle_generate_brochure))
        .with_state(state)
}
