//! Axum route handlers for the catalog documents.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use tracing::info;

use crate::brochure::render_brochure;
use crate::catalog::naming::suggest_filename;
use crate::catalog::render::RenderOptions;
use crate::errors::AppError;
use crate::models::ProductRecord;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct RenderQuery {
    /// Overrides the configured `SCALE_TO_FIT` default for this request.
    pub scale_to_fit: Option<bool>,
}

/// Browser form fields. Multi-line fields hold one entry per line.
#[derive(Debug, Deserialize)]
pub struct ProductPageForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub specifications: String,
}

impl ProductPageForm {
    pub fn into_record(self) -> ProductRecord {
        ProductRecord {
            name: self.name,
            description: split_lines(&self.description),
            specifications: split_lines(&self.specifications),
            ..Default::default()
        }
    }
}

fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn pdf_response(bytes: Vec<u8>, disposition: &str, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("{disposition}; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate-catalog-pdf
///
/// Renders one product page. The catalog number is taken only after the
/// document has been rendered, so a failed render leaves the sequence untouched.
pub async fn handle_generate_catalog_pdf(
    State(state): State<AppState>,
    Query(query): Query<RenderQuery>,
    Json(record): Json<ProductRecord>,
) -> Result<Response, AppError> {
    record.validate()?;

    let options = RenderOptions {
        scale_to_fit: query.scale_to_fit.unwrap_or(state.config.scale_to_fit),
    };
    let bytes = state.renderer.render(&record, options).await?;
    let filename = suggest_filename(state.config.filename_policy, state.sequence.as_ref()).await?;

    info!("Serving '{}' as {filename}", record.name);
    Ok(pdf_response(bytes, "attachment", &filename))
}

/// POST /generate-product-page
pub async fn handle_generate_product_page(
    State(state): State<AppState>,
    Form(form): Form<ProductPageForm>,
) -> Result<Response, AppError> {
    let record = form.into_record();
    record.validate()?;

    let bytes = state
        .renderer
        .render(&record, RenderOptions::default())
        .await?;
    Ok(pdf_response(bytes, "inline", "product_page.pdf"))
}

/// POST /generate-pdf
///
/// The fixed seven-page company catalog.
pub async fn handle_generate_brochure(State(state): State<AppState>) -> Result<Response, AppError> {
    let bytes = render_brochure(&state.config.brochure_dir, state.renderer.loader()).await?;
    Ok(pdf_response(bytes, "attachment", "company_catalog.pdf"))
}
