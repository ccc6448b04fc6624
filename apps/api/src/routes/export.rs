//! Axum route handler for PDF export.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use bytes::Bytes;

use crate::errors::AppError;
use crate::export::{pdf_filename, validate_for_export};
use crate::render::render;
use crate::routes::lock_store;
use crate::state::AppState;

/// POST /api/v1/export/pdf
///
/// Validates the export contract (name required), lays out the current
/// document, and forwards the tree to the render backend. The store lock is
/// released before the backend call — rendering must not block mutations.
pub async fn handle_export_pdf(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let (name, tree) = {
        let store = lock_store(&state)?;
        validate_for_export(store.resume())?;
        let tree = render(store.resume(), store.settings(), store.template());
        (store.resume().personal_info.name.clone(), tree)
    };

    let pdf = state.pdf.render_pdf(&tree).await?;
    let filename = pdf_filename(&name);

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, Bytes::from(pdf)))
}
