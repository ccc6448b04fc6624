pub mod export;
pub mod health;
pub mod resume;
pub mod settings;

use std::sync::MutexGuard;

use anyhow::anyhow;
use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::errors::AppError;
use crate::settings::store::ResumeStore;
use crate::state::AppState;

/// Locks the store for one read-modify-write step. A poisoned lock means a
/// handler panicked mid-mutation; surface that as an internal error instead
/// of propagating the panic.
pub(crate) fn lock_store(state: &AppState) -> Result<MutexGuard<'_, ResumeStore>, AppError> {
    state
        .store
        .lock()
        .map_err(|_| AppError::Internal(anyhow!("resume store lock poisoned")))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume document
        .route("/api/v1/resume", get(resume::handle_get_resume))
        .route("/api/v1/resume/personal", patch(resume::handle_update_personal))
        .route("/api/v1/resume/experience", post(resume::handle_add_experience))
        .route(
            "/api/v1/resume/experience/order",
            put(resume::handle_reorder_experience),
        )
        .route(
            "/api/v1/resume/experience/:id",
            patch(resume::handle_update_experience).delete(resume::handle_remove_experience),
        )
        .route("/api/v1/resume/education", post(resume::handle_add_education))
        .route(
            "/api/v1/resume/education/order",
            put(resume::handle_reorder_education),
        )
        .route(
            "/api/v1/resume/education/:id",
            patch(resume::handle_update_education).delete(resume::handle_remove_education),
        )
        .route("/api/v1/resume/skills", put(resume::handle_update_skills))
        .route(
            "/api/v1/resume/sections/order",
            put(resume::handle_reorder_sections),
        )
        // Settings + templates
        .route(
            "/api/v1/settings",
            get(settings::handle_get_settings).patch(settings::handle_update_setting),
        )
        .route("/api/v1/settings/controls", get(settings::handle_get_controls))
        .route("/api/v1/templates", get(settings::handle_get_templates))
        .route(
            "/api/v1/template",
            get(settings::handle_get_template).put(settings::handle_select_template),
        )
        .route("/api/v1/template/dialog", put(settings::handle_set_dialog))
        // Layout + export
        .route("/api/v1/layout", get(resume::handle_get_layout))
        .route("/api/v1/export/pdf", post(export::handle_export_pdf))
        .with_state(state)
}
