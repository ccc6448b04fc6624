//! Axum route handlers for settings and template selection.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::routes::lock_store;
use crate::schema::registry::{self, TemplateDefinition, TemplateId};
use crate::schema::ui::{control_groups, ControlGroup};
use crate::settings::value::{SettingNode, SettingValue};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub template: TemplateId,
    pub settings: SettingNode,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingRequest {
    /// Dotted leaf path, e.g. "typography.heading.fontSize".
    pub path: String,
    /// Scalar JSON value (number, string, or bool).
    pub value: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectTemplateRequest {
    pub template_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateStateResponse {
    pub template_id: TemplateId,
    pub dialog_open: bool,
}

#[derive(Debug, Deserialize)]
pub struct DialogRequest {
    pub open: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/settings
pub async fn handle_get_settings(
    State(state): State<AppState>,
) -> Result<Json<SettingsResponse>, AppError> {
    let store = lock_store(&state)?;
    Ok(Json(SettingsResponse {
        template: store.template(),
        settings: store.settings().clone(),
    }))
}

/// PATCH /api/v1/settings
///
/// Writes one leaf through the path accessor. Only scalar values are
/// accepted; nested objects arrive via template application, never here.
pub async fn handle_update_setting(
    State(state): State<AppState>,
    Json(request): Json<UpdateSettingRequest>,
) -> Result<Json<SettingsResponse>, AppError> {
    if request.path.is_empty() {
        return Err(AppError::Validation("path cannot be empty".to_string()));
    }
    let value: SettingValue = serde_json::from_value(request.value)
        .map_err(|_| AppError::Validation("value must be a number, string, or boolean".to_string()))?;

    let mut store = lock_store(&state)?;
    store.update_setting(&request.path, value);
    Ok(Json(SettingsResponse {
        template: store.template(),
        settings: store.settings().clone(),
    }))
}

/// GET /api/v1/settings/controls
///
/// The schema-driven settings UI: control groups for the active template,
/// bound to current values.
pub async fn handle_get_controls(
    State(state): State<AppState>,
) -> Result<Json<Vec<ControlGroup>>, AppError> {
    let store = lock_store(&state)?;
    let definition = registry::definition(store.template());
    Ok(Json(control_groups(&definition.settings, store.settings())))
}

/// GET /api/v1/templates
pub async fn handle_get_templates() -> Json<&'static [TemplateDefinition]> {
    Json(registry::catalog())
}

/// GET /api/v1/template
pub async fn handle_get_template(
    State(state): State<AppState>,
) -> Result<Json<TemplateStateResponse>, AppError> {
    let store = lock_store(&state)?;
    Ok(Json(TemplateStateResponse {
        template_id: store.template(),
        dialog_open: store.dialog_open(),
    }))
}

/// PUT /api/v1/template
///
/// Applies a template: the configuration is replaced wholesale with the
/// template's declared defaults. An unknown id is a no-op — the previous
/// selection is retained and returned.
pub async fn handle_select_template(
    State(state): State<AppState>,
    Json(request): Json<SelectTemplateRequest>,
) -> Result<Json<TemplateStateResponse>, AppError> {
    let mut store = lock_store(&state)?;
    if let Some(template) = TemplateId::parse(&request.template_id) {
        store.apply_template(template);
    }
    Ok(Json(TemplateStateResponse {
        template_id: store.template(),
        dialog_open: store.dialog_open(),
    }))
}

/// PUT /api/v1/template/dialog
pub async fn handle_set_dialog(
    State(state): State<AppState>,
    Json(request): Json<DialogRequest>,
) -> Result<Json<TemplateStateResponse>, AppError> {
    let mut store = lock_store(&state)?;
    store.set_dialog_open(request.open);
    Ok(Json(TemplateStateResponse {
        template_id: store.template(),
        dialog_open: store.dialog_open(),
    }))
}
