//! Axum route handlers for resume data.
//!
//! Every mutation goes through the store under the state lock: lock, apply,
//! persist, respond with the updated document. The store never rejects a
//! write, so the only failures here are transport-level.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{EducationEntry, ExperienceEntry, ResumeData, Section};
use crate::render::{render, LayoutTree};
use crate::routes::lock_store;
use crate::settings::store::{EducationPatch, ExperiencePatch, PersonalInfoPatch};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewExperienceRequest {
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewEducationRequest {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: Option<String>,
    pub honors: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEntryResponse {
    pub id: Uuid,
    pub resume: ResumeData,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub order: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct SkillsRequest {
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SectionOrderRequest {
    pub order: Vec<Section>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Result<Json<ResumeData>, AppError> {
    let store = lock_store(&state)?;
    Ok(Json(store.resume().clone()))
}

/// GET /api/v1/layout
///
/// The laid-out visual tree for the current resume, settings, and template —
/// the same structure the PDF export consumes.
pub async fn handle_get_layout(State(state): State<AppState>) -> Result<Json<LayoutTree>, AppError> {
    let store = lock_store(&state)?;
    let tree = render(store.resume(), store.settings(), store.template());
    Ok(Json(tree))
}

/// PATCH /api/v1/resume/personal
pub async fn handle_update_personal(
    State(state): State<AppState>,
    Json(patch): Json<PersonalInfoPatch>,
) -> Result<Json<ResumeData>, AppError> {
    let mut store = lock_store(&state)?;
    store.update_personal_info(patch);
    Ok(Json(store.resume().clone()))
}

/// POST /api/v1/resume/experience
pub async fn handle_add_experience(
    State(state): State<AppState>,
    Json(request): Json<NewExperienceRequest>,
) -> Result<Json<AddEntryResponse>, AppError> {
    let mut store = lock_store(&state)?;
    let id = store.add_experience(ExperienceEntry {
        id: Uuid::nil(), // store assigns
        company: request.company,
        position: request.position,
        location: request.location,
        start_date: request.start_date,
        end_date: request.end_date,
        description: request.description,
    });
    Ok(Json(AddEntryResponse {
        id,
        resume: store.resume().clone(),
    }))
}

/// PATCH /api/v1/resume/experience/:id
pub async fn handle_update_experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ExperiencePatch>,
) -> Result<Json<ResumeData>, AppError> {
    let mut store = lock_store(&state)?;
    store.update_experience(id, patch);
    Ok(Json(store.resume().clone()))
}

/// DELETE /api/v1/resume/experience/:id
pub async fn handle_remove_experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeData>, AppError> {
    let mut store = lock_store(&state)?;
    store.remove_experience(id);
    Ok(Json(store.resume().clone()))
}

/// PUT /api/v1/resume/experience/order
pub async fn handle_reorder_experience(
    State(state): State<AppState>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<ResumeData>, AppError> {
    let mut store = lock_store(&state)?;
    store.reorder_experience(&request.order);
    Ok(Json(store.resume().clone()))
}

/// POST /api/v1/resume/education
pub async fn handle_add_education(
    State(state): State<AppState>,
    Json(request): Json<NewEducationRequest>,
) -> Result<Json<AddEntryResponse>, AppError> {
    let mut store = lock_store(&state)?;
    let id = store.add_education(EducationEntry {
        id: Uuid::nil(), // store assigns
        institution: request.institution,
        degree: request.degree,
        field: request.field,
        start_date: request.start_date,
        end_date: request.end_date,
        gpa: request.gpa,
        honors: request.honors,
    });
    Ok(Json(AddEntryResponse {
        id,
        resume: store.resume().clone(),
    }))
}

/// PATCH /api/v1/resume/education/:id
pub async fn handle_update_education(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<EducationPatch>,
) -> Result<Json<ResumeData>, AppError> {
    let mut store = lock_store(&state)?;
    store.update_education(id, patch);
    Ok(Json(store.resume().clone()))
}

/// DELETE /api/v1/resume/education/:id
pub async fn handle_remove_education(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeData>, AppError> {
    let mut store = lock_store(&state)?;
    store.remove_education(id);
    Ok(Json(store.resume().clone()))
}

/// PUT /api/v1/resume/education/order
pub async fn handle_reorder_education(
    State(state): State<AppState>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<ResumeData>, AppError> {
    let mut store = lock_store(&state)?;
    store.reorder_education(&request.order);
    Ok(Json(store.resume().clone()))
}

/// PUT /api/v1/resume/skills
///
/// Replaces the skill list. This is the input surface that enforces
/// uniqueness: entries are trimmed, empties dropped, and duplicates
/// (case-insensitive) removed before they reach the store.
pub async fn handle_update_skills(
    State(state): State<AppState>,
    Json(request): Json<SkillsRequest>,
) -> Result<Json<ResumeData>, AppError> {
    let mut skills: Vec<String> = Vec::with_capacity(request.skills.len());
    for skill in request.skills {
        let trimmed = skill.trim();
        if trimmed.is_empty() {
            continue;
        }
        if skills.iter().any(|s| s.eq_ignore_ascii_case(trimmed)) {
            continue;
        }
        skills.push(trimmed.to_string());
    }

    let mut store = lock_store(&state)?;
    store.update_skills(skills);
    Ok(Json(store.resume().clone()))
}

/// PUT /api/v1/resume/sections/order
pub async fn handle_reorder_sections(
    State(state): State<AppState>,
    Json(request): Json<SectionOrderRequest>,
) -> Result<Json<ResumeData>, AppError> {
    let mut store = lock_store(&state)?;
    store.reorder_sections(&request.order);
    Ok(Json(store.resume().clone()))
}
