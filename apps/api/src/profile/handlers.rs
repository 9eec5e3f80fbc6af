use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{ApplicationRecord, ApplicationStatus, Resume};
use crate::profile::applications::ApplicationStats;
use crate::state::AppState;

// ── bookmarks ───────────────────────────────────────────────────────────

/// GET /api/bookmarks
pub async fn handle_list_bookmarks(State(state): State<AppState>) -> Json<Vec<u64>> {
    Json(state.preferences.read().await.bookmarks().to_vec())
}

/// POST /api/bookmarks/:job_id/toggle
pub async fn handle_toggle_bookmark(
    State(state): State<AppState>,
    Path(job_id): Path<u64>,
) -> Json<Value> {
    let bookmarked = state.preferences.write().await.toggle_bookmark(job_id);
    Json(json!({ "job_id": job_id, "bookmarked": bookmarked }))
}

/// DELETE /api/bookmarks
pub async fn handle_clear_bookmarks(State(state): State<AppState>) -> StatusCode {
    state.preferences.write().await.clear_bookmarks();
    StatusCode::NO_CONTENT
}

// ── notes ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct NoteBody {
    pub note: String,
}

/// PUT /api/jobs/:id/note — a blank note removes the entry.
pub async fn handle_set_note(
    State(state): State<AppState>,
    Path(job_id): Path<u64>,
    Json(body): Json<NoteBody>,
) -> Json<Value> {
    let mut preferences = state.preferences.write().await;
    preferences.set_note(job_id, &body.note);
    Json(json!({
        "job_id": job_id,
        "note": preferences.note(job_id),
    }))
}

/// GET /api/notes
pub async fn handle_list_notes(State(state): State<AppState>) -> Json<BTreeMap<u64, String>> {
    Json(state.preferences.read().await.notes().clone())
}

/// DELETE /api/notes
pub async fn handle_clear_notes(State(state): State<AppState>) -> StatusCode {
    state.preferences.write().await.clear_notes();
    StatusCode::NO_CONTENT
}

// ── preferences ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PreferencesResponse {
    pub dark_mode: bool,
    pub bookmark_count: usize,
    pub notes_count: usize,
}

/// GET /api/preferences
pub async fn handle_get_preferences(State(state): State<AppState>) -> Json<PreferencesResponse> {
    let preferences = state.preferences.read().await;
    Json(PreferencesResponse {
        dark_mode: preferences.dark_mode(),
        bookmark_count: preferences.bookmarks().len(),
        notes_count: preferences.notes().len(),
    })
}

#[derive(Deserialize)]
pub struct ThemeBody {
    pub dark_mode: bool,
}

/// PUT /api/preferences/theme
pub async fn handle_set_theme(
    State(state): State<AppState>,
    Json(body): Json<ThemeBody>,
) -> Json<Value> {
    state.preferences.write().await.set_dark_mode(body.dark_mode);
    Json(json!({ "dark_mode": body.dark_mode }))
}

// ── applications ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ApplyBody {
    pub job_id: u64,
    pub status: Option<ApplicationStatus>,
    #[serde(default)]
    pub notes: String,
    pub resume_id: Option<Uuid>,
}

/// POST /api/applications
///
/// Records an application. One logical record per job id: applying again
/// replaces the existing record. A referenced resume must exist; with no
/// resume given, the default resume (if any) is used — quick apply.
pub async fn handle_apply(
    State(state): State<AppState>,
    Json(body): Json<ApplyBody>,
) -> Result<(StatusCode, Json<ApplicationRecord>), AppError> {
    let mut applications = state.applications.write().await;

    let resume_id = match body.resume_id {
        Some(resume_id) => {
            if applications.resume(resume_id).is_none() {
                return Err(AppError::Validation(format!(
                    "Resume {resume_id} does not exist"
                )));
            }
            Some(resume_id)
        }
        None => applications.default_resume().map(|r| r.id),
    };

    let record = applications.upsert_application(ApplicationRecord {
        job_id: body.job_id,
        applied_at: state.clock.now(),
        status: body.status.unwrap_or(ApplicationStatus::Applied),
        notes: body.notes,
        resume_id,
    });
    Ok((StatusCode::CREATED, Json(record)))
}

#[derive(Deserialize)]
pub struct ApplicationsQuery {
    pub status: Option<ApplicationStatus>,
}

/// GET /api/applications?status=
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Query(params): Query<ApplicationsQuery>,
) -> Json<Vec<ApplicationRecord>> {
    let applications = state.applications.read().await;
    let records = match params.status {
        Some(status) => applications
            .by_status(status)
            .into_iter()
            .cloned()
            .collect(),
        None => applications.history().to_vec(),
    };
    Json(records)
}

/// GET /api/applications/stats
pub async fn handle_application_stats(State(state): State<AppState>) -> Json<ApplicationStats> {
    Json(state.applications.read().await.stats())
}

#[derive(Deserialize)]
pub struct StatusBody {
    pub status: ApplicationStatus,
    pub notes: Option<String>,
}

/// PATCH /api/applications/:job_id
pub async fn handle_update_application(
    State(state): State<AppState>,
    Path(job_id): Path<u64>,
    Json(body): Json<StatusBody>,
) -> Result<Json<ApplicationRecord>, AppError> {
    state
        .applications
        .write()
        .await
        .update_status(job_id, body.status, body.notes)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No application for job {job_id}")))
}

/// DELETE /api/applications/:job_id
pub async fn handle_remove_application(
    State(state): State<AppState>,
    Path(job_id): Path<u64>,
) -> Result<StatusCode, AppError> {
    if state.applications.write().await.remove_application(job_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("No application for job {job_id}")))
    }
}

// ── resumes ─────────────────────────────────────────────────────────────

/// GET /api/resumes
pub async fn handle_list_resumes(State(state): State<AppState>) -> Json<Vec<Resume>> {
    Json(state.applications.read().await.resumes().to_vec())
}

#[derive(Deserialize)]
pub struct AddResumeBody {
    pub name: String,
    pub file_url: String,
    #[serde(default)]
    pub is_default: bool,
}

/// POST /api/resumes
pub async fn handle_add_resume(
    State(state): State<AppState>,
    Json(body): Json<AddResumeBody>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::Validation("resume name must not be blank".to_string()));
    }
    let resume = state.applications.write().await.add_resume(
        body.name,
        body.file_url,
        body.is_default,
        state.clock.now(),
    );
    Ok((StatusCode::CREATED, Json(resume)))
}

#[derive(Deserialize)]
pub struct UpdateResumeBody {
    pub name: Option<String>,
    /// Only `true` has an effect: the way to unset a default is to promote
    /// another resume.
    pub is_default: Option<bool>,
}

/// PATCH /api/resumes/:id
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateResumeBody>,
) -> Result<Json<Resume>, AppError> {
    let mut applications = state.applications.write().await;
    if applications.resume(id).is_none() {
        return Err(AppError::NotFound(format!("Resume {id} not found")));
    }

    if let Some(name) = body.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("resume name must not be blank".to_string()));
        }
        applications.rename_resume(id, name);
    }
    if body.is_default == Some(true) {
        applications.set_default_resume(id);
    }

    let resume = applications
        .resume(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(Json(resume))
}

/// DELETE /api/resumes/:id
pub async fn handle_remove_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.applications.write().await.remove_resume(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Resume {id} not found")))
    }
}
