use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::pipeline::{filter_and_sort, JobFilter};
use crate::matching::stats::{compute_stats, urgent_jobs, DashboardStats};
use crate::models::job::{Job, ProcessedJob};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct FetchQuery {
    pub keyword: Option<String>,
}

/// GET /api/jobs?keyword=<string>
///
/// Proxies the configured job source and commits the result to the
/// repository. The fetch itself runs without holding the repository lock;
/// the commit is generation-guarded so a slower, older fetch can never
/// overwrite a newer one.
pub async fn handle_fetch_jobs(
    State(state): State<AppState>,
    Query(params): Query<FetchQuery>,
) -> Result<Json<Vec<Job>>, AppError> {
    let keyword = params.keyword.unwrap_or_else(|| "frontend".to_string());

    let gen = state.repo.write().await.begin_fetch();
    let result = state.source.fetch(&keyword).await;

    let mut repo = state.repo.write().await;
    match result {
        Ok(jobs) => {
            repo.commit_fetch(gen, Ok(jobs));
            Ok(Json(repo.jobs().to_vec()))
        }
        Err(e) => {
            let message = format!("Failed to fetch jobs: {e}");
            repo.commit_fetch(gen, Err(message.clone()));
            Err(AppError::Upstream(message))
        }
    }
}

#[derive(Serialize)]
pub struct JobDetailResponse {
    #[serde(flatten)]
    pub job: ProcessedJob,
    pub bookmarked: bool,
    pub applied: bool,
    pub note: Option<String>,
    /// Description with the user's keywords wrapped in `<mark>` spans.
    pub highlighted_description: String,
}

/// GET /api/jobs/:id
/// Resolves a job from the current in-memory collection; an unknown id is a
/// distinct not-found response, never a crash.
pub async fn handle_job_detail(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<JobDetailResponse>, AppError> {
    let repo = state.repo.read().await;
    let processed = repo
        .job_by_id(id)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;

    let preferences = state.preferences.read().await;
    let applications = state.applications.read().await;

    Ok(Json(JobDetailResponse {
        highlighted_description: repo.highlighter().apply(&processed.job.description),
        bookmarked: preferences.is_bookmarked(id),
        applied: applications.has_applied(id),
        note: preferences.note(id).map(|n| n.to_string()),
        job: processed.clone(),
    }))
}

/// GET /api/jobs/matches
/// The filter/sort pipeline over the cached processed collection.
pub async fn handle_matches(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> Json<Vec<ProcessedJob>> {
    let repo = state.repo.read().await;
    Json(filter_and_sort(repo.processed(), &filter))
}

/// GET /api/jobs/urgent
pub async fn handle_urgent(State(state): State<AppState>) -> Json<Vec<ProcessedJob>> {
    let repo = state.repo.read().await;
    let today = state.clock.today();
    Json(
        urgent_jobs(repo.processed(), today)
            .into_iter()
            .cloned()
            .collect(),
    )
}

#[derive(Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: DashboardStats,
    /// Message of the most recent failed fetch, if the list is stale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /api/stats
pub async fn handle_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let repo = state.repo.read().await;
    Json(StatsResponse {
        stats: compute_stats(repo.processed(), state.clock.today()),
        error: repo.error().map(|e| e.to_string()),
    })
}

// ── user keywords ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct KeywordBody {
    pub keyword: String,
}

/// GET /api/keywords
pub async fn handle_list_keywords(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.repo.read().await.user_keywords().to_vec())
}

/// PUT /api/keywords — wholesale replace; rescoring completes before the
/// response is sent.
pub async fn handle_replace_keywords(
    State(state): State<AppState>,
    Json(keywords): Json<Vec<String>>,
) -> Result<Json<Vec<String>>, AppError> {
    if keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(AppError::Validation("keywords must not be blank".to_string()));
    }
    let mut repo = state.repo.write().await;
    repo.set_user_keywords(keywords);
    Ok(Json(repo.user_keywords().to_vec()))
}

/// POST /api/keywords
pub async fn handle_add_keyword(
    State(state): State<AppState>,
    Json(body): Json<KeywordBody>,
) -> Result<(StatusCode, Json<Vec<String>>), AppError> {
    let keyword = body.keyword.trim().to_string();
    if keyword.is_empty() {
        return Err(AppError::Validation("keyword must not be blank".to_string()));
    }
    let mut repo = state.repo.write().await;
    repo.add_keyword(keyword);
    Ok((StatusCode::CREATED, Json(repo.user_keywords().to_vec())))
}

/// DELETE /api/keywords/:keyword — idempotent.
pub async fn handle_remove_keyword(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Json<Vec<String>> {
    let mut repo = state.repo.write().await;
    repo.remove_keyword(&keyword);
    Json(repo.user_keywords().to_vec())
}
