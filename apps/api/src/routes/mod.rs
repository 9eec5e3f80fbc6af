pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs: provider proxy, cached views, detail
        .route("/api/jobs", get(jobs::handle_fetch_jobs))
        .route("/api/jobs/matches", get(jobs::handle_matches))
        .route("/api/jobs/urgent", get(jobs::handle_urgent))
        .route("/api/jobs/:id", get(jobs::handle_job_detail))
        .route("/api/jobs/:id/note", put(profile::handle_set_note))
        .route("/api/stats", get(jobs::handle_stats))
        // User keywords
        .route(
            "/api/keywords",
            get(jobs::handle_list_keywords)
                .put(jobs::handle_replace_keywords)
                .post(jobs::handle_add_keyword),
        )
        .route("/api/keywords/:keyword", delete(jobs::handle_remove_keyword))
        // Bookmarks and notes
        .route(
            "/api/bookmarks",
            get(profile::handle_list_bookmarks).delete(profile::handle_clear_bookmarks),
        )
        .route(
            "/api/bookmarks/:job_id/toggle",
            post(profile::handle_toggle_bookmark),
        )
        .route(
            "/api/notes",
            get(profile::handle_list_notes).delete(profile::handle_clear_notes),
        )
        // Applications
        .route(
            "/api/applications",
            get(profile::handle_list_applications).post(profile::handle_apply),
        )
        .route(
            "/api/applications/stats",
            get(profile::handle_application_stats),
        )
        .route(
            "/api/applications/:job_id",
            patch(profile::handle_update_application).delete(profile::handle_remove_application),
        )
        // Resumes
        .route(
            "/api/resumes",
            get(profile::handle_list_resumes).post(profile::handle_add_resume),
        )
        .route(
            "/api/resumes/:id",
            patch(profile::handle_update_resume).delete(profile::handle_remove_resume),
        )
        // Preferences
        .route("/api/preferences", get(profile::handle_get_preferences))
        .route("/api/preferences/theme", put(profile::handle_set_theme))
        .with_state(state)
}
