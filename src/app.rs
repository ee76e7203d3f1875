use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/today", get(handlers::get_today))
        .route("/api/day/:day", get(handlers::get_day))
        .route("/api/view", post(handlers::set_view))
        .route("/api/start", post(handlers::start_plan))
        .route("/api/complete", post(handlers::mark_complete))
        .route("/api/reset", post(handlers::reset_plan))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/sync/export", get(handlers::sync_export))
        .route("/api/sync/preview", post(handlers::sync_preview))
        .route("/api/sync/import", post(handlers::sync_import))
        .route("/api/reminder.ics", get(handlers::reminder))
        .with_state(state)
}
