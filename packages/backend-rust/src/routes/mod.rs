mod session;

use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/plans/:plan_id/session", get(session::get_session))
        .route(
            "/api/plans/:plan_id/responses",
            post(session::submit_response),
        )
        .route(
            "/api/plans/:plan_id/lessons/:lesson_id/complete-day",
            post(session::complete_day),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
