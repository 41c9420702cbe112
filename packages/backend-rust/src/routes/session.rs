use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lingua_algo::{Grade, SchedulingState};

use crate::model::ItemType;
use crate::response::AppError;
use crate::services::mastery::{CycleOutcome, ItemQueue};
use crate::services::session;
use crate::state::AppState;

#[derive(Serialize)]
struct SuccessResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl<T> SuccessResponse<T> {
    fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionQuery {
    /// Student clock, RFC 3339; server time when absent
    now: Option<DateTime<Utc>>,
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
    Query(query): Query<SessionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let now = query.now.unwrap_or_else(Utc::now);
    let mut rng = rand::thread_rng();
    let session = session::build_session(
        state.content.as_ref(),
        state.plans.as_ref(),
        &plan_id,
        now,
        &mut rng,
    )?;
    Ok(Json(SuccessResponse::new(session)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    lesson_id: String,
    item_id: String,
    #[allow(dead_code)]
    item_type: ItemType,
    grade: u8,
    timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponseBody {
    updated_scheduling_state: SchedulingState,
    new_queue: ItemQueue,
}

pub async fn submit_response(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
    Json(request): Json<SubmitRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Grade validation happens here, before the retention engine runs.
    let grade = Grade::new(request.grade)
        .ok_or_else(|| AppError::validation(format!("grade {} is outside 0-5", request.grade)))?;
    let now = request.timestamp.unwrap_or_else(Utc::now);

    let outcome = session::submit_response(
        state.plans.as_ref(),
        &state.policy,
        &plan_id,
        &request.lesson_id,
        &request.item_id,
        grade,
        now,
    )?;

    Ok(Json(SuccessResponse::new(SubmitResponseBody {
        updated_scheduling_state: outcome.scheduling,
        new_queue: outcome.queue,
    })))
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompleteDayRequest {
    timestamp: Option<DateTime<Utc>>,
}

pub async fn complete_day(
    State(state): State<AppState>,
    Path((plan_id, lesson_id)): Path<(String, String)>,
    body: Option<Json<CompleteDayRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let now = request.timestamp.unwrap_or_else(Utc::now);

    let outcome: CycleOutcome = session::complete_day(
        state.plans.as_ref(),
        &state.policy,
        &plan_id,
        &lesson_id,
        now,
    )?;

    Ok(Json(SuccessResponse::new(outcome)))
}
