//! Workout record API routes

use super::parse_id;
use crate::error::ApiError;
use crate::events::{ChangeAction, EntityKind};
use crate::services::{LogRecordInput, RecordService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use chrono::Utc;
use topweight_shared::models::WorkoutRecord;
use topweight_shared::types::{LogRecordRequest, RecordListQuery, RecordResponse};
use topweight_shared::validation::InputRanges;

/// Create record routes
pub fn record_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_records).post(log_record))
        .route("/input-ranges", get(input_ranges))
        .route("/:id", delete(delete_record))
}

pub(crate) fn record_response(record: WorkoutRecord) -> RecordResponse {
    RecordResponse {
        id: record.id.to_string(),
        weight: record.weight,
        reps: record.reps,
        series: record.series,
        date: record.date,
        distance: record.distance,
        is_indoor: record.is_indoor,
        is_distance_entry: record.is_distance_entry(),
        user_id: record.user_id.map(|id| id.to_string()),
        exercise_id: record.exercise_id.map(|id| id.to_string()),
    }
}

/// POST /api/v1/records - Log a record
///
/// Missing form values take the form defaults. A missing user or exercise,
/// or values that fail the exercise kind's rule, are rejected with the
/// offending field and nothing is saved.
async fn log_record(
    State(state): State<AppState>,
    Json(req): Json<LogRecordRequest>,
) -> Result<(StatusCode, Json<RecordResponse>), ApiError> {
    let user_id = req
        .user_id
        .as_deref()
        .map(|id| parse_id(id, "user_id"))
        .transpose()?;
    let exercise_id = req
        .exercise_id
        .as_deref()
        .map(|id| parse_id(id, "exercise_id"))
        .transpose()?;

    let input = LogRecordInput {
        user_id,
        exercise_id,
        draft: req.draft(),
        date: req.date.unwrap_or_else(Utc::now),
    };

    let record = RecordService::log(state.db(), input).await?;
    state
        .events()
        .publish(EntityKind::Record, ChangeAction::Created, record.id);

    Ok((StatusCode::CREATED, Json(record_response(record))))
}

/// GET /api/v1/records - Records newest first, optionally for one user
async fn list_records(
    State(state): State<AppState>,
    Query(query): Query<RecordListQuery>,
) -> Result<Json<Vec<RecordResponse>>, ApiError> {
    let user_id = query
        .user_id
        .as_deref()
        .map(|id| parse_id(id, "user_id"))
        .transpose()?;

    let records = RecordService::list(state.db(), user_id).await?;
    Ok(Json(records.into_iter().map(record_response).collect()))
}

/// DELETE /api/v1/records/:id
async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id, "record_id")?;
    RecordService::delete(state.db(), id).await?;
    state
        .events()
        .publish(EntityKind::Record, ChangeAction::Deleted, id);

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/records/input-ranges - Stepper bounds for the entry form
async fn input_ranges() -> Json<InputRanges> {
    Json(InputRanges::default())
}
