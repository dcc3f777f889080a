//! Exercise API routes

use super::parse_id;
use crate::error::ApiError;
use crate::events::{ChangeAction, EntityKind};
use crate::services::ExerciseService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use topweight_shared::models::Exercise;
use topweight_shared::types::{
    CreateExerciseRequest, DeleteResponse, ExerciseResponse, UpdateExerciseRequest,
};
use validator::Validate;

/// Create exercise routes
pub fn exercise_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_exercises).post(create_exercise))
        .route("/:id", get(get_exercise).patch(update_exercise).delete(delete_exercise))
}

pub(crate) fn exercise_response(exercise: Exercise) -> ExerciseResponse {
    ExerciseResponse {
        id: exercise.id.to_string(),
        name: exercise.name,
        kind: exercise.kind,
        created_at: exercise.created_at,
    }
}

/// GET /api/v1/exercises - All exercises, newest first
async fn list_exercises(State(state): State<AppState>) -> Result<Json<Vec<ExerciseResponse>>, ApiError> {
    let exercises = ExerciseService::list(state.db()).await?;
    Ok(Json(exercises.into_iter().map(exercise_response).collect()))
}

/// POST /api/v1/exercises - Create an exercise (kind defaults to strength)
async fn create_exercise(
    State(state): State<AppState>,
    Json(req): Json<CreateExerciseRequest>,
) -> Result<(StatusCode, Json<ExerciseResponse>), ApiError> {
    req.validate()?;

    let exercise = ExerciseService::create(state.db(), &req.name, req.kind).await?;
    state
        .events()
        .publish(EntityKind::Exercise, ChangeAction::Created, exercise.id);

    Ok((StatusCode::CREATED, Json(exercise_response(exercise))))
}

/// GET /api/v1/exercises/:id
async fn get_exercise(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExerciseResponse>, ApiError> {
    let id = parse_id(&id, "exercise_id")?;
    let exercise = ExerciseService::get(state.db(), id).await?;
    Ok(Json(exercise_response(exercise)))
}

/// PATCH /api/v1/exercises/:id - Rename or change kind
async fn update_exercise(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateExerciseRequest>,
) -> Result<Json<ExerciseResponse>, ApiError> {
    let id = parse_id(&id, "exercise_id")?;
    req.validate()?;

    let exercise = ExerciseService::update(state.db(), id, req.name.as_deref(), req.kind).await?;
    state
        .events()
        .publish(EntityKind::Exercise, ChangeAction::Updated, id);

    Ok(Json(exercise_response(exercise)))
}

/// DELETE /api/v1/exercises/:id - Delete an exercise and its records
async fn delete_exercise(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(&id, "exercise_id")?;
    let records_deleted = ExerciseService::delete(state.db(), id).await?;
    state
        .events()
        .publish(EntityKind::Exercise, ChangeAction::Deleted, id);

    Ok(Json(DeleteResponse {
        deleted: true,
        records_deleted,
    }))
}
