//! Last-used selection API routes

use super::exercises::exercise_response;
use super::parse_id;
use super::users::user_response;
use crate::error::ApiError;
use crate::services::SelectionService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use topweight_shared::types::{SelectedExerciseResponse, SelectionResponse, UserResponse};
use topweight_shared::validation::RecordDraft;

/// Create selection routes
pub fn selection_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(restore_selection))
        .route("/user/:id", put(remember_user))
        .route("/exercise/:id", put(remember_exercise))
}

/// GET /api/v1/selection - Restore the last selected user and exercise
async fn restore_selection(State(state): State<AppState>) -> Result<Json<SelectionResponse>, ApiError> {
    let selection = SelectionService::restore(state.db()).await?;

    Ok(Json(SelectionResponse {
        user: selection.user.map(user_response),
        exercise: selection.exercise.map(exercise_response),
        draft: selection.draft,
    }))
}

/// PUT /api/v1/selection/user/:id
async fn remember_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_id(&id, "user_id")?;
    let user = SelectionService::remember_user(state.db(), id).await?;
    Ok(Json(user_response(user)))
}

/// PUT /api/v1/selection/exercise/:id
///
/// Also returns the form values to start from for the exercise's kind.
async fn remember_exercise(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SelectedExerciseResponse>, ApiError> {
    let id = parse_id(&id, "exercise_id")?;
    let exercise = SelectionService::remember_exercise(state.db(), id).await?;
    let draft = RecordDraft::for_kind(exercise.kind);

    Ok(Json(SelectedExerciseResponse {
        exercise: exercise_response(exercise),
        draft,
    }))
}
