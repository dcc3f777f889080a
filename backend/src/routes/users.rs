//! User API routes

use super::parse_id;
use crate::error::ApiError;
use crate::events::{ChangeAction, EntityKind};
use crate::repositories::UserRecord;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use topweight_shared::models::{AvatarDisplay, PresetAvatar};
use topweight_shared::types::{CreateUserRequest, DeleteResponse, UpdateUserRequest, UserResponse};
use validator::Validate;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/avatars", get(list_avatars))
        .route("/:id", get(get_user).patch(update_user).delete(delete_user))
        .route("/:id/photo", get(get_photo).put(put_photo))
        .route("/:id/avatar", delete(clear_avatar))
}

pub(crate) fn user_response(record: UserRecord) -> UserResponse {
    let avatar = AvatarDisplay::resolve(record.has_photo, record.avatar_symbol.as_deref());
    UserResponse {
        id: record.id.to_string(),
        name: record.name,
        created_at: record.created_at,
        has_photo: record.has_photo,
        avatar_symbol: record.avatar_symbol,
        avatar,
    }
}

/// GET /api/v1/users - All users, newest first
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = UserService::list(state.db()).await?;
    Ok(Json(users.into_iter().map(user_response).collect()))
}

/// GET /api/v1/users/avatars - Preset avatar symbols
async fn list_avatars() -> Json<Vec<&'static str>> {
    Json(PresetAvatar::ALL.iter().map(|a| a.symbol_name()).collect())
}

/// POST /api/v1/users - Create a user
async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    req.validate()?;

    let user = UserService::create(state.db(), &req.name, req.avatar_symbol.as_deref()).await?;
    state.events().publish(EntityKind::User, ChangeAction::Created, user.id);

    Ok((StatusCode::CREATED, Json(user_response(user))))
}

/// GET /api/v1/users/:id
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_id(&id, "user_id")?;
    let user = UserService::get(state.db(), id).await?;
    Ok(Json(user_response(user)))
}

/// PATCH /api/v1/users/:id - Rename or change the preset avatar
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_id(&id, "user_id")?;
    req.validate()?;

    let user = UserService::update(state.db(), id, req.name.as_deref(), req.avatar_symbol.as_deref()).await?;
    state.events().publish(EntityKind::User, ChangeAction::Updated, id);

    Ok(Json(user_response(user)))
}

/// DELETE /api/v1/users/:id - Delete a user and their records
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(&id, "user_id")?;
    let records_deleted = UserService::delete(state.db(), id).await?;
    state.events().publish(EntityKind::User, ChangeAction::Deleted, id);

    Ok(Json(DeleteResponse {
        deleted: true,
        records_deleted,
    }))
}

/// GET /api/v1/users/:id/photo - JPEG photo data
async fn get_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id, "user_id")?;
    let photo = UserService::photo(state.db(), id).await?;
    Ok(([(header::CONTENT_TYPE, "image/jpeg")], photo))
}

/// PUT /api/v1/users/:id/photo - Replace the photo with a JPEG body
async fn put_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_id(&id, "user_id")?;
    let user = UserService::set_photo(state.db(), id, &body).await?;
    state.events().publish(EntityKind::User, ChangeAction::Updated, id);

    Ok(Json(user_response(user)))
}

/// DELETE /api/v1/users/:id/avatar - Remove photo and preset avatar
async fn clear_avatar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_id(&id, "user_id")?;
    let user = UserService::clear_avatar(state.db(), id).await?;
    state.events().publish(EntityKind::User, ChangeAction::Updated, id);

    Ok(Json(user_response(user)))
}
