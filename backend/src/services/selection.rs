//! Last-used selection memory
//!
//! The most recently selected user and exercise ids are kept in the
//! preferences table and restored on the next launch. A stored id that no
//! longer parses or no longer matches an entity restores as no selection.

use crate::error::ApiError;
use crate::repositories::{ExerciseRepository, PreferenceRepository, UserRecord, UserRepository};
use sqlx::SqlitePool;
use topweight_shared::models::Exercise;
use topweight_shared::validation::RecordDraft;
use tracing::debug;
use uuid::Uuid;

pub const LAST_USER_KEY: &str = "last_selected_user_id";
pub const LAST_EXERCISE_KEY: &str = "last_selected_exercise_id";

/// Restored selection and the form values that go with it
#[derive(Debug, Clone)]
pub struct Selection {
    pub user: Option<UserRecord>,
    pub exercise: Option<Exercise>,
    pub draft: RecordDraft,
}

pub struct SelectionService;

impl SelectionService {
    pub async fn remember_user(pool: &SqlitePool, id: Uuid) -> Result<UserRecord, ApiError> {
        let user = UserRepository::get(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        PreferenceRepository::set(pool, LAST_USER_KEY, &id.to_string())
            .await
            .map_err(ApiError::SaveFailed)?;

        Ok(user)
    }

    pub async fn remember_exercise(pool: &SqlitePool, id: Uuid) -> Result<Exercise, ApiError> {
        let exercise = ExerciseRepository::get(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Exercise not found".to_string()))?;

        PreferenceRepository::set(pool, LAST_EXERCISE_KEY, &id.to_string())
            .await
            .map_err(ApiError::SaveFailed)?;

        Ok(exercise)
    }

    pub async fn restore(pool: &SqlitePool) -> Result<Selection, ApiError> {
        let user = match Self::stored_id(pool, LAST_USER_KEY).await? {
            Some(id) => UserRepository::get(pool, id).await.map_err(ApiError::Internal)?,
            None => None,
        };

        let exercise = match Self::stored_id(pool, LAST_EXERCISE_KEY).await? {
            Some(id) => ExerciseRepository::get(pool, id)
                .await
                .map_err(ApiError::Internal)?,
            None => None,
        };

        let draft = exercise
            .as_ref()
            .map(|e| RecordDraft::for_kind(e.kind))
            .unwrap_or_default();

        Ok(Selection { user, exercise, draft })
    }

    async fn stored_id(pool: &SqlitePool, key: &str) -> Result<Option<Uuid>, ApiError> {
        let value = PreferenceRepository::get(pool, key)
            .await
            .map_err(ApiError::Internal)?;

        Ok(value.and_then(|raw| match Uuid::parse_str(&raw) {
            Ok(id) => Some(id),
            Err(_) => {
                debug!(key, "Ignoring unparseable stored selection");
                None
            }
        }))
    }
}
