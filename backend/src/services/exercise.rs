//! Exercise service

use crate::error::ApiError;
use crate::repositories::ExerciseRepository;
use sqlx::SqlitePool;
use topweight_shared::models::{Exercise, ExerciseKind};
use topweight_shared::validation::validate_name;
use tracing::info;
use uuid::Uuid;

/// Exercise service for the exercise catalogue
pub struct ExerciseService;

impl ExerciseService {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Exercise>, ApiError> {
        ExerciseRepository::list(pool).await.map_err(ApiError::Internal)
    }

    pub async fn get(pool: &SqlitePool, id: Uuid) -> Result<Exercise, ApiError> {
        ExerciseRepository::get(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Exercise not found".to_string()))
    }

    pub async fn create(pool: &SqlitePool, name: &str, kind: ExerciseKind) -> Result<Exercise, ApiError> {
        let name = validate_name("Exercise", name)?;
        let exercise = Exercise::new(name, kind);

        ExerciseRepository::create(pool, &exercise)
            .await
            .map_err(ApiError::SaveFailed)?;

        info!(exercise_id = %exercise.id, kind = %exercise.kind, "Exercise created");
        Ok(exercise)
    }

    /// Rename and/or change the kind.
    ///
    /// Changing the kind never rewrites records already logged; the history
    /// renders them with the new kind.
    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        name: Option<&str>,
        kind: Option<ExerciseKind>,
    ) -> Result<Exercise, ApiError> {
        let current = Self::get(pool, id).await?;

        let name = match name {
            Some(name) => validate_name("Exercise", name)?,
            None => current.name,
        };
        let kind = kind.unwrap_or(current.kind);

        let updated = ExerciseRepository::update(pool, id, &name, kind)
            .await
            .map_err(ApiError::SaveFailed)?;
        if !updated {
            return Err(ApiError::NotFound("Exercise not found".to_string()));
        }

        Ok(Exercise {
            id,
            name,
            kind,
            created_at: current.created_at,
        })
    }

    /// Delete an exercise and every record logged for it. Returns the record count.
    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, ApiError> {
        let records = ExerciseRepository::delete(pool, id)
            .await
            .map_err(ApiError::SaveFailed)?
            .ok_or_else(|| ApiError::NotFound("Exercise not found".to_string()))?;

        info!(exercise_id = %id, records_deleted = records, "Exercise deleted");
        Ok(records)
    }
}
