//! Workout record service
//!
//! Logging a record resolves the selected user and exercise, applies the
//! exercise kind's acceptance rule, and saves. A rejected or failed save
//! leaves nothing behind so the caller can correct its input and retry.

use crate::error::ApiError;
use crate::repositories::{ExerciseRepository, RecordRepository, UserRepository};
use chrono::{DateTime, Utc};
use metrics::counter;
use sqlx::SqlitePool;
use topweight_shared::errors::RecordError;
use topweight_shared::models::{User, WorkoutRecord};
use topweight_shared::validation::{build_record, RecordDraft};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Values submitted from the record form
#[derive(Debug, Clone)]
pub struct LogRecordInput {
    pub user_id: Option<Uuid>,
    pub exercise_id: Option<Uuid>,
    pub draft: RecordDraft,
    pub date: DateTime<Utc>,
}

/// Record service for logging and listing workout records
pub struct RecordService;

impl RecordService {
    /// Validate, construct and save a record
    pub async fn log(pool: &SqlitePool, input: LogRecordInput) -> Result<WorkoutRecord, ApiError> {
        // The user is required before anything else is looked up
        let Some(user_id) = input.user_id else {
            return Err(Self::reject(RecordError::NoUserSelected));
        };
        let user: User = UserRepository::get(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?
            .into();

        let exercise = match input.exercise_id {
            Some(id) => Some(
                ExerciseRepository::get(pool, id)
                    .await
                    .map_err(ApiError::Internal)?
                    .ok_or_else(|| ApiError::NotFound("Exercise not found".to_string()))?,
            ),
            None => None,
        };

        let record = build_record(Some(&user), exercise.as_ref(), &input.draft, input.date).map_err(Self::reject)?;

        if let Err(err) = RecordRepository::insert(pool, &record).await {
            counter!("topweight_record_save_failures_total").increment(1);
            error!(record_id = %record.id, "Failed to save record: {:?}", err);
            return Err(ApiError::SaveFailed(err));
        }

        counter!("topweight_records_saved_total").increment(1);
        info!(
            record_id = %record.id,
            distance_entry = record.is_distance_entry(),
            "Record saved"
        );

        Ok(record)
    }

    fn reject(err: RecordError) -> ApiError {
        counter!("topweight_records_rejected_total").increment(1);
        warn!(reason = %err, "Record rejected");
        ApiError::from(err)
    }

    /// Records newest first, optionally for one user
    pub async fn list(pool: &SqlitePool, user_id: Option<Uuid>) -> Result<Vec<WorkoutRecord>, ApiError> {
        RecordRepository::list(pool, user_id)
            .await
            .map_err(ApiError::Internal)
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<(), ApiError> {
        let deleted = RecordRepository::delete(pool, id)
            .await
            .map_err(ApiError::SaveFailed)?;
        if !deleted {
            return Err(ApiError::NotFound("Record not found".to_string()));
        }

        info!(record_id = %id, "Record deleted");
        Ok(())
    }
}
