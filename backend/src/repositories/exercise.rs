//! Exercise repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use topweight_shared::models::{Exercise, ExerciseKind};
use uuid::Uuid;

/// Exercise row from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExerciseRecord {
    pub id: Uuid,
    pub name: String,
    /// Raw kind value; unknown values read as strength
    pub exercise_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<ExerciseRecord> for Exercise {
    fn from(record: ExerciseRecord) -> Self {
        Exercise {
            id: record.id,
            name: record.name,
            kind: ExerciseKind::from_raw(&record.exercise_type),
            created_at: record.created_at,
        }
    }
}

/// Exercise repository for database operations
pub struct ExerciseRepository;

impl ExerciseRepository {
    pub async fn create(pool: &SqlitePool, exercise: &Exercise) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO exercises (id, name, exercise_type, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(exercise.id)
        .bind(&exercise.name)
        .bind(exercise.kind.as_str())
        .bind(exercise.created_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// All exercises, newest first
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Exercise>> {
        let records = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            SELECT id, name, exercise_type, created_at
            FROM exercises
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(records.into_iter().map(Exercise::from).collect())
    }

    pub async fn get(pool: &SqlitePool, id: Uuid) -> Result<Option<Exercise>> {
        let record = sqlx::query_as::<_, ExerciseRecord>(
            "SELECT id, name, exercise_type, created_at FROM exercises WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record.map(Exercise::from))
    }

    /// Update name and kind. Records already logged keep their stored fields.
    pub async fn update(pool: &SqlitePool, id: Uuid, name: &str, kind: ExerciseKind) -> Result<bool> {
        let result = sqlx::query("UPDATE exercises SET name = ?, exercise_type = ? WHERE id = ?")
            .bind(name)
            .bind(kind.as_str())
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an exercise together with every record logged for it.
    ///
    /// Returns the number of records removed, or `None` if the exercise does not exist.
    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<Option<u64>> {
        let mut tx = pool.begin().await?;

        let records = sqlx::query("DELETE FROM workout_records WHERE exercise_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM exercises WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(records))
    }
}
