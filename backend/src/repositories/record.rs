//! Workout record repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use topweight_shared::models::{ExerciseKind, WorkoutRecord};
use uuid::Uuid;

/// Workout record row from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkoutRecordRow {
    pub id: Uuid,
    pub weight: f64,
    pub reps: i32,
    pub series: i32,
    pub date: DateTime<Utc>,
    pub distance: Option<f64>,
    pub is_indoor: Option<bool>,
    pub user_id: Option<Uuid>,
    pub exercise_id: Option<Uuid>,
}

impl From<WorkoutRecordRow> for WorkoutRecord {
    fn from(row: WorkoutRecordRow) -> Self {
        WorkoutRecord {
            id: row.id,
            weight: row.weight,
            reps: row.reps,
            series: row.series,
            date: row.date,
            distance: row.distance,
            is_indoor: row.is_indoor,
            user_id: row.user_id,
            exercise_id: row.exercise_id,
        }
    }
}

/// Record joined with the names shown in the history list
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HistoryRow {
    #[sqlx(flatten)]
    pub record: WorkoutRecordRow,
    pub user_name: Option<String>,
    pub exercise_name: Option<String>,
    pub exercise_type: Option<String>,
}

impl HistoryRow {
    /// Current kind of the owning exercise, `None` if it no longer exists
    pub fn exercise_kind(&self) -> Option<ExerciseKind> {
        self.exercise_type.as_deref().map(ExerciseKind::from_raw)
    }
}

/// Workout record repository for database operations
pub struct RecordRepository;

impl RecordRepository {
    pub async fn insert(pool: &SqlitePool, record: &WorkoutRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO workout_records
                (id, weight, reps, series, date, distance, is_indoor, user_id, exercise_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id)
        .bind(record.weight)
        .bind(record.reps)
        .bind(record.series)
        .bind(record.date)
        .bind(record.distance)
        .bind(record.is_indoor)
        .bind(record.user_id)
        .bind(record.exercise_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Records sorted by date, newest first, optionally for a single user
    pub async fn list(pool: &SqlitePool, user_id: Option<Uuid>) -> Result<Vec<WorkoutRecord>> {
        let rows = sqlx::query_as::<_, WorkoutRecordRow>(
            r#"
            SELECT id, weight, reps, series, date, distance, is_indoor, user_id, exercise_id
            FROM workout_records
            WHERE ?1 IS NULL OR user_id = ?1
            ORDER BY date DESC, rowid DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(WorkoutRecord::from).collect())
    }

    pub async fn get(pool: &SqlitePool, id: Uuid) -> Result<Option<WorkoutRecord>> {
        let row = sqlx::query_as::<_, WorkoutRecordRow>(
            r#"
            SELECT id, weight, reps, series, date, distance, is_indoor, user_id, exercise_id
            FROM workout_records
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(WorkoutRecord::from))
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM workout_records WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Every record with its user and exercise names, newest first
    pub async fn history(pool: &SqlitePool) -> Result<Vec<HistoryRow>> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            r#"
            SELECT r.id, r.weight, r.reps, r.series, r.date, r.distance, r.is_indoor,
                   r.user_id, r.exercise_id,
                   u.name AS user_name,
                   e.name AS exercise_name,
                   e.exercise_type AS exercise_type
            FROM workout_records r
            LEFT JOIN users u ON u.id = r.user_id
            LEFT JOIN exercises e ON e.id = r.exercise_id
            ORDER BY r.date DESC, r.rowid DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}
