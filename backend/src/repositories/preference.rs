//! Key-value preferences

use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct PreferenceRepository;

impl PreferenceRepository {
    pub async fn get(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM preferences WHERE key = ?")
            .bind(key)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(|(value,)| value))
    }

    /// Insert or overwrite `key`
    pub async fn set(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO preferences (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        Ok(())
    }
}
