//! User repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use topweight_shared::models::User;
use uuid::Uuid;

/// User row without the photo data
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub avatar_symbol: Option<String>,
    pub has_photo: bool,
}

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Insert a new user
    pub async fn create(pool: &SqlitePool, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, created_at, photo, avatar_symbol)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(user.created_at)
        .bind(&user.photo)
        .bind(&user.avatar_symbol)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// All users, newest first
    pub async fn list(pool: &SqlitePool) -> Result<Vec<UserRecord>> {
        let records = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, created_at, avatar_symbol, photo IS NOT NULL AS has_photo
            FROM users
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    pub async fn get(pool: &SqlitePool, id: Uuid) -> Result<Option<UserRecord>> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, created_at, avatar_symbol, photo IS NOT NULL AS has_photo
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Update name and preset avatar. Returns false if the user does not exist.
    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        name: &str,
        avatar_symbol: Option<&str>,
    ) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET name = ?, avatar_symbol = ? WHERE id = ?")
            .bind(name)
            .bind(avatar_symbol)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Store a custom photo. A photo replaces any preset avatar.
    pub async fn set_photo(pool: &SqlitePool, id: Uuid, photo: &[u8]) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET photo = ?, avatar_symbol = NULL WHERE id = ?")
            .bind(photo)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove both the photo and the preset avatar
    pub async fn clear_avatar(pool: &SqlitePool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET photo = NULL, avatar_symbol = NULL WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Photo data. Outer `None` if the user does not exist.
    pub async fn get_photo(pool: &SqlitePool, id: Uuid) -> Result<Option<Option<Vec<u8>>>> {
        let row: Option<(Option<Vec<u8>>,)> = sqlx::query_as("SELECT photo FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(|(photo,)| photo))
    }

    /// Delete a user together with their workout records.
    ///
    /// Returns the number of records removed, or `None` if the user does not exist.
    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<Option<u64>> {
        let mut tx = pool.begin().await?;

        let records = sqlx::query("DELETE FROM workout_records WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM users WHERE id = ?")
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
