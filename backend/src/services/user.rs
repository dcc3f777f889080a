//! User service
//!
//! Users are athlete profiles records are logged against. A user shows a
//! custom JPEG photo, a preset avatar symbol, or a placeholder.

use crate::error::ApiError;
use crate::repositories::{UserRecord, UserRepository};
use sqlx::SqlitePool;
use topweight_shared::models::User;
use topweight_shared::validation::{validate_avatar_symbol, validate_name, validate_photo};
use tracing::info;
use uuid::Uuid;

impl From<UserRecord> for User {
    /// Photo data is not loaded with the row, only whether one exists
    fn from(record: UserRecord) -> Self {
        User {
            id: record.id,
            name: record.name,
            created_at: record.created_at,
            photo: None,
            avatar_symbol: record.avatar_symbol,
        }
    }
}

/// User service for profile management
pub struct UserService;

impl UserService {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<UserRecord>, ApiError> {
        UserRepository::list(pool).await.map_err(ApiError::Internal)
    }

    pub async fn get(pool: &SqlitePool, id: Uuid) -> Result<UserRecord, ApiError> {
        UserRepository::get(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    /// Create a user with a trimmed, non-empty name and an optional preset avatar
    pub async fn create(
        pool: &SqlitePool,
        name: &str,
        avatar_symbol: Option<&str>,
    ) -> Result<UserRecord, ApiError> {
        let name = validate_name("User", name)?;
        let avatar_symbol = normalize_avatar(avatar_symbol)?;

        let user = User::new(name).with_avatar_symbol(avatar_symbol);
        UserRepository::create(pool, &user)
            .await
            .map_err(ApiError::SaveFailed)?;

        info!(user_id = %user.id, "User created");

        Ok(UserRecord {
            id: user.id,
            name: user.name,
            created_at: user.created_at,
            avatar_symbol: user.avatar_symbol,
            has_photo: false,
        })
    }

    /// Update the name and/or preset avatar.
    ///
    /// `None` leaves a field unchanged; an empty avatar symbol clears it.
    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        name: Option<&str>,
        avatar_symbol: Option<&str>,
    ) -> Result<UserRecord, ApiError> {
        let current = Self::get(pool, id).await?;

        let name = match name {
            Some(name) => validate_name("User", name)?,
            None => current.name,
        };
        let avatar_symbol = match avatar_symbol {
            Some(symbol) => normalize_avatar(Some(symbol))?,
            None => current.avatar_symbol,
        };

        let updated = UserRepository::update(pool, id, &name, avatar_symbol.as_deref())
            .await
            .map_err(ApiError::SaveFailed)?;
        if !updated {
            return Err(ApiError::NotFound("User not found".to_string()));
        }

        Self::get(pool, id).await
    }

    /// Store a JPEG photo; the preset avatar is cleared
    pub async fn set_photo(pool: &SqlitePool, id: Uuid, photo: &[u8]) -> Result<UserRecord, ApiError> {
        validate_photo(photo).map_err(|message| ApiError::InvalidField {
            field: "photo".to_string(),
            message,
        })?;

        let updated = UserRepository::set_photo(pool, id, photo)
            .await
            .map_err(ApiError::SaveFailed)?;
        if !updated {
            return Err(ApiError::NotFound("User not found".to_string()));
        }

        info!(user_id = %id, bytes = photo.len(), "User photo updated");
        Self::get(pool, id).await
    }

    /// Remove both photo and preset avatar
    pub async fn clear_avatar(pool: &SqlitePool, id: Uuid) -> Result<UserRecord, ApiError> {
        let updated = UserRepository::clear_avatar(pool, id)
            .await
            .map_err(ApiError::SaveFailed)?;
        if !updated {
            return Err(ApiError::NotFound("User not found".to_string()));
        }

        Self::get(pool, id).await
    }

    pub async fn photo(pool: &SqlitePool, id: Uuid) -> Result<Vec<u8>, ApiError> {
        match UserRepository::get_photo(pool, id)
            .await
            .map_err(ApiError::Internal)?
        {
            Some(Some(photo)) => Ok(photo),
            Some(None) => Err(ApiError::NotFound("User has no photo".to_string())),
            None => Err(ApiError::NotFound("User not found".to_string())),
        }
    }

    /// Delete a user and every record they logged. Returns the record count.
    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, ApiError> {
        let records = UserRepository::delete(pool, id)
            .await
            .map_err(ApiError::SaveFailed)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        info!(user_id = %id, records_deleted = records, "User deleted");
        Ok(records)
    }
}

/// Validate a preset symbol; empty means none
fn normalize_avatar(symbol: Option<&str>) -> Result<Option<String>, ApiError> {
    match symbol.map(str::trim) {
        None | Some("") => Ok(None),
        Some(symbol) => {
            let avatar = validate_avatar_symbol(symbol).map_err(|message| ApiError::InvalidField {
                field: "avatar_symbol".to_string(),
                message,
            })?;
            Ok(Some(avatar.symbol_name().to_string()))
        }
    }
}
