//! API request and response types

use crate::models::{AvatarDisplay, ExerciseKind};
use crate::validation::RecordDraft;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Set when the same request may succeed if sent again
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub retryable: bool,
}

// ============================================================================
// Users
// ============================================================================

/// Create user request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub avatar_symbol: Option<String>,
}

/// Update user request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_symbol: Option<String>,
}

/// User response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub has_photo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_symbol: Option<String>,
    pub avatar: AvatarDisplay,
}

/// Deleted entity response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    /// Workout records removed along with the entity
    #[serde(default)]
    pub records_deleted: u64,
}

// ============================================================================
// Exercises
// ============================================================================

/// Create exercise request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateExerciseRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub kind: ExerciseKind,
}

/// Update exercise request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateExerciseRequest {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: Option<ExerciseKind>,
}

/// Exercise response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseResponse {
    pub id: String,
    pub name: String,
    pub kind: ExerciseKind,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Workout records
// ============================================================================

/// Log record request.
///
/// Missing numeric fields take the record form defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecordRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub exercise_id: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub reps: Option<i32>,
    #[serde(default)]
    pub series: Option<i32>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub is_indoor: Option<bool>,
    /// Defaults to the time the request is handled
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl LogRecordRequest {
    /// Form values, falling back to the form defaults
    pub fn draft(&self) -> RecordDraft {
        let defaults = RecordDraft::default();
        RecordDraft {
            weight: self.weight.unwrap_or(defaults.weight),
            reps: self.reps.unwrap_or(defaults.reps),
            series: self.series.unwrap_or(defaults.series),
            distance: self.distance.unwrap_or(defaults.distance),
            is_indoor: self.is_indoor.unwrap_or(defaults.is_indoor),
        }
    }
}

/// Workout record response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordResponse {
    pub id: String,
    pub weight: f64,
    pub reps: i32,
    pub series: i32,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_indoor: Option<bool>,
    pub is_distance_entry: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_id: Option<String>,
}

/// Record list query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordListQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

// ============================================================================
// History
// ============================================================================

/// History query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// Viewer's IANA time zone, e.g. "America/New_York"
    #[serde(default)]
    pub tz: Option<String>,
    /// Fixed offset from UTC in minutes, used when `tz` is absent
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

/// One row in the history list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntryResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub user_name: String,
    pub exercise_name: String,
    pub time: String,
    pub detail: String,
    pub date: DateTime<Utc>,
    pub is_distance_entry: bool,
}

/// One day of history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistorySectionResponse {
    pub day: NaiveDate,
    pub title: String,
    pub records: Vec<HistoryEntryResponse>,
}

/// History response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub sections: Vec<HistorySectionResponse>,
    pub total_count: usize,
    /// Change feed revision the history was read at
    pub revision: u64,
}

// ============================================================================
// Selection memory
// ============================================================================

/// Restored selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise: Option<ExerciseResponse>,
    /// Form values for the restored exercise's kind
    pub draft: RecordDraft,
}

/// Newly selected exercise with the form values to start from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedExerciseResponse {
    pub exercise: ExerciseResponse,
    pub draft: RecordDraft,
}
