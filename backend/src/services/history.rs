//! History service
//!
//! Builds the day-grouped history list from every stored record, joined
//! with its user and exercise names.
//!
//! Days are split at the viewer's local midnight. A named zone applies the
//! offset in effect at each record's own date, so records logged before a
//! daylight saving change still land on the right day.

use crate::config::HistoryConfig;
use crate::error::ApiError;
use crate::repositories::{HistoryRow, RecordRepository};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use chrono_tz::Tz;
use sqlx::SqlitePool;
use topweight_shared::history::{format_time, group_by_day, record_detail_text, DaySection, MISSING_NAME};
use topweight_shared::models::WorkoutRecord;
use uuid::Uuid;

/// Minutes west of UTC accepted for a viewer time zone
const MIN_UTC_OFFSET_MINUTES: i32 = -12 * 60;
/// Minutes east of UTC accepted for a viewer time zone
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// One rendered history row
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub user_name: String,
    pub exercise_name: String,
    pub time: String,
    pub detail: String,
    pub date: DateTime<Utc>,
    pub is_distance_entry: bool,
}

/// Time zone the viewer reads history in
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerZone {
    /// IANA zone, daylight saving aware
    Named(Tz),
    /// Fixed offset from UTC
    Fixed(FixedOffset),
}

/// History service
pub struct HistoryService;

impl HistoryService {
    /// Resolve the viewer's zone.
    ///
    /// Precedence: the request's zone name, the request's offset, the
    /// configured zone name, the configured offset.
    pub fn viewer_zone(
        tz: Option<&str>,
        utc_offset_minutes: Option<i32>,
        config: &HistoryConfig,
    ) -> Result<ViewerZone, ApiError> {
        if let Some(name) = tz {
            return Self::named_zone(name).map(ViewerZone::Named);
        }
        if let Some(minutes) = utc_offset_minutes {
            return Self::time_zone(minutes).map(ViewerZone::Fixed);
        }
        if let Some(name) = &config.time_zone {
            let zone = name.parse::<Tz>().map_err(|_| {
                ApiError::Internal(anyhow::anyhow!("Configured time zone is unknown: {}", name))
            })?;
            return Ok(ViewerZone::Named(zone));
        }
        Self::time_zone(config.utc_offset_minutes).map(ViewerZone::Fixed)
    }

    /// Viewer time zone from an IANA name such as "America/New_York"
    pub fn named_zone(name: &str) -> Result<Tz, ApiError> {
        name.trim().parse::<Tz>().map_err(|_| ApiError::InvalidField {
            field: "tz".to_string(),
            message: format!("Unknown time zone: {}", name),
        })
    }

    /// Viewer time zone from an offset in minutes
    pub fn time_zone(utc_offset_minutes: i32) -> Result<FixedOffset, ApiError> {
        if !(MIN_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(&utc_offset_minutes) {
            return Err(ApiError::InvalidField {
                field: "utc_offset_minutes".to_string(),
                message: format!(
                    "UTC offset must be between {} and {} minutes",
                    MIN_UTC_OFFSET_MINUTES, MAX_UTC_OFFSET_MINUTES
                ),
            });
        }

        FixedOffset::east_opt(utc_offset_minutes * 60)
            .ok_or_else(|| ApiError::BadRequest("Invalid UTC offset".to_string()))
    }

    /// History for a resolved viewer zone
    pub async fn history(
        pool: &SqlitePool,
        zone: ViewerZone,
        now: DateTime<Utc>,
    ) -> Result<Vec<DaySection<HistoryEntry>>, ApiError> {
        match zone {
            ViewerZone::Named(tz) => Self::sections(pool, &tz, now).await,
            ViewerZone::Fixed(offset) => Self::sections(pool, &offset, now).await,
        }
    }

    /// Records grouped by local day, newest day first, as seen at `now`
    pub async fn sections<Z: TimeZone>(
        pool: &SqlitePool,
        tz: &Z,
        now: DateTime<Utc>,
    ) -> Result<Vec<DaySection<HistoryEntry>>, ApiError> {
        let rows = RecordRepository::history(pool)
            .await
            .map_err(ApiError::Internal)?;

        let entries: Vec<HistoryEntry> = rows.into_iter().map(|row| Self::entry(row, tz)).collect();
        let today = now.with_timezone(tz).date_naive();

        Ok(group_by_day(entries, |entry: &HistoryEntry| entry.date, tz, today))
    }

    /// Render one row. Missing names show as a dash.
    fn entry<Z: TimeZone>(row: HistoryRow, tz: &Z) -> HistoryEntry {
        let kind = row.exercise_kind();
        let record = WorkoutRecord::from(row.record);

        HistoryEntry {
            id: record.id,
            user_id: record.user_id,
            user_name: row.user_name.unwrap_or_else(|| MISSING_NAME.to_string()),
            exercise_name: row.exercise_name.unwrap_or_else(|| MISSING_NAME.to_string()),
            time: format_time(record.date, tz),
            detail: record_detail_text(&record, kind),
            date: record.date,
            is_distance_entry: record.is_distance_entry(),
        }
    }
}
