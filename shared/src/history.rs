//! History grouping and row formatting
//!
//! Records arrive sorted by date, newest first. They are bucketed by the
//! calendar day of their date in the viewer's time zone, days are ordered
//! newest first, and each bucket keeps the order the records arrived in.

use crate::models::{ExerciseKind, WorkoutRecord};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const TODAY_LABEL: &str = "Today";
pub const YESTERDAY_LABEL: &str = "Yesterday";
/// Shown when a record's user or exercise is missing
pub const MISSING_NAME: &str = "—";

/// One day of history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaySection<T> {
    pub day: NaiveDate,
    pub title: String,
    pub items: Vec<T>,
}

/// Group `items` by the local calendar day of `date_of(item)`.
///
/// `today` is the viewer's current local date and drives the section titles.
pub fn group_by_day<T, Tz, F>(items: Vec<T>, date_of: F, tz: &Tz, today: NaiveDate) -> Vec<DaySection<T>>
where
    Tz: TimeZone,
    F: Fn(&T) -> DateTime<Utc>,
{
    let mut days: BTreeMap<NaiveDate, Vec<T>> = BTreeMap::new();
    for item in items {
        let day = date_of(&item).with_timezone(tz).date_naive();
        days.entry(day).or_default().push(item);
    }

    days.into_iter()
        .rev()
        .map(|(day, items)| DaySection {
            day,
            title: section_title(day, today),
            items,
        })
        .collect()
}

/// "Today", "Yesterday", or a medium-style date such as "Oct 14, 2026"
pub fn section_title(day: NaiveDate, today: NaiveDate) -> String {
    if day == today {
        TODAY_LABEL.to_string()
    } else if Some(day) == today.checked_sub_signed(Duration::days(1)) {
        YESTERDAY_LABEL.to_string()
    } else {
        day.format("%b %-d, %Y").to_string()
    }
}

/// Short time of day, e.g. "8:05 PM"
pub fn format_time<Tz: TimeZone>(date: DateTime<Utc>, tz: &Tz) -> String {
    date.with_timezone(tz).time().format("%-I:%M %p").to_string()
}

/// Detail text for a history row.
///
/// `exercise_kind` is the owning exercise's current kind, `None` when the
/// exercise no longer exists.
pub fn record_detail_text(record: &WorkoutRecord, exercise_kind: Option<ExerciseKind>) -> String {
    detail_text(
        record.weight,
        record.reps,
        record.series,
        record.distance,
        record.is_indoor,
        exercise_kind,
    )
}

pub fn detail_text(
    weight: f64,
    reps: i32,
    series: i32,
    distance: Option<f64>,
    is_indoor: Option<bool>,
    exercise_kind: Option<ExerciseKind>,
) -> String {
    if let Some(distance) = distance {
        let location = if is_indoor == Some(true) {
            "indoors"
        } else {
            "outdoors"
        };
        format!("{:.1} km, {}", distance, location)
    } else if exercise_kind == Some(ExerciseKind::RepsOnly) {
        format!("{} reps", reps)
    } else {
        format!(
            "{} kg × {} reps × {} series",
            weight.trunc() as i64,
            reps,
            series
        )
    }
}
