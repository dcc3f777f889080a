//! TopWeight WASM Module
//!
//! Bindings for the record form and history list so a web client applies
//! the same rules as the backend without a round trip.

use chrono::NaiveDate;
use topweight_shared::history::{detail_text, section_title as day_title};
use topweight_shared::models::ExerciseKind;
use topweight_shared::validation::{InputRange, InputRanges, RecordDraft};
use wasm_bindgen::prelude::*;

fn kind_of(raw: Option<String>) -> Option<ExerciseKind> {
    raw.as_deref().map(ExerciseKind::from_raw)
}

fn range_for(field: &str) -> Option<InputRange> {
    match field {
        "weight" => Some(InputRange::WEIGHT_KG),
        "reps" => Some(InputRange::REPS),
        "series" => Some(InputRange::SERIES),
        "distance" => Some(InputRange::DISTANCE_KM),
        _ => None,
    }
}

/// Whether the save button should be enabled
#[wasm_bindgen]
pub fn can_save_record(
    user_selected: bool,
    exercise_kind: Option<String>,
    weight: f64,
    reps: i32,
    series: i32,
    distance: f64,
) -> bool {
    let draft = RecordDraft {
        weight,
        reps,
        series,
        distance,
        is_indoor: false,
    };
    draft.can_save(user_selected, kind_of(exercise_kind))
}

/// Detail text for a history row
#[wasm_bindgen]
pub fn record_detail(
    weight: f64,
    reps: i32,
    series: i32,
    distance: Option<f64>,
    is_indoor: Option<bool>,
    exercise_kind: Option<String>,
) -> String {
    detail_text(weight, reps, series, distance, is_indoor, kind_of(exercise_kind))
}

/// Section title for an ISO date (`YYYY-MM-DD`), `None` if either date is malformed
#[wasm_bindgen]
pub fn section_title(day: &str, today: &str) -> Option<String> {
    let day = NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()?;
    let today = NaiveDate::parse_from_str(today, "%Y-%m-%d").ok()?;
    Some(day_title(day, today))
}

/// One stepper increment; unknown fields are returned unchanged
#[wasm_bindgen]
pub fn step_up(field: &str, value: f64) -> f64 {
    range_for(field).map_or(value, |range| range.increment(value))
}

/// One stepper decrement; unknown fields are returned unchanged
#[wasm_bindgen]
pub fn step_down(field: &str, value: f64) -> f64 {
    range_for(field).map_or(value, |range| range.decrement(value))
}

/// Form values (JSON) to start from after selecting an exercise of `kind`
#[wasm_bindgen]
pub fn draft_for_kind(kind: &str) -> String {
    serde_json::to_string(&RecordDraft::for_kind(ExerciseKind::from_raw(kind))).unwrap_or_default()
}

/// Stepper bounds for every field (JSON)
#[wasm_bindgen]
pub fn input_ranges() -> String {
    serde_json::to_string(&InputRanges::default()).unwrap_or_default()
}
