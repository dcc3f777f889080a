//! Input validation and record construction
//!
//! A record is only built when a user and an exercise are selected and the
//! values satisfy the exercise kind's acceptance rule:
//!
//! - distance: `distance > 0`
//! - reps only: `reps > 0`
//! - strength: `weight > 0`, `reps > 0` and `series > 0`
//!
//! The [`InputRange`] bounds are stepper affordances for the entry form.
//! Construction does not enforce them.

use crate::errors::{NameError, RecordError};
use crate::models::{Exercise, ExerciseKind, PresetAvatar, User, WorkoutRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest accepted user or exercise name
pub const MAX_NAME_LENGTH: usize = 100;

/// Validate and normalize a user or exercise name.
///
/// Returns the name with surrounding whitespace removed.
pub fn validate_name(entity: &'static str, name: &str) -> Result<String, NameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NameError::Empty(entity));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(NameError::TooLong {
            entity,
            max: MAX_NAME_LENGTH,
        });
    }
    Ok(trimmed.to_string())
}

/// Validate a preset avatar symbol name
pub fn validate_avatar_symbol(symbol: &str) -> Result<PresetAvatar, String> {
    PresetAvatar::from_symbol(symbol).ok_or_else(|| format!("Unknown avatar symbol: {}", symbol))
}

/// JPEG start-of-image marker
const JPEG_SOI: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Validate uploaded photo data (JPEG only)
pub fn validate_photo(data: &[u8]) -> Result<(), String> {
    if data.is_empty() {
        return Err("Photo cannot be empty".to_string());
    }
    if !data.starts_with(&JPEG_SOI) {
        return Err("Photo must be JPEG encoded".to_string());
    }
    Ok(())
}

// ============================================================================
// Stepper ranges
// ============================================================================

/// Bounds and step of a numeric entry field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl InputRange {
    pub const WEIGHT_KG: InputRange = InputRange {
        min: 0.0,
        max: 500.0,
        step: 2.5,
    };
    pub const REPS: InputRange = InputRange {
        min: 1.0,
        max: 999.0,
        step: 1.0,
    };
    pub const SERIES: InputRange = InputRange {
        min: 1.0,
        max: 50.0,
        step: 1.0,
    };
    pub const DISTANCE_KM: InputRange = InputRange {
        min: 0.0,
        max: 100.0,
        step: 0.5,
    };

    /// One step up, clamped to `max`
    pub fn increment(&self, value: f64) -> f64 {
        (value + self.step).min(self.max)
    }

    /// One step down, clamped to `min`
    pub fn decrement(&self, value: f64) -> f64 {
        (value - self.step).max(self.min)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Ranges for every entry field, keyed by field name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputRanges {
    pub weight: InputRange,
    pub reps: InputRange,
    pub series: InputRange,
    pub distance: InputRange,
}

impl Default for InputRanges {
    fn default() -> Self {
        Self {
            weight: InputRange::WEIGHT_KG,
            reps: InputRange::REPS,
            series: InputRange::SERIES,
            distance: InputRange::DISTANCE_KM,
        }
    }
}

// ============================================================================
// Record construction
// ============================================================================

/// Values entered in the record form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RecordDraft {
    pub weight: f64,
    pub reps: i32,
    pub series: i32,
    pub distance: f64,
    pub is_indoor: bool,
}

impl Default for RecordDraft {
    fn default() -> Self {
        Self {
            weight: 0.0,
            reps: 10,
            series: 1,
            distance: 0.0,
            is_indoor: false,
        }
    }
}

impl RecordDraft {
    /// Form state right after an exercise of `kind` is selected
    pub fn for_kind(kind: ExerciseKind) -> Self {
        let mut draft = Self::default();
        draft.reset_for(kind);
        draft
    }

    /// Reset the fields `kind` uses, leaving the others untouched
    pub fn reset_for(&mut self, kind: ExerciseKind) {
        match kind {
            ExerciseKind::Distance => {
                self.distance = 0.0;
                self.is_indoor = false;
            }
            ExerciseKind::RepsOnly => {
                self.reps = 1;
            }
            ExerciseKind::Strength => {
                self.weight = 0.0;
                self.reps = 10;
                self.series = 1;
            }
        }
    }

    /// Whether the values satisfy `kind`'s acceptance rule.
    ///
    /// `f64` comparisons are false for NaN, so non-finite input is never accepted.
    pub fn satisfies(&self, kind: ExerciseKind) -> bool {
        match kind {
            ExerciseKind::Distance => self.distance > 0.0,
            ExerciseKind::RepsOnly => self.reps > 0,
            ExerciseKind::Strength => self.weight > 0.0 && self.reps > 0 && self.series > 0,
        }
    }

    /// Drives the save affordance: both selections present and the rule satisfied
    pub fn can_save(&self, user_selected: bool, exercise_kind: Option<ExerciseKind>) -> bool {
        match exercise_kind {
            Some(kind) if user_selected => self.satisfies(kind),
            _ => false,
        }
    }
}

/// Build a record for `user` and `exercise` from the form values.
///
/// Only the fields relevant to the exercise kind are populated; the rest are
/// zero or `None`. The kind is read once here, so later edits to the exercise
/// never change what was stored.
pub fn build_record(
    user: Option<&User>,
    exercise: Option<&Exercise>,
    draft: &RecordDraft,
    date: DateTime<Utc>,
) -> Result<WorkoutRecord, RecordError> {
    let user = user.ok_or(RecordError::NoUserSelected)?;
    let exercise = exercise.ok_or(RecordError::NoExerciseSelected)?;

    if !draft.satisfies(exercise.kind) {
        return Err(RecordError::for_kind(exercise.kind));
    }

    let mut record = WorkoutRecord {
        id: Uuid::new_v4(),
        weight: 0.0,
        reps: 0,
        series: 0,
        date,
        distance: None,
        is_indoor: None,
        user_id: Some(user.id),
        exercise_id: Some(exercise.id),
    };

    match exercise.kind {
        ExerciseKind::Distance => {
            record.distance = Some(draft.distance);
            record.is_indoor = Some(draft.is_indoor);
        }
        ExerciseKind::RepsOnly => {
            record.reps = draft.reps;
        }
        ExerciseKind::Strength => {
            record.weight = draft.weight;
            record.reps = draft.reps;
            record.series = draft.series;
        }
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn athlete() -> User {
        User::new("Alex")
    }

    fn draft(weight: f64, reps: i32, series: i32, distance: f64, is_indoor: bool) -> RecordDraft {
        RecordDraft {
            weight,
            reps,
            series,
            distance,
            is_indoor,
        }
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("User", "  Alex ").unwrap(), "Alex");
        assert_eq!(validate_name("User", ""), Err(NameError::Empty("User")));
        assert_eq!(validate_name("Exercise", " \t "), Err(NameError::Empty("Exercise")));
        assert!(validate_name("User", &"a".repeat(MAX_NAME_LENGTH)).is_ok());
        assert!(matches!(
            validate_name("User", &"a".repeat(MAX_NAME_LENGTH + 1)),
            Err(NameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_validate_photo() {
        assert!(validate_photo(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]).is_ok());
        assert!(validate_photo(&[]).is_err());
        assert!(validate_photo(b"\x89PNG\r\n").is_err());
    }

    #[test]
    fn test_validate_avatar_symbol() {
        assert_eq!(validate_avatar_symbol("bolt.fill"), Ok(PresetAvatar::Bolt));
        assert!(validate_avatar_symbol("bolt").is_err());
    }

    #[rstest]
    #[case(InputRange::WEIGHT_KG, 0.0, 2.5)]
    #[case(InputRange::WEIGHT_KG, 499.0, 500.0)]
    #[case(InputRange::REPS, 998.0, 999.0)]
    #[case(InputRange::REPS, 999.0, 999.0)]
    #[case(InputRange::SERIES, 50.0, 50.0)]
    #[case(InputRange::DISTANCE_KM, 5.0, 5.5)]
    fn test_input_range_increment(#[case] range: InputRange, #[case] value: f64, #[case] expected: f64) {
        assert_eq!(range.increment(value), expected);
    }

    #[rstest]
    #[case(InputRange::WEIGHT_KG, 0.0, 0.0)]
    #[case(InputRange::WEIGHT_KG, 80.0, 77.5)]
    #[case(InputRange::REPS, 1.0, 1.0)]
    #[case(InputRange::SERIES, 3.0, 2.0)]
    #[case(InputRange::DISTANCE_KM, 0.2, 0.0)]
    fn test_input_range_decrement(#[case] range: InputRange, #[case] value: f64, #[case] expected: f64) {
        assert_eq!(range.decrement(value), expected);
    }

    #[test]
    fn test_draft_reset_for_kind() {
        let mut d = draft(80.0, 5, 3, 7.5, true);
        d.reset_for(ExerciseKind::Distance);
        assert_eq!(d, draft(80.0, 5, 3, 0.0, false));

        d.reset_for(ExerciseKind::RepsOnly);
        assert_eq!(d.reps, 1);
        assert_eq!(d.weight, 80.0);

        d.reset_for(ExerciseKind::Strength);
        assert_eq!((d.weight, d.reps, d.series), (0.0, 10, 1));

        assert_eq!(RecordDraft::for_kind(ExerciseKind::RepsOnly).reps, 1);
    }

    #[test]
    fn test_can_save_requires_selections() {
        let d = draft(80.0, 5, 3, 0.0, false);
        assert!(d.can_save(true, Some(ExerciseKind::Strength)));
        assert!(!d.can_save(false, Some(ExerciseKind::Strength)));
        assert!(!d.can_save(true, None));
        // Default form has no weight yet
        assert!(!RecordDraft::default().can_save(true, Some(ExerciseKind::Strength)));
    }

    #[test]
    fn test_scenario_strength_record() {
        let user = athlete();
        let bench = Exercise::new("Bench Press", ExerciseKind::Strength);
        let now = Utc::now();

        let record = build_record(Some(&user), Some(&bench), &draft(80.0, 5, 3, 0.0, false), now).unwrap();

        assert_eq!(record.weight, 80.0);
        assert_eq!(record.reps, 5);
        assert_eq!(record.series, 3);
        assert_eq!(record.distance, None);
        assert_eq!(record.is_indoor, None);
        assert_eq!(record.user_id, Some(user.id));
        assert_eq!(record.exercise_id, Some(bench.id));
        assert_eq!(record.date, now);
    }

    #[test]
    fn test_scenario_distance_record() {
        let user = athlete();
        let run = Exercise::new("Running", ExerciseKind::Distance);

        let record = build_record(Some(&user), Some(&run), &draft(60.0, 8, 2, 5.2, false), Utc::now()).unwrap();

        assert_eq!(record.distance, Some(5.2));
        assert_eq!(record.is_indoor, Some(false));
        assert_eq!((record.weight, record.reps, record.series), (0.0, 0, 0));
        assert!(record.is_distance_entry());
    }

    #[test]
    fn test_scenario_reps_only_record() {
        let user = athlete();
        let pushups = Exercise::new("Push-ups", ExerciseKind::RepsOnly);

        let record = build_record(Some(&user), Some(&pushups), &draft(40.0, 25, 4, 3.0, true), Utc::now()).unwrap();

        assert_eq!(record.reps, 25);
        assert_eq!(record.weight, 0.0);
        assert_eq!(record.series, 0);
        assert_eq!(record.distance, None);
        assert_eq!(record.is_indoor, None);
    }

    #[test]
    fn test_scenario_zero_distance_refused() {
        let user = athlete();
        let run = Exercise::new("Running", ExerciseKind::Distance);

        let result = build_record(Some(&user), Some(&run), &draft(0.0, 10, 1, 0.0, false), Utc::now());
        assert_eq!(result, Err(RecordError::DistanceRequired));
    }

    #[test]
    fn test_missing_selection_refused() {
        let user = athlete();
        let bench = Exercise::new("Bench Press", ExerciseKind::Strength);
        let d = draft(80.0, 5, 3, 0.0, false);

        assert_eq!(
            build_record(None, Some(&bench), &d, Utc::now()),
            Err(RecordError::NoUserSelected)
        );
        assert_eq!(
            build_record(Some(&user), None, &d, Utc::now()),
            Err(RecordError::NoExerciseSelected)
        );
    }

    #[test]
    fn test_non_finite_values_refused() {
        let user = athlete();
        let bench = Exercise::new("Bench Press", ExerciseKind::Strength);
        let run = Exercise::new("Running", ExerciseKind::Distance);

        assert!(build_record(Some(&user), Some(&bench), &draft(f64::NAN, 5, 3, 0.0, false), Utc::now()).is_err());
        assert!(build_record(Some(&user), Some(&run), &draft(0.0, 0, 0, f64::NAN, false), Utc::now()).is_err());
    }

    #[test]
    fn test_construction_ignores_stepper_bounds() {
        let user = athlete();
        let bench = Exercise::new("Bench Press", ExerciseKind::Strength);

        // 650 kg is past the weight stepper's max but still a valid record
        let record = build_record(Some(&user), Some(&bench), &draft(650.0, 1, 1, 0.0, false), Utc::now()).unwrap();
        assert_eq!(record.weight, 650.0);
        assert!(!InputRange::WEIGHT_KG.contains(650.0));
    }

    // Construction rules hold for arbitrary input, not just stepper values
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_strength_accepts_iff_all_positive(
            weight in -10.0f64..600.0,
            reps in -5i32..1000,
            series in -5i32..60,
            distance in -1.0f64..120.0,
        ) {
            let user = athlete();
            let bench = Exercise::new("Bench Press", ExerciseKind::Strength);
            let result = build_record(Some(&user), Some(&bench), &draft(weight, reps, series, distance, false), Utc::now());

            let expected = weight > 0.0 && reps > 0 && series > 0;
            prop_assert_eq!(result.is_ok(), expected);
            if let Ok(record) = result {
                prop_assert_eq!(record.weight, weight);
                prop_assert_eq!(record.reps, reps);
                prop_assert_eq!(record.series, series);
                prop_assert!(record.distance.is_none());
            }
        }

        #[test]
        fn prop_distance_accepts_iff_distance_positive(
            weight in -10.0f64..600.0,
            reps in -5i32..1000,
            series in -5i32..60,
            distance in -1.0f64..120.0,
            is_indoor in any::<bool>(),
        ) {
            let user = athlete();
            let run = Exercise::new("Running", ExerciseKind::Distance);
            let result = build_record(Some(&user), Some(&run), &draft(weight, reps, series, distance, is_indoor), Utc::now());

            prop_assert_eq!(result.is_ok(), distance > 0.0);
            if let Ok(record) = result {
                prop_assert_eq!((record.weight, record.reps, record.series), (0.0, 0, 0));
                prop_assert_eq!(record.distance, Some(distance));
                prop_assert_eq!(record.is_indoor, Some(is_indoor));
            }
        }

        #[test]
        fn prop_reps_only_accepts_iff_reps_positive(
            weight in -10.0f64..600.0,
            reps in -5i32..1000,
            series in -5i32..60,
            distance in -1.0f64..120.0,
        ) {
            let user = athlete();
            let pushups = Exercise::new("Push-ups", ExerciseKind::RepsOnly);
            let result = build_record(Some(&user), Some(&pushups), &draft(weight, reps, series, distance, true), Utc::now());

            prop_assert_eq!(result.is_ok(), reps > 0);
            if let Ok(record) = result {
                prop_assert_eq!(record.weight, 0.0);
                prop_assert_eq!(record.series, 0);
                prop_assert_eq!(record.reps, reps);
                prop_assert!(record.distance.is_none());
            }
        }

        #[test]
        fn prop_distance_entry_matches_distance_presence(
            kind_index in 0usize..3,
            weight in 0.0f64..500.0,
            reps in 0i32..999,
            series in 0i32..50,
            distance in 0.0f64..100.0,
        ) {
            let user = athlete();
            let exercise = Exercise::new("Any", ExerciseKind::ALL[kind_index]);
            if let Ok(record) = build_record(Some(&user), Some(&exercise), &draft(weight, reps, series, distance, false), Utc::now()) {
                prop_assert_eq!(record.is_distance_entry(), record.distance.is_some());
                prop_assert_eq!(record.is_distance_entry(), exercise.kind == ExerciseKind::Distance);
            }
        }

        #[test]
        fn prop_can_save_agrees_with_build(
            kind_index in 0usize..3,
            weight in -1.0f64..500.0,
            reps in -1i32..999,
            series in -1i32..50,
            distance in -1.0f64..100.0,
        ) {
            let user = athlete();
            let exercise = Exercise::new("Any", ExerciseKind::ALL[kind_index]);
            let d = draft(weight, reps, series, distance, false);
            let built = build_record(Some(&user), Some(&exercise), &d, Utc::now()).is_ok();
            prop_assert_eq!(d.can_save(true, Some(exercise.kind)), built);
        }

        #[test]
        fn prop_stepping_stays_in_range(value in 0.0f64..500.0, ups in 0usize..300) {
            let range = InputRange::WEIGHT_KG;
            let mut v = value;
            for _ in 0..ups {
                v = range.increment(v);
            }
            prop_assert!(v <= range.max);
            for _ in 0..ups {
                v = range.decrement(v);
            }
            prop_assert!(v >= range.min);
        }
    }
}
