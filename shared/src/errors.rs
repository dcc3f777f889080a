//! Error types for the TopWeight workout log

use crate::models::ExerciseKind;
use thiserror::Error;

/// Why a record could not be built from the entered values.
///
/// None of these are fatal: the caller keeps its input and can retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("No user selected")]
    NoUserSelected,

    #[error("No exercise selected")]
    NoExerciseSelected,

    #[error("Distance must be greater than 0 km")]
    DistanceRequired,

    #[error("Reps must be greater than 0")]
    RepsRequired,

    #[error("Weight, reps and series must all be greater than 0")]
    StrengthFieldsRequired,
}

impl RecordError {
    /// Input field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            RecordError::NoUserSelected => "user_id",
            RecordError::NoExerciseSelected => "exercise_id",
            RecordError::DistanceRequired => "distance",
            RecordError::RepsRequired => "reps",
            RecordError::StrengthFieldsRequired => "weight",
        }
    }

    /// Rejection reported for a kind's acceptance rule
    pub fn for_kind(kind: ExerciseKind) -> Self {
        match kind {
            ExerciseKind::Distance => RecordError::DistanceRequired,
            ExerciseKind::RepsOnly => RecordError::RepsRequired,
            ExerciseKind::Strength => RecordError::StrengthFieldsRequired,
        }
    }
}

/// Name validation failures for users and exercises
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NameError {
    #[error("{0} name cannot be empty")]
    Empty(&'static str),

    #[error("{entity} name must be at most {max} characters")]
    TooLong { entity: &'static str, max: usize },
}
