//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod exercise;
pub mod preference;
pub mod record;
pub mod user;

pub use exercise::{ExerciseRecord, ExerciseRepository};
pub use preference::PreferenceRepository;
pub use record::{HistoryRow, RecordRepository, WorkoutRecordRow};
pub use user::{UserRecord, UserRepository};
