//! TopWeight Shared Library
//!
//! Domain model, record construction rules and history grouping shared by
//! the backend service and the WASM bindings.

pub mod errors;
pub mod history;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use types::*;

pub use history::{group_by_day, record_detail_text, section_title, DaySection};
pub use models::{AvatarDisplay, Exercise, ExerciseKind, PresetAvatar, User, WorkoutRecord};
pub use validation::{build_record, InputRange, InputRanges, RecordDraft};
