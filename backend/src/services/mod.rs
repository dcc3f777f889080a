//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the shared domain rules.

pub mod exercise;
pub mod history;
pub mod record;
pub mod selection;
pub mod user;

pub use exercise::ExerciseService;
pub use history::{HistoryEntry, HistoryService, ViewerZone};
pub use record::{LogRecordInput, RecordService};
pub use selection::{Selection, SelectionService};
pub use user::UserService;
