//! Data models for the TopWeight workout log
//!
//! Three entities make up the object graph: [`User`] (an athlete profile),
//! [`Exercise`] and [`WorkoutRecord`]. Records reference their owner and
//! exercise by id; deleting either parent deletes its records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Symbol shown for a user with neither a photo nor a preset avatar
pub const PLACEHOLDER_AVATAR_SYMBOL: &str = "person.circle.fill";

/// What an exercise measures.
///
/// Stored as a raw string. Unknown raw values decode to [`ExerciseKind::Strength`]
/// so that legacy or corrupted rows stay usable.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ExerciseKind {
    /// Weight, reps and series
    #[default]
    Strength,
    /// Kilometres plus an indoor/outdoor flag
    Distance,
    /// Repetition count only (push-ups, pull-ups, ...)
    RepsOnly,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 3] = [
        ExerciseKind::Strength,
        ExerciseKind::Distance,
        ExerciseKind::RepsOnly,
    ];

    /// Raw storage value
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseKind::Strength => "strength",
            ExerciseKind::Distance => "distance",
            ExerciseKind::RepsOnly => "repsOnly",
        }
    }

    /// Decode a raw storage value, falling back to strength
    pub fn from_raw(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_default()
    }

    /// Strict decode, `None` for unknown values
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == raw)
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preset avatar symbols offered when a user has no photo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PresetAvatar {
    #[serde(rename = "person.fill")]
    PersonFill,
    #[serde(rename = "person.circle.fill")]
    PersonCircle,
    #[serde(rename = "figure.run")]
    FigureRun,
    #[serde(rename = "figure.strengthtraining.traditional")]
    FigureStrength,
    #[serde(rename = "dumbbell.fill")]
    Dumbbell,
    #[serde(rename = "heart.fill")]
    Heart,
    #[serde(rename = "star.fill")]
    Star,
    #[serde(rename = "bolt.fill")]
    Bolt,
    #[serde(rename = "flame.fill")]
    Flame,
    #[serde(rename = "trophy.fill")]
    Trophy,
}

impl PresetAvatar {
    pub const ALL: [PresetAvatar; 10] = [
        PresetAvatar::PersonFill,
        PresetAvatar::PersonCircle,
        PresetAvatar::FigureRun,
        PresetAvatar::FigureStrength,
        PresetAvatar::Dumbbell,
        PresetAvatar::Heart,
        PresetAvatar::Star,
        PresetAvatar::Bolt,
        PresetAvatar::Flame,
        PresetAvatar::Trophy,
    ];

    pub fn symbol_name(&self) -> &'static str {
        match self {
            PresetAvatar::PersonFill => "person.fill",
            PresetAvatar::PersonCircle => "person.circle.fill",
            PresetAvatar::FigureRun => "figure.run",
            PresetAvatar::FigureStrength => "figure.strengthtraining.traditional",
            PresetAvatar::Dumbbell => "dumbbell.fill",
            PresetAvatar::Heart => "heart.fill",
            PresetAvatar::Star => "star.fill",
            PresetAvatar::Bolt => "bolt.fill",
            PresetAvatar::Flame => "flame.fill",
            PresetAvatar::Trophy => "trophy.fill",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.symbol_name() == symbol)
    }
}

/// How a user's avatar should be rendered
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AvatarDisplay {
    /// A custom JPEG photo is stored for the user
    Photo,
    /// A preset symbol was chosen
    Symbol { symbol: String },
    /// Nothing chosen
    Placeholder { symbol: String },
}

impl AvatarDisplay {
    /// Photo first, then the preset symbol, then the placeholder
    pub fn resolve(has_photo: bool, avatar_symbol: Option<&str>) -> Self {
        if has_photo {
            AvatarDisplay::Photo
        } else if let Some(symbol) = avatar_symbol {
            AvatarDisplay::Symbol {
                symbol: symbol.to_string(),
            }
        } else {
            AvatarDisplay::Placeholder {
                symbol: PLACEHOLDER_AVATAR_SYMBOL.to_string(),
            }
        }
    }
}

/// Athlete profile records are logged against
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Custom photo from camera or library (JPEG data)
    #[serde(skip)]
    pub photo: Option<Vec<u8>>,
    /// Preset avatar symbol, used when there is no photo
    pub avatar_symbol: Option<String>,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
            photo: None,
            avatar_symbol: None,
        }
    }

    pub fn with_avatar_symbol(mut self, symbol: Option<String>) -> Self {
        self.avatar_symbol = symbol;
        self
    }

    pub fn avatar(&self) -> AvatarDisplay {
        AvatarDisplay::resolve(self.photo.is_some(), self.avatar_symbol.as_deref())
    }
}

/// An exercise users log records for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub kind: ExerciseKind,
    pub created_at: DateTime<Utc>,
}

impl Exercise {
    pub fn new(name: impl Into<String>, kind: ExerciseKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            created_at: Utc::now(),
        }
    }

    pub fn is_distance_type(&self) -> bool {
        self.kind == ExerciseKind::Distance
    }

    pub fn is_reps_only_type(&self) -> bool {
        self.kind == ExerciseKind::RepsOnly
    }
}

/// One logged performance of an exercise by a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutRecord {
    pub id: Uuid,
    /// Kilograms
    pub weight: f64,
    pub reps: i32,
    pub series: i32,
    pub date: DateTime<Utc>,
    /// Kilometres, present only for distance entries
    pub distance: Option<f64>,
    /// Meaningful only when `distance` is present
    pub is_indoor: Option<bool>,
    pub user_id: Option<Uuid>,
    pub exercise_id: Option<Uuid>,
}

impl WorkoutRecord {
    pub fn is_distance_entry(&self) -> bool {
        self.distance.is_some()
    }
}
