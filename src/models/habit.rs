//! Habit types and identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a habit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(String);

impl HabitId {
    /// Creates a new habit ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for HabitId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for HabitId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Target frequency for a habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFrequency {
    /// Once (or more) every day.
    #[default]
    Daily,
    /// Per-week target.
    Weekly,
    /// Per-month target.
    Monthly,
}

impl TargetFrequency {
    /// Returns all frequency variants.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Daily, Self::Weekly, Self::Monthly]
    }

    /// Returns the frequency as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Parses a frequency from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }
}

impl fmt::Display for TargetFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tracked recurring behavior.
///
/// `streak_count` and `total_completions` are derived from the entry log by
/// the statistics engine and are never mutated independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Habit {
    /// Unique identifier, immutable after creation.
    pub id: HabitId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Free-text category label (e.g. "health", "learning").
    pub category: String,
    /// How often the habit should be performed.
    pub target_frequency: TargetFrequency,
    /// Target occurrences per frequency period. Always >= 1.
    pub target_count: u32,
    /// Creation timestamp.
    pub created_date: DateTime<Utc>,
    /// Whether the habit is currently tracked. Modeled in the data but not
    /// toggled by any exposed operation.
    pub is_active: bool,
    /// Current streak, derived. Consecutive completed entries walking
    /// backward from the most recent logged date.
    pub streak_count: u32,
    /// Completed entries across the entire history, derived.
    pub total_completions: u32,
}
