//! Completion entry types.

use super::HabitId;
use chrono::{DateTime, NaiveDate, Utc};

/// A single day's completion record for one habit.
///
/// Entries are keyed by `(habit_id, date)`; logging the same habit twice on
/// one date overwrites the earlier record rather than accumulating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The habit this entry belongs to. Non-owning back-reference; entries
    /// may outlive their habit (no cascading delete is defined).
    pub habit_id: HabitId,
    /// Calendar date of the entry (caller's local date at log time).
    pub date: NaiveDate,
    /// Whether the habit was completed that day.
    pub completed: bool,
    /// Optional free-text notes.
    pub notes: String,
    /// Last-write timestamp.
    pub timestamp: DateTime<Utc>,
}

/// Result of logging an entry, carrying the refreshed derived stats so the
/// presentation layer can report them without a second query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOutcome {
    /// The habit the entry was logged against.
    pub habit_id: HabitId,
    /// Habit display name.
    pub habit_name: String,
    /// The date the entry was recorded for.
    pub date: NaiveDate,
    /// Completed or explicitly not completed.
    pub completed: bool,
    /// Streak after recomputation.
    pub streak_count: u32,
    /// Total completions after recomputation.
    pub total_completions: u32,
}
