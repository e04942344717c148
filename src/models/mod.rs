//! Data models for habitrack.
//!
//! This module contains all the core data structures used throughout the system.

mod entry;
mod habit;
mod report;

pub use entry::{Entry, LogOutcome};
pub use habit::{Habit, HabitId, TargetFrequency};
pub use report::{AnalyticsSummary, CategoryCount, DayRecord, Insight, ProgressReport, StreakRanking};
