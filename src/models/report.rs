//! Derived view types: progress windows, analytics, insights.

use super::{Habit, HabitId};
use chrono::NaiveDate;
use serde::Serialize;

/// One calendar day within a progress window.
///
/// Dates with no logged entry default to `completed: false` with empty notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayRecord {
    /// The calendar date.
    pub date: NaiveDate,
    /// Whether the habit was completed on that date.
    pub completed: bool,
    /// Notes recorded with the entry, empty when no entry exists.
    pub notes: String,
}

/// Progress view for one habit over a trailing window of days.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    /// The habit the report describes, with current derived stats.
    pub habit: Habit,
    /// One record per day, ascending, covering `[today-(days-1), today]`.
    pub days: Vec<DayRecord>,
    /// Percentage of window days completed, rounded to one decimal place.
    pub completion_rate: f64,
    /// Number of days in the window.
    pub total_days: u32,
    /// Number of completed days in the window.
    pub completed_days: u32,
}

/// Habit count for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Category label.
    pub category: String,
    /// Number of active habits in the category.
    pub count: u32,
}

/// A habit's position in the streak leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakRanking {
    /// Habit id.
    pub habit_id: HabitId,
    /// Habit display name.
    pub name: String,
    /// Current streak in days.
    pub streak: u32,
}

/// Cross-habit aggregate derived from current habit/entry state.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSummary {
    /// Number of active habits.
    pub total_habits: u32,
    /// Active habit counts per category, in first-seen (creation) order.
    pub categories: Vec<CategoryCount>,
    /// Completed entries dated today.
    pub today_completed: u32,
    /// Number of active habits (today's denominator).
    pub today_total: u32,
    /// `100 * today_completed / max(active, 1)`, one decimal place.
    pub today_completion_rate: f64,
    /// Top habits by streak, descending, at most five, ties in creation order.
    pub best_streaks: Vec<StreakRanking>,
}

/// A motivational insight selected by the statistics engine.
///
/// Which variant fires is part of the core contract (threshold bands); the
/// user-facing wording lives in [`crate::rendering`].
#[derive(Debug, Clone, PartialEq)]
pub enum Insight {
    /// Today's completion rate is exactly 100%.
    PerfectDay,
    /// Today's completion rate is at least 80%.
    StrongDay {
        /// The completion rate.
        rate: f64,
    },
    /// Today's completion rate is at least 50%.
    HalfwayDay {
        /// The completion rate.
        rate: f64,
    },
    /// Today's completion rate is below 50%.
    FreshStart {
        /// The completion rate.
        rate: f64,
    },
    /// Best streak is at least 30 days.
    StreakMaster {
        /// The best streak length.
        days: u32,
    },
    /// Best streak is at least 7 days.
    StreakConsistent {
        /// The best streak length.
        days: u32,
    },
    /// Best streak is at least 1 day.
    StreakStarted {
        /// The best streak length.
        days: u32,
    },
    /// The category with the most active habits.
    CategoryFocus {
        /// The most common category.
        category: String,
    },
    /// Five or more habits are tracked.
    ManyHabits,
    /// At least one habit is tracked.
    FirstHabits,
    /// A rotating motivational tip.
    Tip {
        /// The tip text.
        text: &'static str,
    },
}
