//! Statistics engine.
//!
//! Pure derivation of streaks, completion totals, progress windows, and
//! cross-habit analytics from the entry log. Nothing here touches
//! persistence; the store persists after invoking these functions.
//!
//! The streak definition is deliberate and must not be "fixed": a streak
//! counts consecutive `completed` entries walking backward in date order
//! from the most recent *logged* entry. A day that was never logged does
//! not break the streak; only an explicit not-completed entry does.
//! Absence is not failure.

mod insights;

pub use insights::insights;

use crate::models::{
    AnalyticsSummary, CategoryCount, DayRecord, Entry, Habit, HabitId, ProgressReport,
    StreakRanking,
};
use chrono::{Days, NaiveDate};
use std::collections::HashMap;

/// Maximum number of habits reported in the streak leaderboard.
const BEST_STREAKS_LIMIT: usize = 5;

/// Rounds to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn to_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Derives `(streak_count, total_completions)` for one habit from the
/// entry log.
///
/// Total completions counts completed entries across the entire history.
/// The streak walks the habit's entries in descending date order and counts
/// completions until the first not-completed entry or the end of history.
#[must_use]
pub fn habit_stats(habit_id: &HabitId, entries: &[Entry]) -> (u32, u32) {
    let mut habit_entries: Vec<&Entry> = entries
        .iter()
        .filter(|e| &e.habit_id == habit_id)
        .collect();
    habit_entries.sort_by(|a, b| b.date.cmp(&a.date));

    let total = to_u32(habit_entries.iter().filter(|e| e.completed).count());

    let mut streak = 0u32;
    for entry in &habit_entries {
        if entry.completed {
            streak = streak.saturating_add(1);
        } else {
            break;
        }
    }

    (streak, total)
}

/// Builds a progress view for `habit` over `[today-(days-1), today]`.
///
/// Emits one [`DayRecord`] per calendar date, ascending. Dates with no
/// logged entry default to not-completed with empty notes. `days` must be
/// between 1 and [`crate::store::MAX_PROGRESS_DAYS`]; the store validates
/// this before calling.
#[must_use]
pub fn progress_window(
    habit: Habit,
    entries: &[Entry],
    today: NaiveDate,
    days: u32,
) -> ProgressReport {
    let by_date: HashMap<NaiveDate, &Entry> = entries
        .iter()
        .filter(|e| e.habit_id == habit.id)
        .map(|e| (e.date, e))
        .collect();

    let start = today
        .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
        .unwrap_or(today);

    let mut day_records = Vec::with_capacity(days as usize);
    let mut date = start;
    while date <= today {
        let record = by_date.get(&date).map_or_else(
            || DayRecord {
                date,
                completed: false,
                notes: String::new(),
            },
            |entry| DayRecord {
                date,
                completed: entry.completed,
                notes: entry.notes.clone(),
            },
        );
        day_records.push(record);

        let Some(next) = date.succ_opt() else { break };
        date = next;
    }

    let completed_days = to_u32(day_records.iter().filter(|d| d.completed).count());
    let total_days = to_u32(day_records.len());
    let completion_rate = round1(f64::from(completed_days) * 100.0 / f64::from(total_days.max(1)));

    ProgressReport {
        habit,
        days: day_records,
        completion_rate,
        total_days,
        completed_days,
    }
}

/// Derives the cross-habit analytics summary.
///
/// Categories are counted over active habits only and reported in
/// first-seen (creation) order. Today's completion count includes every
/// completed entry dated today. The streak leaderboard is a stable sort,
/// so ties keep creation order.
#[must_use]
pub fn analytics(habits: &[Habit], entries: &[Entry], today: NaiveDate) -> AnalyticsSummary {
    let active: Vec<&Habit> = habits.iter().filter(|h| h.is_active).collect();

    let mut categories: Vec<CategoryCount> = Vec::new();
    for habit in &active {
        match categories.iter_mut().find(|c| c.category == habit.category) {
            Some(count) => count.count = count.count.saturating_add(1),
            None => categories.push(CategoryCount {
                category: habit.category.clone(),
                count: 1,
            }),
        }
    }

    let today_completed = to_u32(
        entries
            .iter()
            .filter(|e| e.date == today && e.completed)
            .count(),
    );

    let total_habits = to_u32(active.len());
    let today_completion_rate =
        round1(f64::from(today_completed) * 100.0 / f64::from(total_habits.max(1)));

    let mut ranked = active.clone();
    ranked.sort_by(|a, b| b.streak_count.cmp(&a.streak_count));
    let best_streaks = ranked
        .iter()
        .take(BEST_STREAKS_LIMIT)
        .map(|h| StreakRanking {
            habit_id: h.id.clone(),
            name: h.name.clone(),
            streak: h.streak_count,
        })
        .collect();

    AnalyticsSummary {
        total_habits,
        categories,
        today_completed,
        today_total: total_habits,
        today_completion_rate,
        best_streaks,
    }
}
