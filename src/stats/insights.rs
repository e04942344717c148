//! Insight threshold selection.
//!
//! Turns the analytics summary into a list of [`Insight`] variants via
//! fixed threshold bands. The band boundaries are load-bearing: they decide
//! which message category the presentation layer shows, so they must not
//! drift. Wording lives in [`crate::rendering`].

use crate::models::{AnalyticsSummary, Habit, Insight};

/// Selects insights from the analytics summary and habit list.
///
/// Bands, in emission order:
/// - completion rate: `100` exactly, then `>= 80`, `>= 50`, else fresh start
/// - best streak over active habits: `>= 30`, `>= 7`, `>= 1`
/// - category focus: the most common category, first-seen tie-break
/// - habit count: `>= 5`, then `>= 1`
///
/// The rotating motivational tip is appended by the caller; keeping it out
/// of here keeps this function deterministic for tests.
#[must_use]
pub fn insights(summary: &AnalyticsSummary, habits: &[Habit]) -> Vec<Insight> {
    let mut selected = Vec::new();

    let rate = summary.today_completion_rate;
    if (rate - 100.0).abs() < f64::EPSILON {
        selected.push(Insight::PerfectDay);
    } else if rate >= 80.0 {
        selected.push(Insight::StrongDay { rate });
    } else if rate >= 50.0 {
        selected.push(Insight::HalfwayDay { rate });
    } else {
        selected.push(Insight::FreshStart { rate });
    }

    let best_streak = habits
        .iter()
        .filter(|h| h.is_active)
        .map(|h| h.streak_count)
        .max()
        .unwrap_or(0);
    if best_streak >= 30 {
        selected.push(Insight::StreakMaster { days: best_streak });
    } else if best_streak >= 7 {
        selected.push(Insight::StreakConsistent { days: best_streak });
    } else if best_streak >= 1 {
        selected.push(Insight::StreakStarted { days: best_streak });
    }

    // Most common category; categories are in first-seen order and a
    // strict comparison keeps the first maximum on ties.
    let mut focus: Option<&crate::models::CategoryCount> = None;
    for category in &summary.categories {
        if focus.is_none_or(|f| category.count > f.count) {
            focus = Some(category);
        }
    }
    if let Some(focus) = focus {
        selected.push(Insight::CategoryFocus {
            category: focus.category.clone(),
        });
    }

    if summary.total_habits >= 5 {
        selected.push(Insight::ManyHabits);
    } else if summary.total_habits >= 1 {
        selected.push(Insight::FirstHabits);
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryCount, HabitId, TargetFrequency};

    fn summary(rate: f64, total: u32, categories: Vec<(&str, u32)>) -> AnalyticsSummary {
        AnalyticsSummary {
            total_habits: total,
            categories: categories
                .into_iter()
                .map(|(category, count)| CategoryCount {
                    category: category.to_string(),
                    count,
                })
                .collect(),
            today_completed: 0,
            today_total: total,
            today_completion_rate: rate,
            best_streaks: vec![],
        }
    }

    fn habit_with_streak(id: &str, streak: u32, active: bool) -> Habit {
        Habit {
            id: HabitId::new(id),
            name: id.to_string(),
            description: String::new(),
            category: "misc".to_string(),
            target_frequency: TargetFrequency::Daily,
            target_count: 1,
            created_date: "2025-05-01T07:00:00Z".parse().unwrap(),
            is_active: active,
            streak_count: streak,
            total_completions: 0,
        }
    }

    fn has_perfect(insights: &[Insight]) -> bool {
        insights.iter().any(|i| matches!(i, Insight::PerfectDay))
    }

    #[test]
    fn test_completion_bands() {
        let all = insights(&summary(100.0, 0, vec![]), &[]);
        assert!(has_perfect(&all));

        let all = insights(&summary(85.0, 0, vec![]), &[]);
        assert!(matches!(all[0], Insight::StrongDay { .. }));

        let all = insights(&summary(80.0, 0, vec![]), &[]);
        assert!(matches!(all[0], Insight::StrongDay { .. }));

        let all = insights(&summary(50.0, 0, vec![]), &[]);
        assert!(matches!(all[0], Insight::HalfwayDay { .. }));

        let all = insights(&summary(49.9, 0, vec![]), &[]);
        assert!(matches!(all[0], Insight::FreshStart { .. }));
    }

    #[test]
    fn test_streak_bands() {
        let habits = vec![habit_with_streak("h1", 31, true)];
        let all = insights(&summary(0.0, 1, vec![]), &habits);
        assert!(all.iter().any(|i| matches!(i, Insight::StreakMaster { days: 31 })));

        let habits = vec![habit_with_streak("h1", 7, true)];
        let all = insights(&summary(0.0, 1, vec![]), &habits);
        assert!(all.iter().any(|i| matches!(i, Insight::StreakConsistent { days: 7 })));

        let habits = vec![habit_with_streak("h1", 1, true)];
        let all = insights(&summary(0.0, 1, vec![]), &habits);
        assert!(all.iter().any(|i| matches!(i, Insight::StreakStarted { days: 1 })));

        let habits = vec![habit_with_streak("h1", 0, true)];
        let all = insights(&summary(0.0, 1, vec![]), &habits);
        assert!(!all.iter().any(|i| {
            matches!(
                i,
                Insight::StreakMaster { .. }
                    | Insight::StreakConsistent { .. }
                    | Insight::StreakStarted { .. }
            )
        }));
    }

    #[test]
    fn test_streak_band_ignores_inactive_habits() {
        // A paused habit's record streak does not drive the band; only
        // active habits feed the best-streak scan.
        let habits = vec![
            habit_with_streak("h1", 2, true),
            habit_with_streak("h2", 40, false),
        ];
        let all = insights(&summary(0.0, 1, vec![]), &habits);
        assert!(!all.iter().any(|i| matches!(i, Insight::StreakMaster { .. })));
        assert!(all.iter().any(|i| matches!(i, Insight::StreakStarted { days: 2 })));
    }

    #[test]
    fn test_category_focus_first_seen_tie_break() {
        let all = insights(&summary(0.0, 4, vec![("health", 2), ("learning", 2)]), &[]);
        assert!(all.iter().any(|i| {
            matches!(i, Insight::CategoryFocus { category } if category == "health")
        }));
    }

    #[test]
    fn test_no_category_focus_without_categories() {
        let all = insights(&summary(0.0, 0, vec![]), &[]);
        assert!(!all.iter().any(|i| matches!(i, Insight::CategoryFocus { .. })));
    }

    #[test]
    fn test_habit_count_bands() {
        let all = insights(&summary(0.0, 5, vec![]), &[]);
        assert!(all.iter().any(|i| matches!(i, Insight::ManyHabits)));
        assert!(!all.iter().any(|i| matches!(i, Insight::FirstHabits)));

        let all = insights(&summary(0.0, 1, vec![]), &[]);
        assert!(all.iter().any(|i| matches!(i, Insight::FirstHabits)));

        let all = insights(&summary(0.0, 0, vec![]), &[]);
        assert!(!all.iter().any(|i| {
            matches!(i, Insight::ManyHabits | Insight::FirstHabits)
        }));
    }
}
