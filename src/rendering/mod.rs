//! Text rendering for tool results and CLI output.
//!
//! All user-facing wording lives here so the store and stats layers stay
//! presentation-free. Output is markdown-flavored text, the common format
//! for tool-calling clients and terminals alike.

mod motivation;
mod templates;

pub use motivation::{MOTIVATIONAL_TIPS, random_tip};
pub use templates::{HabitTemplate, TEMPLATE_CATALOG, TemplateCategory};

use crate::models::{AnalyticsSummary, Habit, Insight, LogOutcome, ProgressReport};
use crate::store::StoreHealth;

/// How many trailing days the progress view prints in detail.
const RECENT_DAYS_SHOWN: usize = 7;

/// How many top streaks the shareable summary includes.
const SHARE_TOP_STREAKS: usize = 3;

/// Formats a rate the way the analytics layer rounds it, one decimal.
fn fmt_rate(rate: f64) -> String {
    format!("{rate:.1}")
}

/// Renders a confirmation for a newly created habit.
#[must_use]
pub fn render_habit_created(name: &str, habit_id: &str) -> String {
    format!("Created habit '{name}' with ID: {habit_id}\nReady to start tracking!")
}

/// Renders the outcome of logging an entry.
#[must_use]
pub fn render_log_outcome(outcome: &LogOutcome) -> String {
    let status = if outcome.completed {
        "completed"
    } else {
        "not completed"
    };
    let mut output = format!("Logged '{}' as {status} for today", outcome.habit_name);
    if outcome.completed {
        output.push_str(&format!(" -- streak: {} days!", outcome.streak_count));
    }
    output
}

/// Renders the habit list with current statistics.
#[must_use]
pub fn render_habit_list(habits: &[Habit]) -> String {
    if habits.is_empty() {
        return "No habits found. Create your first habit to get started!\n\n\
                Try: 'Create a habit for daily meditation'"
            .to_string();
    }

    let mut output = String::from("**Your Habits:**\n\n");
    for habit in habits {
        output.push_str(&format!("**{}** (ID: {})\n", habit.name, habit.id));
        output.push_str(&format!("  Category: {}\n", habit.category));
        output.push_str(&format!(
            "  Target: {}x {}\n",
            habit.target_count, habit.target_frequency
        ));
        output.push_str(&format!("  Current streak: {} days\n", habit.streak_count));
        output.push_str(&format!(
            "  Total completions: {}\n",
            habit.total_completions
        ));
        output.push_str(&format!("  {}\n\n", habit.description));
    }
    output
}

/// Renders a progress report: summary numbers plus the trailing week of
/// day records.
#[must_use]
pub fn render_progress(report: &ProgressReport) -> String {
    let mut output = format!("**Progress for '{}'**\n\n", report.habit.name);
    output.push_str(&format!(
        "Completion Rate: {}%\n",
        fmt_rate(report.completion_rate)
    ));
    output.push_str(&format!(
        "Completed: {}/{} days\n",
        report.completed_days, report.total_days
    ));
    output.push_str(&format!(
        "Current Streak: {} days\n\n",
        report.habit.streak_count
    ));

    output.push_str("**Recent Progress (Last 7 Days):**\n");
    let start = report.days.len().saturating_sub(RECENT_DAYS_SHOWN);
    for day in &report.days[start..] {
        let status = if day.completed { "[x]" } else { "[ ]" };
        output.push_str(&format!("{}: {status}", day.date));
        if !day.notes.is_empty() {
            output.push_str(&format!(" - {}", day.notes));
        }
        output.push('\n');
    }
    output
}

/// Renders the cross-habit analytics summary.
#[must_use]
pub fn render_analytics(summary: &AnalyticsSummary) -> String {
    let mut output = String::from("**Your Habit Analytics**\n\n");
    output.push_str(&format!("Total Active Habits: {}\n", summary.total_habits));
    output.push_str(&format!(
        "Today's Progress: {}/{} ({}%)\n\n",
        summary.today_completed,
        summary.today_total,
        fmt_rate(summary.today_completion_rate)
    ));

    if !summary.categories.is_empty() {
        output.push_str("**Categories:**\n");
        for category in &summary.categories {
            output.push_str(&format!(
                "  - {}: {} habits\n",
                title_case(&category.category),
                category.count
            ));
        }
        output.push('\n');
    }

    if !summary.best_streaks.is_empty() {
        output.push_str("**Top Streaks:**\n");
        for ranking in &summary.best_streaks {
            output.push_str(&format!("  - {}: {} days\n", ranking.name, ranking.streak));
        }
    }

    output
}

/// Renders one insight as a motivational sentence.
#[must_use]
pub fn render_insight(insight: &Insight) -> String {
    match insight {
        Insight::PerfectDay => {
            "Perfect day! You've completed all your habits today! You're unstoppable!".to_string()
        },
        Insight::StrongDay { rate } => format!(
            "Outstanding! You're at {}% today. You're building incredible momentum!",
            fmt_rate(*rate)
        ),
        Insight::HalfwayDay { rate } => format!(
            "You're halfway there at {}%! Every small step is progress worth celebrating!",
            fmt_rate(*rate)
        ),
        Insight::FreshStart { rate } => format!(
            "Fresh opportunities ahead! You're at {}% - there's still time to turn today around.",
            fmt_rate(*rate)
        ),
        Insight::StreakMaster { days } => {
            format!("Incredible! Your {days}-day streak shows you're a true habit master!")
        },
        Insight::StreakConsistent { days } => {
            format!("Your {days}-day streak proves you're developing real consistency!")
        },
        Insight::StreakStarted { days } => {
            format!("You've got a {days}-day streak going - keep the momentum alive!")
        },
        Insight::CategoryFocus { category } => {
            format!("You're prioritizing {category} habits - smart focus for maximum impact!")
        },
        Insight::ManyHabits => {
            "Tracking multiple habits shows serious commitment to growth - you're leveling up!"
                .to_string()
        },
        Insight::FirstHabits => {
            "Every expert started with one habit. You're building something amazing!".to_string()
        },
        Insight::Tip { text } => (*text).to_string(),
    }
}

/// Renders the full insight list as paragraphs, with a fallback for an
/// empty store.
#[must_use]
pub fn render_insights(insights: &[Insight]) -> String {
    if insights.is_empty() {
        return "Start tracking some habits to get personalized insights!".to_string();
    }
    insights
        .iter()
        .map(render_insight)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Renders the built-in template catalog.
#[must_use]
pub fn render_templates() -> String {
    let mut output = String::from("**Popular Habit Templates**\n\n");
    for category in TEMPLATE_CATALOG {
        output.push_str(&format!("**{}:**\n", title_case(category.category)));
        for template in category.templates {
            output.push_str(&format!(
                "  - {}: {} ({})\n",
                template.name, template.description, template.frequency
            ));
        }
        output.push('\n');
    }
    output.push_str("**To use a template, say:**\n");
    output.push_str(
        "\"Create a habit called Morning Workout in health category for daily 30-minute exercise\"\n",
    );
    output.push_str("\"Set up a Gratitude Journal habit for daily mindfulness practice\"\n");
    output
}

/// Renders a shareable progress summary.
///
/// Callers pass the active habit list; a paused habit's record streak does
/// not appear in the share text.
#[must_use]
pub fn render_shareable(summary: &AnalyticsSummary, habits: &[Habit]) -> String {
    // First maximum wins on ties, matching habit creation order.
    let mut best: Option<&Habit> = None;
    for habit in habits {
        if best.is_none_or(|b| habit.streak_count > b.streak_count) {
            best = Some(habit);
        }
    }

    let mut output = String::from("**My Habit Tracking Progress**\n\n");
    output.push_str(&format!(
        "Actively tracking {} habits\n",
        summary.total_habits
    ));
    output.push_str(&format!(
        "Best streak: {} days",
        best.map_or(0, |h| h.streak_count)
    ));
    if let Some(best) = best {
        output.push_str(&format!(" ({})", best.name));
    }
    output.push_str(&format!(
        "\nToday's completion: {}%\n",
        fmt_rate(summary.today_completion_rate)
    ));

    if !summary.best_streaks.is_empty() {
        output.push_str("\n**Top Performing Habits:**\n");
        for ranking in summary.best_streaks.iter().take(SHARE_TOP_STREAKS) {
            output.push_str(&format!(
                "  - {}: {} day streak\n",
                ranking.name, ranking.streak
            ));
        }
    }

    output.push_str("\nBuilding better habits, one day at a time!\n");
    output.push_str("\n#HabitTracker #SelfImprovement");
    output
}

/// Renders the store health report.
#[must_use]
pub fn render_health(health: &StoreHealth) -> String {
    let mut output = String::from("**Store Status**\n\n");
    output.push_str(&format!("Habits: {}\n", health.habit_count));
    output.push_str(&format!("Entries: {}\n", health.entry_count));
    if health.persistence_ok {
        output.push_str("Persistence: ok\n");
    } else {
        output.push_str("Persistence: degraded\n");
        if let Some(error) = &health.last_persist_error {
            output.push_str(&format!("Last error: {error}\n"));
        }
    }
    output
}

/// Uppercases the first character, e.g. `health` to `Health`.
fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryCount, DayRecord, HabitId, StreakRanking, TargetFrequency};

    fn habit(name: &str, streak: u32) -> Habit {
        Habit {
            id: HabitId::new("habit_0_aaaa1111"),
            name: name.to_string(),
            description: "20 pages".to_string(),
            category: "learning".to_string(),
            target_frequency: TargetFrequency::Daily,
            target_count: 1,
            created_date: "2025-05-01T07:00:00Z".parse().unwrap(),
            is_active: true,
            streak_count: streak,
            total_completions: streak,
        }
    }

    #[test]
    fn test_render_empty_habit_list() {
        let output = render_habit_list(&[]);
        assert!(output.contains("No habits found"));
    }

    #[test]
    fn test_render_habit_list_includes_stats() {
        let output = render_habit_list(&[habit("Read", 4)]);
        assert!(output.contains("**Read** (ID: habit_0_aaaa1111)"));
        assert!(output.contains("Current streak: 4 days"));
        assert!(output.contains("Target: 1x daily"));
    }

    #[test]
    fn test_render_log_outcome_streak_only_when_completed() {
        let outcome = LogOutcome {
            habit_id: HabitId::new("habit_0_aaaa1111"),
            habit_name: "Read".to_string(),
            date: "2025-05-10".parse().unwrap(),
            completed: true,
            streak_count: 3,
            total_completions: 9,
        };
        assert!(render_log_outcome(&outcome).contains("streak: 3 days"));

        let missed = LogOutcome {
            completed: false,
            ..outcome
        };
        let output = render_log_outcome(&missed);
        assert!(output.contains("not completed"));
        assert!(!output.contains("streak"));
    }

    #[test]
    fn test_render_progress_last_seven_days() {
        let days = (1..=10)
            .map(|d| DayRecord {
                date: format!("2025-05-{d:02}").parse().unwrap(),
                completed: d % 2 == 0,
                notes: String::new(),
            })
            .collect();
        let report = ProgressReport {
            habit: habit("Read", 1),
            days,
            completion_rate: 50.0,
            total_days: 10,
            completed_days: 5,
        };

        let output = render_progress(&report);
        assert!(output.contains("Completion Rate: 50.0%"));
        assert!(!output.contains("2025-05-03"));
        assert!(output.contains("2025-05-04"));
        assert!(output.contains("2025-05-10"));
    }

    #[test]
    fn test_render_analytics_sections() {
        let summary = AnalyticsSummary {
            total_habits: 2,
            categories: vec![CategoryCount {
                category: "health".to_string(),
                count: 2,
            }],
            today_completed: 1,
            today_total: 2,
            today_completion_rate: 50.0,
            best_streaks: vec![StreakRanking {
                habit_id: HabitId::new("habit_0_aaaa1111"),
                name: "Run".to_string(),
                streak: 6,
            }],
        };

        let output = render_analytics(&summary);
        assert!(output.contains("Today's Progress: 1/2 (50.0%)"));
        assert!(output.contains("Health: 2 habits"));
        assert!(output.contains("Run: 6 days"));
    }

    #[test]
    fn test_render_insights_empty_fallback() {
        assert!(render_insights(&[]).contains("Start tracking"));
    }

    #[test]
    fn test_render_insight_interpolation() {
        let text = render_insight(&Insight::StrongDay { rate: 83.3 });
        assert!(text.contains("83.3%"));

        let text = render_insight(&Insight::StreakMaster { days: 42 });
        assert!(text.contains("42-day streak"));
    }

    #[test]
    fn test_render_templates_lists_all_categories() {
        let output = render_templates();
        for category in ["Health", "Productivity", "Mindfulness", "Learning"] {
            assert!(output.contains(&format!("**{category}:**")));
        }
        assert!(output.contains("Morning Workout"));
    }

    #[test]
    fn test_render_shareable_names_best_habit() {
        let summary = AnalyticsSummary {
            total_habits: 1,
            categories: vec![],
            today_completed: 0,
            today_total: 1,
            today_completion_rate: 0.0,
            best_streaks: vec![],
        };
        let habits = vec![habit("Run", 12), habit("Read", 3)];

        let output = render_shareable(&summary, &habits);
        assert!(output.contains("Best streak: 12 days (Run)"));
    }

    #[test]
    fn test_render_health_degraded() {
        let output = render_health(&StoreHealth {
            habit_count: 1,
            entry_count: 2,
            persistence_ok: false,
            last_persist_error: Some("disk full".to_string()),
        });
        assert!(output.contains("degraded"));
        assert!(output.contains("disk full"));
    }
}
