//! End-to-end store tests against the JSON file backend.
//!
//! Exercises the full path: create habits, log entries across days with a
//! controllable clock, derive statistics, and survive a process restart by
//! reopening the same snapshot file.

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::NaiveDate;
use habitrack::{
    FixedClock, HabitStore, JsonFileBackend, SharedStore, TargetFrequency,
};
use std::path::Path;
use tempfile::TempDir;

fn open_on(path: &Path, day: &str) -> HabitStore {
    let date: NaiveDate = day.parse().unwrap();
    HabitStore::open(
        Box::new(JsonFileBackend::new(path)),
        Box::new(FixedClock::at(date)),
    )
}

#[test]
fn test_streak_counts_consecutive_logged_completions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("habit_data.json");

    let mut store = open_on(&path, "2025-05-01");
    let id = store
        .create_habit("Read", "20 pages", "learning", TargetFrequency::Daily, 1)
        .unwrap();

    store.log_entry(&id, true, "").unwrap();

    let mut store = open_on(&path, "2025-05-02");
    store.log_entry(&id, false, "travel day").unwrap();

    let mut store = open_on(&path, "2025-05-03");
    store.log_entry(&id, true, "").unwrap();

    let mut store = open_on(&path, "2025-05-04");
    let outcome = store.log_entry(&id, true, "").unwrap();

    // The explicit miss on the 2nd caps the streak at the two most recent
    // completions, while the lifetime count sees all three.
    assert_eq!(outcome.streak_count, 2);
    assert_eq!(outcome.total_completions, 3);
}

#[test]
fn test_calendar_gap_does_not_break_streak() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("habit_data.json");

    let mut store = open_on(&path, "2025-05-01");
    let id = store
        .create_habit("Run", "", "health", TargetFrequency::Daily, 1)
        .unwrap();
    store.log_entry(&id, true, "").unwrap();

    // Nothing logged on the 2nd through 4th.
    let mut store = open_on(&path, "2025-05-05");
    let outcome = store.log_entry(&id, true, "").unwrap();

    assert_eq!(outcome.streak_count, 2);
}

#[test]
fn test_restart_preserves_habits_and_stats() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("habit_data.json");

    let id = {
        let mut store = open_on(&path, "2025-05-01");
        let id = store
            .create_habit("Meditate", "10 minutes", "mindfulness", TargetFrequency::Daily, 1)
            .unwrap();
        store.log_entry(&id, true, "calm morning").unwrap();
        id
    };

    let store = open_on(&path, "2025-05-02");
    let habit = store.habit(&id).expect("habit survives restart");
    assert_eq!(habit.name, "Meditate");
    assert_eq!(habit.streak_count, 1);
    assert_eq!(habit.total_completions, 1);
    assert_eq!(store.entries().len(), 1);
    assert_eq!(store.entries()[0].notes, "calm morning");
}

#[test]
fn test_ids_stay_unique_across_restarts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("habit_data.json");

    let first = {
        let mut store = open_on(&path, "2025-05-01");
        store
            .create_habit("One", "", "general", TargetFrequency::Daily, 1)
            .unwrap()
    };

    let second = {
        let mut store = open_on(&path, "2025-05-02");
        store
            .create_habit("Two", "", "general", TargetFrequency::Daily, 1)
            .unwrap()
    };

    assert_ne!(first, second);
    assert!(first.as_str().starts_with("habit_0_"));
    assert!(second.as_str().starts_with("habit_1_"));
}

#[test]
fn test_progress_window_covers_trailing_days() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("habit_data.json");

    let mut store = open_on(&path, "2025-05-04");
    let id = store
        .create_habit("Read", "", "learning", TargetFrequency::Daily, 1)
        .unwrap();
    store.log_entry(&id, true, "chapter 1").unwrap();

    let store = open_on(&path, "2025-05-10");
    let report = store.progress(&id, 7).unwrap();

    assert_eq!(report.total_days, 7);
    assert_eq!(report.days.len(), 7);
    assert_eq!(report.days[0].date, "2025-05-04".parse::<NaiveDate>().unwrap());
    assert_eq!(report.days[6].date, "2025-05-10".parse::<NaiveDate>().unwrap());
    assert!(report.days[0].completed);
    assert_eq!(report.days[0].notes, "chapter 1");
    assert!(report.days[1..].iter().all(|d| !d.completed));
    assert_eq!(report.completed_days, 1);
    assert!((report.completion_rate - 14.3).abs() < 1e-9);
}

#[test]
fn test_analytics_across_habits() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("habit_data.json");

    let mut store = open_on(&path, "2025-05-10");
    let run = store
        .create_habit("Run", "", "health", TargetFrequency::Daily, 1)
        .unwrap();
    let read = store
        .create_habit("Read", "", "learning", TargetFrequency::Daily, 1)
        .unwrap();
    store
        .create_habit("Sleep", "", "health", TargetFrequency::Daily, 1)
        .unwrap();

    store.log_entry(&run, true, "").unwrap();
    store.log_entry(&read, false, "").unwrap();

    let summary = store.analytics();
    assert_eq!(summary.total_habits, 3);
    assert_eq!(summary.today_completed, 1);
    assert_eq!(summary.today_total, 3);
    assert!((summary.today_completion_rate - 33.3).abs() < 1e-9);
    assert_eq!(summary.categories[0].category, "health");
    assert_eq!(summary.categories[0].count, 2);
    assert_eq!(summary.categories[1].category, "learning");
    assert_eq!(summary.best_streaks.len(), 3);
    assert_eq!(summary.best_streaks[0].name, "Run");
}

#[test]
fn test_shared_store_serves_concurrent_readers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("habit_data.json");

    let mut store = open_on(&path, "2025-05-10");
    let id = store
        .create_habit("Run", "", "health", TargetFrequency::Daily, 1)
        .unwrap();
    store.log_entry(&id, true, "").unwrap();

    let shared = SharedStore::new(store);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let shared = shared.clone();
            let id = id.clone();
            std::thread::spawn(move || {
                let report = shared.read(|s| s.progress(&id, 7)).unwrap();
                assert_eq!(report.total_days, 7);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_corrupt_snapshot_starts_empty_but_reports_degraded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("habit_data.json");
    std::fs::write(&path, "{ definitely not json").unwrap();

    let store = open_on(&path, "2025-05-10");
    let health = store.health();

    assert_eq!(health.habit_count, 0);
    assert!(!health.persistence_ok);
    assert!(health.last_persist_error.is_some());
}
