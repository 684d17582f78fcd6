// ABOUTME: Tests for completed-workout history, personal bests, and stats
// ABOUTME: Idempotent recording, monotonic bests, streaks, and per-user isolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{Duration as ChronoDuration, NaiveDate};
use common::{clock_at, date, init_test_logging, sample_workout, FlakyStorage, USER};
use std::sync::Arc;
use thryvin::clock::{Clock, ManualClock};
use thryvin::constants::storage_keys;
use thryvin::history::WorkoutHistory;
use thryvin::models::{
    CompletedWorkout, DayEntry, PerformedExercise, PerformedSet, WorkoutPerformance,
};
use thryvin::storage::{LocalStore, StorageKey};

struct Fixture {
    store: LocalStore,
    clock: Arc<ManualClock>,
    history: WorkoutHistory,
}

/// History with "today" on Thursday 2025-03-06
fn fixture() -> Fixture {
    init_test_logging();
    let store = LocalStore::in_memory();
    let clock = clock_at(date(2025, 3, 6));
    let history = WorkoutHistory::new(store.clone(), USER, clock.clone());
    Fixture {
        store,
        clock,
        history,
    }
}

fn completed(
    clock: &ManualClock,
    day: NaiveDate,
    exercises: &[&str],
    lifts: &[(&str, f64)],
) -> CompletedWorkout {
    let entry = DayEntry::workout(day, sample_workout("Session", exercises));
    CompletedWorkout {
        id: entry.id.clone(),
        date: day,
        snapshot: entry,
        performance: WorkoutPerformance {
            exercises: lifts
                .iter()
                .map(|(name, weight)| PerformedExercise {
                    name: (*name).to_owned(),
                    sets: vec![PerformedSet {
                        reps: 5,
                        weight: Some(*weight),
                    }],
                })
                .collect(),
            ..WorkoutPerformance::default()
        },
        completed_at: clock.now(),
    }
}

#[tokio::test]
async fn test_recording_same_id_twice_is_a_noop() {
    let f = fixture();
    let record = completed(&f.clock, date(2025, 3, 6), &["Row"], &[]);

    assert!(f.history.record(&record).await);
    assert!(!f.history.record(&record).await);

    assert_eq!(f.history.records().await.len(), 1);
    assert_eq!(f.history.stats().await.total_workouts, 1);
}

#[tokio::test]
async fn test_personal_bests_only_increase() {
    let f = fixture();
    let day = date(2025, 3, 6);

    assert!(f.history.update_personal_best("Deadlift", 140.0, day).await);
    assert!(!f.history.update_personal_best("deadlift", 120.0, day).await);
    assert!(!f.history.update_personal_best(" DEADLIFT ", 140.0, day).await);
    assert!(f.history.update_personal_best("Deadlift", 145.5, date(2025, 3, 7)).await);

    let best = f.history.personal_best("DeadLift").await.unwrap();
    assert!((best.weight - 145.5).abs() < f64::EPSILON);
    assert_eq!(best.achieved_on, date(2025, 3, 7));
    assert_eq!(f.history.personal_bests().await.len(), 1);
}

#[tokio::test]
async fn test_invalid_weights_are_ignored() {
    let f = fixture();
    let day = date(2025, 3, 6);

    assert!(!f.history.update_personal_best("Bench Press", 0.0, day).await);
    assert!(!f.history.update_personal_best("Bench Press", -5.0, day).await);
    assert!(!f.history.update_personal_best("Bench Press", f64::NAN, day).await);
    assert!(!f.history.update_personal_best("   ", 50.0, day).await);
    assert!(f.history.personal_bests().await.is_empty());
}

#[tokio::test]
async fn test_recording_updates_personal_bests_from_sets() {
    let f = fixture();
    let first = completed(
        &f.clock,
        date(2025, 3, 5),
        &["Back Squat"],
        &[("Back Squat", 100.0), ("Bench Press", 70.0)],
    );
    let second = completed(&f.clock, date(2025, 3, 6), &["Back Squat"], &[("back squat", 90.0)]);

    f.history.record(&first).await;
    f.history.record(&second).await;

    let squat = f.history.personal_best("Back Squat").await.unwrap();
    assert!((squat.weight - 100.0).abs() < f64::EPSILON);
    assert_eq!(squat.achieved_on, date(2025, 3, 5));
    assert!(f.history.personal_best("bench press").await.is_some());
}

#[tokio::test]
async fn test_stats_week_and_streak() {
    let f = fixture();
    // Previous Sunday, then Tuesday through Thursday of this week
    for day in [2, 4, 5, 6] {
        let record = completed(&f.clock, date(2025, 3, day), &["Row"], &[]);
        f.history.record(&record).await;
    }

    let stats = f.history.stats().await;
    assert_eq!(stats.total_workouts, 4);
    assert_eq!(stats.total_minutes, 180);
    assert_eq!(stats.workouts_this_week, 3);
    assert_eq!(stats.current_streak_days, 3);

    // Friday with nothing logged yet still counts Thursday's streak
    f.clock.advance(ChronoDuration::days(1));
    assert_eq!(f.history.stats().await.current_streak_days, 3);

    f.clock.advance(ChronoDuration::days(1));
    assert_eq!(f.history.stats().await.current_streak_days, 0);
}

#[tokio::test]
async fn test_recent_exercises_newest_first_without_duplicates() {
    let f = fixture();
    let older = completed(&f.clock, date(2025, 3, 4), &["Back Squat", "Plank"], &[]);
    f.clock.advance(ChronoDuration::hours(1));
    let newer = completed(&f.clock, date(2025, 3, 5), &["Bench Press", "plank"], &[]);

    f.history.record(&older).await;
    f.history.record(&newer).await;

    assert_eq!(
        f.history.recent_exercises(10).await,
        vec!["Bench Press", "plank", "Back Squat"]
    );
    assert_eq!(f.history.recent_exercises(1).await, vec!["Bench Press"]);
}

#[tokio::test]
async fn test_history_is_isolated_per_user() {
    let f = fixture();
    let other = WorkoutHistory::new(f.store.clone(), "user-2", f.clock.clone());

    f.history
        .record(&completed(&f.clock, date(2025, 3, 6), &["Row"], &[("Row", 60.0)]))
        .await;

    assert!(other.records().await.is_empty());
    assert!(other.personal_bests().await.is_empty());
    assert_eq!(other.stats().await.total_workouts, 0);

    f.history.clear().await;
    assert!(f.history.records().await.is_empty());
}

#[tokio::test]
async fn test_failed_read_never_lowers_personal_best() {
    init_test_logging();
    let backend = FlakyStorage::new();
    let store = LocalStore::new(backend.clone());
    let history = WorkoutHistory::new(store, USER, clock_at(date(2025, 3, 6)));

    assert!(history.update_personal_best("Squat", 140.0, date(2025, 3, 3)).await);

    backend.fail_next_read();
    assert!(!history.update_personal_best("Squat", 60.0, date(2025, 3, 6)).await);

    let best = history.personal_best("squat").await.unwrap();
    assert!((best.weight - 140.0).abs() < f64::EPSILON);
    assert_eq!(best.achieved_on, date(2025, 3, 3));
}

#[tokio::test]
async fn test_failed_read_keeps_existing_records() {
    init_test_logging();
    let backend = FlakyStorage::new();
    let clock = clock_at(date(2025, 3, 6));
    let history = WorkoutHistory::new(LocalStore::new(backend.clone()), USER, clock.clone());

    let monday = completed(&clock, date(2025, 3, 3), &["Row"], &[("Row", 80.0)]);
    let tuesday = completed(&clock, date(2025, 3, 4), &["Bench Press"], &[("Bench Press", 50.0)]);
    assert!(history.record(&monday).await);

    backend.fail_next_read();
    assert!(!history.record(&tuesday).await);

    let records = history.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, monday.id);
    assert!(history.personal_best("Bench Press").await.is_none());

    assert!(history.record(&tuesday).await);
    assert_eq!(history.records().await.len(), 2);
}

#[tokio::test]
async fn test_corrupt_bests_are_not_overwritten() {
    let f = fixture();
    let key = StorageKey::scoped(storage_keys::PERSONAL_BESTS, USER);
    f.store.set(&key, "{not json").await;

    assert!(!f.history.update_personal_best("Deadlift", 90.0, date(2025, 3, 6)).await);
    assert_eq!(f.store.get(&key).await.as_deref(), Some("{not json"));
}
