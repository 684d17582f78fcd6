// ABOUTME: Tests for best-effort background side effects
// ABOUTME: Outcomes are captured per task and failures never escape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{init_test_logging, monday, sample_workout, RecordingTelemetry, USER};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use thryvin::api::WorkoutTelemetry;
use thryvin::errors::AppError;
use thryvin::models::{CompletedWorkout, DayEntry, WorkoutPerformance};
use thryvin::telemetry::{
    report_completion, spawn_best_effort, BestEffortOutcome, WORKOUT_COMPLETED_EVENT,
};
use tokio::task::JoinHandle;

fn record() -> CompletedWorkout {
    let entry = DayEntry::workout(monday(), sample_workout("Lower Body", &["Back Squat"]));
    CompletedWorkout {
        id: entry.id.clone(),
        date: monday(),
        snapshot: entry,
        performance: WorkoutPerformance::default(),
        completed_at: chrono::Utc::now(),
    }
}

async fn join_all(handles: Vec<JoinHandle<BestEffortOutcome>>) -> Vec<BestEffortOutcome> {
    let mut outcomes = Vec::with_capacity(handles.len());
    for handle in handles {
        outcomes.push(handle.await.unwrap());
    }
    outcomes
}

#[tokio::test]
async fn test_spawned_failure_becomes_outcome() {
    init_test_logging();
    let ok = spawn_best_effort("ok", async { Ok(()) });
    let failed = spawn_best_effort("failing", async {
        Err(AppError::external_unavailable("telemetry", "offline"))
    });

    assert_eq!(ok.await.unwrap(), BestEffortOutcome::Succeeded);
    match failed.await.unwrap() {
        BestEffortOutcome::Failed(message) => assert!(message.contains("offline")),
        BestEffortOutcome::Succeeded => panic!("expected failure"),
    }
}

#[tokio::test]
async fn test_report_completion_fans_out_three_calls() {
    init_test_logging();
    let recorder = RecordingTelemetry::new();
    let telemetry: Arc<dyn WorkoutTelemetry> = recorder.clone();
    let record = record();

    let outcomes = join_all(report_completion(&telemetry, USER, &record)).await;

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(BestEffortOutcome::is_success));
    assert_eq!(recorder.completions.load(Ordering::SeqCst), 1);
    assert_eq!(recorder.performances.load(Ordering::SeqCst), 1);

    let badges = recorder.badges.lock().unwrap();
    assert_eq!(badges[0].event, WORKOUT_COMPLETED_EVENT);
    assert_eq!(badges[0].workout_id.as_deref(), Some(record.id.as_str()));
}

#[tokio::test]
async fn test_report_completion_survives_offline_backend() {
    init_test_logging();
    let recorder = RecordingTelemetry::failing();
    let telemetry: Arc<dyn WorkoutTelemetry> = recorder.clone();

    let outcomes = join_all(report_completion(&telemetry, USER, &record())).await;

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes
        .iter()
        .all(|o| matches!(o, BestEffortOutcome::Failed(_))));
}
