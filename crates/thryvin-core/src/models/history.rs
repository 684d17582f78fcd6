// ABOUTME: Completed-workout records, personal bests, and derived statistics
// ABOUTME: Records are immutable snapshots appended when a workout is finished
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::schedule::DayEntry;

/// One performed set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformedSet {
    /// Reps actually completed
    pub reps: u32,
    /// Load used, if weighted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// Sets performed for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformedExercise {
    /// Exercise name as planned
    pub name: String,
    /// Performed sets in order
    pub sets: Vec<PerformedSet>,
}

impl PerformedExercise {
    /// Heaviest load lifted across all sets
    #[must_use]
    pub fn max_weight(&self) -> Option<f64> {
        self.sets
            .iter()
            .filter_map(|s| s.weight)
            .filter(|w| w.is_finite())
            .reduce(f64::max)
    }
}

/// What the user actually did, captured when finishing a workout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPerformance {
    /// Performed exercises
    #[serde(default)]
    pub exercises: Vec<PerformedExercise>,
    /// Perceived effort (1-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort: Option<u8>,
    /// Actual duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Immutable record of a finished workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedWorkout {
    /// Id of the completed day entry
    pub id: String,
    /// Scheduled date
    pub date: NaiveDate,
    /// Snapshot of the day entry at completion time
    pub snapshot: DayEntry,
    /// Performed work
    pub performance: WorkoutPerformance,
    /// Completion timestamp
    pub completed_at: DateTime<Utc>,
}

impl CompletedWorkout {
    /// Minutes trained, preferring the measured duration over the planned one
    #[must_use]
    pub fn minutes(&self) -> u32 {
        self.performance.duration_minutes.unwrap_or_else(|| {
            self.snapshot
                .workout_content()
                .map_or(0, |w| w.duration_minutes)
        })
    }
}

/// Best load ever recorded for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalBest {
    /// Exercise name
    pub exercise: String,
    /// Heaviest load
    pub weight: f64,
    /// Date the load was achieved
    pub achieved_on: NaiveDate,
}

/// Summary statistics derived from the completed-workout list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    /// Distinct completed workouts
    pub total_workouts: usize,
    /// Total minutes trained
    pub total_minutes: u64,
    /// Workouts completed in the current Monday-based week
    pub workouts_this_week: usize,
    /// Consecutive days with a completed workout, ending today or yesterday
    pub current_streak_days: u32,
}
