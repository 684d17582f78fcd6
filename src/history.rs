// ABOUTME: Append-only completed-workout history with personal bests and stats
// ABOUTME: Completion is idempotent by record id; personal bests never decrease
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

//! # Workout history
//!
//! Completed workouts are stored as one JSON list per user. Records are
//! created once and never edited, so recording the same id twice leaves the
//! list untouched. Personal bests are kept in a second list and only move up.

use crate::clock::Clock;
use crate::constants::storage_keys;
use crate::models::{week_monday, CompletedWorkout, PersonalBest, WorkoutStats};
use crate::storage::{LocalStore, StorageKey};
use chrono::{Days, NaiveDate};
use serde::de::DeserializeOwned;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Per-user history of completed workouts
#[derive(Clone)]
pub struct WorkoutHistory {
    store: LocalStore,
    clock: Arc<dyn Clock>,
    records_key: StorageKey,
    bests_key: StorageKey,
}

impl WorkoutHistory {
    /// Create the history for `user_id`
    #[must_use]
    pub fn new(store: LocalStore, user_id: &str, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            records_key: StorageKey::scoped(storage_keys::COMPLETED_WORKOUTS, user_id),
            bests_key: StorageKey::scoped(storage_keys::PERSONAL_BESTS, user_id),
        }
    }

    /// All completed workouts in recording order
    pub async fn records(&self) -> Vec<CompletedWorkout> {
        self.store
            .get_json(&self.records_key)
            .await
            .unwrap_or_default()
    }

    /// Append `record` unless a record with the same id exists
    ///
    /// Returns `true` when the record was new. New records also feed the
    /// personal-best list. When the stored list cannot be read nothing is
    /// written and `false` is returned.
    pub async fn record(&self, record: &CompletedWorkout) -> bool {
        let Some(mut records) = self.load::<CompletedWorkout>(&self.records_key).await else {
            return false;
        };
        if records.iter().any(|r| r.id == record.id) {
            debug!(workout.id = %record.id, "Completion already recorded");
            return false;
        }

        records.push(record.clone());
        self.store.set_json(&self.records_key, &records).await;
        info!(
            workout.id = %record.id,
            workout.date = %record.date,
            total = records.len(),
            "Completed workout recorded"
        );

        self.process_personal_bests(record).await;
        true
    }

    /// Current personal bests
    pub async fn personal_bests(&self) -> Vec<PersonalBest> {
        self.store
            .get_json(&self.bests_key)
            .await
            .unwrap_or_default()
    }

    /// Personal best for `exercise` (case-insensitive)
    pub async fn personal_best(&self, exercise: &str) -> Option<PersonalBest> {
        self.personal_bests()
            .await
            .into_iter()
            .find(|pb| same_exercise(&pb.exercise, exercise))
    }

    /// Raise the personal best for `exercise` if `weight` beats it
    ///
    /// Returns `true` when the stored value changed.
    pub async fn update_personal_best(&self, exercise: &str, weight: f64, date: NaiveDate) -> bool {
        let Some(mut bests) = self.load::<PersonalBest>(&self.bests_key).await else {
            return false;
        };
        let improved = apply_personal_best(&mut bests, exercise, weight, date);
        if improved {
            self.store.set_json(&self.bests_key, &bests).await;
        }
        improved
    }

    /// Update personal bests from every weighted set in `record`
    async fn process_personal_bests(&self, record: &CompletedWorkout) {
        let Some(mut bests) = self.load::<PersonalBest>(&self.bests_key).await else {
            return;
        };
        let mut changed = false;
        for exercise in &record.performance.exercises {
            if let Some(weight) = exercise.max_weight() {
                changed |= apply_personal_best(&mut bests, &exercise.name, weight, record.date);
            }
        }
        if changed {
            self.store.set_json(&self.bests_key, &bests).await;
        }
    }

    /// Read a list for modification; `None` means the read failed and the
    /// caller must not write
    async fn load<T: DeserializeOwned>(&self, key: &StorageKey) -> Option<Vec<T>> {
        match self.store.try_get_json(key).await {
            Ok(list) => Some(list.unwrap_or_default()),
            Err(e) => {
                warn!(storage.key = %key, error = %e, "History read failed; skipping update");
                None
            }
        }
    }

    /// Summary of training volume and consistency
    pub async fn stats(&self) -> WorkoutStats {
        let records = self.records().await;
        let today = self.clock.today();
        let monday = week_monday(today);

        let mut seen = HashSet::new();
        let mut stats = WorkoutStats::default();
        let mut dates = BTreeSet::new();
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                continue;
            }
            stats.total_workouts += 1;
            stats.total_minutes += u64::from(record.minutes());
            if record.date >= monday && record.date <= today {
                stats.workouts_this_week += 1;
            }
            dates.insert(record.date);
        }
        stats.current_streak_days = current_streak(&dates, today);
        stats
    }

    /// Exercise names from the most recent workouts, newest first, without repeats
    pub async fn recent_exercises(&self, limit: usize) -> Vec<String> {
        let mut records = self.records().await;
        records.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

        let mut names: Vec<String> = Vec::with_capacity(limit);
        let performed = records.iter().flat_map(|r| {
            r.snapshot
                .exercise_names()
                .chain(r.performance.exercises.iter().map(|e| e.name.as_str()))
                .collect::<Vec<_>>()
        });
        for name in performed {
            if names.len() >= limit {
                break;
            }
            if !names.iter().any(|n| same_exercise(n, name)) {
                names.push(name.to_owned());
            }
        }
        names
    }

    /// Drop all history for this user
    pub async fn clear(&self) {
        self.store.delete(&self.records_key).await;
        self.store.delete(&self.bests_key).await;
    }
}

fn same_exercise(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Monotonic personal-best update on an in-memory list
fn apply_personal_best(
    bests: &mut Vec<PersonalBest>,
    exercise: &str,
    weight: f64,
    date: NaiveDate,
) -> bool {
    if !weight.is_finite() || weight <= 0.0 || exercise.trim().is_empty() {
        return false;
    }

    match bests.iter_mut().find(|pb| same_exercise(&pb.exercise, exercise)) {
        Some(pb) if weight > pb.weight => {
            info!(exercise, previous = pb.weight, weight, "New personal best");
            pb.weight = weight;
            pb.achieved_on = date;
            true
        }
        Some(_) => false,
        None => {
            info!(exercise, weight, "First personal best");
            bests.push(PersonalBest {
                exercise: exercise.trim().to_owned(),
                weight,
                achieved_on: date,
            });
            true
        }
    }
}

/// Consecutive training days ending today, or yesterday if today is still open
fn current_streak(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let start = if dates.contains(&today) {
        today
    } else {
        match today.checked_sub_days(Days::new(1)) {
            Some(yesterday) if dates.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    let mut day = Some(start);
    while let Some(d) = day.filter(|d| dates.contains(d)) {
        streak += 1;
        day = d.pred_opt();
    }
    streak
}
