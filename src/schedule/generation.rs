// ABOUTME: Single-day generation against the remote generator with bounded retry
// ABOUTME: Builds the request payload and tracks recently used exercises to avoid repeats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

use super::rest_days::{weekday_name, RestDayPolicy};
use crate::api::{with_retry, GenerationRequest, RetryFailure, RetryPolicy, WorkoutGenerator};
use crate::models::{DayEntry, UserProfile};
use chrono::NaiveDate;
use tracing::debug;

/// Inputs shared by every day of one generation run
pub(super) struct DayPlanner<'a> {
    pub generator: &'a dyn WorkoutGenerator,
    pub profile: &'a UserProfile,
    pub policy: &'a RestDayPolicy,
    pub retry: RetryPolicy,
}

impl DayPlanner<'_> {
    /// Produce the entry for `date`: a rest day locally, a workout remotely
    pub async fn plan_day(
        &self,
        date: NaiveDate,
        week_number: u32,
        recent_exercises: &RecentExercises,
    ) -> Result<DayEntry, RetryFailure> {
        if self.policy.is_rest_day(date) {
            debug!(%date, "Rest day");
            return Ok(DayEntry::rest(date));
        }

        let request = GenerationRequest {
            user_profile: self.profile.clone(),
            day_of_week: weekday_name(date).to_owned(),
            week_number,
            date,
            recent_exercises: recent_exercises.to_vec(),
        };

        let workout = with_retry(self.retry, "generate_workout", |attempt| {
            debug!(%date, attempt, "Requesting workout");
            self.generator.generate_workout(&request)
        })
        .await?;

        Ok(DayEntry::workout(date, workout))
    }
}

/// Bounded most-recent-first list of distinct exercise names
#[derive(Debug, Clone, Default)]
pub(super) struct RecentExercises {
    names: Vec<String>,
    limit: usize,
}

impl RecentExercises {
    pub fn new(seed: Vec<String>, limit: usize) -> Self {
        let mut recent = Self {
            names: Vec::with_capacity(limit),
            limit,
        };
        // Seed is already most recent first; push oldest first to keep order
        for name in seed.into_iter().rev() {
            recent.push(name);
        }
        recent
    }

    /// Record `name` as the most recent exercise
    pub fn push(&mut self, name: String) {
        self.names.retain(|n| !n.eq_ignore_ascii_case(&name));
        self.names.insert(0, name);
        self.names.truncate(self.limit);
    }

    /// Record every exercise of `entry`
    pub fn extend_from(&mut self, entry: &DayEntry) {
        for name in entry.exercise_names() {
            self.push(name.to_owned());
        }
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.names.clone()
    }
}
