// ABOUTME: Schedule data model - day entries, workouts, and exercises
// ABOUTME: A day entry is either a rest day or a generated workout pinned to one date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One exercise inside a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Exercise name, also the personal-best key
    pub name: String,
    /// Target number of sets
    pub sets: u32,
    /// Target reps, free-form (`"8-10"`, `"30s"`, `"AMRAP"`)
    pub reps: String,
    /// Rest between sets in seconds
    #[serde(default)]
    pub rest_seconds: u32,
    /// Suggested load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Duration for timed exercises in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    /// Coaching cue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Workout content produced by the generation endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    /// Display title
    pub title: String,
    /// Workout type (strength, hiit, mobility, ...)
    #[serde(rename = "type", default)]
    pub workout_type: String,
    /// Difficulty label
    #[serde(default)]
    pub difficulty: String,
    /// Planned duration in minutes
    #[serde(rename = "duration", default)]
    pub duration_minutes: u32,
    /// Ordered exercise list
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    /// Short description of the session
    #[serde(default)]
    pub overview: String,
    /// Target muscle summary
    #[serde(default)]
    pub target_muscles: String,
    /// Calorie estimate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
}

/// What is scheduled on a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayContent {
    /// Non-training day
    Rest,
    /// Training day
    Workout(Workout),
}

/// One scheduled day in the rolling window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    /// Identity of the scheduled content, used for completion tracking
    pub id: String,
    /// Calendar date; tied to the position in the schedule
    pub date: NaiveDate,
    /// Rest or workout
    pub content: DayContent,
    /// Whether the workout was finished
    #[serde(default)]
    pub completed: bool,
    /// When the workout was finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl DayEntry {
    /// Create a rest day
    #[must_use]
    pub fn rest(date: NaiveDate) -> Self {
        Self {
            id: format!("rest-{date}"),
            date,
            content: DayContent::Rest,
            completed: false,
            completed_at: None,
        }
    }

    /// Create a workout day with a fresh id
    #[must_use]
    pub fn workout(date: NaiveDate, workout: Workout) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            content: DayContent::Workout(workout),
            completed: false,
            completed_at: None,
        }
    }

    /// Whether this is a rest day
    #[must_use]
    pub const fn is_rest_day(&self) -> bool {
        matches!(self.content, DayContent::Rest)
    }

    /// Workout content, if any
    #[must_use]
    pub const fn workout_content(&self) -> Option<&Workout> {
        match &self.content {
            DayContent::Workout(workout) => Some(workout),
            DayContent::Rest => None,
        }
    }

    /// Exercise names of this day in plan order
    pub fn exercise_names(&self) -> impl Iterator<Item = &str> {
        self.workout_content()
            .into_iter()
            .flat_map(|w| w.exercises.iter().map(|e| e.name.as_str()))
    }

    /// Exchange everything except the date with `other`
    pub fn swap_content(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.id, &mut other.id);
        std::mem::swap(&mut self.content, &mut other.content);
        std::mem::swap(&mut self.completed, &mut other.completed);
        std::mem::swap(&mut self.completed_at, &mut other.completed_at);
    }
}

/// Weekday index with Monday = 0
#[must_use]
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// Monday of the week containing `date`
#[must_use]
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(weekday_index(date))))
        .unwrap_or(date)
}
