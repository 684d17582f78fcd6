// ABOUTME: Rolling workout schedule: rest-day policies, generation lock, and the schedule store
// ABOUTME: ScheduleOptions carries the window, checkpoint, retry, and lock tuning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

//! # Rolling workout schedule
//!
//! A user's plan is a 21-day window of [`DayEntry`](crate::models::DayEntry)
//! values anchored to the Monday of the current week. Rest days come from a
//! local [`RestDayPolicy`]; workout days are generated remotely one at a
//! time with bounded retry. The list is checkpointed to local storage as it
//! grows, and a partially generated window is kept once enough days exist.
//!
//! After each completed workout the window grows by one day so the plan
//! keeps reaching about three weeks ahead.

mod generation;
mod lock;
mod rest_days;
mod store;

pub use lock::{GenerationLease, GenerationLock, LockMarker};
pub use rest_days::{rest_day_pattern, week_number, weekday_name, window_dates, RestDayPolicy};
pub use store::{
    GenerationOutcome, GenerationProgress, GenerationReport, ScheduleState, WorkoutStore,
};

use crate::api::RetryPolicy;
use crate::constants::{schedule, timing};
use std::time::Duration;

/// Schedule store tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleOptions {
    /// Days in the window
    pub window_days: usize,
    /// Persist the list every this many entries
    pub checkpoint_interval: usize,
    /// Entries needed before a failed run keeps its progress
    pub min_partial_days: usize,
    /// Cache version; a mismatch forces regeneration
    pub cache_version: String,
    /// Retry policy for each generated day
    pub retry: RetryPolicy,
    /// Age after which a generation lock marker is ignored
    pub lock_stale_after: Duration,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            window_days: schedule::WINDOW_DAYS,
            checkpoint_interval: schedule::CHECKPOINT_INTERVAL,
            min_partial_days: schedule::MIN_PARTIAL_DAYS,
            cache_version: schedule::CACHE_VERSION.to_owned(),
            retry: RetryPolicy::default(),
            lock_stale_after: Duration::from_secs(timing::GENERATION_LOCK_STALE_SECS),
        }
    }
}
