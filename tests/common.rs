// ABOUTME: Shared test utilities and fakes for integration tests
// ABOUTME: Scripted generator, coach, telemetry recorder, failing/flaky storage, and a manual clock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `thryvin`

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;
use thryvin::api::{
    BadgeEvent, CoachChatRequest, CoachClient, GenerationRequest, RetryPolicy, WorkoutGenerator,
    WorkoutTelemetry,
};
use thryvin::clock::ManualClock;
use thryvin::errors::{AppError, AppResult};
use thryvin::models::{CompletedWorkout, Exercise, UserProfile, Workout};
use thryvin::schedule::{ScheduleOptions, WorkoutStore};
use thryvin::storage::{LocalStore, MemoryStorage, StorageBackend};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

pub const USER: &str = "user-1";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Monday 2025-03-03, the anchor used across schedule tests
pub fn monday() -> NaiveDate {
    date(2025, 3, 3)
}

/// Clock frozen at 09:00 UTC on `day`
pub fn clock_at(day: NaiveDate) -> Arc<ManualClock> {
    let start = Utc
        .from_utc_datetime(&day.and_hms_opt(9, 0, 0).unwrap());
    Arc::new(ManualClock::new(start))
}

pub fn profile(days_per_week: u8) -> UserProfile {
    UserProfile {
        user_id: USER.to_owned(),
        goals: vec!["build strength".to_owned()],
        experience: "intermediate".to_owned(),
        equipment: vec!["barbell".to_owned(), "dumbbells".to_owned()],
        days_per_week: Some(days_per_week),
        ..UserProfile::default()
    }
}

pub fn sample_workout(title: &str, exercises: &[&str]) -> Workout {
    Workout {
        title: title.to_owned(),
        workout_type: "strength".to_owned(),
        difficulty: "intermediate".to_owned(),
        duration_minutes: 45,
        exercises: exercises
            .iter()
            .map(|name| Exercise {
                name: (*name).to_owned(),
                sets: 3,
                reps: "8-10".to_owned(),
                rest_seconds: 90,
                weight: None,
                duration_seconds: None,
                notes: None,
            })
            .collect(),
        overview: "Full body session".to_owned(),
        target_muscles: "Full body".to_owned(),
        calories: Some(350),
    }
}

/// Options with instant retries so tests don't wait
pub fn fast_options() -> ScheduleOptions {
    ScheduleOptions {
        retry: RetryPolicy::new(3, Duration::ZERO),
        ..ScheduleOptions::default()
    }
}

/// Generator whose behavior is scripted per test
#[derive(Default)]
pub struct FakeGenerator {
    requests: Mutex<Vec<GenerationRequest>>,
    calls: AtomicUsize,
    successes: AtomicUsize,
    failing_dates: Mutex<HashSet<NaiveDate>>,
    succeed_only: Mutex<Option<usize>>,
    flaky_calls: AtomicUsize,
    permanent_error: AtomicBool,
}

impl FakeGenerator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Succeed `n` times, then fail every call
    pub fn succeeding_only(n: usize) -> Arc<Self> {
        let generator = Self::default();
        *generator.succeed_only.lock().unwrap() = Some(n);
        Arc::new(generator)
    }

    /// Fail the first `n` calls with a transient error
    pub fn flaky(n: usize) -> Arc<Self> {
        let generator = Self::default();
        generator.flaky_calls.store(n, Ordering::SeqCst);
        Arc::new(generator)
    }

    /// Reject every call with an auth error
    pub fn unauthorized() -> Arc<Self> {
        let generator = Self::default();
        generator.permanent_error.store(true, Ordering::SeqCst);
        Arc::new(generator)
    }

    pub fn fail_on(&self, date: NaiveDate) {
        self.failing_dates.lock().unwrap().insert(date);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkoutGenerator for FakeGenerator {
    async fn generate_workout(&self, request: &GenerationRequest) -> AppResult<Workout> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if self.permanent_error.load(Ordering::SeqCst) {
            return Err(AppError::auth_invalid("token expired"));
        }
        if call < self.flaky_calls.load(Ordering::SeqCst) {
            return Err(AppError::external_unavailable("generator", "connection reset"));
        }
        if self.failing_dates.lock().unwrap().contains(&request.date) {
            return Err(AppError::external_service("generator", "HTTP 500"));
        }
        if let Some(limit) = *self.succeed_only.lock().unwrap() {
            if self.successes.load(Ordering::SeqCst) >= limit {
                return Err(AppError::external_service("generator", "HTTP 503"));
            }
        }

        self.successes.fetch_add(1, Ordering::SeqCst);
        let title = format!("Workout {}", request.date);
        let exercise = format!("Exercise {}", request.date);
        Ok(sample_workout(&title, &[exercise.as_str(), "Plank"]))
    }
}

/// Telemetry fake that counts calls and can fail all of them
#[derive(Default)]
pub struct RecordingTelemetry {
    pub completions: AtomicUsize,
    pub performances: AtomicUsize,
    pub badges: Mutex<Vec<BadgeEvent>>,
    pub fail: AtomicBool,
}

impl RecordingTelemetry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let telemetry = Self::default();
        telemetry.fail.store(true, Ordering::SeqCst);
        Arc::new(telemetry)
    }

    fn outcome(&self) -> AppResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            Err(AppError::external_unavailable("telemetry", "offline"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl WorkoutTelemetry for RecordingTelemetry {
    async fn log_completion(&self, _record: &CompletedWorkout) -> AppResult<()> {
        self.completions.fetch_add(1, Ordering::SeqCst);
        self.outcome()
    }

    async fn log_performance(&self, _record: &CompletedWorkout) -> AppResult<()> {
        self.performances.fetch_add(1, Ordering::SeqCst);
        self.outcome()
    }

    async fn track_badge(&self, event: &BadgeEvent) -> AppResult<()> {
        self.badges.lock().unwrap().push(event.clone());
        self.outcome()
    }
}

/// Coach fake replying with a fixed text, or failing when `reply` is `None`
pub struct FakeCoach {
    reply: Option<String>,
    requests: Mutex<Vec<CoachChatRequest>>,
}

impl FakeCoach {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_owned()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<CoachChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CoachClient for FakeCoach {
    async fn send_message(&self, request: &CoachChatRequest) -> AppResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply
            .clone()
            .ok_or_else(|| AppError::external_service("coach", "HTTP 502"))
    }
}

/// Backend that fails every operation
pub struct FailingStorage;

#[async_trait]
impl StorageBackend for FailingStorage {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Err(AppError::storage(format!("disk unavailable reading {key}")))
    }

    async fn set(&self, key: &str, _value: &str) -> AppResult<()> {
        Err(AppError::storage(format!("disk unavailable writing {key}")))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        Err(AppError::storage(format!("disk unavailable deleting {key}")))
    }
}

/// In-memory backend whose next read can be made to fail
#[derive(Default)]
pub struct FlakyStorage {
    inner: MemoryStorage,
    fail_next_read: AtomicBool,
}

impl FlakyStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_next_read(&self) {
        self.fail_next_read.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl StorageBackend for FlakyStorage {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        if self.fail_next_read.swap(false, Ordering::SeqCst) {
            return Err(AppError::storage(format!("transient read error on {key}")));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }
}

/// Everything a schedule test needs
pub struct ScheduleHarness {
    pub store: LocalStore,
    pub generator: Arc<FakeGenerator>,
    pub telemetry: Arc<RecordingTelemetry>,
    pub clock: Arc<ManualClock>,
}

impl ScheduleHarness {
    pub fn new(generator: Arc<FakeGenerator>, today: NaiveDate) -> Self {
        init_test_logging();
        Self {
            store: LocalStore::in_memory(),
            generator,
            telemetry: RecordingTelemetry::new(),
            clock: clock_at(today),
        }
    }

    pub fn workout_store(&self) -> WorkoutStore {
        self.workout_store_with(fast_options())
    }

    pub fn workout_store_with(&self, options: ScheduleOptions) -> WorkoutStore {
        WorkoutStore::new(
            USER,
            self.store.clone(),
            self.generator.clone(),
            self.telemetry.clone(),
            self.clock.clone(),
            options,
        )
    }

    /// Store with `profile` saved
    pub async fn with_profile(&self, days_per_week: u8) -> WorkoutStore {
        let store = self.workout_store();
        store.set_profile(&profile(days_per_week)).await;
        store
    }
}
