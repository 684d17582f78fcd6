// ABOUTME: Rolling 21-day workout schedule store with caching, checkpoints, and mutations
// ABOUTME: Generation failures are recorded in store state and reports, never returned as Err
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

use super::generation::{DayPlanner, RecentExercises};
use super::lock::GenerationLock;
use super::rest_days::{week_number, window_dates, RestDayPolicy};
use super::ScheduleOptions;
use crate::api::{WorkoutGenerator, WorkoutTelemetry};
use crate::clock::Clock;
use crate::constants::{schedule, storage_keys};
use crate::errors::{AppError, AppResult, GenerationError};
use crate::history::WorkoutHistory;
use crate::models::{
    week_monday, CompletedWorkout, DayContent, DayEntry, UserProfile, WorkoutPerformance,
};
use crate::storage::{LocalStore, StorageKey};
use crate::telemetry::{report_completion, BestEffortOutcome};
use chrono::{Days, NaiveDate};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Generation progress for a loading indicator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationProgress {
    /// Entries produced so far in the current run
    pub completed: usize,
    /// Entries the run is expected to produce
    pub total: usize,
}

/// Observable store state
#[derive(Debug, Clone, Default)]
pub struct ScheduleState {
    /// Scheduled days sorted by date
    pub days: Vec<DayEntry>,
    /// A generation run is active
    pub is_generating: bool,
    /// Progress of the active or last run
    pub progress: GenerationProgress,
    /// Last generation error, shown by the plan screen
    pub error: Option<String>,
}

/// How a load or generation request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Cached schedule for the current week was used
    Cached,
    /// The whole window was generated
    Generated,
    /// Generation stopped early and the accumulated days were kept
    Partial {
        /// Days kept
        generated: usize,
        /// Days in the window
        total: usize,
    },
    /// Nothing new was kept
    Failed,
}

/// Result of [`WorkoutStore::load_or_generate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// How the request ended
    pub outcome: GenerationOutcome,
    /// Days in the schedule afterwards
    pub days: usize,
    /// User-facing error or partial-success message
    pub message: Option<String>,
}

/// Owner of one user's rolling workout schedule
pub struct WorkoutStore {
    user_id: String,
    store: LocalStore,
    generator: Arc<dyn WorkoutGenerator>,
    telemetry: Arc<dyn WorkoutTelemetry>,
    clock: Arc<dyn Clock>,
    options: ScheduleOptions,
    history: WorkoutHistory,
    lock: GenerationLock,
    state: ScheduleState,
    background: Vec<JoinHandle<BestEffortOutcome>>,
}

impl WorkoutStore {
    /// Create a store for `user_id`; nothing is loaded until
    /// [`load_or_generate`](Self::load_or_generate) runs
    #[must_use]
    pub fn new(
        user_id: &str,
        store: LocalStore,
        generator: Arc<dyn WorkoutGenerator>,
        telemetry: Arc<dyn WorkoutTelemetry>,
        clock: Arc<dyn Clock>,
        options: ScheduleOptions,
    ) -> Self {
        let history = WorkoutHistory::new(store.clone(), user_id, Arc::clone(&clock));
        let lock = GenerationLock::new(
            store.clone(),
            user_id,
            Arc::clone(&clock),
            options.lock_stale_after,
        );
        Self {
            user_id: user_id.to_owned(),
            store,
            generator,
            telemetry,
            clock,
            options,
            history,
            lock,
            state: ScheduleState::default(),
            background: Vec::new(),
        }
    }

    fn key(&self, name: &str) -> StorageKey {
        StorageKey::scoped(name, &self.user_id)
    }

    /// Scheduled days sorted by date
    #[must_use]
    pub fn days(&self) -> &[DayEntry] {
        &self.state.days
    }

    /// Entry for `date`
    #[must_use]
    pub fn day(&self, date: NaiveDate) -> Option<&DayEntry> {
        self.state.days.iter().find(|d| d.date == date)
    }

    /// Full observable state
    #[must_use]
    pub const fn state(&self) -> &ScheduleState {
        &self.state
    }

    /// Last generation error
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// Completed-workout history of this user
    #[must_use]
    pub const fn history(&self) -> &WorkoutHistory {
        &self.history
    }

    /// Monday the window is anchored to
    #[must_use]
    pub fn anchor(&self) -> NaiveDate {
        week_monday(self.clock.today())
    }

    /// Stored onboarding profile
    pub async fn profile(&self) -> Option<UserProfile> {
        self.store.get_json(&self.key(storage_keys::USER_PROFILE)).await
    }

    /// Save the onboarding profile used for generation
    pub async fn set_profile(&self, profile: &UserProfile) {
        self.store
            .set_json(&self.key(storage_keys::USER_PROFILE), profile)
            .await;
    }

    /// Load the cached window for this week, or generate a new one
    ///
    /// `force` skips the cache. Failures end up in the report and in
    /// [`error`](Self::error); this never returns `Err`.
    pub async fn load_or_generate(&mut self, force: bool) -> GenerationReport {
        let anchor = self.anchor();

        if force {
            info!(user.id = %self.user_id, "Forced regeneration requested");
        } else if let Some(days) = self.read_cache(anchor).await {
            info!(user.id = %self.user_id, days = days.len(), "Using cached schedule");
            self.state.days = days;
            self.state.error = None;
            return self.report(GenerationOutcome::Cached, None);
        }

        let Some(profile) = self.profile().await else {
            return self.fail(&GenerationError::MissingProfile);
        };

        let lease = match self.lock.try_acquire().await {
            Ok(lease) => lease,
            Err(e) => return self.fail(&e),
        };

        self.state.is_generating = true;
        self.state.error = None;
        let result = self.generate_window(&profile, anchor).await;
        self.state.is_generating = false;
        self.lock.release(lease).await;

        match result {
            Ok(days) => {
                info!(user.id = %self.user_id, days = days.len(), "Schedule generated");
                self.state.days = days;
                self.report(GenerationOutcome::Generated, None)
            }
            Err(e @ GenerationError::Partial { generated, total }) => {
                let message = e.user_message();
                warn!(user.id = %self.user_id, generated, total, "Schedule generated partially");
                self.state.error = Some(message.clone());
                self.report(GenerationOutcome::Partial { generated, total }, Some(message))
            }
            Err(e) => self.fail(&e),
        }
    }

    /// Load the cached window into state without generating anything
    ///
    /// Returns `false` when the cache is missing, outdated, or unreadable.
    pub async fn load_cached(&mut self) -> bool {
        match self.read_cache(self.anchor()).await {
            Some(days) => {
                self.state.days = days;
                true
            }
            None => false,
        }
    }

    /// Cached days, if they belong to this week and this cache version
    async fn read_cache(&self, anchor: NaiveDate) -> Option<Vec<DayEntry>> {
        let cached_date = self.store.get(&self.key(storage_keys::SCHEDULE_CACHE_DATE)).await?;
        let cached_version = self
            .store
            .get(&self.key(storage_keys::SCHEDULE_CACHE_VERSION))
            .await?;

        if cached_date != anchor.to_string() {
            debug!(cached_date, %anchor, "Cached schedule is from another week");
            return None;
        }
        if cached_version != self.options.cache_version {
            debug!(cached_version, "Cached schedule version is outdated");
            return None;
        }

        let mut days: Vec<DayEntry> = self.store.get_json(&self.key(storage_keys::SCHEDULE)).await?;
        if days.is_empty() {
            return None;
        }
        days.sort_by_key(|d| d.date);
        Some(days)
    }

    /// Generate every day of the window starting at `anchor`
    ///
    /// On success the returned days are already persisted. A `Partial`
    /// error means the accumulated days were persisted and placed in state.
    async fn generate_window(
        &mut self,
        profile: &UserProfile,
        anchor: NaiveDate,
    ) -> Result<Vec<DayEntry>, GenerationError> {
        let dates = window_dates(anchor, self.options.window_days);
        let total = dates.len();
        let policy = RestDayPolicy::from_profile(profile);
        let mut recent = RecentExercises::new(
            self.history
                .recent_exercises(schedule::RECENT_EXERCISE_LIMIT)
                .await,
            schedule::RECENT_EXERCISE_LIMIT,
        );
        let planner = DayPlanner {
            generator: self.generator.as_ref(),
            profile,
            policy: &policy,
            retry: self.options.retry,
        };

        info!(user.id = %self.user_id, %anchor, total, ?policy, "Generating schedule");
        self.state.progress = GenerationProgress { completed: 0, total };

        let mut days = Vec::with_capacity(total);
        for (index, date) in dates.into_iter().enumerate() {
            match planner.plan_day(date, week_number(index), &recent).await {
                Ok(entry) => {
                    recent.extend_from(&entry);
                    days.push(entry);
                    self.state.progress.completed = days.len();
                    if days.len() % self.options.checkpoint_interval.max(1) == 0 {
                        debug!(days = days.len(), "Checkpointing schedule");
                        self.checkpoint(&days, anchor).await;
                    }
                }
                Err(failure) if days.len() >= self.options.min_partial_days => {
                    warn!(
                        %date,
                        attempts = failure.attempts,
                        error = %failure.last_error,
                        kept = days.len(),
                        "Day failed; keeping generated days"
                    );
                    let generated = days.len();
                    self.checkpoint(&days, anchor).await;
                    self.state.days = days;
                    return Err(GenerationError::Partial { generated, total });
                }
                Err(failure) => {
                    return Err(GenerationError::day_failed(
                        date,
                        failure.attempts,
                        failure.last_error.to_string(),
                    ));
                }
            }
        }

        self.checkpoint(&days, anchor).await;
        Ok(days)
    }

    /// Persist days together with the cache markers for `anchor`
    async fn checkpoint(&self, days: &[DayEntry], anchor: NaiveDate) {
        self.save_days(days).await;
        self.store
            .set(
                &self.key(storage_keys::SCHEDULE_CACHE_DATE),
                &anchor.to_string(),
            )
            .await;
        self.store
            .set(
                &self.key(storage_keys::SCHEDULE_CACHE_VERSION),
                &self.options.cache_version,
            )
            .await;
    }

    /// Re-serialize the whole day list
    async fn save_days(&self, days: &[DayEntry]) {
        self.store
            .set_json(&self.key(storage_keys::SCHEDULE), &days)
            .await;
    }

    fn report(&self, outcome: GenerationOutcome, message: Option<String>) -> GenerationReport {
        GenerationReport {
            outcome,
            days: self.state.days.len(),
            message,
        }
    }

    fn fail(&mut self, error: &GenerationError) -> GenerationReport {
        warn!(user.id = %self.user_id, error = %error, "Schedule generation failed");
        let message = error.user_message();
        self.state.error = Some(message.clone());
        self.report(GenerationOutcome::Failed, Some(message))
    }

    fn position(&self, date: NaiveDate) -> AppResult<usize> {
        self.state
            .days
            .iter()
            .position(|d| d.date == date)
            .ok_or_else(|| AppError::not_found(format!("Scheduled day {date}")))
    }

    /// Exchange the content of two days; both dates keep their positions
    ///
    /// # Errors
    ///
    /// Returns not-found if either date is not scheduled
    pub async fn swap_days(&mut self, a: NaiveDate, b: NaiveDate) -> AppResult<()> {
        let first = self.position(a)?;
        let second = self.position(b)?;
        if first == second {
            return Ok(());
        }

        let (low, high) = (first.min(second), first.max(second));
        let (head, tail) = self.state.days.split_at_mut(high);
        head[low].swap_content(&mut tail[0]);

        info!(%a, %b, "Swapped scheduled days");
        self.save_days(&self.state.days).await;
        Ok(())
    }

    /// Replace the content of `date` in place
    ///
    /// The entry gets a fresh id and loses its completion flag.
    ///
    /// # Errors
    ///
    /// Returns not-found if `date` is not scheduled
    pub async fn replace_day(&mut self, date: NaiveDate, content: DayContent) -> AppResult<()> {
        let index = self.position(date)?;
        self.state.days[index] = match content {
            DayContent::Rest => DayEntry::rest(date),
            DayContent::Workout(workout) => DayEntry::workout(date, workout),
        };

        info!(%date, "Replaced scheduled day");
        self.save_days(&self.state.days).await;
        Ok(())
    }

    /// Insert `entry` at its date-sorted position
    ///
    /// # Errors
    ///
    /// Returns already-exists if a day with the same date is scheduled
    pub async fn insert_day(&mut self, entry: DayEntry) -> AppResult<()> {
        match self
            .state
            .days
            .binary_search_by_key(&entry.date, |d| d.date)
        {
            Ok(_) => Err(AppError::already_exists(format!(
                "Scheduled day {}",
                entry.date
            ))),
            Err(index) => {
                info!(date = %entry.date, "Inserted scheduled day");
                self.state.days.insert(index, entry);
                self.save_days(&self.state.days).await;
                Ok(())
            }
        }
    }

    /// Remove the entry for `date`
    ///
    /// # Errors
    ///
    /// Returns not-found if `date` is not scheduled
    pub async fn remove_day(&mut self, date: NaiveDate) -> AppResult<DayEntry> {
        let index = self.position(date)?;
        let removed = self.state.days.remove(index);

        info!(%date, "Removed scheduled day");
        self.save_days(&self.state.days).await;
        Ok(removed)
    }

    /// Mark the workout on `date` finished and record it
    ///
    /// Appends a history record, updates personal bests, sends best-effort
    /// telemetry, and extends the rolling window. Completing the same day
    /// again returns the record without recording it twice.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unscheduled date and invalid-input for a rest day
    pub async fn complete_workout(
        &mut self,
        date: NaiveDate,
        performance: WorkoutPerformance,
    ) -> AppResult<CompletedWorkout> {
        let index = self.position(date)?;
        let now = self.clock.now();

        let entry = &mut self.state.days[index];
        if entry.is_rest_day() {
            return Err(AppError::invalid_input(format!(
                "{date} is a rest day; there is no workout to complete"
            )));
        }
        if !entry.completed {
            entry.completed = true;
            entry.completed_at = Some(now);
        }
        let record = CompletedWorkout {
            id: entry.id.clone(),
            date,
            snapshot: entry.clone(),
            performance,
            completed_at: entry.completed_at.unwrap_or(now),
        };
        self.save_days(&self.state.days).await;

        if self.history.record(&record).await {
            self.background.retain(|handle| !handle.is_finished());
            self.background
                .extend(report_completion(&self.telemetry, &self.user_id, &record));
            self.extend_rolling_window().await;
        }
        Ok(record)
    }

    /// Append one day after the last scheduled day when the window has
    /// fallen behind `today + window_days`
    ///
    /// Returns the appended entry. Failures are logged and recorded in
    /// [`error`](Self::error).
    pub async fn extend_rolling_window(&mut self) -> Option<DayEntry> {
        let last = self.state.days.last()?.date;
        let horizon = self
            .clock
            .today()
            .checked_add_days(Days::new(self.options.window_days.saturating_sub(1) as u64))?;
        if last >= horizon {
            debug!(%last, %horizon, "Schedule already reaches the horizon");
            return None;
        }

        let next = last.succ_opt()?;
        let Some(profile) = self.profile().await else {
            warn!(%next, "No profile stored; cannot extend schedule");
            return None;
        };

        let policy = RestDayPolicy::from_profile(&profile);
        let index = (next - self.anchor()).num_days().max(0) as usize;
        let recent = RecentExercises::new(
            self.history
                .recent_exercises(schedule::RECENT_EXERCISE_LIMIT)
                .await,
            schedule::RECENT_EXERCISE_LIMIT,
        );
        let planner = DayPlanner {
            generator: self.generator.as_ref(),
            profile: &profile,
            policy: &policy,
            retry: self.options.retry,
        };

        match planner.plan_day(next, week_number(index), &recent).await {
            Ok(entry) => {
                info!(date = %next, rest = entry.is_rest_day(), "Extended rolling schedule");
                self.state.days.push(entry.clone());
                self.save_days(&self.state.days).await;
                Some(entry)
            }
            Err(failure) => {
                let error = GenerationError::day_failed(
                    next,
                    failure.attempts,
                    failure.last_error.to_string(),
                );
                warn!(error = %error, "Rolling extension failed");
                self.state.error = Some(error.user_message());
                None
            }
        }
    }

    /// Background tasks not yet collected by [`flush_background`](Self::flush_background)
    #[must_use]
    pub fn pending_background(&self) -> usize {
        self.background.len()
    }

    /// Wait for background telemetry started by completions
    pub async fn flush_background(&mut self) -> Vec<BestEffortOutcome> {
        let mut outcomes = Vec::with_capacity(self.background.len());
        for handle in self.background.drain(..) {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    warn!(error = %e, "Background task panicked or was cancelled");
                    outcomes.push(BestEffortOutcome::Failed(e.to_string()));
                }
            }
        }
        outcomes
    }
}
