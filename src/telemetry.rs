// ABOUTME: Best-effort background side effects (completion logs, performance logs, badges)
// ABOUTME: Failures are captured as outcomes and logged, never returned to the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

//! Fire-and-forget telemetry
//!
//! Local persistence is the durable record of a finished workout. Anything
//! sent to the backend afterwards is nice to have, so each call runs in its
//! own Tokio task and only ever produces a [`BestEffortOutcome`].

use crate::api::{BadgeEvent, WorkoutTelemetry};
use crate::errors::AppResult;
use crate::models::CompletedWorkout;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Badge event emitted for every finished workout
pub const WORKOUT_COMPLETED_EVENT: &str = "workout_completed";

/// Result of a background side effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BestEffortOutcome {
    /// The call went through
    Succeeded,
    /// The call failed; the message was logged
    Failed(String),
}

impl BestEffortOutcome {
    /// Whether the call went through
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Spawn `task` in the background and log its failure
///
/// The returned handle may be dropped; awaiting it is only useful in tests
/// or on shutdown.
pub fn spawn_best_effort<F>(label: &'static str, task: F) -> JoinHandle<BestEffortOutcome>
where
    F: Future<Output = AppResult<()>> + Send + 'static,
{
    tokio::spawn(async move {
        match task.await {
            Ok(()) => {
                debug!(task = label, "Background call succeeded");
                BestEffortOutcome::Succeeded
            }
            Err(e) => {
                warn!(task = label, error = %e, "Background call failed; ignoring");
                BestEffortOutcome::Failed(e.to_string())
            }
        }
    })
}

/// Send every post-completion side effect for `record`
pub fn report_completion(
    telemetry: &Arc<dyn WorkoutTelemetry>,
    user_id: &str,
    record: &CompletedWorkout,
) -> Vec<JoinHandle<BestEffortOutcome>> {
    let record = Arc::new(record.clone());
    let badge = BadgeEvent {
        user_id: user_id.to_owned(),
        event: WORKOUT_COMPLETED_EVENT.to_owned(),
        workout_id: Some(record.id.clone()),
    };

    let completion = {
        let telemetry = Arc::clone(telemetry);
        let record = Arc::clone(&record);
        spawn_best_effort("log_completion", async move {
            telemetry.log_completion(&record).await
        })
    };
    let performance = {
        let telemetry = Arc::clone(telemetry);
        let record = Arc::clone(&record);
        spawn_best_effort("log_performance", async move {
            telemetry.log_performance(&record).await
        })
    };
    let badges = {
        let telemetry = Arc::clone(telemetry);
        spawn_best_effort("track_badge", async move { telemetry.track_badge(&badge).await })
    };

    vec![completion, performance, badges]
}
