// ABOUTME: Bounded fixed-delay retry for remote calls on the generation path
// ABOUTME: Retries transient failures only; the last error is returned when attempts run out
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

use crate::constants::timing;
use crate::errors::AppError;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Fixed-delay retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Pause between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            timing::GENERATION_ATTEMPTS,
            Duration::from_millis(timing::GENERATION_RETRY_DELAY_MS),
        )
    }
}

impl RetryPolicy {
    /// Create a policy; zero attempts is treated as one
    #[must_use]
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: if max_attempts == 0 { 1 } else { max_attempts },
            delay,
        }
    }

    /// Single attempt, no retry
    #[must_use]
    pub const fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }
}

/// Failure after retries were exhausted or a permanent error was hit
#[derive(Debug, Error)]
#[error("{last_error} (after {attempts} attempt(s))")]
pub struct RetryFailure {
    /// Attempts actually made
    pub attempts: u32,
    /// Error from the last attempt
    #[source]
    pub last_error: AppError,
}

/// Run `operation` until it succeeds, a permanent error occurs, or the policy
/// runs out of attempts. Sleeps `policy.delay` between attempts.
///
/// # Errors
///
/// Returns [`RetryFailure`] carrying the last error and the attempt count
pub async fn with_retry<T, F, Fut>(
    policy: RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> Result<T, RetryFailure>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match operation(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(operation = operation_name, attempt, "Succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if !e.is_transient() || attempt >= policy.max_attempts => {
                warn!(
                    operation = operation_name,
                    attempt,
                    max_attempts = policy.max_attempts,
                    error = %e,
                    "Giving up"
                );
                return Err(RetryFailure {
                    attempts: attempt,
                    last_error: e,
                });
            }
            Err(e) => {
                warn!(
                    operation = operation_name,
                    attempt,
                    max_attempts = policy.max_attempts,
                    retry_in_ms = policy.delay.as_millis() as u64,
                    error = %e,
                    "Attempt failed, retrying"
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}
