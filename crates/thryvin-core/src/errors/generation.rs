// ABOUTME: Schedule generation error types for the rolling workout window
// ABOUTME: Structured failures that convert into AppError and user-facing messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

use chrono::{DateTime, NaiveDate, Utc};
use std::error::Error;
use std::fmt;

use super::{AppError, ErrorCode};

/// Errors raised while generating days of the workout schedule.
///
/// These never escape the schedule store as `Err`; the store turns them into
/// the string it exposes to the UI via [`GenerationError::user_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Another generation run holds a fresh lock marker
    InProgress {
        /// When the holder started generating
        started_at: DateTime<Utc>,
    },
    /// A day could not be generated and too little progress exists to keep
    DayFailed {
        /// Date of the day that failed
        date: NaiveDate,
        /// Number of attempts made
        attempts: u32,
        /// Last failure reason
        reason: String,
    },
    /// Generation stopped early but the accumulated days were kept
    Partial {
        /// Number of days persisted
        generated: usize,
        /// Number of days in the full window
        total: usize,
    },
    /// The user profile needed for generation is missing
    MissingProfile,
}

impl GenerationError {
    /// Create a "day failed" error
    #[must_use]
    pub fn day_failed(date: NaiveDate, attempts: u32, reason: impl Into<String>) -> Self {
        Self::DayFailed {
            date,
            attempts,
            reason: reason.into(),
        }
    }

    /// Message suitable for showing in the plan screen
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InProgress { .. } => {
                "Your workout plan is already being generated. Please wait a moment.".to_owned()
            }
            Self::DayFailed { .. } => {
                "We couldn't generate your workout plan. Check your connection and try again."
                    .to_owned()
            }
            Self::Partial { generated, total } => format!(
                "Generated {generated}/{total} days. The remaining days will be added as you train."
            ),
            Self::MissingProfile => {
                "Finish onboarding so we can build your workout plan.".to_owned()
            }
        }
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress { started_at } => {
                write!(f, "Generation already in progress since {started_at}")
            }
            Self::DayFailed {
                date,
                attempts,
                reason,
            } => {
                write!(
                    f,
                    "Failed to generate workout for {date} after {attempts} attempts: {reason}"
                )
            }
            Self::Partial { generated, total } => {
                write!(f, "Generation stopped after {generated}/{total} days")
            }
            Self::MissingProfile => write!(f, "No user profile available for generation"),
        }
    }
}

impl Error for GenerationError {}

impl From<GenerationError> for AppError {
    fn from(error: GenerationError) -> Self {
        let code = match &error {
            GenerationError::InProgress { .. } => ErrorCode::ResourceLocked,
            GenerationError::DayFailed { .. } | GenerationError::Partial { .. } => {
                ErrorCode::ExternalServiceError
            }
            GenerationError::MissingProfile => ErrorCode::InvalidInput,
        };
        Self::new(code, error.user_message()).with_source(error)
    }
}
