// ABOUTME: Remote API contracts for workout generation, coach chat, and telemetry
// ABOUTME: Traits let the store and coach run against fakes; ThryvinApiClient is the HTTP impl
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

//! # Remote API
//!
//! The backend is an opaque collaborator. This module defines the request and
//! response shapes the client exchanges with it and one trait per concern:
//!
//! - [`WorkoutGenerator`]: one AI-generated workout per call
//! - [`CoachClient`]: free-text coach replies
//! - [`WorkoutTelemetry`]: fire-and-forget completion, performance, and badge logs

mod client;
mod retry;

pub use client::ThryvinApiClient;
pub use retry::{with_retry, RetryFailure, RetryPolicy};

use crate::errors::AppResult;
use crate::models::{ChatMessage, CompletedWorkout, UserProfile, Workout};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Payload for one generated day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Onboarding profile
    pub user_profile: UserProfile,
    /// Lowercase weekday name ("monday", ...)
    pub day_of_week: String,
    /// 1-based week within the window
    pub week_number: u32,
    /// Date being generated
    pub date: NaiveDate,
    /// Exercise names used recently, most recent first
    pub recent_exercises: Vec<String>,
}

/// Payload for a coach chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachChatRequest {
    /// User message
    pub message: String,
    /// Coach persona id
    pub coach_id: String,
    /// Context mode tag
    pub context_mode: String,
    /// Trailing conversation history, oldest first
    pub conversation_history: Vec<ChatMessage>,
}

/// Coach endpoint response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachChatResponse {
    /// Reply text
    pub response: String,
}

/// Badge progress event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeEvent {
    /// Local user id
    pub user_id: String,
    /// Event name, e.g. `workout_completed`
    pub event: String,
    /// Related workout id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<String>,
}

/// Generates workout content for one day
#[async_trait]
pub trait WorkoutGenerator: Send + Sync {
    /// Request a workout for the day described by `request`
    ///
    /// # Errors
    ///
    /// Returns an external-service error for non-2xx responses or transport failures
    async fn generate_workout(&self, request: &GenerationRequest) -> AppResult<Workout>;
}

/// Remote coach conversation
#[async_trait]
pub trait CoachClient: Send + Sync {
    /// Send a message and return the coach's reply
    ///
    /// # Errors
    ///
    /// Returns an auth error without a token, or an external-service error on failure
    async fn send_message(&self, request: &CoachChatRequest) -> AppResult<String>;
}

/// Best-effort logging endpoints; callers never surface these failures
#[async_trait]
pub trait WorkoutTelemetry: Send + Sync {
    /// Record a finished workout
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects or cannot be reached
    async fn log_completion(&self, record: &CompletedWorkout) -> AppResult<()>;

    /// Record per-exercise performance for AI learning
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects or cannot be reached
    async fn log_performance(&self, record: &CompletedWorkout) -> AppResult<()>;

    /// Record badge progress
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects or cannot be reached
    async fn track_badge(&self, event: &BadgeEvent) -> AppResult<()>;
}
