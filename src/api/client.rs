// ABOUTME: reqwest implementation of the remote API traits
// ABOUTME: JSON POSTs with bearer token from local storage and status-to-error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

use super::{
    BadgeEvent, CoachChatRequest, CoachChatResponse, CoachClient, GenerationRequest,
    WorkoutGenerator, WorkoutTelemetry,
};
use crate::config::ClientConfig;
use crate::constants::{endpoints, storage_keys};
use crate::errors::{AppError, AppResult};
use crate::models::{CompletedWorkout, Workout};
use crate::storage::{LocalStore, StorageKey};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

/// Service label used in error messages
const SERVICE: &str = "Thryvin API";

/// The generation endpoint answers either `{ "workout": {...} }` or the bare workout
#[derive(Deserialize)]
#[serde(untagged)]
enum GenerateWorkoutResponse {
    Wrapped { workout: Workout },
    Bare(Workout),
}

impl GenerateWorkoutResponse {
    fn into_workout(self) -> Workout {
        match self {
            Self::Wrapped { workout } | Self::Bare(workout) => workout,
        }
    }
}

/// HTTP client for the Thryvin backend
#[derive(Clone)]
pub struct ThryvinApiClient {
    http: Client,
    base_url: String,
    store: LocalStore,
}

impl ThryvinApiClient {
    /// Create a client using the configured base URL and timeouts
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(config: &ClientConfig, store: LocalStore) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(config.http_timeout())
            .connect_timeout(config.http_connect_timeout())
            .user_agent(concat!("thryvin-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::config("Failed to create HTTP client").with_source(e))?;
        Ok(Self::with_http_client(http, &config.api_base_url, store))
    }

    /// Create a client around an existing `reqwest::Client`
    #[must_use]
    pub fn with_http_client(http: Client, base_url: &str, store: LocalStore) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            store,
        }
    }

    /// Store the bearer token used for authenticated calls
    pub async fn set_access_token(&self, token: &str) {
        self.store
            .set(&StorageKey::global(storage_keys::AUTH_TOKEN), token)
            .await;
    }

    async fn access_token(&self) -> Option<String> {
        self.store
            .get(&StorageKey::global(storage_keys::AUTH_TOKEN))
            .await
            .filter(|t| !t.trim().is_empty())
    }

    async fn authorize(&self, builder: RequestBuilder, required: bool) -> AppResult<RequestBuilder> {
        match self.access_token().await {
            Some(token) => Ok(builder.bearer_auth(token)),
            None if required => Err(AppError::auth_required()),
            None => Ok(builder),
        }
    }

    async fn post<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        auth_required: bool,
    ) -> AppResult<reqwest::Response> {
        let url = format!("{}{path}", self.base_url);
        let request = self
            .authorize(self.http.post(&url).json(body), auth_required)
            .await?;

        debug!(http.url = %url, "POST");
        let response = request
            .send()
            .await
            .map_err(|e| AppError::external_unavailable(SERVICE, format!("{path}: {e}")).with_source(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_owned());
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                AppError::auth_invalid(format!("{path} rejected credentials: HTTP {status}"))
            }
            _ => AppError::external_service(SERVICE, format!("{path} returned HTTP {status}: {body}")),
        })
    }

    async fn post_json<B: Serialize + Sync, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        auth_required: bool,
    ) -> AppResult<R> {
        self.post(path, body, auth_required)
            .await?
            .json()
            .await
            .map_err(|e| {
                AppError::external_service(SERVICE, format!("{path} returned malformed JSON"))
                    .with_source(e)
            })
    }
}

#[async_trait]
impl WorkoutGenerator for ThryvinApiClient {
    async fn generate_workout(&self, request: &GenerationRequest) -> AppResult<Workout> {
        let response: GenerateWorkoutResponse = self
            .post_json(endpoints::GENERATE_WORKOUT, request, false)
            .await?;
        Ok(response.into_workout())
    }
}

#[async_trait]
impl CoachClient for ThryvinApiClient {
    async fn send_message(&self, request: &CoachChatRequest) -> AppResult<String> {
        let response: CoachChatResponse = self
            .post_json(endpoints::COACH_CHAT, request, true)
            .await?;
        Ok(response.response)
    }
}

#[async_trait]
impl WorkoutTelemetry for ThryvinApiClient {
    async fn log_completion(&self, record: &CompletedWorkout) -> AppResult<()> {
        self.post(endpoints::WORKOUT_COMPLETE, record, true)
            .await
            .map(drop)
    }

    async fn log_performance(&self, record: &CompletedWorkout) -> AppResult<()> {
        let payload = json!({
            "workoutId": record.id,
            "date": record.date,
            "effort": record.performance.effort,
            "exercises": record.performance.exercises,
        });
        self.post(endpoints::PERFORMANCE_LOG, &payload, true)
            .await
            .map(drop)
    }

    async fn track_badge(&self, event: &BadgeEvent) -> AppResult<()> {
        self.post(endpoints::BADGE_TRACK, event, true)
            .await
            .map(drop)
    }
}
