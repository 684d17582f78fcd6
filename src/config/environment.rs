// ABOUTME: Environment configuration for the client core
// ABOUTME: Parses THRYVIN_* variables into typed, validated settings with defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

//! Environment-based configuration

use crate::api::RetryPolicy;
use crate::constants::{coach, endpoints, schedule, timing};
use crate::errors::{AppError, AppResult};
use crate::schedule::ScheduleOptions;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable names
pub mod env_vars {
    /// Base URL of the Thryvin backend
    pub const API_URL: &str = "THRYVIN_API_URL";
    /// Directory for the file-backed local store
    pub const DATA_DIR: &str = "THRYVIN_DATA_DIR";
    /// Local user id whose data is loaded
    pub const USER_ID: &str = "THRYVIN_USER_ID";
    /// Coach persona id
    pub const COACH_ID: &str = "THRYVIN_COACH_ID";
    /// HTTP request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "THRYVIN_HTTP_TIMEOUT_SECS";
    /// Attempts per generated day
    pub const GENERATION_ATTEMPTS: &str = "THRYVIN_GENERATION_ATTEMPTS";
    /// Pause between attempts in milliseconds
    pub const RETRY_DELAY_MS: &str = "THRYVIN_RETRY_DELAY_MS";
    /// Generation lock staleness in seconds
    pub const LOCK_STALE_SECS: &str = "THRYVIN_LOCK_STALE_SECS";
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL without trailing slash
    pub api_base_url: String,
    /// Directory used by the file store
    pub data_dir: PathBuf,
    /// Active local user
    pub user_id: String,
    /// Coach persona id
    pub coach_id: String,
    /// HTTP request timeout in seconds
    pub http_timeout_secs: u64,
    /// HTTP connect timeout in seconds
    pub http_connect_timeout_secs: u64,
    /// Attempts per generated day
    pub generation_attempts: u32,
    /// Pause between generation attempts in milliseconds
    pub retry_delay_ms: u64,
    /// Generation lock staleness in seconds
    pub lock_stale_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: endpoints::DEFAULT_BASE_URL.to_owned(),
            data_dir: default_data_dir(),
            user_id: "local".to_owned(),
            coach_id: coach::DEFAULT_COACH_ID.to_owned(),
            http_timeout_secs: timing::HTTP_TIMEOUT_SECS,
            http_connect_timeout_secs: timing::HTTP_CONNECT_TIMEOUT_SECS,
            generation_attempts: timing::GENERATION_ATTEMPTS,
            retry_delay_ms: timing::GENERATION_RETRY_DELAY_MS,
            lock_stale_secs: timing::GENERATION_LOCK_STALE_SECS,
        }
    }
}

/// Default data directory (`<data_local_dir>/thryvin`, falling back to `./.thryvin`)
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir().map_or_else(|| PathBuf::from(".thryvin"), |d| d.join("thryvin"))
}

/// Parse an optional environment variable, falling back to `default`
fn parse_env<T: FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("{name} has an invalid value: '{raw}'"))),
        Err(_) => Ok(default),
    }
}

impl ClientConfig {
    /// Load configuration from environment variables and defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value or the
    /// resulting configuration fails validation
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();
        let config = Self {
            api_base_url: env::var(env_vars::API_URL)
                .map(|url| url.trim_end_matches('/').to_owned())
                .unwrap_or(defaults.api_base_url),
            data_dir: env::var(env_vars::DATA_DIR).map_or(defaults.data_dir, PathBuf::from),
            user_id: env::var(env_vars::USER_ID).unwrap_or(defaults.user_id),
            coach_id: env::var(env_vars::COACH_ID).unwrap_or(defaults.coach_id),
            http_timeout_secs: parse_env(env_vars::HTTP_TIMEOUT_SECS, defaults.http_timeout_secs)?,
            http_connect_timeout_secs: defaults.http_connect_timeout_secs,
            generation_attempts: parse_env(
                env_vars::GENERATION_ATTEMPTS,
                defaults.generation_attempts,
            )?,
            retry_delay_ms: parse_env(env_vars::RETRY_DELAY_MS, defaults.retry_delay_ms)?,
            lock_stale_secs: parse_env(env_vars::LOCK_STALE_SECS, defaults.lock_stale_secs)?,
        };

        config.validate()?;
        info!(
            api.base_url = %config.api_base_url,
            data_dir = %config.data_dir.display(),
            user.id = %config.user_id,
            "Client configuration loaded"
        );
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the first invalid value
    pub fn validate(&self) -> AppResult<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(AppError::config(format!(
                "API URL must start with http:// or https://, got '{}'",
                self.api_base_url
            )));
        }
        if self.user_id.trim().is_empty() {
            return Err(AppError::config("User id cannot be empty"));
        }
        if self.generation_attempts == 0 {
            return Err(AppError::config("Generation attempts must be at least 1"));
        }
        if self.http_timeout_secs == 0 {
            return Err(AppError::config("HTTP timeout must be greater than 0"));
        }
        debug!("Client configuration validated");
        Ok(())
    }

    /// Retry policy for the generation endpoint
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.generation_attempts,
            Duration::from_millis(self.retry_delay_ms),
        )
    }

    /// Schedule store tuning derived from this configuration
    #[must_use]
    pub fn schedule_options(&self) -> ScheduleOptions {
        ScheduleOptions {
            window_days: schedule::WINDOW_DAYS,
            checkpoint_interval: schedule::CHECKPOINT_INTERVAL,
            min_partial_days: schedule::MIN_PARTIAL_DAYS,
            cache_version: schedule::CACHE_VERSION.to_owned(),
            retry: self.retry_policy(),
            lock_stale_after: Duration::from_secs(self.lock_stale_secs),
        }
    }

    /// HTTP request timeout
    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// HTTP connect timeout
    #[must_use]
    pub const fn http_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.http_connect_timeout_secs)
    }
}
