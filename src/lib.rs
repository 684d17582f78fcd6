// ABOUTME: Main library entry point for the Thryvin fitness client core
// ABOUTME: Rolling workout schedule, coach chat routing, history, settings, and local storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

#![deny(unsafe_code)]

//! # Thryvin
//!
//! Headless client core for the Thryvin fitness app. A mobile or web shell
//! embeds this crate and renders its state; everything here is UI-agnostic.
//!
//! ## Architecture
//!
//! - **Storage**: silent key-value persistence over pluggable backends
//! - **Schedule**: the rolling 21-day workout window with remote generation,
//!   retries, checkpointing, an advisory generation lock, and day mutations
//! - **Coach**: ordered keyword intent routing in front of the remote coach
//! - **History**: completed workouts, personal bests, and stats
//! - **Settings**: per-user preference flags
//! - **API**: traits for the remote collaborators plus a `reqwest` client
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use thryvin::api::ThryvinApiClient;
//! use thryvin::clock::SystemClock;
//! use thryvin::config::ClientConfig;
//! use thryvin::schedule::WorkoutStore;
//! use thryvin::storage::{FileStorage, LocalStore};
//! use thryvin::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ClientConfig::from_env()?;
//!     let store = LocalStore::new(Arc::new(FileStorage::new(&config.data_dir).await?));
//!     let api = Arc::new(ThryvinApiClient::new(&config, store.clone())?);
//!     let mut workouts = WorkoutStore::new(
//!         "local-user",
//!         store,
//!         api.clone(),
//!         api,
//!         Arc::new(SystemClock),
//!         config.schedule_options(),
//!     );
//!     workouts.load_or_generate(false).await;
//!     println!("{} days scheduled", workouts.days().len());
//!     Ok(())
//! }
//! ```

// Re-export thryvin-core modules so callers can use `thryvin::errors::*` etc.
pub use thryvin_core::constants;
pub use thryvin_core::errors;
pub use thryvin_core::models;

/// Remote API traits and the HTTP client
pub mod api;

/// Injectable wall clock
pub mod clock;

/// Coach chat intent routing and conversation service
pub mod coach;

/// Environment-based configuration
pub mod config;

/// Completed workouts, personal bests, and stats
pub mod history;

/// Structured logging setup
pub mod logging;

/// Rolling workout schedule store
pub mod schedule;

/// Per-user settings
pub mod settings;

/// Local key-value persistence
pub mod storage;

/// Best-effort background side effects
pub mod telemetry;
