// ABOUTME: Core types and constants for the Thryvin fitness client
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

#![deny(unsafe_code)]

//! # Thryvin Core
//!
//! Foundation crate providing shared types and constants for the Thryvin
//! client. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and domain-specific errors
//! - **constants**: Storage keys, schedule tuning values, and API endpoint paths
//! - **models**: Day entries, workouts, history records, profiles, and settings

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (day entries, workouts, history, profile, settings)
pub mod models;
