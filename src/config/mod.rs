// ABOUTME: Configuration management module for the client core
// ABOUTME: Environment-driven settings for the API endpoint, storage location, and timing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin
//! Configuration module for the Thryvin client
//!
//! Configuration is environment-only: every value has a default and can be
//! overridden with a `THRYVIN_*` variable.

/// Environment configuration
pub mod environment;

pub use environment::ClientConfig;
