// ABOUTME: Re-exports command modules for thryvin-cli
// ABOUTME: Provides plan, coach, and settings command implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

pub mod coach;
pub mod plan;
pub mod settings;
