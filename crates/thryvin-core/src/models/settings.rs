// ABOUTME: Per-user preference values (notifications, PIN, biometrics, theme, units)
// ABOUTME: Flat key-value settings with string encodings for local storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

use serde::{Deserialize, Serialize};
use std::fmt;

/// Color theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme
    Light,
    /// Dark theme
    Dark,
    /// Follow the OS
    #[default]
    System,
}

impl Theme {
    /// Storage encoding
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "light" => Self::Light,
            "dark" => Self::Dark,
            _ => Self::System,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Measurement units preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Kilograms, centimeters
    #[default]
    Metric,
    /// Pounds, inches
    Imperial,
}

impl Units {
    /// Storage encoding
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "imperial" | "lbs" | "us" => Self::Imperial,
            _ => Self::Metric,
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved settings for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    /// Push notifications
    pub notifications_enabled: bool,
    /// Daily workout reminder
    pub workout_reminders_enabled: bool,
    /// PIN lock configured
    pub pin_enabled: bool,
    /// Biometric unlock
    pub biometrics_enabled: bool,
    /// Theme
    pub theme: Theme,
    /// Units
    pub units: Units,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            workout_reminders_enabled: true,
            pin_enabled: false,
            biometrics_enabled: false,
            theme: Theme::System,
            units: Units::Metric,
        }
    }
}
