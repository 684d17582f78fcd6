// ABOUTME: Onboarding profile used to drive workout generation
// ABOUTME: Carries goals, equipment, injuries, and the training-day selectors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Profile captured during onboarding and sent with every generation request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Local user id
    #[serde(default)]
    pub user_id: String,
    /// Training goals (e.g. "build muscle", "lose fat")
    #[serde(default)]
    pub goals: Vec<String>,
    /// Experience level
    #[serde(default)]
    pub experience: String,
    /// Available equipment
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Injuries or limitations to work around
    #[serde(default)]
    pub injuries: Vec<String>,
    /// Preferred session length in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_minutes: Option<u32>,
    /// Training days per week (1-7)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_per_week: Option<u8>,
    /// Explicit training weekdays, Monday = 0
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub training_weekdays: Vec<u8>,
    /// Explicit training dates
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub training_dates: Vec<NaiveDate>,
    /// Advanced questionnaire answers, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_questionnaire: Option<serde_json::Value>,
}
