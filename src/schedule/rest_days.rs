// ABOUTME: Rest-day policies and window date arithmetic for the rolling schedule
// ABOUTME: Fixed days-per-week table, explicit weekdays, or explicit training dates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

use crate::constants::schedule::DEFAULT_DAYS_PER_WEEK;
use crate::models::{weekday_index, UserProfile};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Rest weekday indices (Monday = 0) for a weekly training-day count
///
/// The table is hand-authored; it is not derived from a formula. Counts
/// outside `1..=7` are clamped.
#[must_use]
pub fn rest_day_pattern(days_per_week: u8) -> &'static [u8] {
    match days_per_week.clamp(1, 7) {
        1 => &[1, 2, 3, 4, 5, 6],
        2 => &[1, 2, 4, 5, 6],
        3 => &[1, 3, 5, 6],
        4 => &[2, 5, 6],
        5 => &[3, 6],
        6 => &[6],
        _ => &[],
    }
}

/// How rest days are chosen for a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestDayPolicy {
    /// Fixed weekday pattern from a weekly training-day count
    DaysPerWeek(u8),
    /// Train only on these weekdays (Monday = 0)
    Weekdays(BTreeSet<u8>),
    /// Train only on these calendar dates
    Dates(BTreeSet<NaiveDate>),
}

impl Default for RestDayPolicy {
    fn default() -> Self {
        Self::DaysPerWeek(DEFAULT_DAYS_PER_WEEK)
    }
}

impl RestDayPolicy {
    /// Pick the policy from onboarding data
    ///
    /// Explicit dates win over explicit weekdays, which win over the
    /// days-per-week count.
    #[must_use]
    pub fn from_profile(profile: &UserProfile) -> Self {
        if !profile.training_dates.is_empty() {
            return Self::Dates(profile.training_dates.iter().copied().collect());
        }

        let weekdays: BTreeSet<u8> = profile
            .training_weekdays
            .iter()
            .copied()
            .filter(|d| *d < 7)
            .collect();
        if !weekdays.is_empty() {
            return Self::Weekdays(weekdays);
        }

        Self::DaysPerWeek(profile.days_per_week.unwrap_or(DEFAULT_DAYS_PER_WEEK))
    }

    /// Whether `date` is a rest day under this policy
    #[must_use]
    pub fn is_rest_day(&self, date: NaiveDate) -> bool {
        match self {
            Self::DaysPerWeek(n) => rest_day_pattern(*n).contains(&weekday_index(date)),
            Self::Weekdays(days) => !days.contains(&weekday_index(date)),
            Self::Dates(dates) => !dates.contains(&date),
        }
    }
}

/// `count` consecutive dates starting at `anchor`
#[must_use]
pub fn window_dates(anchor: NaiveDate, count: usize) -> Vec<NaiveDate> {
    anchor.iter_days().take(count).collect()
}

/// 1-based week of the entry at `index` within the window
#[must_use]
pub const fn week_number(index: usize) -> u32 {
    (index / 7 + 1) as u32
}

/// Lowercase English weekday name sent to the generation endpoint
#[must_use]
pub fn weekday_name(date: NaiveDate) -> &'static str {
    const NAMES: [&str; 7] = [
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
    ];
    NAMES[usize::from(weekday_index(date))]
}
