// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Storage key names, schedule tuning values, and remote endpoint paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

//! Constants grouped by domain.

/// Rolling schedule tuning
pub mod schedule {
    /// Number of days kept in the rolling window
    pub const WINDOW_DAYS: usize = 21;

    /// Persist the accumulated day list every N generated entries
    pub const CHECKPOINT_INTERVAL: usize = 7;

    /// Minimum accumulated days required to keep a partial generation
    pub const MIN_PARTIAL_DAYS: usize = 7;

    /// Hand-bumped cache version; change it to invalidate every cached schedule
    pub const CACHE_VERSION: &str = "2025.06-rolling-v4";

    /// Number of recent exercise names sent with each generation request
    pub const RECENT_EXERCISE_LIMIT: usize = 12;

    /// Default training days per week when onboarding left it empty
    pub const DEFAULT_DAYS_PER_WEEK: u8 = 3;
}

/// Retry and lock timing
pub mod timing {
    /// Attempts per generated day (first try included)
    pub const GENERATION_ATTEMPTS: u32 = 3;

    /// Pause between generation attempts
    pub const GENERATION_RETRY_DELAY_MS: u64 = 2_000;

    /// Age after which a generation lock marker is considered stale
    pub const GENERATION_LOCK_STALE_SECS: u64 = 300; // 5 minutes

    /// Default HTTP request timeout
    pub const HTTP_TIMEOUT_SECS: u64 = 60;

    /// Default HTTP connect timeout
    pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Names of locally persisted keys
///
/// Every key is scoped per user via `StorageKey::scoped`.
pub mod storage_keys {
    /// Cached schedule JSON
    pub const SCHEDULE: &str = "workout_schedule";
    /// ISO date of the Monday the cached schedule is anchored to
    pub const SCHEDULE_CACHE_DATE: &str = "workout_schedule_cache_date";
    /// Cache version the schedule was generated with
    pub const SCHEDULE_CACHE_VERSION: &str = "workout_schedule_cache_version";
    /// Generation lock marker
    pub const GENERATION_LOCK: &str = "workout_generation_lock";
    /// Onboarding profile used for generation
    pub const USER_PROFILE: &str = "user_profile";
    /// Append-only completed workout list
    pub const COMPLETED_WORKOUTS: &str = "completed_workouts";
    /// Personal best list
    pub const PERSONAL_BESTS: &str = "personal_bests";
    /// Bearer token for the remote API (device-global, not user data)
    pub const AUTH_TOKEN: &str = "auth_token";

    /// Settings flags
    pub mod settings {
        /// Push notifications toggle
        pub const NOTIFICATIONS: &str = "notifications_enabled";
        /// Daily workout reminder toggle
        pub const WORKOUT_REMINDERS: &str = "workout_reminders_enabled";
        /// Hashed PIN code; present means the PIN lock is on
        pub const PIN_HASH: &str = "pin_hash";
        /// Biometric unlock toggle
        pub const BIOMETRICS: &str = "biometrics_enabled";
        /// Theme preference
        pub const THEME: &str = "theme";
        /// Measurement units
        pub const UNITS: &str = "units";

        /// Every settings key, used for migration and per-user clearing
        pub const ALL: [&str; 6] = [
            NOTIFICATIONS,
            WORKOUT_REMINDERS,
            PIN_HASH,
            BIOMETRICS,
            THEME,
            UNITS,
        ];
    }
}

/// Remote API paths
pub mod endpoints {
    /// Default API base URL
    pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
    /// Workout generation
    pub const GENERATE_WORKOUT: &str = "/api/workouts/generate";
    /// Coach chat
    pub const COACH_CHAT: &str = "/api/coach/chat";
    /// Workout completion log
    pub const WORKOUT_COMPLETE: &str = "/api/workouts/complete";
    /// Per-exercise performance log used for AI learning
    pub const PERFORMANCE_LOG: &str = "/api/workouts/performance";
    /// Badge progress tracking
    pub const BADGE_TRACK: &str = "/api/badges/track";
}

/// Coach chat defaults
pub mod coach {
    /// Default coach persona id
    pub const DEFAULT_COACH_ID: &str = "default";
    /// Context mode tag sent with in-app coach messages
    pub const CONTEXT_MODE_IN_APP: &str = "in_app";
    /// Number of trailing messages forwarded as conversation history
    pub const HISTORY_WINDOW: usize = 10;
    /// Screen users are sent to for plan changes
    pub const EDIT_PLAN_SCREEN: &str = "Edit Plan";
}

/// Service identification for logging
pub mod service_names {
    /// Client library service name
    pub const THRYVIN_CLIENT: &str = "thryvin-client";
}
