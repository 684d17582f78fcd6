// ABOUTME: Core data models for the Thryvin client
// ABOUTME: Day entries, workouts, completed-workout history, profile, settings, and chat
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

/// Coach chat message types
pub mod chat;
/// Completed workouts and personal bests
pub mod history;
/// Onboarding profile sent to the generation endpoint
pub mod profile;
/// Day entries, workouts, and exercises
pub mod schedule;
/// Per-user preference values
pub mod settings;

pub use chat::{ChatMessage, MessageRole};
pub use history::{
    CompletedWorkout, PerformedExercise, PerformedSet, PersonalBest, WorkoutPerformance,
    WorkoutStats,
};
pub use profile::UserProfile;
pub use schedule::{week_monday, weekday_index, DayContent, DayEntry, Exercise, Workout};
pub use settings::{Theme, Units, UserSettings};
