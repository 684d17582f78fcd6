// ABOUTME: Output formatting helpers for thryvin-cli
// ABOUTME: Prints the schedule, generation reports, settings, and stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

use thryvin::models::{DayEntry, PersonalBest, UserSettings, WorkoutStats};
use thryvin::schedule::{GenerationOutcome, GenerationReport};

/// Print the schedule grouped by week
pub fn display_days(days: &[DayEntry]) {
    if days.is_empty() {
        println!("No days scheduled.");
        return;
    }

    for (index, day) in days.iter().enumerate() {
        if index % 7 == 0 {
            println!("\nWeek {}", index / 7 + 1);
            println!("{}", "=".repeat(60));
        }
        let marker = if day.completed { "[x]" } else { "[ ]" };
        match day.workout_content() {
            Some(workout) => println!(
                "{marker} {} {}  {} ({} min, {} exercises)",
                day.date.format("%a"),
                day.date,
                workout.title,
                workout.duration_minutes,
                workout.exercises.len()
            ),
            None => println!("    {} {}  Rest", day.date.format("%a"), day.date),
        }
    }
}

/// Print the outcome of a load or generation request
pub fn display_report(report: &GenerationReport) {
    match &report.outcome {
        GenerationOutcome::Cached => println!("Loaded cached plan ({} days).", report.days),
        GenerationOutcome::Generated => println!("Generated plan ({} days).", report.days),
        GenerationOutcome::Partial { generated, total } => {
            println!("Partially generated plan ({generated}/{total} days).");
        }
        GenerationOutcome::Failed => println!("Plan generation failed."),
    }
    if let Some(message) = &report.message {
        println!("{message}");
    }
}

/// Print resolved settings
pub fn display_settings(settings: &UserSettings) {
    let on_off = |flag: bool| if flag { "on" } else { "off" };
    println!("Notifications:     {}", on_off(settings.notifications_enabled));
    println!("Workout reminders: {}", on_off(settings.workout_reminders_enabled));
    println!("PIN lock:          {}", on_off(settings.pin_enabled));
    println!("Biometrics:        {}", on_off(settings.biometrics_enabled));
    println!("Theme:             {}", settings.theme);
    println!("Units:             {}", settings.units);
}

/// Print stats and personal bests
pub fn display_stats(stats: &WorkoutStats, personal_bests: &[PersonalBest]) {
    println!("Workouts completed: {}", stats.total_workouts);
    println!("Minutes trained:    {}", stats.total_minutes);
    println!("This week:          {}", stats.workouts_this_week);
    println!("Current streak:     {} days", stats.current_streak_days);

    if personal_bests.is_empty() {
        return;
    }
    println!("\nPersonal bests");
    println!("{}", "=".repeat(60));
    for pb in personal_bests {
        println!("{:<30} {:>8}  {}", pb.exercise, pb.weight, pb.achieved_on);
    }
}
