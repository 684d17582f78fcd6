// ABOUTME: Plan commands for thryvin-cli
// ABOUTME: Profile import, plan generation, day swaps, and workout completion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;
use thryvin::models::{UserProfile, WorkoutPerformance};
use tracing::info;

use crate::helpers::display::{display_days, display_report};
use crate::App;

/// Read a profile JSON file and store it for the configured user
pub async fn import_profile(app: &App, path: &Path) -> Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut profile: UserProfile =
        serde_json::from_str(&raw).context("Profile file is not valid profile JSON")?;
    if profile.user_id.is_empty() {
        profile.user_id.clone_from(&app.config.user_id);
    }

    app.workout_store().set_profile(&profile).await;
    info!(user.id = %app.config.user_id, "Profile imported");
    println!("Profile saved for {}.", app.config.user_id);
    Ok(())
}

/// Print the stored profile
pub async fn show_profile(app: &App) -> Result<()> {
    match app.workout_store().profile().await {
        Some(profile) => println!("{}", serde_json::to_string_pretty(&profile)?),
        None => println!("No profile stored. Use `thryvin-cli profile import <file>`."),
    }
    Ok(())
}

/// Load or generate the plan and print it
pub async fn generate(app: &App, force: bool) {
    let mut store = app.workout_store();
    let report = store.load_or_generate(force).await;
    display_report(&report);
    display_days(store.days());
}

/// Swap two days and print the updated plan
pub async fn swap(app: &App, first: NaiveDate, second: NaiveDate) -> Result<()> {
    let mut store = app.workout_store();
    if !store.load_cached().await {
        anyhow::bail!("No plan for this week yet. Run `thryvin-cli plan show` first.");
    }
    store.swap_days(first, second).await?;
    println!("Swapped {first} and {second}.");
    display_days(store.days());
    Ok(())
}

/// Complete the workout on `date`
pub async fn complete(
    app: &App,
    date: NaiveDate,
    effort: Option<u8>,
    minutes: Option<u32>,
) -> Result<()> {
    let mut store = app.workout_store();
    if !store.load_cached().await {
        anyhow::bail!("No plan for this week yet. Run `thryvin-cli plan show` first.");
    }

    let performance = WorkoutPerformance {
        effort,
        duration_minutes: minutes,
        ..WorkoutPerformance::default()
    };
    let record = store.complete_workout(date, performance).await?;
    println!(
        "Completed {} on {} ({} min).",
        record
            .snapshot
            .workout_content()
            .map_or("workout", |w| w.title.as_str()),
        record.date,
        record.minutes()
    );

    let failed = store
        .flush_background()
        .await
        .into_iter()
        .filter(|outcome| !outcome.is_success())
        .count();
    if failed > 0 {
        println!("Note: {failed} sync call(s) failed; your workout is saved locally.");
    }
    if let Some(error) = store.error() {
        println!("{error}");
    }
    Ok(())
}
