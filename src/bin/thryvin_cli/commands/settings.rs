// ABOUTME: Settings commands for thryvin-cli
// ABOUTME: Show, set, and migrate per-user settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

use anyhow::Result;
use thryvin::settings::SettingsStore;

use crate::helpers::display::display_settings;
use crate::App;

fn settings_store(app: &App) -> SettingsStore {
    SettingsStore::new(app.store.clone(), &app.config.user_id)
}

/// Print the resolved settings
pub async fn show(app: &App) {
    display_settings(&settings_store(app).load().await);
}

/// Change one setting
pub async fn set(app: &App, name: &str, value: &str) -> Result<()> {
    let settings = settings_store(app);
    settings.apply(name, value).await?;
    display_settings(&settings.load().await);
    Ok(())
}

/// Move legacy global settings into this user's scope
pub async fn migrate(app: &App) {
    let moved = settings_store(app).migrate_legacy_globals().await;
    println!("Migrated {moved} setting(s).");
}
