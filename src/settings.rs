// ABOUTME: Per-user settings store over local storage (notifications, PIN, biometrics, theme, units)
// ABOUTME: Every key is scoped to the user id; legacy global keys are migrated once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

//! # Settings
//!
//! All preferences live under per-user keys, including the PIN and the
//! notification toggles, so one account never reads another account's
//! flags on a shared device. Older installs wrote some of these keys
//! globally; [`SettingsStore::migrate_legacy_globals`] moves them into the
//! active user's scope.

use crate::constants::storage_keys::settings as keys;
use crate::errors::{AppError, AppResult};
use crate::models::{Theme, Units, UserSettings};
use crate::storage::{LocalStore, StorageKey};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

/// Accepted PIN length range (digits)
const PIN_LENGTH: std::ops::RangeInclusive<usize> = 4..=6;

/// Settings for one local user
#[derive(Clone)]
pub struct SettingsStore {
    store: LocalStore,
    user_id: String,
}

impl SettingsStore {
    /// Create a settings store for `user_id`
    #[must_use]
    pub fn new(store: LocalStore, user_id: &str) -> Self {
        Self {
            store,
            user_id: user_id.to_owned(),
        }
    }

    fn key(&self, name: &str) -> StorageKey {
        StorageKey::scoped(name, &self.user_id)
    }

    /// Resolve all settings, using defaults for missing keys
    pub async fn load(&self) -> UserSettings {
        let defaults = UserSettings::default();
        UserSettings {
            notifications_enabled: self
                .store
                .get_flag(&self.key(keys::NOTIFICATIONS))
                .await
                .unwrap_or(defaults.notifications_enabled),
            workout_reminders_enabled: self
                .store
                .get_flag(&self.key(keys::WORKOUT_REMINDERS))
                .await
                .unwrap_or(defaults.workout_reminders_enabled),
            pin_enabled: self.store.get(&self.key(keys::PIN_HASH)).await.is_some(),
            biometrics_enabled: self
                .store
                .get_flag(&self.key(keys::BIOMETRICS))
                .await
                .unwrap_or(defaults.biometrics_enabled),
            theme: self
                .store
                .get(&self.key(keys::THEME))
                .await
                .map_or(defaults.theme, |raw| Theme::from_str_or_default(&raw)),
            units: self
                .store
                .get(&self.key(keys::UNITS))
                .await
                .map_or(defaults.units, |raw| Units::from_str_or_default(&raw)),
        }
    }

    /// Toggle push notifications
    pub async fn set_notifications(&self, enabled: bool) {
        self.store
            .set_flag(&self.key(keys::NOTIFICATIONS), enabled)
            .await;
    }

    /// Toggle the daily workout reminder
    pub async fn set_workout_reminders(&self, enabled: bool) {
        self.store
            .set_flag(&self.key(keys::WORKOUT_REMINDERS), enabled)
            .await;
    }

    /// Toggle biometric unlock
    pub async fn set_biometrics(&self, enabled: bool) {
        self.store
            .set_flag(&self.key(keys::BIOMETRICS), enabled)
            .await;
    }

    /// Set the color theme
    pub async fn set_theme(&self, theme: Theme) {
        self.store
            .set(&self.key(keys::THEME), theme.as_str())
            .await;
    }

    /// Set the measurement units
    pub async fn set_units(&self, units: Units) {
        self.store
            .set(&self.key(keys::UNITS), units.as_str())
            .await;
    }

    /// Enable the PIN lock with `pin`
    ///
    /// # Errors
    ///
    /// Returns invalid-input unless `pin` is 4 to 6 ASCII digits
    pub async fn set_pin(&self, pin: &str) -> AppResult<()> {
        if !PIN_LENGTH.contains(&pin.len()) || !pin.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::invalid_input("PIN must be 4 to 6 digits"));
        }
        self.store
            .set(&self.key(keys::PIN_HASH), &self.hash_pin(pin))
            .await;
        info!(user.id = %self.user_id, "PIN lock enabled");
        Ok(())
    }

    /// Check `pin` against the stored hash; `false` when no PIN is set
    pub async fn verify_pin(&self, pin: &str) -> bool {
        self.store
            .get(&self.key(keys::PIN_HASH))
            .await
            .is_some_and(|stored| stored == self.hash_pin(pin))
    }

    /// Disable the PIN lock
    pub async fn clear_pin(&self) {
        self.store.delete(&self.key(keys::PIN_HASH)).await;
        info!(user.id = %self.user_id, "PIN lock disabled");
    }

    /// SHA-256 over the user id and PIN, hex encoded
    fn hash_pin(&self, pin: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.user_id.as_bytes());
        hasher.update(b":");
        hasher.update(pin.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Set one setting from its storage name and a string value
    ///
    /// # Errors
    ///
    /// Returns invalid-input for an unknown name or an unparseable value
    pub async fn apply(&self, name: &str, value: &str) -> AppResult<()> {
        let flag = || parse_flag(value).ok_or_else(|| {
            AppError::invalid_input(format!("'{value}' is not a valid on/off value for {name}"))
        });

        match name {
            keys::NOTIFICATIONS | "notifications" => self.set_notifications(flag()?).await,
            keys::WORKOUT_REMINDERS | "reminders" => self.set_workout_reminders(flag()?).await,
            keys::BIOMETRICS | "biometrics" => self.set_biometrics(flag()?).await,
            keys::THEME => self.set_theme(Theme::from_str_or_default(value)).await,
            keys::UNITS => self.set_units(Units::from_str_or_default(value)).await,
            "pin" => {
                if parse_flag(value) == Some(false) {
                    self.clear_pin().await;
                } else {
                    self.set_pin(value).await?;
                }
            }
            _ => {
                return Err(AppError::invalid_input(format!(
                    "Unknown setting '{name}'"
                )))
            }
        }
        Ok(())
    }

    /// Move legacy device-global settings into this user's scope
    ///
    /// A scoped value that already exists wins over the global copy. The
    /// global key is deleted either way. Returns the number of keys moved.
    pub async fn migrate_legacy_globals(&self) -> usize {
        let mut moved = 0;
        for name in keys::ALL {
            let global = StorageKey::global(name);
            let Some(value) = self.store.get(&global).await else {
                continue;
            };

            let scoped = self.key(name);
            if self.store.get(&scoped).await.is_none() {
                self.store.set(&scoped, &value).await;
                moved += 1;
            } else {
                debug!(setting = name, "Scoped value already present; dropping global copy");
            }
            self.store.delete(&global).await;
        }

        if moved > 0 {
            info!(user.id = %self.user_id, moved, "Migrated legacy global settings");
        }
        moved
    }

    /// Remove every settings key of this user; other users are untouched
    pub async fn clear_user(&self) {
        for name in keys::ALL {
            self.store.delete(&self.key(name)).await;
        }
        info!(user.id = %self.user_id, "Cleared user settings");
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pin_hash_differs_per_user() {
        let store = LocalStore::in_memory();
        let alice = SettingsStore::new(store.clone(), "alice");
        let bob = SettingsStore::new(store, "bob");

        assert_ne!(alice.hash_pin("1234"), bob.hash_pin("1234"));
        assert_eq!(alice.hash_pin("1234").len(), 64);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag(" On "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
