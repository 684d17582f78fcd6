// ABOUTME: Advisory generation lock persisted as a timestamped marker in local storage
// ABOUTME: Fresh markers block a second run; markers older than the stale window are cleared
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

//! Generation lock
//!
//! The marker is a cooperative convention between runs that share a store,
//! not a mutex: two processes reading at the same instant can both acquire
//! it. Within one process the schedule store takes `&mut self` for every
//! generation path, which already serializes callers.

use crate::clock::Clock;
use crate::constants::storage_keys;
use crate::errors::GenerationError;
use crate::storage::{LocalStore, StorageKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Persisted lock marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockMarker {
    /// Opaque id of the run holding the lock
    pub owner: String,
    /// When the run started
    pub started_at: DateTime<Utc>,
}

/// Proof of acquisition; hand it back to [`GenerationLock::release`]
#[derive(Debug)]
#[must_use = "a lease that is never released blocks generation until it goes stale"]
pub struct GenerationLease {
    owner: String,
}

impl GenerationLease {
    /// Owner id written into the marker
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }
}

/// Timestamped advisory lock for one user's schedule generation
#[derive(Clone)]
pub struct GenerationLock {
    store: LocalStore,
    key: StorageKey,
    clock: Arc<dyn Clock>,
    stale_after: Duration,
}

impl GenerationLock {
    /// Create a lock for `user_id`
    #[must_use]
    pub fn new(
        store: LocalStore,
        user_id: &str,
        clock: Arc<dyn Clock>,
        stale_after: Duration,
    ) -> Self {
        Self {
            store,
            key: StorageKey::scoped(storage_keys::GENERATION_LOCK, user_id),
            clock,
            stale_after,
        }
    }

    /// Marker currently in storage, if any
    pub async fn current(&self) -> Option<LockMarker> {
        self.store.get_json(&self.key).await
    }

    /// Whether `marker` is older than the stale window
    fn is_stale(&self, marker: &LockMarker) -> bool {
        // A marker from the future (clock skew) counts as age zero
        let age = (self.clock.now() - marker.started_at)
            .to_std()
            .unwrap_or_default();
        age >= self.stale_after
    }

    /// Take the lock
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InProgress`] when a fresh marker exists
    pub async fn try_acquire(&self) -> Result<GenerationLease, GenerationError> {
        if let Some(marker) = self.current().await {
            if !self.is_stale(&marker) {
                debug!(lock.owner = %marker.owner, "Generation already in progress");
                return Err(GenerationError::InProgress {
                    started_at: marker.started_at,
                });
            }
            warn!(
                lock.owner = %marker.owner,
                lock.started_at = %marker.started_at,
                "Clearing stale generation lock"
            );
            self.store.delete(&self.key).await;
        }

        let marker = LockMarker {
            owner: Uuid::new_v4().to_string(),
            started_at: self.clock.now(),
        };
        self.store.set_json(&self.key, &marker).await;
        info!(lock.owner = %marker.owner, "Generation lock acquired");

        Ok(GenerationLease {
            owner: marker.owner,
        })
    }

    /// Release the lock if `lease` still owns it
    pub async fn release(&self, lease: GenerationLease) {
        match self.current().await {
            Some(marker) if marker.owner == lease.owner => {
                self.store.delete(&self.key).await;
                debug!(lock.owner = %lease.owner, "Generation lock released");
            }
            Some(marker) => warn!(
                lock.owner = %lease.owner,
                lock.holder = %marker.owner,
                "Lock was taken over; leaving the other run's marker in place"
            ),
            None => debug!(lock.owner = %lease.owner, "Generation lock already gone"),
        }
    }
}
