// ABOUTME: Tests for the persisted generation lock
// ABOUTME: Acquire/release, fresh-marker blocking, stale takeover, and ownership checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration as ChronoDuration;
use common::{clock_at, init_test_logging, monday, USER};
use std::sync::Arc;
use std::time::Duration;
use thryvin::clock::{Clock, ManualClock};
use thryvin::constants::storage_keys;
use thryvin::errors::GenerationError;
use thryvin::schedule::{GenerationLock, LockMarker};
use thryvin::storage::{LocalStore, StorageKey};

const STALE: Duration = Duration::from_secs(300);

fn lock_for(store: &LocalStore, clock: &Arc<ManualClock>) -> GenerationLock {
    init_test_logging();
    GenerationLock::new(store.clone(), USER, clock.clone(), STALE)
}

#[tokio::test]
async fn test_acquire_then_release_clears_marker() {
    let store = LocalStore::in_memory();
    let clock = clock_at(monday());
    let lock = lock_for(&store, &clock);

    let lease = lock.try_acquire().await.unwrap();
    let marker = lock.current().await.unwrap();
    assert_eq!(marker.owner, lease.owner());
    assert_eq!(marker.started_at, clock.now());

    lock.release(lease).await;
    assert!(lock.current().await.is_none());
}

#[tokio::test]
async fn test_fresh_marker_blocks_second_run() {
    let store = LocalStore::in_memory();
    let clock = clock_at(monday());
    let lock = lock_for(&store, &clock);

    let _lease = lock.try_acquire().await.unwrap();
    clock.advance(ChronoDuration::seconds(299));

    let err = lock.try_acquire().await.unwrap_err();
    assert!(matches!(err, GenerationError::InProgress { .. }));
}

#[tokio::test]
async fn test_marker_goes_stale_after_five_minutes() {
    let store = LocalStore::in_memory();
    let clock = clock_at(monday());
    let lock = lock_for(&store, &clock);

    let first = lock.try_acquire().await.unwrap();
    clock.advance(ChronoDuration::minutes(5));

    let second = lock.try_acquire().await.unwrap();
    assert_ne!(first.owner(), second.owner());
    assert_eq!(lock.current().await.unwrap().owner, second.owner());

    // The crashed run's late release must not remove the new marker
    lock.release(first).await;
    assert_eq!(lock.current().await.unwrap().owner, second.owner());

    lock.release(second).await;
    assert!(lock.current().await.is_none());
}

#[tokio::test]
async fn test_marker_from_the_future_counts_as_fresh() {
    let store = LocalStore::in_memory();
    let clock = clock_at(monday());
    let lock = lock_for(&store, &clock);

    let skewed = LockMarker {
        owner: "other-device".to_owned(),
        started_at: clock.now() + ChronoDuration::hours(1),
    };
    store
        .set_json(&StorageKey::scoped(storage_keys::GENERATION_LOCK, USER), &skewed)
        .await;

    assert!(lock.try_acquire().await.is_err());
}

#[tokio::test]
async fn test_locks_are_scoped_per_user() {
    let store = LocalStore::in_memory();
    let clock = clock_at(monday());
    let mine = lock_for(&store, &clock);
    let theirs = GenerationLock::new(store.clone(), "user-2", clock.clone(), STALE);

    let _lease = mine.try_acquire().await.unwrap();
    assert!(theirs.try_acquire().await.is_ok());
}

#[tokio::test]
async fn test_malformed_marker_is_ignored() {
    let store = LocalStore::in_memory();
    let clock = clock_at(monday());
    let lock = lock_for(&store, &clock);
    store
        .set(&StorageKey::scoped(storage_keys::GENERATION_LOCK, USER), "{oops")
        .await;

    assert!(lock.try_acquire().await.is_ok());
}
