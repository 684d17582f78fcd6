// ABOUTME: Local key-value persistence abstraction with pluggable backends
// ABOUTME: LocalStore fails silently (log and return None/no-op) over fallible backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

//! Local persistence adapter
//!
//! Backends implement [`StorageBackend`] and report failures as errors. The
//! rest of the client talks to [`LocalStore`], which turns every failure into
//! a logged warning and a cache miss: losing a cached preference is never
//! fatal. Each key is written as a whole value; there is no cross-key
//! atomicity.

/// File-per-key storage in a data directory
pub mod file;
/// In-memory storage for tests and ephemeral sessions
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::errors::{AppError, AppResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Storage backend trait for pluggable implementations
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove `key`; removing a missing key is not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn delete(&self, key: &str) -> AppResult<()>;
}

/// Namespaced storage key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Key shared by every user on the device
    #[must_use]
    pub fn global(name: &str) -> Self {
        Self(name.to_owned())
    }

    /// Key owned by one local user
    #[must_use]
    pub fn scoped(name: &str, user_id: &str) -> Self {
        Self(format!("{name}_{user_id}"))
    }

    /// Raw key string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Silent persistence façade shared across the client
#[derive(Clone)]
pub struct LocalStore {
    backend: Arc<dyn StorageBackend>,
}

impl LocalStore {
    /// Wrap a backend
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Store backed by process memory
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Read a raw value; backend failures read as `None`
    pub async fn get(&self, key: &StorageKey) -> Option<String> {
        match self.backend.get(key.as_str()).await {
            Ok(value) => value,
            Err(e) => {
                warn!(storage.key = %key, error = %e, "Storage read failed");
                None
            }
        }
    }

    /// Write a raw value; backend failures are logged and dropped
    pub async fn set(&self, key: &StorageKey, value: &str) {
        if let Err(e) = self.backend.set(key.as_str(), value).await {
            warn!(storage.key = %key, error = %e, "Storage write failed");
        }
    }

    /// Delete a value; backend failures are logged and dropped
    pub async fn delete(&self, key: &StorageKey) {
        if let Err(e) = self.backend.delete(key.as_str()).await {
            warn!(storage.key = %key, error = %e, "Storage delete failed");
        }
    }

    /// Read and decode a JSON value; unparseable data reads as `None`
    pub async fn get_json<T: DeserializeOwned>(&self, key: &StorageKey) -> Option<T> {
        let raw = self.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(storage.key = %key, error = %e, "Discarding unparseable stored JSON");
                None
            }
        }
    }

    /// Read and decode a JSON value, keeping failures apart from absence
    ///
    /// Read-modify-write callers must not write back after an error.
    ///
    /// # Errors
    ///
    /// Returns the backend error, or a serialization error when the stored
    /// value is not valid JSON for `T`
    pub async fn try_get_json<T: DeserializeOwned>(
        &self,
        key: &StorageKey,
    ) -> AppResult<Option<T>> {
        let Some(raw) = self.backend.get(key.as_str()).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw).map(Some).map_err(|e| {
            AppError::serialization(format!("Stored value under '{key}' is not valid JSON"))
                .with_source(e)
        })
    }

    /// Encode and write a JSON value
    pub async fn set_json<T: Serialize + Sync>(&self, key: &StorageKey, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.set(key, &raw).await,
            Err(e) => warn!(storage.key = %key, error = %e, "Failed to encode value for storage"),
        }
    }

    /// Read a boolean flag stored as `"true"`/`"false"`
    pub async fn get_flag(&self, key: &StorageKey) -> Option<bool> {
        self.get(key).await.and_then(|raw| match raw.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        })
    }

    /// Write a boolean flag
    pub async fn set_flag(&self, key: &StorageKey, value: bool) {
        self.set(key, if value { "true" } else { "false" }).await;
    }
}
