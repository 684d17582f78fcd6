// ABOUTME: In-memory storage backend keyed by string
// ABOUTME: Shared map behind a tokio RwLock; contents vanish with the process
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

use super::StorageBackend;
use crate::errors::AppResult;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory storage backend
///
/// Cloning shares the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    store: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Whether nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Snapshot of all keys, sorted
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.store.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait::async_trait]
impl StorageBackend for MemoryStorage {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.store.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.store
            .write()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.store.write().await.remove(key);
        Ok(())
    }
}
