// ABOUTME: File-backed storage backend writing one file per key in a data directory
// ABOUTME: Writes go through a temp file and rename so a crash never leaves half a value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

use super::StorageBackend;
use crate::errors::{AppError, AppResult};
use std::fmt::Write as _;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-per-key storage backend
///
/// Directory structure:
/// ```text
/// data_dir/
/// ├── workout_schedule_local.val
/// └── theme_local.val
/// ```
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) a store rooted at `dir`
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created
    pub async fn new(dir: impl AsRef<Path>) -> AppResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::storage(format!(
                "Failed to create storage directory {}",
                dir.display()
            ))
            .with_source(e)
        })?;
        Ok(Self { dir })
    }

    /// Directory holding the value files
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for `key`; characters outside `[A-Za-z0-9_.-]` are hex-escaped
    fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len() + 4);
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-' | b'.') {
                name.push(char::from(byte));
            } else {
                let _ = write!(name, "~{byte:02x}");
            }
        }
        name.push_str(".val");
        self.dir.join(name)
    }
}

#[async_trait::async_trait]
impl StorageBackend for FileStorage {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(AppError::storage(format!("Failed to read key '{key}'")).with_source(e))
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("val.tmp");
        fs::write(&tmp, value)
            .await
            .map_err(|e| AppError::storage(format!("Failed to write key '{key}'")).with_source(e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| AppError::storage(format!("Failed to commit key '{key}'")).with_source(e))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(AppError::storage(format!("Failed to delete key '{key}'")).with_source(e))
            }
        }
    }
}
