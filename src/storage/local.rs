//! Local filesystem storage implementation.
//!
//! The snapshot is a plain JSON array of record objects. Writes overwrite
//! the file in place; the previous snapshot is not kept.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::Dataset;
use crate::storage::DatasetStorage;

/// Local filesystem storage backend for one dataset.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Create a LocalStorage backed by the given snapshot file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read and decode the snapshot, surfacing every failure.
    async fn read_snapshot(&self) -> Result<Option<Dataset>> {
        let Some(bytes) = self.read_bytes().await? else {
            return Ok(None);
        };

        let parsed: Value = serde_json::from_slice(&bytes)?;
        let Value::Array(items) = parsed else {
            return Err(AppError::validation("snapshot is not a JSON array"));
        };

        let records = items
            .into_iter()
            .map(|item| match item {
                Value::Object(record) => Ok(record),
                _ => Err(AppError::validation("snapshot entry is not an object")),
            })
            .collect::<Result<Dataset>>()?;

        Ok(Some(records))
    }
}

#[async_trait]
impl DatasetStorage for LocalStorage {
    async fn load(&self) -> Dataset {
        match self.read_snapshot().await {
            Ok(Some(records)) => {
                log::debug!(
                    "Loaded {} records from {}",
                    records.len(),
                    self.path.display()
                );
                records
            }
            Ok(None) => {
                log::info!("No snapshot found at {}", self.path.display());
                Dataset::new()
            }
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable snapshot {}: {}",
                    self.path.display(),
                    e
                );
                Dataset::new()
            }
        }
    }

    async fn save(&self, dataset: &Dataset) -> Result<()> {
        self.ensure_dir().await?;
        let bytes = serde_json::to_vec(dataset)?;
        tokio::fs::write(&self.path, bytes).await?;
        log::info!(
            "Snapshot: {} records written to {}",
            dataset.len(),
            self.path.display()
        );
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }

    async fn modified(&self) -> Option<DateTime<Local>> {
        let metadata = tokio::fs::metadata(&self.path).await.ok()?;
        metadata.modified().ok().map(DateTime::<Local>::from)
    }
}
