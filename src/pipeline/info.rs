//! Snapshot status report.

use chrono::{DateTime, Local};

use crate::models::DatasetConfig;
use crate::storage::DatasetStorage;

/// What is currently cached for one dataset.
#[derive(Debug, Clone)]
pub struct SnapshotInfo {
    pub entity_set: String,
    pub location: String,
    pub record_count: usize,
    pub modified: Option<DateTime<Local>>,
}

impl SnapshotInfo {
    /// Summary rows for display.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Entity set", self.entity_set.clone()),
            ("Snapshot", self.location.clone()),
            ("Records", self.record_count.to_string()),
            (
                "Last updated",
                self.modified
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| "never".to_string()),
            ),
        ]
    }
}

/// Inspect the stored snapshot for a dataset.
pub async fn snapshot_info(storage: &dyn DatasetStorage, config: &DatasetConfig) -> SnapshotInfo {
    let records = storage.load().await;
    SnapshotInfo {
        entity_set: config.entity_set.clone(),
        location: storage.location().display().to_string(),
        record_count: records.len(),
        modified: storage.modified().await,
    }
}
