//! Storage abstractions for dataset snapshots.
//!
//! Each dataset kind keeps exactly one snapshot: the records of the most
//! recent fetch that differed from what was stored before.
//!
//! ## Layout
//!
//! ```text
//! ./
//! ├── dataset_benchmarks.json    # PCT benchmarks snapshot
//! └── dataset_growth_form.json   # PCT growth form snapshot
//! ```

pub mod local;

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Local};

use crate::error::Result;
use crate::models::Dataset;

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for snapshot storage backends.
#[async_trait]
pub trait DatasetStorage: Send + Sync {
    /// Load the last saved snapshot.
    ///
    /// A missing or unreadable snapshot is reported as an empty dataset.
    async fn load(&self) -> Dataset;

    /// Replace the stored snapshot with `dataset`.
    async fn save(&self, dataset: &Dataset) -> Result<()>;

    /// Where the snapshot lives, for display.
    fn location(&self) -> &Path;

    /// Last modification time, if a snapshot exists.
    async fn modified(&self) -> Option<DateTime<Local>>;
}
