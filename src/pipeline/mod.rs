//! Pipeline entry points.
//!
//! - `sync_dataset` / `run`: fetch, compare, persist and look up
//! - `lookup_snapshot`: offline lookup against the stored snapshot
//! - `snapshot_info`: report what is cached

pub mod diff;
pub mod info;
pub mod lookup;
pub mod sync;

pub use diff::{ChangeStatus, detect_change, has_changed};
pub use info::{SnapshotInfo, snapshot_info};
pub use lookup::{describe_lookup, find_by_pctid, lookup_snapshot, render_record};
pub use sync::{
    PROMPT, Stage, SyncReport, fetch_and_compare, parse_pctid, persist, prompt_pctid, run,
    run_interactive, sync_dataset,
};
