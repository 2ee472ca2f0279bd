// src/pipeline/sync.rs

//! Sync pipeline: fetch, compare, persist, then look up one record.
//!
//! Stages run once each, in order:
//!
//! ```text
//! FetchMetadata → FetchData → ValidatePayload → LoadCache → Compare
//!     → [Save] → PromptInput → Lookup → Done
//! ```
//!
//! Any error ends the run in `Failed`; later stages are skipped and the
//! snapshot is only written after the payload has been validated.

use std::fmt;
use std::io::{BufRead, Write};

use crate::error::{AppError, Result};
use crate::models::{Dataset, DatasetConfig, DatasetKind};
use crate::pipeline::diff::{ChangeStatus, detect_change};
use crate::pipeline::lookup::describe_lookup;
use crate::services::DatasetSource;
use crate::storage::DatasetStorage;

/// Orchestration states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FetchMetadata,
    FetchData,
    ValidatePayload,
    LoadCache,
    Compare,
    Save,
    PromptInput,
    Lookup,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::FetchMetadata => "FETCH_METADATA",
            Stage::FetchData => "FETCH_DATA",
            Stage::ValidatePayload => "VALIDATE_PAYLOAD",
            Stage::LoadCache => "LOAD_CACHE",
            Stage::Compare => "COMPARE",
            Stage::Save => "SAVE",
            Stage::PromptInput => "PROMPT_INPUT",
            Stage::Lookup => "LOOKUP",
            Stage::Done => "DONE",
            Stage::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

/// Result of the fetch/compare/save half of a run.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub kind: DatasetKind,
    pub dataset: Dataset,
    pub status: ChangeStatus,
}

impl SyncReport {
    /// Status line shown after comparison.
    pub fn status_line(&self) -> String {
        match self.status {
            ChangeStatus::Updated => format!(
                "{} dataset has been updated. Saving the new dataset.",
                self.kind.label()
            ),
            ChangeStatus::Unchanged => "No changes detected in the dataset.".to_string(),
        }
    }
}

/// Prompt shown before reading the target identifier.
pub const PROMPT: &str = "Enter the target PCTID: ";

/// Fetch the dataset and compare it with the snapshot, without saving.
pub async fn fetch_and_compare(
    source: &dyn DatasetSource,
    storage: &dyn DatasetStorage,
    config: &DatasetConfig,
) -> Result<SyncReport> {
    log::debug!("[{}] requesting service metadata", Stage::FetchMetadata);
    source.fetch_metadata().await?;

    // Payload validation happens as part of decoding the entity set.
    log::debug!("[{}] requesting {}", Stage::FetchData, config.entity_set);
    let dataset = source.fetch_entity_set(&config.entity_set).await?;
    if dataset.is_empty() {
        return Err(AppError::empty_payload());
    }
    log::debug!("[{}] {} records", Stage::ValidatePayload, dataset.len());

    log::debug!("[{}] {}", Stage::LoadCache, storage.location().display());
    let stored = storage.load().await;

    let status = detect_change(&dataset, &stored);
    log::info!(
        "[{}] {} dataset {} ({} stored, {} fetched)",
        Stage::Compare,
        config.kind,
        status,
        stored.len(),
        dataset.len()
    );

    Ok(SyncReport {
        kind: config.kind,
        dataset,
        status,
    })
}

/// Write the fetched dataset if it differs from the snapshot.
pub async fn persist(storage: &dyn DatasetStorage, report: &SyncReport) -> Result<()> {
    if report.status.is_changed() {
        log::debug!("[{}] {}", Stage::Save, storage.location().display());
        storage.save(&report.dataset).await?;
    }
    Ok(())
}

/// Fetch the dataset, compare it with the snapshot and save it if it changed.
pub async fn sync_dataset(
    source: &dyn DatasetSource,
    storage: &dyn DatasetStorage,
    config: &DatasetConfig,
) -> Result<SyncReport> {
    let report = fetch_and_compare(source, storage, config).await?;
    persist(storage, &report).await?;
    Ok(report)
}

/// Prompt for a PCTID and read one line of input.
pub fn prompt_pctid<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<i64> {
    write!(output, "{}", PROMPT)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    parse_pctid(&line)
}

/// Parse user-supplied text as an identifier.
pub fn parse_pctid(text: &str) -> Result<i64> {
    let trimmed = text.trim();
    trimmed
        .parse()
        .map_err(|_| AppError::input_parse(trimmed))
}

/// Run every stage, writing user-facing lines to `output`.
pub async fn run_interactive<R: BufRead, W: Write>(
    source: &dyn DatasetSource,
    storage: &dyn DatasetStorage,
    config: &DatasetConfig,
    input: &mut R,
    output: &mut W,
) -> Result<SyncReport> {
    let report = fetch_and_compare(source, storage, config).await?;
    writeln!(output, "{}", report.status_line())?;
    persist(storage, &report).await?;

    let target = prompt_pctid(input, output)?;
    log::debug!("[{}] PCTID {}", Stage::Lookup, target);
    writeln!(output, "{}", describe_lookup(&report.dataset, target))?;

    Ok(report)
}

/// Run the pipeline and report any failure on `output` instead of returning it.
///
/// Returns the terminal stage.
pub async fn run<R: BufRead, W: Write>(
    source: &dyn DatasetSource,
    storage: &dyn DatasetStorage,
    config: &DatasetConfig,
    input: &mut R,
    output: &mut W,
) -> Stage {
    match run_interactive(source, storage, config, input, output).await {
        Ok(_) => Stage::Done,
        Err(e) => {
            log::debug!("[{}] {:?}", Stage::Failed, e);
            if let Err(write_err) = writeln!(output, "{}", e.user_message()) {
                log::error!("Could not report failure: {}", write_err);
            }
            Stage::Failed
        }
    }
}
