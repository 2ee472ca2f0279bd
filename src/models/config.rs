//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::DatasetKind;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Remote OData service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Per-dataset overrides
    #[serde(default)]
    pub datasets: DatasetsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("cannot read {}: {}", path.display(), e)))?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Resolve the effective settings for one dataset kind.
    pub fn dataset(&self, kind: DatasetKind) -> DatasetConfig {
        let overrides = self.datasets.get(kind);
        DatasetConfig {
            kind,
            entity_set: overrides
                .entity_set
                .clone()
                .unwrap_or_else(|| kind.entity_set().to_string()),
            cache_path: overrides
                .cache_path
                .clone()
                .unwrap_or_else(|| PathBuf::from(kind.cache_file())),
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.service.base_url)?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(AppError::validation(format!(
                "service.base_url must be http(s), got '{}'",
                base.scheme()
            )));
        }
        if self.service.user_agent.trim().is_empty() {
            return Err(AppError::validation("service.user_agent is empty"));
        }
        if self.service.timeout_secs == Some(0) {
            return Err(AppError::validation("service.timeout_secs must be > 0"));
        }
        for kind in DatasetKind::ALL {
            self.dataset(kind).validate()?;
        }
        Ok(())
    }
}

/// Remote service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// OData service root; entity sets and `$metadata` are appended to it
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds (client default when unset)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: None,
        }
    }
}

/// Overrides for the known dataset kinds.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DatasetsConfig {
    #[serde(default)]
    pub benchmarks: DatasetOverride,

    #[serde(default)]
    pub growth_form: DatasetOverride,
}

impl DatasetsConfig {
    fn get(&self, kind: DatasetKind) -> &DatasetOverride {
        match kind {
            DatasetKind::Benchmarks => &self.benchmarks,
            DatasetKind::GrowthForm => &self.growth_form,
        }
    }
}

/// Optional replacements for a dataset's defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DatasetOverride {
    #[serde(default)]
    pub entity_set: Option<String>,

    #[serde(default)]
    pub cache_path: Option<PathBuf>,
}

/// Effective settings for one sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    pub kind: DatasetKind,

    /// Remote collection to query
    pub entity_set: String,

    /// Where the snapshot is persisted
    pub cache_path: PathBuf,
}

impl DatasetConfig {
    pub fn validate(&self) -> Result<()> {
        if self.entity_set.trim().is_empty() {
            return Err(AppError::validation(format!(
                "entity set for '{}' is empty",
                self.kind
            )));
        }
        if self.cache_path.as_os_str().is_empty() {
            return Err(AppError::validation(format!(
                "cache path for '{}' is empty",
                self.kind
            )));
        }
        Ok(())
    }
}

mod defaults {
    pub fn base_url() -> String {
        "https://data.bionet.nsw.gov.au/biosvcapp/odata/".into()
    }
    pub fn user_agent() -> String {
        concat!("bionet-pct/", env!("CARGO_PKG_VERSION")).into()
    }
}
