// src/models/dataset.rs

//! Dataset, record and dataset-kind definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the field used as a record's logical identifier.
pub const PCTID_FIELD: &str = "PCTID";

/// A single record, field order preserved as received.
pub type Record = Map<String, Value>;

/// An ordered sequence of records, exactly as listed in the `value` array.
pub type Dataset = Vec<Record>;

/// Read a record's PCTID as an integer.
///
/// Accepts JSON integers, floats with no fractional part (`7.0`) and
/// strings holding an integer (surrounding whitespace allowed). Anything
/// else yields `None`.
pub fn record_pctid(record: &Record) -> Option<i64> {
    match record.get(PCTID_FIELD)? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .filter(|f| *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// The remote collections this tool knows how to sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetKind {
    Benchmarks,
    GrowthForm,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 2] = [DatasetKind::Benchmarks, DatasetKind::GrowthForm];

    /// OData entity set queried for this kind.
    pub fn entity_set(&self) -> &'static str {
        match self {
            DatasetKind::Benchmarks => "VegetationClassification_PCTBenchmarks",
            DatasetKind::GrowthForm => "VegetationClassification_PCTGrowthForm",
        }
    }

    /// Default snapshot file, relative to the working directory.
    pub fn cache_file(&self) -> &'static str {
        match self {
            DatasetKind::Benchmarks => "dataset_benchmarks.json",
            DatasetKind::GrowthForm => "dataset_growth_form.json",
        }
    }

    /// Human-readable label used in status lines.
    pub fn label(&self) -> &'static str {
        match self {
            DatasetKind::Benchmarks => "Benchmark",
            DatasetKind::GrowthForm => "Growth form",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Benchmarks => "benchmarks",
            DatasetKind::GrowthForm => "growth-form",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "benchmarks" | "benchmark" => Ok(DatasetKind::Benchmarks),
            "growth-form" | "growthform" => Ok(DatasetKind::GrowthForm),
            other => Err(format!(
                "unknown dataset '{other}' (expected 'benchmarks' or 'growth-form')"
            )),
        }
    }
}
