// src/models/mod.rs

//! Domain models for the sync application.

mod config;
mod dataset;

pub use config::{Config, DatasetConfig, DatasetOverride, DatasetsConfig, ServiceConfig};
pub use dataset::{Dataset, DatasetKind, PCTID_FIELD, Record, record_pctid};
