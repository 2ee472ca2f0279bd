//! Change detection between a fetched dataset and the stored snapshot.
//!
//! Equality is structural and order-sensitive all the way down: records are
//! compared position by position and fields are compared as ordered
//! `(name, value)` pairs, so reordering either counts as a change.

use std::fmt;

use serde_json::Value;

use crate::models::{Dataset, Record};

/// Outcome of comparing a fresh dataset with the stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    /// Remote data differs from the snapshot and replaces it
    Updated,
    /// Remote data matches the snapshot
    Unchanged,
}

impl ChangeStatus {
    pub fn is_changed(&self) -> bool {
        matches!(self, ChangeStatus::Updated)
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeStatus::Updated => f.write_str("updated"),
            ChangeStatus::Unchanged => f.write_str("unchanged"),
        }
    }
}

/// Compare the fetched dataset with the stored snapshot.
pub fn detect_change(current: &Dataset, stored: &Dataset) -> ChangeStatus {
    if has_changed(current, stored) {
        ChangeStatus::Updated
    } else {
        ChangeStatus::Unchanged
    }
}

/// True unless both datasets are equal record by record, field by field.
pub fn has_changed(current: &Dataset, stored: &Dataset) -> bool {
    current.len() != stored.len()
        || current
            .iter()
            .zip(stored)
            .any(|(a, b)| !records_equal(a, b))
}

fn records_equal(a: &Record, b: &Record) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|((ka, va), (kb, vb))| ka == kb && values_equal(va, vb))
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(a), Value::Object(b)) => records_equal(a, b),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        _ => a == b,
    }
}
