//! Owned-item identifiers as they come out of loosely typed storage.
//!
//! The owned-items feed is an aggregate read: depending on the storage
//! driver and on how a row was written, the `id` column can surface as an
//! unsigned integer, a signed integer, a float (`42.0`) or a numeric string
//! (`"42"`). [`RawItemId`] captures every representation as a tagged union
//! and [`RawItemId::normalize`] maps it into the single `u64` domain used
//! by the catalog. Entries that cannot be normalized are dropped by
//! [`normalize_ids`]; they never fail a check.

use rusqlite::types::ValueRef;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawItemId {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

impl RawItemId {
    /// Canonical unsigned id, or `None` when the value is not a valid id.
    ///
    /// Floats must be finite, non-negative and integral; strings must be a
    /// plain decimal number once trimmed.
    pub fn normalize(&self) -> Option<u64> {
        match self {
            RawItemId::Unsigned(n) => Some(*n),
            RawItemId::Signed(n) => u64::try_from(*n).ok(),
            RawItemId::Float(f) => {
                if f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f < u64::MAX as f64 {
                    Some(*f as u64)
                } else {
                    None
                }
            }
            RawItemId::Text(s) => s.trim().parse::<u64>().ok(),
        }
    }

    /// Convert a JSON scalar. Objects, arrays, booleans and nulls are rejected.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(_) | Value::String(_) => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }

    /// Read the `id` key of an untyped row.
    pub fn from_entry(entry: &Map<String, Value>) -> Option<Self> {
        entry.get("id").and_then(Self::from_json)
    }

    /// Convert a raw SQLite value. NULL and BLOB are rejected.
    pub fn from_sql(value: ValueRef<'_>) -> Option<Self> {
        match value {
            ValueRef::Integer(i) => Some(RawItemId::Signed(i)),
            ValueRef::Real(f) => Some(RawItemId::Float(f)),
            ValueRef::Text(t) => Some(RawItemId::Text(String::from_utf8_lossy(t).into_owned())),
            ValueRef::Null | ValueRef::Blob(_) => None,
        }
    }
}

impl std::fmt::Display for RawItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.normalize() {
            Some(id) => write!(f, "{}", id),
            None => write!(f, "?"),
        }
    }
}

/// Normalize a whole feed, dropping the entries that are not valid ids.
pub fn normalize_ids(raw: &[RawItemId]) -> HashSet<u64> {
    raw.iter().filter_map(RawItemId::normalize).collect()
}
