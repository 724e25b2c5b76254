//! Time utilities: parsing and formatting timestamps, current wall clock.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDateTime, Timelike};

/// Storage format for every timestamp column.
pub const DB_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// Current local wall-clock time, truncated to whole seconds.
pub fn now_local() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Accepts "YYYY-MM-DD HH:MM", "YYYY-MM-DD HH:MM:SS" and the `T` separated
/// variants.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(DB_TIMESTAMP).to_string()
}

/// `--at` option: an explicit timestamp, or now when absent.
pub fn parse_optional_timestamp(input: Option<&String>) -> AppResult<NaiveDateTime> {
    match input {
        Some(s) => parse_timestamp(s).ok_or_else(|| AppError::InvalidTime(s.to_string())),
        None => Ok(now_local()),
    }
}
