use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CheckIn {
    pub id: i64,
    pub user_id: u64,
    pub check_in_at: NaiveDateTime, // ⇔ check_ins.check_in_at (TEXT "YYYY-MM-DD HH:MM:SS")
    pub content: String,
}

impl CheckIn {
    pub fn new(user_id: u64, check_in_at: NaiveDateTime, content: &str) -> Self {
        Self {
            id: 0,
            user_id,
            check_in_at,
            content: content.to_string(),
        }
    }

    /// Calendar day the check-in counts for.
    pub fn day(&self) -> NaiveDate {
        self.check_in_at.date()
    }

    pub fn day_str(&self) -> String {
        self.day().format("%Y-%m-%d").to_string()
    }
}
