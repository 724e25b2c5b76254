use crate::errors::{AppError, AppResult};
use chrono::{Duration, NaiveDate};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Whole days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Period filter: granularity and bounds of a `--period` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Period {
    Year(String),
    Month(String),
    Day(String),
    Range { start: String, end: String },
}

impl Period {
    /// Parse `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or a `start:end` range whose
    /// two sides have the same granularity.
    pub fn parse(p: &str) -> AppResult<Self> {
        let p = p.trim();

        if let Some((start_raw, end_raw)) = p.split_once(':') {
            let start = start_raw.trim();
            let end = end_raw.trim();

            if start.is_empty() || end.is_empty() || start.len() != end.len() {
                return Err(AppError::InvalidPeriod(p.to_string()));
            }
            Self::validate_single(start, p)?;
            Self::validate_single(end, p)?;

            return Ok(Period::Range {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Self::validate_single(p, p)?;
        Ok(match p.len() {
            4 => Period::Year(p.to_string()),
            7 => Period::Month(p.to_string()),
            _ => Period::Day(p.to_string()),
        })
    }

    /// The `days` days up to and including `today`.
    pub fn last_days(today: NaiveDate, days: i64) -> Self {
        let start = today - Duration::days(days);
        Period::Range {
            start: start.format("%Y-%m-%d").to_string(),
            end: today.format("%Y-%m-%d").to_string(),
        }
    }

    fn validate_single(part: &str, whole: &str) -> AppResult<()> {
        let ok = match part.len() {
            4 => part.parse::<i32>().is_ok(),
            7 => parse_date(&format!("{}-01", part)).is_some(),
            10 => parse_date(part).is_some(),
            _ => false,
        };

        if ok {
            Ok(())
        } else {
            Err(AppError::InvalidPeriod(whole.to_string()))
        }
    }

    /// SQL condition on a `YYYY-MM-DD...` text column plus its parameters.
    pub fn sql_condition(&self, column: &str) -> (String, Vec<String>) {
        let expr_for = |len: usize| match len {
            4 => format!("strftime('%Y', {})", column),
            7 => format!("strftime('%Y-%m', {})", column),
            _ => format!("date({})", column),
        };

        match self {
            Period::Year(y) => (format!("{} = ?", expr_for(4)), vec![y.clone()]),
            Period::Month(m) => (format!("{} = ?", expr_for(7)), vec![m.clone()]),
            Period::Day(d) => (format!("{} = ?", expr_for(10)), vec![d.clone()]),
            Period::Range { start, end } => {
                let expr = expr_for(start.len());
                (
                    format!("{expr} >= ? AND {expr} <= ?"),
                    vec![start.clone(), end.clone()],
                )
            }
        }
    }
}
