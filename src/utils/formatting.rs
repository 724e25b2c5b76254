//! Formatting utilities used for CLI outputs.

use unicode_width::UnicodeWidthStr;

/// Pad to `width` terminal columns (CJK food names count double).
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

/// Grams with one decimal, dropping a trailing ".0": 20 → "20g", 7.5 → "7.5g".
pub fn grams(value: f64) -> String {
    format!("{}g", trim_decimal(value))
}

pub fn kcal(value: f64) -> String {
    format!("{} kcal", trim_decimal(value))
}

fn trim_decimal(value: f64) -> String {
    let s = format!("{:.1}", value);
    s.strip_suffix(".0").map(str::to_string).unwrap_or(s)
}
