//! Cell formatting: date detection and default stringification of raw field values.

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Numbers at or above this are read as epoch milliseconds (1973-03-03 onwards).
pub const TIMESTAMP_MILLIS_FLOOR: f64 = 1e11;

const LONG_DATE: &str = "%A, %B %-d, %Y";

fn date_pattern() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{4})[-/](\d{1,2})[-/](\d{1,2})(?:[T ][0-9:.]+(?:Z|[+-]\d{2}:?\d{2})?)?$").ok()
    })
    .as_ref()
}

/// Calendar date carried by a value, if it looks like one.
///
/// Strings are matched against `YYYY-MM-DD` with an optional time part; the
/// written calendar date is kept as-is (no timezone shift). Numbers large
/// enough to be millisecond timestamps are converted in UTC.
pub fn detect_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => {
            let caps = date_pattern()?.captures(s.trim())?;
            let year = caps[1].parse().ok()?;
            let month = caps[2].parse().ok()?;
            let day = caps[3].parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        }
        Value::Number(n) => {
            let f = n.as_f64()?;
            if f < TIMESTAMP_MILLIS_FLOOR || !f.is_finite() {
                return None;
            }
            DateTime::from_timestamp_millis(f as i64).map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

/// "Friday, January 31, 2025".
pub fn long_date(date: NaiveDate) -> String {
    date.format(LONG_DATE).to_string()
}

/// Plain text of a value: strings verbatim, whole numbers without a fraction, null as empty.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
                    Some(f) => f.to_string(),
                    None => n.to_string(),
                }
            }
        }
        other => other.to_string(),
    }
}

/// Default cell text: long date for date-like values, stringified otherwise, empty for null/absent.
pub fn format_cell(value: &Value) -> String {
    match detect_date(value) {
        Some(date) => long_date(date),
        None => stringify(value),
    }
}
