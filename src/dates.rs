use crate::schema::RawDate;
use chrono::{Datelike, Duration, NaiveDate};
use serde_json::Value;

/// Formats tried by the generic fallback, after the structured rules fail.
const FALLBACK_FORMATS: &[&str] = &[
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d.%m.%Y",
    "%Y.%m.%d",
];

fn serial_epoch() -> NaiveDate {
    // Spreadsheet day-count convention (accounts for the 1900 leap-year bug)
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap()
}

/// Converts a spreadsheet serial number (whole days from 1899-12-30) into a
/// calendar date. Fractional day parts are floored away.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let days = Duration::try_days(serial.floor() as i64)?;
    serial_epoch().checked_add_signed(days)
}

fn is_iso_prefix(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 10
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[7] == b'-'
        && b[8..10].iter().all(u8::is_ascii_digit)
}

/// Interprets a date string of unknown encoding.
///
/// Rules, in order: an ISO `YYYY-MM-DD` prefix parses directly; a string with
/// exactly two `-` or `/` separators parses as `YYYY-MM-DD` when the first
/// segment has four digits and as day-first `DD-MM-YYYY` otherwise (the
/// source region convention); anything else goes through a small list of
/// common formats. Unparseable or invalid calendar values yield `None`.
pub fn parse_date_str(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if is_iso_prefix(s) {
        return NaiveDate::parse_from_str(&s[..10], "%Y-%m-%d").ok();
    }

    let separators = s.chars().filter(|c| *c == '-' || *c == '/').count();
    if separators == 2 {
        let parts: Vec<&str> = s.split(['-', '/']).map(str::trim).collect();
        if parts.len() == 3 {
            if let (Ok(first), Ok(mid), Ok(last)) = (
                parts[0].parse::<i32>(),
                parts[1].parse::<u32>(),
                parts[2].parse::<i32>(),
            ) {
                return if parts[0].len() == 4 {
                    NaiveDate::from_ymd_opt(first, mid, last as u32)
                } else {
                    NaiveDate::from_ymd_opt(last, mid, first as u32)
                };
            }
        }
    }

    FALLBACK_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Resolves a raw date of unknown encoding into a calendar date, or `None`.
/// Total: never panics, never errors.
pub fn resolve_date(raw: &RawDate) -> Option<NaiveDate> {
    match raw {
        RawDate::Missing => None,
        RawDate::Date(d) => Some(*d),
        RawDate::Serial(n) => serial_to_date(*n),
        RawDate::Text(s) => parse_date_str(s),
    }
}

/// Same policy applied straight to a JSON value, for callers holding raw
/// store/import data.
pub fn resolve_value(value: &Value) -> Option<NaiveDate> {
    resolve_date(&RawDate::from_value(value))
}

/// The `YYYY-MM` bucket key for monthly series. Zero-padded, so lexicographic
/// order is chronological order.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}
