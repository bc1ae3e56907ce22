use chrono::{Duration, NaiveDate, ParseResult};

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

// Supported query window, both ends inclusive
pub const MIN_DATE: (i32, u32, u32) = (2018, 3, 5);
pub const MAX_DATE: (i32, u32, u32) = (2025, 3, 4);

pub fn min_supported_date() -> NaiveDate {
    ymd(MIN_DATE)
}

pub fn max_supported_date() -> NaiveDate {
    ymd(MAX_DATE)
}

fn ymd((y, m, d): (i32, u32, u32)) -> NaiveDate {
    // Both constants are valid calendar dates
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

/// Parse a strict `YYYY-MM-DD` string.
pub fn parse_iso_date(date_str: &str) -> ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), ISO_DATE_FORMAT)
}

/// Start date pushed back by the lookback pad.
pub fn lookback_start(start: NaiveDate, lookback_days: u32) -> NaiveDate {
    start - Duration::days(i64::from(lookback_days))
}

/// Guidance shown next to an upstream status code.
pub fn status_hint(status: u16) -> &'static str {
    match status {
        400 => "Bad request",
        404 => "API not found",
        429 => "Rate limits exceeded, see section Rate Limits",
        _ => "Unexpected response status",
    }
}

/// Keep at most the last `n` values, preserving order.
pub fn last_n<T: Clone>(values: &[T], n: usize) -> Vec<T> {
    values[values.len().saturating_sub(n)..].to_vec()
}
