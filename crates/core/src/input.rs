//! Parsing helpers for values typed at the console.
//!
//! Each helper takes the raw line (already stripped of its newline) and
//! returns either a typed value or a [`CoreError`] the caller can show to
//! the user before asking again.

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Offset-less date-time layouts accepted after RFC 3339 fails.
const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// Date-only layouts; interpreted as midnight UTC.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Treat blank input as "not provided".
///
/// Whitespace-only input yields `None`. Anything else is returned with
/// surrounding whitespace trimmed, so a promotion ID typed as `" ABC "` is
/// stored as `"ABC"`.
pub fn normalize_optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a seat count. Any whole number is passed on; the service decides
/// what range it accepts.
pub fn parse_quantity(raw: &str) -> Result<i32, CoreError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i32>()
        .map_err(|_| CoreError::InvalidQuantity(trimmed.to_string()))
}

/// Parse a timestamp in any of the accepted layouts, assuming UTC when no
/// offset is given.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, CoreError> {
    let trimmed = raw.trim();

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Ok(Utc.from_utc_datetime(&midnight));
            }
        }
    }

    Err(CoreError::InvalidDate(trimmed.to_string()))
}

/// Parse an optional custom term end date. Blank input keeps the current
/// term end date and yields `None`.
pub fn parse_term_end_date(raw: &str) -> Result<Option<Timestamp>, CoreError> {
    match normalize_optional(raw) {
        None => Ok(None),
        Some(value) => parse_timestamp(&value).map(Some),
    }
}
