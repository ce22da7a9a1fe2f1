//! Timestamp parsing with consistent error handling.
//!
//! The session server stores naive UTC timestamps, so values arrive either as
//! RFC 3339 strings or as ISO-8601 strings without an offset.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::DomainError;

/// Parses an RFC 3339 or offset-less ISO-8601 timestamp.
///
/// Offset-less values are interpreted as UTC.
///
/// # Examples
///
/// ```
/// use talekeeper_domain::common::parse_timestamp;
/// use chrono::{Datelike, Timelike};
///
/// let dt = parse_timestamp("2024-01-15T10:30:00Z").unwrap();
/// assert_eq!(dt.year(), 2024);
///
/// let naive = parse_timestamp("2024-01-15T10:30:00.123456").unwrap();
/// assert_eq!(naive.hour(), 10);
/// ```
///
/// # Errors
///
/// Returns `DomainError::Parse` if the string matches neither format.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DomainError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| DomainError::parse(format!("invalid timestamp '{}': {}", s, e)))
}

/// Parses a timestamp, falling back to the provided default on error.
///
/// Used for display-only fields (session creation time, journal entry time)
/// where a malformed value should not reject the whole payload.
pub fn parse_timestamp_or(s: &str, default: DateTime<Utc>) -> DateTime<Utc> {
    parse_timestamp(s).unwrap_or(default)
}
