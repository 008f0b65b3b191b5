use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::AppError;

/// Parses a feed timestamp into UTC.
///
/// Accepts RFC 3339 as well as the minute-precision form the schedule feed
/// uses (`2024-11-04T19:00Z`).
pub fn parse_start_time(timestamp: &str) -> Result<DateTime<Utc>, AppError> {
    let timestamp = timestamp.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%MZ", "%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(timestamp, format) {
            return Ok(naive.and_utc());
        }
    }

    Err(AppError::datetime_parse_error(format!(
        "Unrecognized timestamp '{timestamp}'"
    )))
}
