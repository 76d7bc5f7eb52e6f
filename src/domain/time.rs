use chrono::{DateTime, NaiveDateTime, Utc};

use super::models::DomainError;

/// Accepts RFC 3339 as well as the offset-less forms browsers send for
/// `datetime-local` inputs, which are taken as UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, DomainError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt.and_utc());
        }
    }

    Err(DomainError::InvalidTimestamp(value.to_string()))
}
