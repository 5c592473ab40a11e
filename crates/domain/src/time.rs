//! Time and timestamp helpers.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::DataError;

/// UTC timestamp used for event times and retrain checkpoints.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Format a timestamp as fixed-width RFC 3339 (microseconds, `Z` suffix).
///
/// Fixed width keeps lexicographic order equal to chronological order.
#[must_use]
pub fn to_storage_string(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse an RFC 3339 timestamp read back from storage.
///
/// # Errors
///
/// Returns [`DataError::InvalidTimestamp`] when `value` is not RFC 3339.
pub fn parse_stored(field: &'static str, value: &str) -> Result<Timestamp, DataError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.to_utc())
        .map_err(|source| DataError::InvalidTimestamp {
            field,
            value: value.to_string(),
            source,
        })
}
