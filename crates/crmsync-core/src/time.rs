use chrono::{DateTime, NaiveDate};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("date cannot be empty")]
    Empty,
    #[error("invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Converts a calendar date (`YYYY-MM-DD`, read as UTC midnight) or an RFC 3339 timestamp to
/// epoch milliseconds.
pub fn date_to_epoch_millis(input: &str) -> Result<i64, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        let naive = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| TimeParseError::InvalidDate(trimmed.to_string()))?;
        return Ok(naive.and_utc().timestamp_millis());
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.timestamp_millis())
        .map_err(|_| TimeParseError::InvalidDate(trimmed.to_string()))
}
