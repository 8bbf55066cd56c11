//! SQLite persistence
//!
//! Thin async repository functions over the pool. Dates are stored as
//! `YYYY-MM-DD` text, instants as RFC 3339 text, enums by their `Display`
//! form and id sets as JSON arrays.

pub mod completions;
pub mod exercises;
pub mod nutrition;
pub mod plans;
pub mod preferences;
pub mod profile;
pub mod workouts;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::{AppError, AppResult};

pub(crate) fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    raw.parse::<NaiveDate>()
        .map_err(|e| AppError::Invalid(format!("stored date '{}': {}", raw, e)))
}

pub(crate) fn parse_optional_date(raw: Option<String>) -> AppResult<Option<NaiveDate>> {
    raw.as_deref().map(parse_date).transpose()
}

pub(crate) fn parse_instant(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::Invalid(format!("stored timestamp '{}': {}", raw, e)))
}

pub(crate) fn parse_time(raw: &str) -> AppResult<NaiveTime> {
    raw.parse::<NaiveTime>()
        .map_err(|e| AppError::Invalid(format!("stored time '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stored_values() {
        assert_eq!(parse_date("2026-01-05").unwrap(), NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        assert!(parse_date("05/01/2026").is_err());
        assert_eq!(parse_optional_date(None).unwrap(), None);

        let instant = parse_instant("2026-01-05T08:30:00+08:00").unwrap();
        assert_eq!(instant.to_rfc3339(), "2026-01-05T00:30:00+00:00");

        assert_eq!(parse_time("07:15:00").unwrap(), NaiveTime::from_hms_opt(7, 15, 0).unwrap());
    }
}
