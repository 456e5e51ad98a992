//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. Timestamps are written with `to_rfc3339()` but `SQLite` column
//! defaults use `datetime('now')`, so both formats are accepted. Calendar
//! dates are stored as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a required `YYYY-MM-DD` TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string is not a calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{s}': {e}")))
}

/// Read a nullable date column.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails or holds a malformed date.
pub fn get_opt_date(row: &libsql::Row, idx: i32) -> Result<Option<NaiveDate>, DatabaseError> {
    get_opt_string(row, idx)?
        .as_deref()
        .map(parse_date)
        .transpose()
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all rd-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read an INTEGER count column as `u32`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails or the value is negative.
pub fn get_count(row: &libsql::Row, idx: i32) -> Result<u32, DatabaseError> {
    let raw = row.get::<i64>(idx)?;
    u32::try_from(raw).map_err(|_| DatabaseError::InvalidState(format!("bad count {raw}")))
}

/// Read an INTEGER 0-100 score column.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the stored value is out of range.
pub fn get_score(row: &libsql::Row, idx: i32) -> Result<u8, DatabaseError> {
    let raw = row.get::<i64>(idx)?;
    u8::try_from(raw)
        .ok()
        .filter(|v| *v <= 100)
        .ok_or_else(|| DatabaseError::InvalidState(format!("score {raw} out of range")))
}

/// Format an optional date for binding as a TEXT parameter.
#[must_use]
pub fn date_param(date: Option<NaiveDate>) -> libsql::Value {
    date.map_or(libsql::Value::Null, |d| libsql::Value::Text(d.to_string()))
}

/// Bind an optional string, storing empty strings as NULL.
#[must_use]
pub fn opt_text_param(value: Option<&str>) -> libsql::Value {
    match value {
        Some(s) if !s.trim().is_empty() => libsql::Value::Text(s.trim().to_string()),
        _ => libsql::Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_datetime_formats() {
        let a = parse_datetime("2024-03-01T10:00:00+00:00").unwrap();
        let b = parse_datetime("2024-03-01 10:00:00").unwrap();
        assert_eq!(a, b);
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn parses_calendar_dates() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date("2023-02-29").is_err());
    }

    #[test]
    fn blank_text_binds_as_null() {
        assert_eq!(opt_text_param(Some("  ")), libsql::Value::Null);
        assert_eq!(opt_text_param(None), libsql::Value::Null);
        assert_eq!(
            opt_text_param(Some(" https://x.org ")),
            libsql::Value::Text("https://x.org".into())
        );
    }
}
