//! Row parsing helpers.
//!
//! libSQL rows are column-indexed and integer columns come back as `i64`.
//! These helpers isolate the conversions into Ink's unsigned identifiers and
//! handle the dual datetime format (`SQLite`'s `datetime('now')` vs Rust's
//! `to_rfc3339()`).

use chrono::{DateTime, Utc};

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

/// Read an INTEGER column as `u64`.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` for negative values.
pub fn get_u64(row: &libsql::Row, idx: i32) -> Result<u64, DatabaseError> {
    let value = row.get::<i64>(idx)?;
    u64::try_from(value)
        .map_err(|_| DatabaseError::InvalidState(format!("column {idx} is negative: {value}")))
}

/// Read a nullable INTEGER column as `Option<u64>`.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` for negative values.
pub fn get_opt_u64(row: &libsql::Row, idx: i32) -> Result<Option<u64>, DatabaseError> {
    row.get::<Option<i64>>(idx)?
        .map(|value| {
            u64::try_from(value).map_err(|_| {
                DatabaseError::InvalidState(format!("column {idx} is negative: {value}"))
            })
        })
        .transpose()
}

/// Convert an identifier into the signed integer `SQLite` stores.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the identifier exceeds `i64::MAX`.
pub fn to_sql_id(id: u64) -> Result<i64, DatabaseError> {
    i64::try_from(id).map_err(|_| DatabaseError::InvalidState(format!("identifier out of range: {id}")))
}
