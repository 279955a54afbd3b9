//! Shared column conversion helpers for TEXT uuids, unix-second
//! timestamps and JSON payload columns.

use crate::DbError;

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::de::DeserializeOwned;
use uuid::Uuid;

#[track_caller]
pub(crate) fn parse_uuid(value: &str, column: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(value).map_err(|e| DbError::Conversion {
        message: format!("Invalid UUID in {}: {}", column, e),
        location: ErrorLocation::from(Location::caller()),
    })
}

#[track_caller]
pub(crate) fn parse_opt_uuid(value: Option<&str>, column: &str) -> Result<Option<Uuid>, DbError> {
    value.map(|s| parse_uuid(s, column)).transpose()
}

#[track_caller]
pub(crate) fn parse_timestamp(value: i64, column: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::from_timestamp(value, 0).ok_or_else(|| DbError::Conversion {
        message: format!("Invalid timestamp in {}: {}", column, value),
        location: ErrorLocation::from(Location::caller()),
    })
}

pub(crate) fn parse_opt_timestamp(value: Option<i64>) -> Option<DateTime<Utc>> {
    value.and_then(|ts| DateTime::from_timestamp(ts, 0))
}

#[track_caller]
pub(crate) fn parse_json<T: DeserializeOwned>(
    value: Option<&str>,
    column: &str,
) -> Result<Option<T>, DbError> {
    value
        .map(|s| {
            serde_json::from_str(s).map_err(|e| DbError::Conversion {
                message: format!("Invalid JSON in {}: {}", column, e),
                location: ErrorLocation::from(Location::caller()),
            })
        })
        .transpose()
}
