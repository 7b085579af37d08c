//! TEXT column encodings shared by the repositories.
//!
//! Decimals are stored in their canonical string form, dates as
//! `YYYY-MM-DD` and instants as fixed-width RFC 3339 in UTC, so that string
//! comparison in SQL orders them correctly.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;

use crate::errors::StorageError;

pub fn timestamp_to_text(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn text_to_timestamp(column: &str, value: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(value)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| corrupt(column, value))
}

pub fn date_to_text(value: NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

pub fn text_to_date(column: &str, value: &str) -> Result<NaiveDate, StorageError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| corrupt(column, value))
}

pub fn decimal_to_text(value: Decimal) -> String {
    value.normalize().to_string()
}

pub fn opt_decimal_to_text(value: Option<Decimal>) -> Option<String> {
    value.map(decimal_to_text)
}

pub fn text_to_decimal(column: &str, value: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(value).map_err(|_| corrupt(column, value))
}

pub fn opt_text_to_decimal(
    column: &str,
    value: Option<&str>,
) -> Result<Option<Decimal>, StorageError> {
    value.map(|v| text_to_decimal(column, v)).transpose()
}

pub fn corrupt(column: &str, value: &str) -> StorageError {
    StorageError::CorruptValue(format!("{}: '{}'", column, value))
}
