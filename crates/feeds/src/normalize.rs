//! Field-level normalization shared by every source shape.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Parses a loosely formatted number such as `"1,234,500"` or `" -12.5 "`.
///
/// Thousands separators and whitespace are stripped, any other stray
/// characters are dropped. Empty strings and bare `-`/`.` yield `None`.
pub fn parse_number(value: &str) -> Option<Decimal> {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() || cleaned == "-" || cleaned == "." {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Parses a traded-share count, truncating any fractional part.
pub fn parse_volume(value: &str) -> Option<i64> {
    parse_number(value).and_then(|v| v.trunc().to_i64())
}

/// Parses a trade date in any of the formats the exchange publishes:
/// `YYYYMMDD`, `YYYY-MM-DD`, `YYYY.MM.DD` or `YYYY/MM/DD`.
pub fn parse_trade_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.len() == 8 && value.chars().all(|c| c.is_ascii_digit()) {
        let year = value[0..4].parse().ok()?;
        let month = value[4..6].parse().ok()?;
        let day = value[6..8].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    if value.len() != 10 {
        return None;
    }
    ["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Canonical form of a CSV header cell used for alias matching.
///
/// Removes the UTF-8 BOM, whitespace, parentheses and punctuation, keeping
/// ASCII word characters and Hangul syllables, lowercased.
pub fn normalize_header(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || ('가'..='힣').contains(c))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
