use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Exchange timezone. Trading days and snapshot dates are calendar days here.
pub const EXCHANGE_TZ: Tz = chrono_tz::Asia::Seoul;

/// Converts a UTC instant to the exchange calendar date.
pub fn market_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Today's date on the exchange calendar.
pub fn market_date_today() -> NaiveDate {
    market_date_from_utc(Utc::now(), EXCHANGE_TZ)
}

/// Parses the 8-digit `YYYYMMDD` dates used by the filing feed.
pub fn parse_compact_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.len() != 8 || !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    NaiveDate::from_ymd_opt(
        value[0..4].parse().ok()?,
        value[4..6].parse().ok()?,
        value[6..8].parse().ok()?,
    )
}

/// Parses an RFC 3339 timestamp stored as text, falling back to `now`.
pub fn parse_timestamp_or_now(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
