//! Daily price ledger models.

use chrono::{DateTime, NaiveDate, Utc};
use filingscope_feeds::PriceRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One stored price row per `(ticker, trade_date)`. Later writes replace it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDaily {
    pub id: String,
    pub ticker: String,
    pub trade_date: NaiveDate,
    pub open: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub close: Decimal,
    pub volume: Option<i64>,
    pub market_cap: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// `{ticker}_{YYYY-MM-DD}`
pub fn price_id(ticker: &str, trade_date: NaiveDate) -> String {
    format!("{}_{}", ticker, trade_date.format("%Y-%m-%d"))
}

impl PriceDaily {
    /// Converts a feed record. Rows without a close price have no place in
    /// the ledger and yield `None`.
    pub fn from_record(record: &PriceRecord, now: DateTime<Utc>) -> Option<Self> {
        let close = record.close?;
        let ticker = record.ticker.trim();
        if ticker.is_empty() {
            return None;
        }
        Some(Self {
            id: price_id(ticker, record.trade_date),
            ticker: ticker.to_string(),
            trade_date: record.trade_date,
            open: record.open,
            high: record.high,
            low: record.low,
            close,
            volume: record.volume,
            market_cap: record.market_cap,
            created_at: now,
        })
    }
}

/// Counts from one price ingestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceIngestSummary {
    pub stored: usize,
    pub discarded: usize,
    pub companies_seeded: usize,
}
