use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One daily price row, normalized from whichever source shape produced it.
///
/// `close` stays optional here; the price ledger in core drops rows without it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub ticker: String,

    pub trade_date: NaiveDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Decimal>,

    pub close: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<i64>,

    /// Market capitalization in KRW
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    /// Market segment label (KOSPI, KOSDAQ, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
}

impl PriceRecord {
    /// Minimal record with only a close price.
    pub fn new(ticker: impl Into<String>, trade_date: NaiveDate, close: Option<Decimal>) -> Self {
        Self {
            ticker: ticker.into(),
            trade_date,
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
            market_cap: None,
            company_name: None,
            market: None,
        }
    }
}
