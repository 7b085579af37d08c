//! Source trait definitions.
//!
//! A source hands over canonical records only. Transport, authentication
//! and pagination stay inside the implementation.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::FeedError;
use crate::models::{FilingRecord, PriceRecord};

/// A source of recently published filings.
#[async_trait]
pub trait FilingSource: Send + Sync {
    /// Identifier used in logs and batch error messages, e.g. `"DART_FILE"`.
    fn id(&self) -> &'static str;

    /// Fetch the most recent filings, newest first.
    async fn fetch_recent_filings(&self) -> Result<Vec<FilingRecord>, FeedError>;
}

/// A source of end-of-day prices for the whole listed universe.
#[async_trait]
pub trait PriceSource: Send + Sync {
    fn id(&self) -> &'static str;

    /// Fetch all price rows for `trade_date`. An empty vector means the
    /// source had nothing for that date.
    async fn fetch_daily_prices(&self, trade_date: NaiveDate)
        -> Result<Vec<PriceRecord>, FeedError>;
}
