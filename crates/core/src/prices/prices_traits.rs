use async_trait::async_trait;
use chrono::NaiveDate;
use filingscope_feeds::PriceRecord;

use super::prices_model::{PriceDaily, PriceIngestSummary};
use crate::errors::Result;

/// Trait for the daily price ledger
#[async_trait]
pub trait PriceRepositoryTrait: Send + Sync {
    /// Insert-or-replace on the `(ticker, trade_date)` key, one transaction.
    async fn upsert_prices(&self, prices: Vec<PriceDaily>) -> Result<usize>;

    fn has_prices_for_date(&self, trade_date: NaiveDate) -> Result<bool>;

    /// Most recent row for the ticker, any date.
    fn get_latest_price(&self, ticker: &str) -> Result<Option<PriceDaily>>;
}

#[async_trait]
pub trait PriceServiceTrait: Send + Sync {
    /// Stores records with a close price and seeds companies for named rows.
    async fn ingest_daily_prices(&self, records: Vec<PriceRecord>) -> Result<PriceIngestSummary>;

    fn has_prices_for_date(&self, trade_date: NaiveDate) -> Result<bool>;

    fn get_latest_price(&self, ticker: &str) -> Result<Option<PriceDaily>>;
}
