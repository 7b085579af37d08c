use async_trait::async_trait;

use super::financials_model::{MergeOutcome, QuarterKey, QuarterlyFinancial, TtmFinancial};
use crate::errors::Result;
use crate::filings::Filing;

/// Trait for quarterly and TTM financial storage
#[async_trait]
pub trait FinancialRepositoryTrait: Send + Sync {
    fn get_quarter(&self, key: &QuarterKey) -> Result<Option<QuarterlyFinancial>>;

    /// Most recent quarters first, by `(year, quarter)`.
    fn get_recent_quarters(&self, company_id: &str, limit: i64) -> Result<Vec<QuarterlyFinancial>>;

    /// Reads the stored row for the key and writes `row` only if
    /// [`should_replace`](super::should_replace) allows it. The read and the
    /// write happen in the same write transaction.
    async fn save_if_not_outranked(&self, row: QuarterlyFinancial) -> Result<MergeOutcome>;

    /// Replaces the company's TTM row wholesale.
    async fn replace_ttm(&self, ttm: TtmFinancial) -> Result<()>;

    fn get_ttm(&self, company_id: &str) -> Result<Option<TtmFinancial>>;
}

/// Trait for the quarterly merge and TTM rollup
#[async_trait]
pub trait FinancialServiceTrait: Send + Sync {
    /// Turns a stored performance filing into a quarterly fact and, when the
    /// write is accepted, recomputes the company's TTM row.
    async fn merge_performance_filing(&self, filing: &Filing) -> Result<MergeOutcome>;

    /// Returns the new TTM row, or `None` when the company has no quarters.
    async fn recompute_ttm(&self, company_id: &str) -> Result<Option<TtmFinancial>>;

    fn get_ttm(&self, company_id: &str) -> Result<Option<TtmFinancial>>;

    fn get_quarters(&self, company_id: &str, limit: i64) -> Result<Vec<QuarterlyFinancial>>;
}
