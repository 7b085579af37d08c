use async_trait::async_trait;
use chrono::NaiveDate;
use filingscope_feeds::FilingRecord;

use super::filings_model::{Filing, IngestOutcome};
use crate::errors::Result;

/// Trait for filing ledger storage
#[async_trait]
pub trait FilingRepositoryTrait: Send + Sync {
    fn exists(&self, filing_id: &str) -> Result<bool>;

    /// Inserts the filing. Returns `false`, not an error, when a row with the
    /// same id already exists.
    async fn insert_filing(&self, filing: Filing) -> Result<bool>;

    fn get_filing(&self, filing_id: &str) -> Result<Option<Filing>>;

    /// Newest first.
    fn list_for_company(&self, company_id: &str, limit: i64) -> Result<Vec<Filing>>;

    /// Inclusive date range, newest first.
    fn list_between(&self, from: NaiveDate, to: NaiveDate, limit: i64) -> Result<Vec<Filing>>;

    fn count(&self) -> Result<i64>;
}

/// Trait for ingesting and reading filings
#[async_trait]
pub trait FilingServiceTrait: Send + Sync {
    /// Classifies, stores and, for performance filings, merges one feed
    /// record. Ingesting the same record twice is a no-op.
    async fn ingest(&self, record: FilingRecord) -> Result<IngestOutcome>;

    fn get_filing(&self, filing_id: &str) -> Result<Option<Filing>>;

    fn list_company_filings(&self, company_id: &str, limit: i64) -> Result<Vec<Filing>>;

    fn list_filings_between(&self, from: NaiveDate, to: NaiveDate, limit: i64)
        -> Result<Vec<Filing>>;

    fn count_filings(&self) -> Result<i64>;
}
