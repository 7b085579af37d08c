use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::batch_model::{BatchHealth, BatchResult, BatchRun, BatchType, RunClose};
use crate::errors::Result;

/// Trait for the batch run log
#[async_trait]
pub trait BatchRunRepositoryTrait: Send + Sync {
    async fn create_run(&self, run: BatchRun) -> Result<BatchRun>;

    /// Closes the run if it is still `running`. Returns `false` when the row
    /// was already closed (for example by a stale sweep).
    async fn finish_run(&self, run_id: String, close: RunClose) -> Result<bool>;

    /// Marks every `running` row of `batch_type` started before `cutoff` as
    /// failed with the stale-run message. Returns the number of rows closed.
    async fn fail_stale_runs(
        &self,
        batch_type: BatchType,
        cutoff: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Result<usize>;

    fn get_run(&self, run_id: &str) -> Result<Option<BatchRun>>;

    /// Newest first.
    fn get_recent_runs(&self, limit: i64) -> Result<Vec<BatchRun>>;

    fn get_last_success(&self, batch_type: BatchType) -> Result<Option<BatchRun>>;
}

/// Entry points for scheduled and manual batch runs
#[async_trait]
pub trait BatchServiceTrait: Send + Sync {
    /// Polls the filing source and ingests new filings.
    async fn run_filing_batch(&self, budget_ms: Option<u64>) -> Result<BatchResult>;

    /// Builds today's valuation snapshots unless they already exist.
    async fn run_valuation_batch(&self, budget_ms: Option<u64>) -> Result<BatchResult>;

    fn get_health(&self) -> Result<BatchHealth>;
}
