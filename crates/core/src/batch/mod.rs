//! Batch module - run log, runtime budget and the two scheduled batches.

mod batch_model;
mod batch_service;
mod batch_traits;
mod budget;
mod filing_batch;
mod orchestrator;
mod valuation_batch;


pub use batch_model::{
    truncate_chars, BatchHealth, BatchIssue, BatchReport, BatchResult, BatchRun, BatchStatus,
    BatchType, IssueKind, RunClose, BUDGET_EXCEEDED_MESSAGE, MAX_ERROR_MESSAGE_CHARS,
    MAX_LOGGED_ISSUES, STALE_RUN_MESSAGE,
};
pub use batch_service::{BatchService, BatchSettings};
pub use batch_traits::{BatchRunRepositoryTrait, BatchServiceTrait};
pub use budget::RuntimeBudget;
pub use filing_batch::{run_filing_items, FILING_SOURCE_KEY};
pub use orchestrator::BatchOrchestrator;
pub use valuation_batch::{run_valuation_items, ValuationBatchContext, EMPTY_PRICE_SOURCE_MESSAGE};
