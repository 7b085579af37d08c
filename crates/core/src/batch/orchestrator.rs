//! Run lifecycle around a batch body.
//!
//! `begin` sweeps stale runs of the same type and opens a new `running` row;
//! `complete` closes it exactly once from the body's outcome. Neither the
//! sweep nor the close can fail the batch: both log and continue.

use std::sync::Arc;

use chrono::Utc;
use log::{error, info, warn};

use super::batch_model::{
    truncate_chars, BatchReport, BatchResult, BatchRun, BatchStatus, BatchType, RunClose,
    MAX_ERROR_MESSAGE_CHARS,
};
use super::batch_traits::BatchRunRepositoryTrait;
use crate::errors::{Error, Result};

pub struct BatchOrchestrator {
    repository: Arc<dyn BatchRunRepositoryTrait>,
}

impl BatchOrchestrator {
    pub fn new(repository: Arc<dyn BatchRunRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Recovers stale runs, then records a new `running` row.
    ///
    /// Only a failure to create the new row is returned as an error.
    pub async fn begin(&self, batch_type: BatchType) -> Result<BatchRun> {
        let now = Utc::now();
        let cutoff = now - batch_type.stale_after();
        match self
            .repository
            .fail_stale_runs(batch_type, cutoff, now)
            .await
        {
            Ok(0) => {}
            Ok(n) => warn!("Closed {} stale {} run(s) as failed", n, batch_type),
            Err(e) => error!("Failed to sweep stale {} runs: {}", batch_type, e),
        }

        let run = self
            .repository
            .create_run(BatchRun::start(batch_type, now))
            .await?;
        info!("Started {} batch run {}", batch_type, run.id);
        Ok(run)
    }

    /// Closes the run from the body's outcome. A body error is fatal: the run
    /// closes `failed` with nothing processed.
    pub async fn complete(&self, run: &BatchRun, outcome: Result<BatchReport>) -> BatchResult {
        let (close, result) = match outcome {
            Ok(report) => {
                let status = report.status();
                let close = RunClose {
                    status,
                    items_processed: report.processed as i64,
                    items_failed: report.items_failed() as i64,
                    error_message: report.error_message(),
                    finished_at: Utc::now(),
                };
                let result = BatchResult {
                    run_id: run.id.clone(),
                    batch_type: run.batch_type,
                    status,
                    processed: report.processed,
                    skipped: report.skipped,
                    errors: report.messages(),
                };
                (close, result)
            }
            Err(e) => {
                let message = fatal_message(&e);
                let close = RunClose {
                    status: BatchStatus::Failed,
                    items_processed: 0,
                    items_failed: 0,
                    error_message: Some(truncate_chars(&message, MAX_ERROR_MESSAGE_CHARS)),
                    finished_at: Utc::now(),
                };
                let result = BatchResult {
                    run_id: run.id.clone(),
                    batch_type: run.batch_type,
                    status: BatchStatus::Failed,
                    processed: 0,
                    skipped: 0,
                    errors: vec![message],
                };
                (close, result)
            }
        };

        match self.repository.finish_run(run.id.clone(), close).await {
            Ok(true) => {}
            Ok(false) => warn!("Run {} was already closed", run.id),
            Err(e) => error!("Failed to close run {}: {}", run.id, e),
        }
        info!(
            "{} batch run {} finished: {} ({} processed, {} skipped, {} issues)",
            run.batch_type,
            run.id,
            result.status,
            result.processed,
            result.skipped,
            result.errors.len()
        );
        result
    }
}

fn fatal_message(error: &Error) -> String {
    match error {
        Error::MissingConfigKey(key) => format!("configuration error: {} is not configured", key),
        other => other.to_string(),
    }
}
