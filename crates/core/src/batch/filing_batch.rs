use filingscope_feeds::FilingSource;
use log::{debug, info};

use super::batch_model::{BatchIssue, BatchReport};
use super::budget::RuntimeBudget;
use crate::errors::{Error, Result};
use crate::filings::{is_tracked_exchange, FilingServiceTrait, IngestOutcome, MergeStep};

/// Configuration key reported when no filing source is configured.
pub const FILING_SOURCE_KEY: &str = "filing source";

/// Body of the filing batch: fetch the recent filing list and ingest it
/// record by record.
///
/// A missing source is fatal. A fetch failure is a single source issue.
/// Per-record failures are collected and never stop the loop; only the
/// runtime budget does.
pub async fn run_filing_items(
    source: Option<&dyn FilingSource>,
    filing_service: &dyn FilingServiceTrait,
    budget: &RuntimeBudget,
) -> Result<BatchReport> {
    let source = source.ok_or_else(|| Error::MissingConfigKey(FILING_SOURCE_KEY.to_string()))?;
    let mut report = BatchReport::default();

    let records = match source.fetch_recent_filings().await {
        Ok(records) => records,
        Err(e) => {
            report.push(BatchIssue::source(e));
            return Ok(report);
        }
    };
    info!("Fetched {} filings from {}", records.len(), source.id());

    for record in records {
        if budget.is_exhausted() {
            report.push(BatchIssue::budget_exceeded());
            break;
        }
        if !is_tracked_exchange(&record.exchange_class) {
            report.skipped += 1;
            continue;
        }

        let filing_id = record.filing_id.clone();
        match filing_service.ingest(record).await {
            Ok(IngestOutcome::Inserted(step)) => {
                report.processed += 1;
                if let MergeStep::Failed(reason) = step {
                    report.push(BatchIssue::item(&filing_id, format!("merge failed: {}", reason)));
                }
            }
            Ok(IngestOutcome::Duplicate) => {
                debug!("Skipping duplicate filing {}", filing_id);
                report.skipped += 1;
            }
            Err(e) => report.push(BatchIssue::item(&filing_id, e)),
        }
    }
    Ok(report)
}
