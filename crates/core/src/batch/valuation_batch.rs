use chrono::NaiveDate;
use filingscope_feeds::PriceSource;
use log::info;

use super::batch_model::{BatchIssue, BatchReport};
use super::budget::RuntimeBudget;
use crate::errors::Result;
use crate::prices::PriceServiceTrait;
use crate::valuation::ValuationServiceTrait;

pub const EMPTY_PRICE_SOURCE_MESSAGE: &str = "no price data returned from price source";

pub struct ValuationBatchContext<'a> {
    pub price_source: &'a dyn PriceSource,
    pub price_service: &'a dyn PriceServiceTrait,
    pub valuation_service: &'a dyn ValuationServiceTrait,
    pub max_companies: usize,
    pub snap_date: NaiveDate,
}

/// Body of the valuation batch for one snapshot date.
///
/// Steps, in order: idempotency guard, price ingestion, peer mapping refresh,
/// draft building under the runtime budget, then ranking and saving once all
/// drafts exist.
pub async fn run_valuation_items(
    ctx: ValuationBatchContext<'_>,
    budget: &RuntimeBudget,
) -> Result<BatchReport> {
    let mut report = BatchReport::default();

    if ctx.valuation_service.snapshot_exists_for(ctx.snap_date)? {
        info!("Snapshots for {} already exist, nothing to do", ctx.snap_date);
        report.push(BatchIssue::notice(format!(
            "snapshot for {} already exists",
            ctx.snap_date
        )));
        return Ok(report);
    }

    if ctx.price_service.has_prices_for_date(ctx.snap_date)? {
        info!("Prices for {} already stored, skipping fetch", ctx.snap_date);
    } else {
        match ctx.price_source.fetch_daily_prices(ctx.snap_date).await {
            Ok(records) if records.is_empty() => {
                report.push(BatchIssue::source(EMPTY_PRICE_SOURCE_MESSAGE));
                return Ok(report);
            }
            Ok(records) => {
                ctx.price_service.ingest_daily_prices(records).await?;
            }
            Err(e) => {
                report.push(BatchIssue::source(e));
                return Ok(report);
            }
        }
    }

    ctx.valuation_service.ensure_peer_mappings().await?;

    let universe = ctx.valuation_service.scoring_universe(ctx.max_companies)?;
    let mut drafts = Vec::with_capacity(universe.len());
    for company in &universe {
        if budget.is_exhausted() {
            report.push(BatchIssue::budget_exceeded());
            break;
        }
        match ctx.valuation_service.build_draft(company, ctx.snap_date) {
            Ok(Some(draft)) => drafts.push(draft),
            Ok(None) => report.skipped += 1,
            Err(e) => report.push(BatchIssue::item(&company.company_id, e)),
        }
    }

    report.processed = ctx.valuation_service.finalize_snapshots(drafts).await?;
    Ok(report)
}
