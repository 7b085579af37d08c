//! Priority-ordered merge of quarterly facts.
//!
//! Whole-row semantics: an accepted write replaces every numeric field,
//! including with `None`. There is no field-by-field merge.

use chrono::{DateTime, Utc};

use super::financials_model::{quarter_id, QuarterlyFinancial, ReportPeriod};
use crate::filings::PerformanceFigures;

/// Equal priority favours the incoming write.
pub fn should_replace(stored_priority: Option<i32>, incoming_priority: i32) -> bool {
    stored_priority.map_or(true, |stored| incoming_priority >= stored)
}

/// Builds the candidate row for a performance filing's reporting period.
pub fn build_quarter_update(
    company_id: &str,
    filing_id: &str,
    period: ReportPeriod,
    figures: Option<&PerformanceFigures>,
    now: DateTime<Utc>,
) -> QuarterlyFinancial {
    let figures = figures.cloned().unwrap_or_default();
    QuarterlyFinancial {
        id: quarter_id(company_id, period.year, period.quarter),
        company_id: company_id.to_string(),
        year: period.year,
        quarter: period.quarter,
        revenue: figures.revenue,
        operating_profit: figures.operating_profit,
        net_profit: figures.net_profit,
        total_equity: figures.total_equity,
        total_debt: figures.total_debt,
        total_assets: figures.total_assets,
        shares_outstanding: None,
        source_filing_id: Some(filing_id.to_string()),
        source_priority: period.priority,
        updated_at: now,
    }
}
