//! Financials module - quarterly facts merged by source priority, and TTM rollups.

mod financials_model;
mod financials_service;
mod financials_traits;
mod merger;
mod period_resolver;
mod ttm;

#[cfg(test)]
mod financials_service_tests;

pub use financials_model::{
    quarter_id, MergeOutcome, QuarterKey, QuarterlyFinancial, ReportPeriod, TtmFinancial,
    PRIORITY_ANNUAL, PRIORITY_INTERIM, PRIORITY_PRELIMINARY,
};
pub use financials_service::FinancialService;
pub use financials_traits::{FinancialRepositoryTrait, FinancialServiceTrait};
pub use merger::{build_quarter_update, should_replace};
pub use period_resolver::resolve_report_period;
pub use ttm::aggregate_ttm;
