//! Quarterly and trailing-twelve-month financial models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Preliminary earnings release. Least authoritative.
pub const PRIORITY_PRELIMINARY: i32 = 1;
/// Quarterly or half-year report.
pub const PRIORITY_INTERIM: i32 = 2;
/// Annual business report. Most authoritative.
pub const PRIORITY_ANNUAL: i32 = 3;

/// Natural key of a quarterly fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterKey {
    pub company_id: String,
    pub year: i32,
    pub quarter: i32,
}

impl QuarterKey {
    pub fn new(company_id: impl Into<String>, year: i32, quarter: i32) -> Self {
        Self {
            company_id: company_id.into(),
            year,
            quarter,
        }
    }

    /// `{company_id}_{year}Q{quarter}`
    pub fn id(&self) -> String {
        quarter_id(&self.company_id, self.year, self.quarter)
    }
}

pub fn quarter_id(company_id: &str, year: i32, quarter: i32) -> String {
    format!("{}_{}Q{}", company_id, year, quarter)
}

/// One company-quarter of financial facts.
///
/// `None` means the value was not reported, never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyFinancial {
    pub id: String,
    pub company_id: String,
    pub year: i32,
    pub quarter: i32,
    pub revenue: Option<Decimal>,
    pub operating_profit: Option<Decimal>,
    pub net_profit: Option<Decimal>,
    pub total_equity: Option<Decimal>,
    pub total_debt: Option<Decimal>,
    pub total_assets: Option<Decimal>,
    pub shares_outstanding: Option<i64>,
    pub source_filing_id: Option<String>,
    pub source_priority: i32,
    pub updated_at: DateTime<Utc>,
}

impl QuarterlyFinancial {
    pub fn key(&self) -> QuarterKey {
        QuarterKey::new(self.company_id.clone(), self.year, self.quarter)
    }
}

/// Trailing-four-quarter rollup, one row per company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtmFinancial {
    pub company_id: String,
    pub revenue_ttm: Option<Decimal>,
    pub op_profit_ttm: Option<Decimal>,
    pub net_profit_ttm: Option<Decimal>,
    pub total_equity: Option<Decimal>,
    pub total_debt: Option<Decimal>,
    pub shares_outstanding: Option<i64>,
    pub last_quarter_year: i32,
    pub last_quarter: i32,
    pub calculated_at: DateTime<Utc>,
}

/// Reporting period and authority resolved from a filing title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    pub year: i32,
    pub quarter: i32,
    pub priority: i32,
}

/// Result of a priority-guarded quarterly write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The row was inserted or fully overwritten.
    Written { key: QuarterKey, source_priority: i32 },
    /// A stored row with higher priority kept its values.
    Outranked {
        key: QuarterKey,
        stored_priority: i32,
        incoming_priority: i32,
    },
    /// The title names no reporting period.
    NotMergeable,
}

impl MergeOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, MergeOutcome::Written { .. })
    }
}
