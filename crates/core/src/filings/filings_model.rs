//! Filing domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};
use crate::financials::MergeOutcome;

/// Closed set of filing categories.
///
/// Declaration order is also the order in which the classifier tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilingCategory {
    /// Periodic reports and earnings releases
    Performance,
    /// Supply and service contracts, order wins
    OrderContract,
    /// Share issuance, capital reduction, convertibles
    CapitalAction,
    /// Dividends and buybacks
    ShareholderReturn,
    /// Board, executives, major shareholders
    Governance,
    /// Litigation, embezzlement, delisting and similar events
    Risk,
    Other,
}

impl FilingCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FilingCategory::Performance => "PERFORMANCE",
            FilingCategory::OrderContract => "ORDER_CONTRACT",
            FilingCategory::CapitalAction => "CAPITAL_ACTION",
            FilingCategory::ShareholderReturn => "SHAREHOLDER_RETURN",
            FilingCategory::Governance => "GOVERNANCE",
            FilingCategory::Risk => "RISK",
            FilingCategory::Other => "OTHER",
        }
    }

    /// Display label used by the presentation layer.
    pub const fn label(&self) -> &'static str {
        match self {
            FilingCategory::Performance => "실적",
            FilingCategory::OrderContract => "수주계약",
            FilingCategory::CapitalAction => "자본",
            FilingCategory::ShareholderReturn => "주주가치",
            FilingCategory::Governance => "지배구조",
            FilingCategory::Risk => "리스크",
            FilingCategory::Other => "기타",
        }
    }
}

impl fmt::Display for FilingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilingCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PERFORMANCE" => Ok(FilingCategory::Performance),
            "ORDER_CONTRACT" => Ok(FilingCategory::OrderContract),
            "CAPITAL_ACTION" => Ok(FilingCategory::CapitalAction),
            "SHAREHOLDER_RETURN" => Ok(FilingCategory::ShareholderReturn),
            "GOVERNANCE" => Ok(FilingCategory::Governance),
            "RISK" => Ok(FilingCategory::Risk),
            "OTHER" => Ok(FilingCategory::Other),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown filing category '{}'",
                other
            )))),
        }
    }
}

/// Figures pulled from an earnings or periodic-report title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceFigures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_profit: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_profit: Option<Decimal>,
    /// Year-over-year revenue change, percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_yoy: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_equity: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_debt: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_assets: Option<Decimal>,
}

impl PerformanceFigures {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractFigures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_amount: Option<Decimal>,
    /// Contract size relative to last year's revenue, percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_ratio: Option<Decimal>,
}

impl ContractFigures {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareholderReturnFigures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dividend_per_share: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<Decimal>,
}

impl ShareholderReturnFigures {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalFigures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raise_amount: Option<Decimal>,
}

impl CapitalFigures {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Category-dependent figures extracted from a filing.
///
/// Every field is optional: an absent value means "not stated", never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyNumbers {
    Performance(PerformanceFigures),
    OrderContract(ContractFigures),
    ShareholderReturn(ShareholderReturnFigures),
    CapitalAction(CapitalFigures),
}

impl KeyNumbers {
    pub fn is_empty(&self) -> bool {
        match self {
            KeyNumbers::Performance(f) => f.is_empty(),
            KeyNumbers::OrderContract(f) => f.is_empty(),
            KeyNumbers::ShareholderReturn(f) => f.is_empty(),
            KeyNumbers::CapitalAction(f) => f.is_empty(),
        }
    }

    pub fn performance(&self) -> Option<&PerformanceFigures> {
        match self {
            KeyNumbers::Performance(f) => Some(f),
            _ => None,
        }
    }
}

/// Result of running the classifier over a title and remark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: FilingCategory,
    pub subtype: String,
    pub is_correction: bool,
}

/// Stored filing. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Filing {
    pub id: String,
    pub company_id: String,
    pub ticker: Option<String>,
    pub company_name: String,
    pub filed_at: NaiveDate,
    pub category: FilingCategory,
    pub subtype: String,
    pub title: String,
    pub key_numbers: Option<KeyNumbers>,
    pub source_url: String,
    pub is_correction: bool,
    pub created_at: DateTime<Utc>,
}

/// What happened to the financial merge step of an ingested filing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeStep {
    /// The filing is not a performance filing.
    NotApplicable,
    Merged(MergeOutcome),
    /// The merge failed after the filing row was stored. The filing stays.
    Failed(String),
}

/// Outcome of ingesting one feed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Inserted(MergeStep),
    Duplicate,
}

/// Market classes whose filings the pipeline tracks: KOSPI, KOSDAQ, KONEX.
pub fn is_tracked_exchange(exchange_class: &str) -> bool {
    matches!(exchange_class, "Y" | "K" | "N")
}

/// Market label for a tracked market class.
pub fn market_for_exchange_class(exchange_class: &str) -> Option<&'static str> {
    match exchange_class {
        "Y" => Some("KOSPI"),
        "K" => Some("KOSDAQ"),
        "N" => Some("KONEX"),
        _ => None,
    }
}
