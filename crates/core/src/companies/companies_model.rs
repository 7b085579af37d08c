//! Company domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::EXCHANGE_COMPANY_ID_PREFIX;

/// Identity record for a listed or filing company
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub ticker: Option<String>,
    pub name: String,
    pub market: Option<String>,
    pub industry_code: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for seeding a company that has not been seen before
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub id: String,
    pub ticker: Option<String>,
    pub name: String,
    pub market: Option<String>,
    pub industry_code: Option<String>,
}

impl NewCompany {
    /// Company known only through an exchange price row.
    pub fn from_exchange_listing(ticker: &str, name: &str, market: Option<String>) -> Self {
        Self {
            id: exchange_company_id(ticker),
            ticker: Some(ticker.to_string()),
            name: name.to_string(),
            market,
            industry_code: None,
        }
    }
}

/// Company id synthesized from a ticker when the filer id is unknown.
pub fn exchange_company_id(ticker: &str) -> String {
    format!("{}{}", EXCHANGE_COMPANY_ID_PREFIX, ticker)
}

/// Active company with a ticker, joined to its peer mapping if one exists
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListedCompany {
    pub company_id: String,
    pub ticker: String,
    pub industry_code: Option<String>,
    pub peer_code: Option<String>,
}
