//! Filing-list JSON shape (OpenDART `list.json`).

use serde::Deserialize;

use crate::errors::FeedError;
use crate::models::FilingRecord;

/// Status code the list API uses for a successful response.
const STATUS_OK: &str = "000";
/// Status code for "no data for the requested window".
const STATUS_NO_DATA: &str = "013";

#[derive(Debug, Deserialize)]
struct ListResponse {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    list: Vec<ListItem>,
}

#[derive(Debug, Deserialize)]
struct ListItem {
    rcept_no: String,
    corp_code: String,
    #[serde(default)]
    stock_code: Option<String>,
    corp_name: String,
    report_nm: String,
    rcept_dt: String,
    #[serde(default)]
    rm: Option<String>,
    #[serde(default)]
    corp_cls: String,
}

impl From<ListItem> for FilingRecord {
    fn from(item: ListItem) -> Self {
        Self {
            filing_id: item.rcept_no,
            company_id: item.corp_code,
            ticker: item
                .stock_code
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            company_name: item.corp_name.trim().to_string(),
            title: item.report_nm.trim().to_string(),
            filed_at: item.rcept_dt,
            remark: item.rm.filter(|s| !s.trim().is_empty()),
            exchange_class: item.corp_cls,
        }
    }
}

/// Decodes one page of the filing list.
///
/// A "no data" status is an empty page, any other non-OK status is an
/// upstream error.
pub fn parse_list_response(body: &str) -> Result<Vec<FilingRecord>, FeedError> {
    let response: ListResponse = serde_json::from_str(body)?;
    match response.status.as_str() {
        STATUS_OK => Ok(response.list.into_iter().map(FilingRecord::from).collect()),
        STATUS_NO_DATA => Ok(Vec::new()),
        _ => Err(FeedError::UpstreamStatus {
            status: response.status,
            message: response.message,
        }),
    }
}
