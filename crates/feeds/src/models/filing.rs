use serde::{Deserialize, Serialize};

/// A filing as handed over by the filing feed.
///
/// Fields are kept close to the wire: `filed_at` is still the 8-digit
/// `YYYYMMDD` string and `exchange_class` the single-letter market class.
/// Interpretation (date parsing, tracked-exchange filtering) happens in core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingRecord {
    /// Source-assigned receipt number, globally unique
    pub filing_id: String,

    /// Source-assigned company identifier
    pub company_id: String,

    /// Listing ticker, absent for unlisted filers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,

    pub company_name: String,

    pub title: String,

    /// Filing date as `YYYYMMDD`
    pub filed_at: String,

    /// Free-text remark column (carries correction markers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,

    /// Market class: `Y` (KOSPI), `K` (KOSDAQ), `N` (KONEX), `E` (other)
    pub exchange_class: String,
}
