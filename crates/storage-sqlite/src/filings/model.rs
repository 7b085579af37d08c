//! Database models for filings.

use diesel::prelude::*;
use filingscope_core::filings::{Filing, FilingCategory, KeyNumbers};

use crate::errors::StorageError;
use crate::utils::{corrupt, date_to_text, text_to_date, text_to_timestamp, timestamp_to_text};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::filings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FilingDB {
    pub id: String,
    pub company_id: String,
    pub ticker: Option<String>,
    pub company_name: String,
    pub filed_at: String,
    pub category: String,
    pub subtype: String,
    pub title: String,
    /// `KeyNumbers` as tagged JSON, NULL when nothing was extracted
    pub key_numbers: Option<String>,
    pub source_url: String,
    pub is_correction: bool,
    pub created_at: String,
}

impl TryFrom<Filing> for FilingDB {
    type Error = StorageError;

    fn try_from(filing: Filing) -> Result<Self, Self::Error> {
        let key_numbers = filing
            .key_numbers
            .filter(|k| !k.is_empty())
            .map(|k| serde_json::to_string(&k))
            .transpose()?;
        Ok(Self {
            id: filing.id,
            company_id: filing.company_id,
            ticker: filing.ticker,
            company_name: filing.company_name,
            filed_at: date_to_text(filing.filed_at),
            category: filing.category.as_str().to_string(),
            subtype: filing.subtype,
            title: filing.title,
            key_numbers,
            source_url: filing.source_url,
            is_correction: filing.is_correction,
            created_at: timestamp_to_text(filing.created_at),
        })
    }
}

impl TryFrom<FilingDB> for Filing {
    type Error = StorageError;

    fn try_from(db: FilingDB) -> Result<Self, Self::Error> {
        let category = db
            .category
            .parse::<FilingCategory>()
            .map_err(|_| corrupt("category", &db.category))?;
        let key_numbers = db
            .key_numbers
            .as_deref()
            .map(serde_json::from_str::<KeyNumbers>)
            .transpose()?;
        Ok(Self {
            filed_at: text_to_date("filed_at", &db.filed_at)?,
            created_at: text_to_timestamp("created_at", &db.created_at)?,
            id: db.id,
            company_id: db.company_id,
            ticker: db.ticker,
            company_name: db.company_name,
            category,
            subtype: db.subtype,
            title: db.title,
            key_numbers,
            source_url: db.source_url,
            is_correction: db.is_correction,
        })
    }
}
