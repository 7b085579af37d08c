//! Database models for companies.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use filingscope_core::companies::{Company, NewCompany};

use crate::errors::StorageError;
use crate::utils::{text_to_timestamp, timestamp_to_text};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::companies)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CompanyDB {
    pub id: String,
    pub ticker: Option<String>,
    pub name: String,
    pub market: Option<String>,
    pub industry_code: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::companies)]
pub struct NewCompanyDB {
    pub id: String,
    pub ticker: Option<String>,
    pub name: String,
    pub market: Option<String>,
    pub industry_code: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<CompanyDB> for Company {
    type Error = StorageError;

    fn try_from(db: CompanyDB) -> Result<Self, Self::Error> {
        Ok(Self {
            created_at: text_to_timestamp("created_at", &db.created_at)?,
            updated_at: text_to_timestamp("updated_at", &db.updated_at)?,
            id: db.id,
            ticker: db.ticker,
            name: db.name,
            market: db.market,
            industry_code: db.industry_code,
            is_active: db.is_active,
        })
    }
}

impl NewCompanyDB {
    pub fn from_domain(company: NewCompany, now: DateTime<Utc>) -> Self {
        let now = timestamp_to_text(now);
        Self {
            id: company.id,
            ticker: company.ticker,
            name: company.name,
            market: company.market,
            industry_code: company.industry_code,
            is_active: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
