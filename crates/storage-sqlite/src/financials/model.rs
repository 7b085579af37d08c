//! Database models for quarterly and TTM financials.

use diesel::prelude::*;
use filingscope_core::financials::{QuarterlyFinancial, TtmFinancial};

use crate::errors::StorageError;
use crate::utils::{opt_decimal_to_text, opt_text_to_decimal, text_to_timestamp, timestamp_to_text};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::quarterly_financials)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct QuarterlyFinancialDB {
    pub id: String,
    pub company_id: String,
    pub year: i32,
    pub quarter: i32,
    pub revenue: Option<String>,
    pub operating_profit: Option<String>,
    pub net_profit: Option<String>,
    pub total_equity: Option<String>,
    pub total_debt: Option<String>,
    pub total_assets: Option<String>,
    pub shares_outstanding: Option<i64>,
    pub source_filing_id: Option<String>,
    pub source_priority: i32,
    pub updated_at: String,
}

impl From<QuarterlyFinancial> for QuarterlyFinancialDB {
    fn from(q: QuarterlyFinancial) -> Self {
        Self {
            id: q.id,
            company_id: q.company_id,
            year: q.year,
            quarter: q.quarter,
            revenue: opt_decimal_to_text(q.revenue),
            operating_profit: opt_decimal_to_text(q.operating_profit),
            net_profit: opt_decimal_to_text(q.net_profit),
            total_equity: opt_decimal_to_text(q.total_equity),
            total_debt: opt_decimal_to_text(q.total_debt),
            total_assets: opt_decimal_to_text(q.total_assets),
            shares_outstanding: q.shares_outstanding,
            source_filing_id: q.source_filing_id,
            source_priority: q.source_priority,
            updated_at: timestamp_to_text(q.updated_at),
        }
    }
}

impl TryFrom<QuarterlyFinancialDB> for QuarterlyFinancial {
    type Error = StorageError;

    fn try_from(db: QuarterlyFinancialDB) -> Result<Self, Self::Error> {
        Ok(Self {
            revenue: opt_text_to_decimal("revenue", db.revenue.as_deref())?,
            operating_profit: opt_text_to_decimal("operating_profit", db.operating_profit.as_deref())?,
            net_profit: opt_text_to_decimal("net_profit", db.net_profit.as_deref())?,
            total_equity: opt_text_to_decimal("total_equity", db.total_equity.as_deref())?,
            total_debt: opt_text_to_decimal("total_debt", db.total_debt.as_deref())?,
            total_assets: opt_text_to_decimal("total_assets", db.total_assets.as_deref())?,
            updated_at: text_to_timestamp("updated_at", &db.updated_at)?,
            id: db.id,
            company_id: db.company_id,
            year: db.year,
            quarter: db.quarter,
            shares_outstanding: db.shares_outstanding,
            source_filing_id: db.source_filing_id,
            source_priority: db.source_priority,
        })
    }
}

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::ttm_financials)]
#[diesel(primary_key(company_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TtmFinancialDB {
    pub company_id: String,
    pub revenue_ttm: Option<String>,
    pub op_profit_ttm: Option<String>,
    pub net_profit_ttm: Option<String>,
    pub total_equity: Option<String>,
    pub total_debt: Option<String>,
    pub shares_outstanding: Option<i64>,
    pub last_quarter_year: i32,
    pub last_quarter: i32,
    pub calculated_at: String,
}

impl From<TtmFinancial> for TtmFinancialDB {
    fn from(t: TtmFinancial) -> Self {
        Self {
            company_id: t.company_id,
            revenue_ttm: opt_decimal_to_text(t.revenue_ttm),
            op_profit_ttm: opt_decimal_to_text(t.op_profit_ttm),
            net_profit_ttm: opt_decimal_to_text(t.net_profit_ttm),
            total_equity: opt_decimal_to_text(t.total_equity),
            total_debt: opt_decimal_to_text(t.total_debt),
            shares_outstanding: t.shares_outstanding,
            last_quarter_year: t.last_quarter_year,
            last_quarter: t.last_quarter,
            calculated_at: timestamp_to_text(t.calculated_at),
        }
    }
}

impl TryFrom<TtmFinancialDB> for TtmFinancial {
    type Error = StorageError;

    fn try_from(db: TtmFinancialDB) -> Result<Self, Self::Error> {
        Ok(Self {
            revenue_ttm: opt_text_to_decimal("revenue_ttm", db.revenue_ttm.as_deref())?,
            op_profit_ttm: opt_text_to_decimal("op_profit_ttm", db.op_profit_ttm.as_deref())?,
            net_profit_ttm: opt_text_to_decimal("net_profit_ttm", db.net_profit_ttm.as_deref())?,
            total_equity: opt_text_to_decimal("total_equity", db.total_equity.as_deref())?,
            total_debt: opt_text_to_decimal("total_debt", db.total_debt.as_deref())?,
            calculated_at: text_to_timestamp("calculated_at", &db.calculated_at)?,
            company_id: db.company_id,
            shares_outstanding: db.shares_outstanding,
            last_quarter_year: db.last_quarter_year,
            last_quarter: db.last_quarter,
        })
    }
}
