use async_trait::async_trait;
use diesel::prelude::*;
use filingscope_core::financials::{
    should_replace, FinancialRepositoryTrait, MergeOutcome, QuarterKey, QuarterlyFinancial,
    TtmFinancial,
};
use filingscope_core::Result;
use std::sync::Arc;

use super::model::{QuarterlyFinancialDB, TtmFinancialDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{quarterly_financials, ttm_financials};

pub struct FinancialRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl FinancialRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl FinancialRepositoryTrait for FinancialRepository {
    fn get_quarter(&self, key: &QuarterKey) -> Result<Option<QuarterlyFinancial>> {
        let mut conn = get_connection(&self.pool)?;
        quarterly_financials::table
            .filter(quarterly_financials::company_id.eq(&key.company_id))
            .filter(quarterly_financials::year.eq(key.year))
            .filter(quarterly_financials::quarter.eq(key.quarter))
            .select(QuarterlyFinancialDB::as_select())
            .first::<QuarterlyFinancialDB>(&mut conn)
            .optional()
            .into_core()?
            .map(QuarterlyFinancial::try_from)
            .transpose()
            .into_core()
    }

    fn get_recent_quarters(&self, company_id: &str, limit: i64) -> Result<Vec<QuarterlyFinancial>> {
        let mut conn = get_connection(&self.pool)?;
        quarterly_financials::table
            .filter(quarterly_financials::company_id.eq(company_id))
            .order((
                quarterly_financials::year.desc(),
                quarterly_financials::quarter.desc(),
            ))
            .limit(limit)
            .select(QuarterlyFinancialDB::as_select())
            .load::<QuarterlyFinancialDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(QuarterlyFinancial::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()
            .into_core()
    }

    async fn save_if_not_outranked(&self, row: QuarterlyFinancial) -> Result<MergeOutcome> {
        let key = row.key();
        let incoming_priority = row.source_priority;
        let row = QuarterlyFinancialDB::from(row);
        self.writer
            .exec(move |conn| {
                let stored_priority = quarterly_financials::table
                    .filter(quarterly_financials::company_id.eq(&key.company_id))
                    .filter(quarterly_financials::year.eq(key.year))
                    .filter(quarterly_financials::quarter.eq(key.quarter))
                    .select(quarterly_financials::source_priority)
                    .first::<i32>(conn)
                    .optional()
                    .into_core()?;

                if !should_replace(stored_priority, incoming_priority) {
                    return Ok(MergeOutcome::Outranked {
                        key,
                        stored_priority: stored_priority.unwrap_or_default(),
                        incoming_priority,
                    });
                }

                // Whole-row overwrite, NULLs included.
                diesel::replace_into(quarterly_financials::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(MergeOutcome::Written {
                    key,
                    source_priority: incoming_priority,
                })
            })
            .await
    }

    async fn replace_ttm(&self, ttm: TtmFinancial) -> Result<()> {
        let row = TtmFinancialDB::from(ttm);
        self.writer
            .exec(move |conn| {
                diesel::replace_into(ttm_financials::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    fn get_ttm(&self, company_id: &str) -> Result<Option<TtmFinancial>> {
        let mut conn = get_connection(&self.pool)?;
        ttm_financials::table
            .find(company_id)
            .select(TtmFinancialDB::as_select())
            .first::<TtmFinancialDB>(&mut conn)
            .optional()
            .into_core()?
            .map(TtmFinancial::try_from)
            .transpose()
            .into_core()
    }
}
