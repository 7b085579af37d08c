use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use filingscope_core::prices::{PriceDaily, PriceRepositoryTrait};
use filingscope_core::Result;
use std::sync::Arc;

use super::model::PriceDailyDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::price_daily;
use crate::utils::date_to_text;

pub struct PriceRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PriceRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl PriceRepositoryTrait for PriceRepository {
    async fn upsert_prices(&self, prices: Vec<PriceDaily>) -> Result<usize> {
        if prices.is_empty() {
            return Ok(0);
        }
        let rows: Vec<PriceDailyDB> = prices.into_iter().map(PriceDailyDB::from).collect();
        self.writer
            .exec(move |conn| {
                let mut written = 0;
                for row in &rows {
                    written += diesel::replace_into(price_daily::table)
                        .values(row)
                        .execute(conn)
                        .into_core()?;
                }
                Ok(written)
            })
            .await
    }

    fn has_prices_for_date(&self, trade_date: NaiveDate) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        diesel::select(diesel::dsl::exists(
            price_daily::table.filter(price_daily::trade_date.eq(date_to_text(trade_date))),
        ))
        .get_result::<bool>(&mut conn)
        .into_core()
    }

    fn get_latest_price(&self, ticker: &str) -> Result<Option<PriceDaily>> {
        let mut conn = get_connection(&self.pool)?;
        price_daily::table
            .filter(price_daily::ticker.eq(ticker))
            .order(price_daily::trade_date.desc())
            .select(PriceDailyDB::as_select())
            .first::<PriceDailyDB>(&mut conn)
            .optional()
            .into_core()?
            .map(PriceDaily::try_from)
            .transpose()
            .into_core()
    }
}
