//! Database model for daily prices.

use diesel::prelude::*;
use filingscope_core::prices::PriceDaily;

use crate::errors::StorageError;
use crate::utils::{
    date_to_text, decimal_to_text, opt_decimal_to_text, opt_text_to_decimal, text_to_date,
    text_to_decimal, text_to_timestamp, timestamp_to_text,
};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::price_daily)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PriceDailyDB {
    pub id: String,
    pub ticker: String,
    pub trade_date: String,
    pub open: Option<String>,
    pub high: Option<String>,
    pub low: Option<String>,
    pub close: String,
    pub volume: Option<i64>,
    pub market_cap: Option<String>,
    pub created_at: String,
}

impl From<PriceDaily> for PriceDailyDB {
    fn from(p: PriceDaily) -> Self {
        Self {
            id: p.id,
            ticker: p.ticker,
            trade_date: date_to_text(p.trade_date),
            open: opt_decimal_to_text(p.open),
            high: opt_decimal_to_text(p.high),
            low: opt_decimal_to_text(p.low),
            close: decimal_to_text(p.close),
            volume: p.volume,
            market_cap: opt_decimal_to_text(p.market_cap),
            created_at: timestamp_to_text(p.created_at),
        }
    }
}

impl TryFrom<PriceDailyDB> for PriceDaily {
    type Error = StorageError;

    fn try_from(db: PriceDailyDB) -> Result<Self, Self::Error> {
        Ok(Self {
            trade_date: text_to_date("trade_date", &db.trade_date)?,
            open: opt_text_to_decimal("open", db.open.as_deref())?,
            high: opt_text_to_decimal("high", db.high.as_deref())?,
            low: opt_text_to_decimal("low", db.low.as_deref())?,
            close: text_to_decimal("close", &db.close)?,
            market_cap: opt_text_to_decimal("market_cap", db.market_cap.as_deref())?,
            created_at: text_to_timestamp("created_at", &db.created_at)?,
            id: db.id,
            ticker: db.ticker,
            volume: db.volume,
        })
    }
}
