use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::traits::PriceSource;
use crate::errors::FeedError;
use crate::models::PriceRecord;

/// Large caps used when no universe is given.
const DEFAULT_UNIVERSE: &[(&str, &str)] = &[
    ("005930", "삼성전자"),
    ("000660", "SK하이닉스"),
    ("035420", "NAVER"),
    ("035720", "카카오"),
    ("068270", "셀트리온"),
    ("005380", "현대차"),
    ("000270", "기아"),
    ("051910", "LG화학"),
    ("005490", "POSCO홀딩스"),
    ("105560", "KB금융"),
    ("055550", "신한지주"),
    ("017670", "SK텔레콤"),
    ("030200", "KT"),
];

/// Deterministic price source for local development.
///
/// Prices depend only on the ticker, so repeated runs produce identical
/// rows. Never wire this into a production deployment.
pub struct MockPriceSource {
    universe: Vec<(String, String)>,
}

impl MockPriceSource {
    pub fn new(universe: Vec<(String, String)>) -> Self {
        Self { universe }
    }

    fn ticker_hash(ticker: &str) -> i64 {
        let hash = ticker
            .chars()
            .fold(0i32, |acc, c| acc.wrapping_shl(5).wrapping_sub(acc).wrapping_add(c as i32));
        i64::from(hash).abs()
    }

    fn record_for(ticker: &str, name: &str, trade_date: NaiveDate) -> PriceRecord {
        let base = Self::ticker_hash(ticker) % 50_000;
        let close = 1_000 + base;
        let shares = 10_000_000 + base * 1_000;
        PriceRecord {
            ticker: ticker.to_string(),
            trade_date,
            open: Some(Decimal::from(close - base % 200)),
            high: Some(Decimal::from(close + base % 300)),
            low: Some(Decimal::from(close - base % 250)),
            close: Some(Decimal::from(close)),
            volume: Some(100_000 + base * 3),
            market_cap: Some(Decimal::from(close) * Decimal::from(shares)),
            company_name: Some(name.to_string()),
            market: Some("KOSPI".to_string()),
        }
    }
}

impl Default for MockPriceSource {
    fn default() -> Self {
        Self::new(
            DEFAULT_UNIVERSE
                .iter()
                .map(|(t, n)| (t.to_string(), n.to_string()))
                .collect(),
        )
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    async fn fetch_daily_prices(
        &self,
        trade_date: NaiveDate,
    ) -> Result<Vec<PriceRecord>, FeedError> {
        Ok(self
            .universe
            .iter()
            .map(|(ticker, name)| Self::record_for(ticker, name, trade_date))
            .collect())
    }
}
