use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use filingscope_feeds::PriceRecord;
use log::{debug, info};

use super::prices_model::{PriceDaily, PriceIngestSummary};
use super::prices_traits::{PriceRepositoryTrait, PriceServiceTrait};
use crate::companies::{CompanyRepositoryTrait, NewCompany};
use crate::errors::Result;

pub struct PriceService {
    price_repository: Arc<dyn PriceRepositoryTrait>,
    company_repository: Arc<dyn CompanyRepositoryTrait>,
}

impl PriceService {
    pub fn new(
        price_repository: Arc<dyn PriceRepositoryTrait>,
        company_repository: Arc<dyn CompanyRepositoryTrait>,
    ) -> Self {
        Self {
            price_repository,
            company_repository,
        }
    }
}

/// Seed records for price rows that carry both a ticker and a name.
fn companies_to_seed(records: &[PriceRecord]) -> Vec<NewCompany> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|r| {
            let name = r.company_name.as_deref()?.trim();
            let ticker = r.ticker.trim();
            if name.is_empty() || ticker.is_empty() || !seen.insert(ticker.to_string()) {
                return None;
            }
            Some(NewCompany::from_exchange_listing(ticker, name, r.market.clone()))
        })
        .collect()
}

#[async_trait]
impl PriceServiceTrait for PriceService {
    async fn ingest_daily_prices(&self, records: Vec<PriceRecord>) -> Result<PriceIngestSummary> {
        let now = Utc::now();
        let rows: Vec<PriceDaily> = records
            .iter()
            .filter_map(|r| PriceDaily::from_record(r, now))
            .collect();
        let discarded = records.len() - rows.len();
        if discarded > 0 {
            debug!("Discarded {} price rows without a close price", discarded);
        }

        let seeds = companies_to_seed(&records);
        let companies_seeded = if seeds.is_empty() {
            0
        } else {
            self.company_repository.insert_listings_if_absent(seeds).await?
        };

        let stored = self.price_repository.upsert_prices(rows).await?;
        info!(
            "Stored {} price rows ({} discarded, {} companies seeded)",
            stored, discarded, companies_seeded
        );

        Ok(PriceIngestSummary {
            stored,
            discarded,
            companies_seeded,
        })
    }

    fn has_prices_for_date(&self, trade_date: NaiveDate) -> Result<bool> {
        self.price_repository.has_prices_for_date(trade_date)
    }

    fn get_latest_price(&self, ticker: &str) -> Result<Option<PriceDaily>> {
        self.price_repository.get_latest_price(ticker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::companies::{Company, ListedCompany};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockPriceRepository {
        rows: Mutex<HashMap<String, PriceDaily>>,
    }

    #[async_trait]
    impl PriceRepositoryTrait for MockPriceRepository {
        async fn upsert_prices(&self, prices: Vec<PriceDaily>) -> Result<usize> {
            let mut rows = self.rows.lock().unwrap();
            let n = prices.len();
            for p in prices {
                rows.insert(p.id.clone(), p);
            }
            Ok(n)
        }

        fn has_prices_for_date(&self, trade_date: NaiveDate) -> Result<bool> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .any(|p| p.trade_date == trade_date))
        }

        fn get_latest_price(&self, ticker: &str) -> Result<Option<PriceDaily>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|p| p.ticker == ticker)
                .max_by_key(|p| p.trade_date)
                .cloned())
        }
    }

    #[derive(Default)]
    struct MockCompanyRepository {
        ids: Mutex<HashSet<String>>,
        tickers: Mutex<HashSet<String>>,
    }

    #[async_trait]
    impl CompanyRepositoryTrait for MockCompanyRepository {
        fn get_company(&self, _company_id: &str) -> Result<Option<Company>> {
            unimplemented!()
        }

        async fn insert_if_absent(&self, _company: NewCompany) -> Result<bool> {
            unimplemented!()
        }

        async fn insert_listings_if_absent(&self, companies: Vec<NewCompany>) -> Result<usize> {
            let mut ids = self.ids.lock().unwrap();
            let mut tickers = self.tickers.lock().unwrap();
            let mut inserted = 0;
            for c in companies {
                if c.ticker.as_ref().is_some_and(|t| tickers.contains(t)) {
                    continue;
                }
                if ids.insert(c.id.clone()) {
                    tickers.extend(c.ticker);
                    inserted += 1;
                }
            }
            Ok(inserted)
        }

        async fn set_active(&self, _company_id: String, _is_active: bool) -> Result<()> {
            unimplemented!()
        }

        async fn set_industry_code(
            &self,
            _company_id: String,
            _industry_code: Option<String>,
        ) -> Result<()> {
            unimplemented!()
        }

        fn list_active_listed(&self) -> Result<Vec<ListedCompany>> {
            unimplemented!()
        }

        fn count_active(&self) -> Result<i64> {
            unimplemented!()
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn named(ticker: &str, name: &str, d: u32, close: Option<rust_decimal::Decimal>) -> PriceRecord {
        let mut r = PriceRecord::new(ticker, date(d), close);
        r.company_name = Some(name.to_string());
        r
    }

    #[tokio::test]
    async fn stores_rows_with_close_and_seeds_named_companies() {
        let prices = Arc::new(MockPriceRepository::default());
        let companies = Arc::new(MockCompanyRepository::default());
        let service = PriceService::new(prices.clone(), companies.clone());

        let summary = service
            .ingest_daily_prices(vec![
                named("005930", "삼성전자", 14, Some(dec!(71200))),
                named("000660", "SK하이닉스", 14, None),
                PriceRecord::new("035420", date(14), Some(dec!(201000))),
            ])
            .await
            .unwrap();

        assert_eq!(
            summary,
            PriceIngestSummary {
                stored: 2,
                discarded: 1,
                companies_seeded: 2,
            }
        );
        assert!(companies.ids.lock().unwrap().contains("KRX_005930"));
        assert!(prices.rows.lock().unwrap().contains_key("005930_2025-03-14"));
        assert!(service.has_prices_for_date(date(14)).unwrap());
        assert!(!service.has_prices_for_date(date(13)).unwrap());
    }

    #[tokio::test]
    async fn later_ingestion_replaces_the_same_key() {
        let prices = Arc::new(MockPriceRepository::default());
        let service = PriceService::new(prices.clone(), Arc::new(MockCompanyRepository::default()));

        service
            .ingest_daily_prices(vec![PriceRecord::new("005930", date(14), Some(dec!(71000)))])
            .await
            .unwrap();
        service
            .ingest_daily_prices(vec![
                PriceRecord::new("005930", date(14), Some(dec!(71200))),
                PriceRecord::new("005930", date(13), Some(dec!(70000))),
            ])
            .await
            .unwrap();

        let latest = service.get_latest_price("005930").unwrap().unwrap();
        assert_eq!(latest.close, dec!(71200));
        assert_eq!(prices.rows.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn listing_held_by_a_filer_is_not_seeded_again() {
        let companies = Arc::new(MockCompanyRepository::default());
        companies.ids.lock().unwrap().insert("00126380".to_string());
        companies.tickers.lock().unwrap().insert("005930".to_string());
        let service = PriceService::new(
            Arc::new(MockPriceRepository::default()),
            companies.clone(),
        );

        let summary = service
            .ingest_daily_prices(vec![
                named("005930", "삼성전자", 14, Some(dec!(71200))),
                named("000660", "SK하이닉스", 14, Some(dec!(190000))),
            ])
            .await
            .unwrap();

        assert_eq!(summary.stored, 2);
        assert_eq!(summary.companies_seeded, 1);
        assert!(!companies.ids.lock().unwrap().contains("KRX_005930"));
    }
}
