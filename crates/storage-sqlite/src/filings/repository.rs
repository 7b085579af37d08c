use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use filingscope_core::filings::{Filing, FilingRepositoryTrait};
use filingscope_core::Result;
use log::debug;
use std::sync::Arc;

use super::model::FilingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::filings;
use crate::utils::date_to_text;

pub struct FilingRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl FilingRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn to_domain(rows: Vec<FilingDB>) -> Result<Vec<Filing>> {
        rows.into_iter()
            .map(Filing::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()
            .into_core()
    }
}

#[async_trait]
impl FilingRepositoryTrait for FilingRepository {
    fn exists(&self, filing_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        diesel::select(diesel::dsl::exists(filings::table.find(filing_id)))
            .get_result::<bool>(&mut conn)
            .into_core()
    }

    async fn insert_filing(&self, filing: Filing) -> Result<bool> {
        let row = FilingDB::try_from(filing).into_core()?;
        self.writer
            .exec(move |conn| {
                let inserted = diesel::insert_or_ignore_into(filings::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                if inserted == 0 {
                    debug!("Filing {} already present, insert ignored", row.id);
                }
                Ok(inserted > 0)
            })
            .await
    }

    fn get_filing(&self, filing_id: &str) -> Result<Option<Filing>> {
        let mut conn = get_connection(&self.pool)?;
        filings::table
            .find(filing_id)
            .select(FilingDB::as_select())
            .first::<FilingDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Filing::try_from)
            .transpose()
            .into_core()
    }

    fn list_for_company(&self, company_id: &str, limit: i64) -> Result<Vec<Filing>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = filings::table
            .filter(filings::company_id.eq(company_id))
            .order((filings::filed_at.desc(), filings::id.desc()))
            .limit(limit)
            .select(FilingDB::as_select())
            .load::<FilingDB>(&mut conn)
            .into_core()?;
        Self::to_domain(rows)
    }

    fn list_between(&self, from: NaiveDate, to: NaiveDate, limit: i64) -> Result<Vec<Filing>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = filings::table
            .filter(filings::filed_at.ge(date_to_text(from)))
            .filter(filings::filed_at.le(date_to_text(to)))
            .order((filings::filed_at.desc(), filings::id.desc()))
            .limit(limit)
            .select(FilingDB::as_select())
            .load::<FilingDB>(&mut conn)
            .into_core()?;
        Self::to_domain(rows)
    }

    fn count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        filings::table
            .count()
            .get_result::<i64>(&mut conn)
            .into_core()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_company, test_db};
    use chrono::Utc;
    use filingscope_core::filings::{FilingCategory, KeyNumbers, PerformanceFigures};
    use rust_decimal_macros::dec;

    fn filing(id: &str, filed_at: NaiveDate) -> Filing {
        Filing {
            id: id.to_string(),
            company_id: "00126380".to_string(),
            ticker: Some("005930".to_string()),
            company_name: "삼성전자".to_string(),
            filed_at,
            category: FilingCategory::Performance,
            subtype: "잠정실적".to_string(),
            title: "연결재무제표기준영업(잠정)실적(공정공시)".to_string(),
            key_numbers: Some(KeyNumbers::Performance(PerformanceFigures {
                revenue: Some(dec!(79000000000000)),
                ..Default::default()
            })),
            source_url: format!("https://dart.fss.or.kr/dsaf001/main.do?rcpNo={}", id),
            is_correction: false,
            created_at: Utc::now(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[tokio::test]
    async fn duplicate_insert_is_ignored() {
        let db = test_db();
        seed_company(&db.pool, "00126380", Some("005930"));
        let repo = FilingRepository::new(db.pool.clone(), db.writer.clone());

        assert!(repo.insert_filing(filing("20250314000001", day(14))).await.unwrap());
        assert!(!repo.insert_filing(filing("20250314000001", day(14))).await.unwrap());
        assert!(repo.exists("20250314000001").unwrap());
        assert_eq!(repo.count().unwrap(), 1);

        let stored = repo.get_filing("20250314000001").unwrap().unwrap();
        assert_eq!(stored.category, FilingCategory::Performance);
        assert_eq!(
            stored.key_numbers.and_then(|k| k.performance().and_then(|p| p.revenue)),
            Some(dec!(79000000000000))
        );
    }

    #[tokio::test]
    async fn filings_list_newest_first_within_range() {
        let db = test_db();
        seed_company(&db.pool, "00126380", Some("005930"));
        let repo = FilingRepository::new(db.pool.clone(), db.writer.clone());

        for (id, d) in [("f10", 10), ("f12", 12), ("f14", 14)] {
            let mut f = filing(id, day(d));
            f.key_numbers = None;
            repo.insert_filing(f).await.unwrap();
        }

        let ids = |rows: Vec<Filing>| rows.into_iter().map(|f| f.id).collect::<Vec<_>>();
        assert_eq!(
            ids(repo.list_for_company("00126380", 2).unwrap()),
            vec!["f14", "f12"]
        );
        assert_eq!(
            ids(repo.list_between(day(10), day(12), 10).unwrap()),
            vec!["f12", "f10"]
        );
        assert!(repo.get_filing("f10").unwrap().unwrap().key_numbers.is_none());
    }
}
