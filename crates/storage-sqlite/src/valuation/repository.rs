use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use filingscope_core::valuation::{ValuationRepositoryTrait, ValuationSnapshot};
use filingscope_core::Result;
use std::sync::Arc;

use super::model::ValuationSnapshotDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::valuation_snapshots;
use crate::utils::{date_to_text, text_to_date};

pub struct ValuationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ValuationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn to_domain(rows: Vec<ValuationSnapshotDB>) -> Result<Vec<ValuationSnapshot>> {
        rows.into_iter()
            .map(ValuationSnapshot::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()
            .into_core()
    }
}

#[async_trait]
impl ValuationRepositoryTrait for ValuationRepository {
    fn snapshot_exists_for(&self, snap_date: NaiveDate) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        diesel::select(diesel::dsl::exists(
            valuation_snapshots::table
                .filter(valuation_snapshots::snap_date.eq(date_to_text(snap_date))),
        ))
        .get_result::<bool>(&mut conn)
        .into_core()
    }

    async fn save_snapshots(&self, snapshots: Vec<ValuationSnapshot>) -> Result<usize> {
        if snapshots.is_empty() {
            return Ok(0);
        }
        let rows: Vec<ValuationSnapshotDB> =
            snapshots.into_iter().map(ValuationSnapshotDB::from).collect();
        self.writer
            .exec(move |conn| {
                let mut inserted = 0;
                for row in &rows {
                    inserted += diesel::insert_or_ignore_into(valuation_snapshots::table)
                        .values(row)
                        .execute(conn)
                        .into_core()?;
                }
                Ok(inserted)
            })
            .await
    }

    fn latest_snapshot_date(&self) -> Result<Option<NaiveDate>> {
        let mut conn = get_connection(&self.pool)?;
        let latest = valuation_snapshots::table
            .select(diesel::dsl::max(valuation_snapshots::snap_date))
            .first::<Option<String>>(&mut conn)
            .into_core()?;
        latest
            .map(|d| text_to_date("snap_date", &d))
            .transpose()
            .into_core()
    }

    fn list_for_date(
        &self,
        snap_date: NaiveDate,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ValuationSnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = valuation_snapshots::table
            .filter(valuation_snapshots::snap_date.eq(date_to_text(snap_date)))
            .order((
                valuation_snapshots::score.desc(),
                valuation_snapshots::company_id.asc(),
            ))
            .limit(limit)
            .offset(offset)
            .select(ValuationSnapshotDB::as_select())
            .load::<ValuationSnapshotDB>(&mut conn)
            .into_core()?;
        Self::to_domain(rows)
    }

    fn list_for_company(&self, company_id: &str, limit: i64) -> Result<Vec<ValuationSnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = valuation_snapshots::table
            .filter(valuation_snapshots::company_id.eq(company_id))
            .order(valuation_snapshots::snap_date.desc())
            .limit(limit)
            .select(ValuationSnapshotDB::as_select())
            .load::<ValuationSnapshotDB>(&mut conn)
            .into_core()?;
        Self::to_domain(rows)
    }

    fn count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        valuation_snapshots::table
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
    use filingscope_core::valuation::{snapshot_id, BandLabel};
    use rust_decimal_macros::dec;

    fn snapshot(company_id: &str, snap_date: NaiveDate, score: Option<i32>) -> ValuationSnapshot {
        let mut s = ValuationSnapshot {
            id: snapshot_id(company_id, snap_date),
            company_id: company_id.to_string(),
            snap_date,
            price: dec!(71500),
            market_cap: Some(dec!(426834000000000)),
            metrics: Default::default(),
            peer_code: Some("SEMI".to_string()),
            percentiles: Default::default(),
            score,
            band: Some(BandLabel::from_score(score)),
            created_at: Utc::now(),
        };
        s.metrics.per = Some(dec!(12.35));
        s.percentiles.per = Some(dec!(66.7));
        s
    }

    #[tokio::test]
    async fn snapshots_are_written_once_and_listed_by_score() {
        let db = test_db();
        for id in ["A", "B", "C"] {
            seed_company(&db.pool, id, None);
        }
        let repo = ValuationRepository::new(db.pool.clone(), db.writer.clone());
        let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert!(!repo.snapshot_exists_for(day).unwrap());

        let inserted = repo
            .save_snapshots(vec![
                snapshot("A", day, Some(40)),
                snapshot("B", day, Some(90)),
                snapshot("C", day, Some(65)),
            ])
            .await
            .unwrap();
        assert_eq!(inserted, 3);

        // A second save for the same day leaves existing rows alone.
        let again = repo
            .save_snapshots(vec![snapshot("A", day, Some(99))])
            .await
            .unwrap();
        assert_eq!(again, 0);

        assert!(repo.snapshot_exists_for(day).unwrap());
        assert_eq!(repo.latest_snapshot_date().unwrap(), Some(day));
        assert_eq!(repo.count().unwrap(), 3);

        let listed = repo.list_for_date(day, 10, 0).unwrap();
        let order: Vec<&str> = listed.iter().map(|s| s.company_id.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
        assert_eq!(listed[2].score, Some(40));
        assert_eq!(listed[0].band, Some(BandLabel::Top));
        assert_eq!(listed[0].metrics.per, Some(dec!(12.35)));
        assert_eq!(listed[0].percentiles.per, Some(dec!(66.7)));

        let page = repo.list_for_date(day, 1, 1).unwrap();
        assert_eq!(page[0].company_id, "C");
    }

    #[tokio::test]
    async fn company_history_is_newest_first() {
        let db = test_db();
        seed_company(&db.pool, "A", None);
        let repo = ValuationRepository::new(db.pool.clone(), db.writer.clone());
        let d1 = NaiveDate::from_ymd_opt(2025, 3, 13).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        repo.save_snapshots(vec![snapshot("A", d1, None)]).await.unwrap();
        repo.save_snapshots(vec![snapshot("A", d2, Some(50))]).await.unwrap();

        let history = repo.list_for_company("A", 10).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].snap_date, d2);
        assert_eq!(history[1].score, None);
        assert_eq!(repo.latest_snapshot_date().unwrap(), Some(d2));
    }
}
