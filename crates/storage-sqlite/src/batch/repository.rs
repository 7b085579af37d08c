use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use filingscope_core::batch::{
    BatchRun, BatchRunRepositoryTrait, BatchStatus, BatchType, RunClose, STALE_RUN_MESSAGE,
};
use filingscope_core::Result;
use std::sync::Arc;

use super::model::BatchRunDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::batch_runs;
use crate::utils::timestamp_to_text;

pub struct BatchRunRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BatchRunRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl BatchRunRepositoryTrait for BatchRunRepository {
    async fn create_run(&self, run: BatchRun) -> Result<BatchRun> {
        let row = BatchRunDB::from(run.clone());
        self.writer
            .exec(move |conn| {
                diesel::insert_into(batch_runs::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(run)
            })
            .await
    }

    async fn finish_run(&self, run_id: String, close: RunClose) -> Result<bool> {
        self.writer
            .exec(move |conn| {
                let updated = diesel::update(
                    batch_runs::table
                        .filter(batch_runs::id.eq(&run_id))
                        .filter(batch_runs::status.eq(BatchStatus::Running.as_str())),
                )
                .set((
                    batch_runs::status.eq(close.status.as_str()),
                    batch_runs::items_processed.eq(close.items_processed),
                    batch_runs::items_failed.eq(close.items_failed),
                    batch_runs::error_message.eq(&close.error_message),
                    batch_runs::finished_at.eq(timestamp_to_text(close.finished_at)),
                ))
                .execute(conn)
                .into_core()?;
                Ok(updated > 0)
            })
            .await
    }

    async fn fail_stale_runs(
        &self,
        batch_type: BatchType,
        cutoff: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Result<usize> {
        let cutoff = timestamp_to_text(cutoff);
        let finished_at = timestamp_to_text(finished_at);
        self.writer
            .exec(move |conn| {
                diesel::update(
                    batch_runs::table
                        .filter(batch_runs::batch_type.eq(batch_type.as_str()))
                        .filter(batch_runs::status.eq(BatchStatus::Running.as_str()))
                        .filter(batch_runs::started_at.lt(&cutoff)),
                )
                .set((
                    batch_runs::status.eq(BatchStatus::Failed.as_str()),
                    batch_runs::error_message.eq(STALE_RUN_MESSAGE),
                    batch_runs::finished_at.eq(&finished_at),
                ))
                .execute(conn)
                .into_core()
            })
            .await
    }

    fn get_run(&self, run_id: &str) -> Result<Option<BatchRun>> {
        let mut conn = get_connection(&self.pool)?;
        batch_runs::table
            .find(run_id)
            .select(BatchRunDB::as_select())
            .first::<BatchRunDB>(&mut conn)
            .optional()
            .into_core()?
            .map(BatchRun::try_from)
            .transpose()
            .into_core()
    }

    fn get_recent_runs(&self, limit: i64) -> Result<Vec<BatchRun>> {
        let mut conn = get_connection(&self.pool)?;
        batch_runs::table
            .order(batch_runs::started_at.desc())
            .limit(limit)
            .select(BatchRunDB::as_select())
            .load::<BatchRunDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(BatchRun::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()
            .into_core()
    }

    fn get_last_success(&self, batch_type: BatchType) -> Result<Option<BatchRun>> {
        let mut conn = get_connection(&self.pool)?;
        batch_runs::table
            .filter(batch_runs::batch_type.eq(batch_type.as_str()))
            .filter(batch_runs::status.eq(BatchStatus::Success.as_str()))
            .order(batch_runs::started_at.desc())
            .select(BatchRunDB::as_select())
            .first::<BatchRunDB>(&mut conn)
            .optional()
            .into_core()?
            .map(BatchRun::try_from)
            .transpose()
            .into_core()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;
    use chrono::Duration;

    fn close(status: BatchStatus) -> RunClose {
        RunClose {
            status,
            items_processed: 4,
            items_failed: 1,
            error_message: Some("20250314000001: bad date".to_string()),
            finished_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn run_closes_exactly_once() {
        let db = test_db();
        let repo = BatchRunRepository::new(db.pool.clone(), db.writer.clone());
        let run = repo
            .create_run(BatchRun::start(BatchType::Filing, Utc::now()))
            .await
            .unwrap();

        assert!(repo
            .finish_run(run.id.clone(), close(BatchStatus::Partial))
            .await
            .unwrap());
        assert!(!repo
            .finish_run(run.id.clone(), close(BatchStatus::Success))
            .await
            .unwrap());

        let stored = repo.get_run(&run.id).unwrap().unwrap();
        assert_eq!(stored.status, BatchStatus::Partial);
        assert_eq!(stored.items_processed, 4);
        assert_eq!(stored.items_failed, 1);
        assert!(stored.finished_at.is_some());
    }

    #[tokio::test]
    async fn stale_sweep_only_touches_old_running_rows_of_its_type() {
        let db = test_db();
        let repo = BatchRunRepository::new(db.pool.clone(), db.writer.clone());
        let now = Utc::now();

        let stale = repo
            .create_run(BatchRun::start(BatchType::Valuation, now - Duration::hours(3)))
            .await
            .unwrap();
        let recent = repo
            .create_run(BatchRun::start(BatchType::Valuation, now - Duration::minutes(30)))
            .await
            .unwrap();
        let other_type = repo
            .create_run(BatchRun::start(BatchType::Filing, now - Duration::hours(3)))
            .await
            .unwrap();

        let closed = repo
            .fail_stale_runs(
                BatchType::Valuation,
                now - BatchType::Valuation.stale_after(),
                now,
            )
            .await
            .unwrap();
        assert_eq!(closed, 1);

        let stale = repo.get_run(&stale.id).unwrap().unwrap();
        assert_eq!(stale.status, BatchStatus::Failed);
        assert_eq!(stale.error_message.as_deref(), Some(STALE_RUN_MESSAGE));
        assert!(stale.finished_at.is_some());
        assert_eq!(
            repo.get_run(&recent.id).unwrap().unwrap().status,
            BatchStatus::Running
        );
        assert_eq!(
            repo.get_run(&other_type.id).unwrap().unwrap().status,
            BatchStatus::Running
        );
    }

    #[tokio::test]
    async fn recent_runs_and_last_success() {
        let db = test_db();
        let repo = BatchRunRepository::new(db.pool.clone(), db.writer.clone());
        let now = Utc::now();

        let mut ids = Vec::new();
        for (minutes_ago, status) in [
            (30, BatchStatus::Success),
            (20, BatchStatus::Failed),
            (10, BatchStatus::Success),
        ] {
            let run = repo
                .create_run(BatchRun::start(
                    BatchType::Filing,
                    now - Duration::minutes(minutes_ago),
                ))
                .await
                .unwrap();
            repo.finish_run(run.id.clone(), close(status)).await.unwrap();
            ids.push(run.id);
        }

        let recent = repo.get_recent_runs(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, ids[2]);
        assert_eq!(recent[1].id, ids[1]);

        let last = repo.get_last_success(BatchType::Filing).unwrap().unwrap();
        assert_eq!(last.id, ids[2]);
        assert!(repo
            .get_last_success(BatchType::Valuation)
            .unwrap()
            .is_none());
    }
}
