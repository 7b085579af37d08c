//! Database model for batch runs.

use diesel::prelude::*;
use filingscope_core::batch::{BatchRun, BatchStatus, BatchType};

use crate::errors::StorageError;
use crate::utils::{corrupt, text_to_timestamp, timestamp_to_text};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::batch_runs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BatchRunDB {
    pub id: String,
    pub batch_type: String,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub status: String,
    pub items_processed: i64,
    pub items_failed: i64,
    pub error_message: Option<String>,
}

impl From<BatchRun> for BatchRunDB {
    fn from(run: BatchRun) -> Self {
        Self {
            id: run.id,
            batch_type: run.batch_type.as_str().to_string(),
            started_at: timestamp_to_text(run.started_at),
            finished_at: run.finished_at.map(timestamp_to_text),
            status: run.status.as_str().to_string(),
            items_processed: run.items_processed,
            items_failed: run.items_failed,
            error_message: run.error_message,
        }
    }
}

impl TryFrom<BatchRunDB> for BatchRun {
    type Error = StorageError;

    fn try_from(db: BatchRunDB) -> Result<Self, Self::Error> {
        let batch_type = db
            .batch_type
            .parse::<BatchType>()
            .map_err(|_| corrupt("batch_type", &db.batch_type))?;
        let status = db
            .status
            .parse::<BatchStatus>()
            .map_err(|_| corrupt("status", &db.status))?;
        let finished_at = db
            .finished_at
            .as_deref()
            .map(|t| text_to_timestamp("finished_at", t))
            .transpose()?;
        Ok(Self {
            started_at: text_to_timestamp("started_at", &db.started_at)?,
            id: db.id,
            batch_type,
            finished_at,
            status,
            items_processed: db.items_processed,
            items_failed: db.items_failed,
            error_message: db.error_message,
        })
    }
}
