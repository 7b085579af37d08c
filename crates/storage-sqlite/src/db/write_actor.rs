use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use filingscope_core::errors::{DatabaseError, Error, Result};
use log::error;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

// A write job runs against the writer's connection and reports a core Result.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type ErasedReply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, ErasedReply)>,
}

fn writer_gone(detail: &str) -> Error {
    Error::Database(DatabaseError::WriterUnavailable(detail.to_string()))
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection,
    /// inside one immediate transaction. An `Err` from the job rolls the
    /// whole transaction back.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_gone("writer task has stopped"))?;

        let boxed = ret_rx
            .await
            .map_err(|_| writer_gone("writer dropped the reply"))??;
        boxed
            .downcast::<T>()
            .map(|v| *v)
            .map_err(|_| writer_gone("writer returned an unexpected type"))
    }
}

/// Spawns the single writer task. It owns one pooled connection for its
/// whole life and runs jobs strictly one after another.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    // Bounded; senders wait when the writer falls behind.
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, ErasedReply)>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                error!("Writer could not acquire a connection: {}", e);
                while let Some((_, reply_tx)) = rx.recv().await {
                    let _ = reply_tx.send(Err(writer_gone("writer has no connection")));
                }
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(|e: StorageError| e.into());

            // The requester may have gone away.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
