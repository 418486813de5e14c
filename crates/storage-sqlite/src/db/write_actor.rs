use super::{DbConnection, DbPool};
use crate::errors::StorageError;
use diesel::SqliteConnection;
use kantor_core::errors::{DatabaseError, Error, Result};
use log::error;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tokio::sync::{mpsc, oneshot};

// A job runs against the writer's connection inside an open transaction.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type BoxedAny = Box<dyn Any + Send + 'static>;
type Envelope = (Job<BoxedAny>, oneshot::Sender<Result<BoxedAny>>);

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<Envelope>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// Each job runs in its own `IMMEDIATE` transaction: it takes the write
    /// lock up front, so jobs never interleave and an error from the job
    /// rolls back everything it wrote.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as BoxedAny)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_stopped())?;

        let boxed = ret_rx.await.map_err(|_| writer_stopped())??;
        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| Error::Unexpected("Failed to downcast writer actor result".to_string()))
    }
}

fn writer_stopped() -> Error {
    Error::Database(DatabaseError::Internal(
        "Database writer is not running".to_string(),
    ))
}

/// Spawns a background Tokio task that acts as the single writer to the database.
///
/// The actor holds one pooled connection and processes jobs serially. The
/// connection is acquired on the first job and re-acquired after a pool
/// failure, which is reported to the job that hit it.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<Envelope>(1024);

    tokio::spawn(async move {
        let mut conn: Option<DbConnection> = None;

        while let Some((job, reply_tx)) = rx.recv().await {
            if conn.is_none() {
                match pool.get() {
                    Ok(c) => conn = Some(c),
                    Err(e) => {
                        error!("Writer actor could not get a connection: {}", e);
                        let _ = reply_tx.send(Err(StorageError::from(e).into()));
                        continue;
                    }
                }
            }
            let Some(c) = conn.as_mut() else { continue };

            // A panicking job rolls back like a failed one and the actor keeps serving.
            let result: Result<BoxedAny> = c
                .immediate_transaction::<_, StorageError, _>(|c| {
                    catch_unwind(AssertUnwindSafe(|| job(c)))
                        .unwrap_or_else(|_| {
                            error!("Write job panicked; transaction rolled back");
                            Err(Error::Unexpected("Write job panicked".to_string()))
                        })
                        .map_err(StorageError::from)
                })
                .map_err(Error::from);

            // The requester may have gone away; nothing to do then.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations};
    use diesel::prelude::*;
    use diesel::sql_types::BigInt;
    use tempfile::tempdir;

    #[derive(QueryableByName)]
    struct Count {
        #[diesel(sql_type = BigInt)]
        n: i64,
    }

    fn count_users(conn: &mut SqliteConnection) -> Result<i64> {
        diesel::sql_query("SELECT COUNT(*) AS n FROM users")
            .get_result::<Count>(conn)
            .map(|row| row.n)
            .map_err(|e| StorageError::from(e).into())
    }

    #[tokio::test]
    async fn test_writer_survives_panicking_job() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("writer.db");
        let pool = create_pool(&db_path.to_string_lossy()).unwrap();
        run_migrations(&pool).unwrap();
        let writer = spawn_writer((*pool).clone());

        let result = writer
            .exec(|conn| -> Result<()> {
                diesel::sql_query(
                    "INSERT INTO users (id, username, password_hash, first_name, last_name, \
                     phone_number, email, created_at, updated_at) VALUES ('u1', 'ghost', 'h', \
                     'Ghost', 'User', '+48111111111', 'ghost@example.com', \
                     '2025-01-01 00:00:00', '2025-01-01 00:00:00')",
                )
                .execute(conn)
                .map_err(|e| Error::from(StorageError::from(e)))?;
                panic!("boom");
            })
            .await;
        assert!(matches!(result, Err(Error::Unexpected(_))));

        // The insert before the panic was rolled back and the writer still runs.
        assert_eq!(writer.exec(count_users).await.unwrap(), 0);
    }
}
