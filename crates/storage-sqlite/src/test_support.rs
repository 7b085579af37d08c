//! Temp-file databases for repository tests.

use std::sync::Arc;

use diesel::RunQueryDsl;
use tempfile::TempDir;

use crate::db::{create_pool, get_connection, run_migrations, spawn_writer, DbPool, WriteHandle};

pub struct TestDb {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    // Keeps the directory alive for the test's duration.
    _dir: TempDir,
}

/// Migrated database plus a running writer. Must be called inside a tokio
/// runtime.
pub fn test_db() -> TestDb {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db").to_string_lossy().to_string();
    let pool = create_pool(&db_path).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone());
    TestDb {
        pool,
        writer,
        _dir: dir,
    }
}

/// Inserts a company row so foreign keys are satisfied.
pub fn seed_company(pool: &Arc<DbPool>, company_id: &str, ticker: Option<&str>) {
    let mut conn = get_connection(pool).expect("Failed to get connection");
    let ticker = ticker.map_or("NULL".to_string(), |t| format!("'{}'", t));
    diesel::sql_query(format!(
        "INSERT INTO companies (id, ticker, name, is_active, created_at, updated_at) \
         VALUES ('{}', {}, 'Test Co', 1, '2025-01-01T00:00:00.000000Z', '2025-01-01T00:00:00.000000Z')",
        company_id, ticker
    ))
    .execute(&mut conn)
    .expect("Failed to create test company");
}
