//! Database Module
//!
//! Handles the SQLite connection pool, migrations and write transactions

pub mod repository;

use crate::utils::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Pool tuning
#[derive(Debug, Clone)]
pub struct DbOptions {
    pub max_connections: u32,
    /// 写冲突时的等待时间，作用于每个连接
    pub busy_timeout: Duration,
}

impl Default for DbOptions {
    fn default() -> Self {
        Self {
            max_connections: 5,
            busy_timeout: Duration::from_millis(5000),
        }
    }
}

/// Database service owning the SQLite connection pool
#[derive(Clone, Debug)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (or create) the database file with WAL mode and run migrations
    pub async fn new(db_path: &str, opts: &DbOptions) -> Result<Self, AppError> {
        if let Some(parent) = Path::new(db_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::database(format!("Failed to create database directory: {e}"))
            })?;
        }

        // Build connection options: WAL, foreign keys, normal sync, busy timeout
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(opts.busy_timeout)
            .optimize_on_close(true, None);

        let pool = SqlitePoolOptions::new()
            .max_connections(opts.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        tracing::info!(
            path = %db_path,
            busy_timeout_ms = opts.busy_timeout.as_millis() as u64,
            "Database connection established (SQLite WAL)"
        );

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }

    /// Liveness probe used by `/health`
    pub async fn ping(&self) -> bool {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }
}

/// Begin a transaction that already holds the SQLite write lock.
///
/// A deferred SQLite transaction only upgrades to a writer on its first
/// write, which fails with `SQLITE_BUSY` (no busy wait) once another writer
/// committed after our snapshot was taken. Writing the guard row first makes
/// the lock upgrade happen before any read, so the busy timeout applies and
/// every read inside the transaction sees the latest committed state.
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("UPDATE write_guard SET counter = counter + 1 WHERE id = 1")
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_creates_file_and_migrates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/orders.db");
        let db = DbService::new(path.to_str().unwrap(), &DbOptions::default())
            .await
            .unwrap();

        assert!(path.exists());
        assert!(db.ping().await);

        let guard: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM write_guard")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(guard, 1);
    }

    #[tokio::test]
    async fn test_begin_write_rolls_back_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.db");
        let db = DbService::new(path.to_str().unwrap(), &DbOptions::default())
            .await
            .unwrap();

        {
            let _tx = begin_write(&db.pool).await.unwrap();
        }

        let counter: i64 = sqlx::query_scalar("SELECT counter FROM write_guard WHERE id = 1")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(counter, 0);
    }
}
