use rusqlite::{params, OptionalExtension, TransactionBehavior};

use super::{check_quota, KeyedRecordStore, StoreError, DEFAULT_QUOTA_BYTES};
use crate::db::DbPool;

/// SQLite-backed implementation of `KeyedRecordStore`.
/// Wraps the r2d2 connection pool; one row per key in `records`.
pub struct SqliteStore {
    pub pool: DbPool,
    quota: u64,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self::with_quota(pool, DEFAULT_QUOTA_BYTES)
    }

    pub fn with_quota(pool: DbPool, quota: u64) -> Self {
        Self { pool, quota }
    }

    pub fn open(path: &str, quota: u64) -> Result<Self, String> {
        let pool = crate::db::init_pool(path).map_err(|e| e.to_string())?;
        crate::db::run_migrations(&pool).map_err(|e| e.to_string())?;
        Ok(Self::with_quota(pool, quota))
    }

    fn conn(&self) -> Result<r2d2::PooledConnection<r2d2_sqlite::SqliteConnectionManager>, StoreError> {
        self.pool
            .get()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

fn unavailable(e: rusqlite::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

impl KeyedRecordStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT value FROM records WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(unavailable)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        // Take the write lock up front; a deferred transaction fails with
        // SQLITE_BUSY when it upgrades after the usage read.
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(unavailable)?;

        let usage: i64 = tx
            .query_row(
                "SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0) FROM records",
                [],
                |row| row.get(0),
            )
            .map_err(unavailable)?;
        let previous: Option<i64> = tx
            .query_row(
                "SELECT LENGTH(CAST(value AS BLOB)) FROM records WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(unavailable)?;
        check_quota(
            key,
            value,
            previous.map(|p| p as u64),
            usage as u64,
            self.quota,
        )?;

        tx.execute(
            "INSERT INTO records (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = CURRENT_TIMESTAMP",
            params![key, value],
        )
        .map_err(unavailable)?;
        tx.commit().map_err(unavailable)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM records WHERE key = ?1", params![key])
            .map_err(unavailable)?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT key FROM records ORDER BY key ASC")
            .map_err(unavailable)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(unavailable)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(unavailable)
    }

    fn usage_bytes(&self) -> Result<u64, StoreError> {
        let conn = self.conn()?;
        let usage: i64 = conn
            .query_row(
                "SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0) FROM records",
                [],
                |row| row.get(0),
            )
            .map_err(unavailable)?;
        Ok(usage as u64)
    }

    fn quota_bytes(&self) -> u64 {
        self.quota
    }
}
