//! PostgreSQL storage backend using sqlx.
//!
//! `PgStorage` is the connection pool manager: it is built once at startup and
//! handed to whoever needs it. Connections go back to the pool when their guard
//! drops, on every exit path.

mod bulk;
mod names;

use std::time::Duration;

use namebook_core::{NameRecord, PG_POOL_MAX_CONNECTIONS, PG_POOL_MIN_CONNECTIONS};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::error::StorageError;
use crate::schema::{SchemaReport, ensure_schema};

pub use bulk::BulkLoadReport;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Connect and make sure the schema exists.
    ///
    /// Both failures are meant to be fatal: the caller should refuse to serve.
    pub async fn new(database_url: &str, acquire_timeout: Duration) -> Result<Self, StorageError> {
        let storage = Self::connect(database_url, acquire_timeout).await?;
        storage.ensure_schema().await?;
        tracing::info!("PgStorage initialized");
        Ok(storage)
    }

    /// Build the pool and open the first connection, without touching the schema.
    pub async fn connect(
        database_url: &str,
        acquire_timeout: Duration,
    ) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .min_connections(PG_POOL_MIN_CONNECTIONS)
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(acquire_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub async fn ensure_schema(&self) -> Result<SchemaReport, StorageError> {
        ensure_schema(&self.pool).await
    }

    /// Server version string, for connectivity checks.
    pub async fn server_version(&self) -> Result<String, StorageError> {
        Ok(sqlx::query_scalar("SELECT version()").fetch_one(&self.pool).await?)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

pub(crate) const NAME_COLUMNS: &str = "id, name, meaning, origin, choice_reason, search_count";

pub(crate) fn row_to_name(row: &PgRow) -> Result<NameRecord, StorageError> {
    Ok(NameRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        meaning: row.try_get::<Option<String>, _>("meaning")?.unwrap_or_default(),
        origin: row.try_get::<Option<String>, _>("origin")?.unwrap_or_default(),
        choice_reason: row
            .try_get::<Option<String>, _>("choice_reason")?
            .filter(|s| !s.is_empty()),
        search_count: count_from_db(row.try_get("search_count")?),
    })
}

/// Escape `LIKE` metacharacters so user input matches literally.
pub(crate) fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// The column has a `>= 0` check; negative values would mean corruption.
pub(crate) fn count_from_db(val: i64) -> u64 {
    u64::try_from(val).unwrap_or_else(|_| {
        tracing::warn!(value = val, "negative count from DB, treating as 0");
        0
    })
}

/// Saturates to `i64::MAX`, far beyond any real table size.
pub(crate) fn u64_to_i64(val: u64) -> i64 {
    i64::try_from(val).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_escapes_metacharacters() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("Ana"), "Ana");
    }

    #[test]
    fn counts_convert_safely() {
        assert_eq!(count_from_db(7), 7);
        assert_eq!(count_from_db(-1), 0);
        assert_eq!(u64_to_i64(u64::MAX), i64::MAX);
    }
}
