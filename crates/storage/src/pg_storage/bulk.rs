//! Administrative bulk replacement of the whole table.

use namebook_core::import::ImportedName;

use super::{PgStorage, count_from_db, u64_to_i64};
use crate::error::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkLoadReport {
    /// Rows actually inserted.
    pub inserted: u64,
    /// Rows dropped because an earlier row had the same name, ignoring case.
    pub duplicates: u64,
    /// Table size after the load.
    pub total: u64,
}

impl PgStorage {
    /// Truncate `names`, restart its id sequence and insert `rows`.
    ///
    /// Runs in one transaction; on any error nothing changes.
    pub async fn replace_all(&self, rows: &[ImportedName]) -> Result<BulkLoadReport, StorageError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("TRUNCATE TABLE names RESTART IDENTITY").execute(&mut *tx).await?;

        let mut inserted = 0u64;
        for row in rows {
            let result = sqlx::query(
                "INSERT INTO names (name, meaning, origin, choice_reason, search_count)
                 VALUES ($1, $2, $3, $4, $5)
                 ON CONFLICT ((LOWER(name))) DO NOTHING",
            )
            .bind(&row.name.name)
            .bind(&row.name.meaning)
            .bind(&row.name.origin)
            .bind(&row.name.choice_reason)
            .bind(u64_to_i64(row.search_count))
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM names").fetch_one(&mut *tx).await?;
        tx.commit().await?;

        let report = BulkLoadReport {
            inserted,
            duplicates: (rows.len() as u64).saturating_sub(inserted),
            total: count_from_db(total),
        };
        tracing::info!(?report, "bulk load committed");
        Ok(report)
    }
}
