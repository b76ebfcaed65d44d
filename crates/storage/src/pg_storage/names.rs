//! NameStore implementation for PgStorage.

use async_trait::async_trait;
use namebook_core::{
    ListFilter, NameOverview, NameRecord, NewName, OriginCount, PageRequest, Pagination, RankedName,
    SearchTerm,
};
use sqlx::PgExecutor;

use super::{NAME_COLUMNS, PgStorage, count_from_db, escape_like, row_to_name, u64_to_i64};
use crate::error::StorageError;
use crate::traits::NameStore;

const FILTER_CLAUSE: &str =
    "($1::text IS NULL OR name ILIKE $1) AND ($2::text IS NULL OR origin ILIKE $2)";

fn contains_pattern(value: Option<&str>) -> Option<String> {
    value.map(|v| format!("%{}%", escape_like(v)))
}

async fn fetch_total<'e>(db: impl PgExecutor<'e>) -> Result<u64, StorageError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(id) FROM names").fetch_one(db).await?;
    Ok(count_from_db(total))
}

async fn fetch_top<'e>(
    db: impl PgExecutor<'e>,
    limit: u32,
) -> Result<Vec<RankedName>, StorageError> {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        "SELECT name, search_count FROM names ORDER BY search_count DESC, id ASC LIMIT $1",
    )
    .bind(i64::from(limit))
    .fetch_all(db)
    .await?;
    Ok(RankedName::rank_all(rows.into_iter().map(|(name, count)| (name, count_from_db(count)))))
}

async fn fetch_origin_counts<'e>(
    db: impl PgExecutor<'e>,
) -> Result<Vec<OriginCount>, StorageError> {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        "SELECT COALESCE(origin, '') AS origin, COUNT(id) AS count
           FROM names
          GROUP BY 1
          ORDER BY 2 DESC, 1 ASC",
    )
    .fetch_all(db)
    .await?;
    Ok(rows
        .into_iter()
        .map(|(origin, count)| OriginCount { origin, count: count_from_db(count) })
        .collect())
}

#[async_trait]
impl NameStore for PgStorage {
    async fn count_all(&self) -> Result<u64, StorageError> {
        fetch_total(&self.pool).await
    }

    async fn top_by_search_count(&self, limit: u32) -> Result<Vec<RankedName>, StorageError> {
        fetch_top(&self.pool, limit).await
    }

    async fn search_and_count(&self, term: &SearchTerm) -> Result<Vec<NameRecord>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query(&format!(
            "SELECT {NAME_COLUMNS} FROM names WHERE name ILIKE $1
             ORDER BY LOWER(name) ASC, name ASC, id ASC"
        ))
        .bind(format!("{}%", escape_like(term.as_str())))
        .fetch_all(&mut *conn)
        .await?;
        let mut records = rows.iter().map(row_to_name).collect::<Result<Vec<_>, _>>()?;

        for record in &mut records {
            let bumped: Result<Option<i64>, sqlx::Error> = sqlx::query_scalar(
                "UPDATE names SET search_count = search_count + 1 WHERE id = $1 RETURNING search_count",
            )
            .bind(record.id)
            .fetch_optional(&mut *conn)
            .await;
            match bumped {
                Ok(Some(count)) => record.search_count = count_from_db(count),
                Ok(None) => {
                    tracing::warn!(id = record.id, "record vanished before its search count was updated");
                },
                Err(e) => {
                    tracing::warn!(id = record.id, error = %e, "failed to update search count");
                },
            }
        }
        tracing::debug!(term = %term, matches = records.len(), "prefix search");
        Ok(records)
    }

    async fn list_page(
        &self,
        filter: &ListFilter,
        request: PageRequest,
    ) -> Result<(Vec<NameRecord>, Pagination), StorageError> {
        let name_pattern = contains_pattern(filter.name.as_deref());
        let origin_pattern = contains_pattern(filter.origin.as_deref());
        let mut conn = self.pool.acquire().await?;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(id) FROM names WHERE {FILTER_CLAUSE}"))
            .bind(&name_pattern)
            .bind(&origin_pattern)
            .fetch_one(&mut *conn)
            .await?;
        let pagination = Pagination::resolve(request, count_from_db(total));
        if pagination.total == 0 {
            return Ok((Vec::new(), pagination));
        }

        let rows = sqlx::query(&format!(
            "SELECT {NAME_COLUMNS} FROM names WHERE {FILTER_CLAUSE}
             ORDER BY LOWER(name) ASC, name ASC, id ASC LIMIT $3 OFFSET $4"
        ))
        .bind(&name_pattern)
        .bind(&origin_pattern)
        .bind(i64::from(pagination.per_page))
        .bind(u64_to_i64(pagination.offset()))
        .fetch_all(&mut *conn)
        .await?;
        let items = rows.iter().map(row_to_name).collect::<Result<Vec<_>, _>>()?;
        Ok((items, pagination))
    }

    async fn insert_name(&self, new: &NewName) -> Result<NameRecord, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM names WHERE LOWER(name) = LOWER($1))")
                .bind(&new.name)
                .fetch_one(&mut *conn)
                .await?;
        if exists {
            return Err(StorageError::Duplicate(new.name.clone()));
        }

        // A concurrent insert can still win the race; the unique index turns
        // that into SQLSTATE 23505, which maps to `Duplicate`.
        let row = sqlx::query(&format!(
            "INSERT INTO names (name, meaning, origin, choice_reason, search_count)
             VALUES ($1, $2, $3, $4, 0)
             RETURNING {NAME_COLUMNS}"
        ))
        .bind(&new.name)
        .bind(&new.meaning)
        .bind(&new.origin)
        .bind(&new.choice_reason)
        .fetch_one(&mut *conn)
        .await?;
        let record = row_to_name(&row)?;
        tracing::info!(id = record.id, name = %record.name, "name registered");
        Ok(record)
    }

    async fn origin_counts(&self) -> Result<Vec<OriginCount>, StorageError> {
        fetch_origin_counts(&self.pool).await
    }

    async fn overview(&self, top_limit: u32) -> Result<NameOverview, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let total = fetch_total(&mut *conn).await?;
        let top = fetch_top(&mut *conn, top_limit).await?;
        let origins = fetch_origin_counts(&mut *conn).await?;
        Ok(NameOverview { total, top, origins })
    }

    async fn export_all(&self) -> Result<Vec<NameRecord>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {NAME_COLUMNS} FROM names ORDER BY LOWER(name) ASC, name ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_name).collect()
    }
}
