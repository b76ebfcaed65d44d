//! Storage backend trait abstraction.

use async_trait::async_trait;
use namebook_core::{
    ListFilter, NameOverview, NameRecord, NewName, OriginCount, PageRequest, Pagination, RankedName,
    SearchTerm,
};

use crate::error::StorageError;

/// Every read and write the application performs against the `names` table.
///
/// Composite operations (search with counter update, count with page fetch,
/// duplicate check with insert) run their statements on a single pooled
/// connection.
#[async_trait]
pub trait NameStore: Send + Sync {
    /// Total number of records.
    async fn count_all(&self) -> Result<u64, StorageError>;

    /// Names with the highest search counts, highest first.
    async fn top_by_search_count(&self, limit: u32) -> Result<Vec<RankedName>, StorageError>;

    /// Case-insensitive prefix match ordered by name, bumping each match's
    /// search counter by one.
    ///
    /// A counter update that fails is logged and leaves that record's count at
    /// its pre-search value; it never fails the search.
    async fn search_and_count(&self, term: &SearchTerm) -> Result<Vec<NameRecord>, StorageError>;

    /// One page of the filtered listing, ordered by name, plus the resolved
    /// pagination. Out-of-range pages are pulled back to the last page.
    async fn list_page(
        &self,
        filter: &ListFilter,
        request: PageRequest,
    ) -> Result<(Vec<NameRecord>, Pagination), StorageError>;

    /// Insert a new name with a zero search count.
    ///
    /// Returns `StorageError::Duplicate` when a name equal under case folding
    /// already exists, whether caught by the pre-check or by the constraint.
    async fn insert_name(&self, new: &NewName) -> Result<NameRecord, StorageError>;

    /// Record count per distinct origin, largest first.
    async fn origin_counts(&self) -> Result<Vec<OriginCount>, StorageError>;

    /// Total, the `top_limit` ranking and raw per-origin counts, all read on
    /// one connection.
    async fn overview(&self, top_limit: u32) -> Result<NameOverview, StorageError>;

    /// Every record ordered by name.
    async fn export_all(&self) -> Result<Vec<NameRecord>, StorageError>;
}
