//! Unified storage backend with enum dispatch.

use std::time::Duration;

use async_trait::async_trait;
use namebook_core::{
    ListFilter, NameOverview, NameRecord, NewName, OriginCount, PageRequest, Pagination, RankedName,
    SearchTerm,
};

use crate::error::StorageError;
use crate::memory::MemoryStore;
use crate::pg_storage::PgStorage;
use crate::traits::NameStore;

macro_rules! dispatch {
    ($self:expr, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::Postgres(s) => <PgStorage as NameStore>::$method(s, $($arg),*).await,
            StorageBackend::Memory(s) => <MemoryStore as NameStore>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    Postgres(PgStorage),
    Memory(MemoryStore),
}

impl StorageBackend {
    pub async fn new_postgres(
        database_url: &str,
        acquire_timeout: Duration,
    ) -> Result<Self, StorageError> {
        Ok(Self::Postgres(PgStorage::new(database_url, acquire_timeout).await?))
    }

    pub fn new_memory() -> Self {
        Self::Memory(MemoryStore::new())
    }
}

#[async_trait]
impl NameStore for StorageBackend {
    async fn count_all(&self) -> Result<u64, StorageError> {
        dispatch!(self, count_all())
    }

    async fn top_by_search_count(&self, limit: u32) -> Result<Vec<RankedName>, StorageError> {
        dispatch!(self, top_by_search_count(limit))
    }

    async fn search_and_count(&self, term: &SearchTerm) -> Result<Vec<NameRecord>, StorageError> {
        dispatch!(self, search_and_count(term))
    }

    async fn list_page(
        &self,
        filter: &ListFilter,
        request: PageRequest,
    ) -> Result<(Vec<NameRecord>, Pagination), StorageError> {
        dispatch!(self, list_page(filter, request))
    }

    async fn insert_name(&self, new: &NewName) -> Result<NameRecord, StorageError> {
        dispatch!(self, insert_name(new))
    }

    async fn origin_counts(&self) -> Result<Vec<OriginCount>, StorageError> {
        dispatch!(self, origin_counts())
    }

    async fn overview(&self, top_limit: u32) -> Result<NameOverview, StorageError> {
        dispatch!(self, overview(top_limit))
    }

    async fn export_all(&self) -> Result<Vec<NameRecord>, StorageError> {
        dispatch!(self, export_all())
    }
}
