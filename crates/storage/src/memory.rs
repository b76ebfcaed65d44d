//! In-memory `NameStore` with the same observable semantics as `PgStorage`.
//!
//! Used by the service and HTTP tests, and by anyone who wants to run the web
//! app without a database. Failure switches let tests exercise the degraded
//! paths.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use namebook_core::{
    ListFilter, NameOverview, NameRecord, NewName, OriginCount, PageRequest, Pagination, RankedName,
    SearchTerm,
};
use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::traits::NameStore;

#[derive(Debug, Default)]
struct MemoryState {
    next_id: i64,
    records: Vec<NameRecord>,
    unavailable: bool,
    failing_counters: HashSet<i64>,
}

impl MemoryState {
    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable("memory store switched off".to_owned()));
        }
        Ok(())
    }

    fn sorted_by_name(&self) -> Vec<NameRecord> {
        let mut records = self.records.clone();
        records.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
                .then(a.id.cmp(&b.id))
        });
        records
    }

    fn top(&self, limit: u32) -> Vec<RankedName> {
        let mut records: Vec<&NameRecord> = self.records.iter().collect();
        records.sort_by(|a, b| b.search_count.cmp(&a.search_count).then(a.id.cmp(&b.id)));
        RankedName::rank_all(
            records
                .into_iter()
                .take(limit as usize)
                .map(|r| (r.name.clone(), r.search_count)),
        )
    }

    fn origin_counts(&self) -> Vec<OriginCount> {
        let mut counts: Vec<OriginCount> = Vec::new();
        for record in &self.records {
            match counts.iter_mut().find(|c| c.origin == record.origin) {
                Some(entry) => entry.count += 1,
                None => counts.push(OriginCount { origin: record.origin.clone(), count: 1 }),
            }
        }
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.origin.cmp(&b.origin)));
        counts
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record directly with a given search count, skipping the
    /// duplicate check. Returns the assigned id.
    pub async fn seed(&self, new: NewName, search_count: u64) -> i64 {
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let id = state.next_id;
        state.records.push(NameRecord {
            id,
            name: new.name,
            meaning: new.meaning,
            origin: new.origin,
            choice_reason: new.choice_reason,
            search_count,
        });
        id
    }

    /// Make every operation fail with `StorageError::Unavailable`.
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().await.unavailable = unavailable;
    }

    /// Make search counter updates for `id` fail.
    pub async fn fail_counter_updates(&self, id: i64) {
        self.state.lock().await.failing_counters.insert(id);
    }

    /// Current stored copy of a record.
    pub async fn get(&self, id: i64) -> Option<NameRecord> {
        self.state.lock().await.records.iter().find(|r| r.id == id).cloned()
    }
}

fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    needle.is_none_or(|n| haystack.to_lowercase().contains(&n.to_lowercase()))
}

#[async_trait]
impl NameStore for MemoryStore {
    async fn count_all(&self) -> Result<u64, StorageError> {
        let state = self.state.lock().await;
        state.check_available()?;
        Ok(state.records.len() as u64)
    }

    async fn top_by_search_count(&self, limit: u32) -> Result<Vec<RankedName>, StorageError> {
        let state = self.state.lock().await;
        state.check_available()?;
        Ok(state.top(limit))
    }

    async fn search_and_count(&self, term: &SearchTerm) -> Result<Vec<NameRecord>, StorageError> {
        let mut state = self.state.lock().await;
        state.check_available()?;
        let prefix = term.as_str().to_lowercase();
        let mut matches: Vec<NameRecord> = state
            .sorted_by_name()
            .into_iter()
            .filter(|r| r.name.to_lowercase().starts_with(&prefix))
            .collect();

        for record in &mut matches {
            if state.failing_counters.contains(&record.id) {
                tracing::warn!(id = record.id, "failed to update search count");
                continue;
            }
            if let Some(stored) = state.records.iter_mut().find(|r| r.id == record.id) {
                stored.search_count += 1;
                record.search_count = stored.search_count;
            }
        }
        Ok(matches)
    }

    async fn list_page(
        &self,
        filter: &ListFilter,
        request: PageRequest,
    ) -> Result<(Vec<NameRecord>, Pagination), StorageError> {
        let state = self.state.lock().await;
        state.check_available()?;
        let matching: Vec<NameRecord> = state
            .sorted_by_name()
            .into_iter()
            .filter(|r| {
                contains_ci(&r.name, filter.name.as_deref())
                    && contains_ci(&r.origin, filter.origin.as_deref())
            })
            .collect();
        let pagination = Pagination::resolve(request, matching.len() as u64);
        let skip = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
        let items = matching.into_iter().skip(skip).take(pagination.per_page as usize).collect();
        Ok((items, pagination))
    }

    async fn insert_name(&self, new: &NewName) -> Result<NameRecord, StorageError> {
        let mut state = self.state.lock().await;
        state.check_available()?;
        let folded = new.name.to_lowercase();
        if state.records.iter().any(|r| r.name.to_lowercase() == folded) {
            return Err(StorageError::Duplicate(new.name.clone()));
        }
        state.next_id += 1;
        let record = NameRecord {
            id: state.next_id,
            name: new.name.clone(),
            meaning: new.meaning.clone(),
            origin: new.origin.clone(),
            choice_reason: new.choice_reason.clone(),
            search_count: 0,
        };
        state.records.push(record.clone());
        Ok(record)
    }

    async fn origin_counts(&self) -> Result<Vec<OriginCount>, StorageError> {
        let state = self.state.lock().await;
        state.check_available()?;
        Ok(state.origin_counts())
    }

    async fn overview(&self, top_limit: u32) -> Result<NameOverview, StorageError> {
        let state = self.state.lock().await;
        state.check_available()?;
        Ok(NameOverview {
            total: state.records.len() as u64,
            top: state.top(top_limit),
            origins: state.origin_counts(),
        })
    }

    async fn export_all(&self) -> Result<Vec<NameRecord>, StorageError> {
        let state = self.state.lock().await;
        state.check_available()?;
        Ok(state.sorted_by_name())
    }
}
