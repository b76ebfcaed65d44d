use std::sync::Arc;

use namebook_core::{
    ListFilter, NameOverview, NameRecord, NewName, ORIGIN_BREAKDOWN_SLOTS, OriginCount, PageRequest,
    Pagination, RankedName, STATS_RANKING_LIMIT, SearchTerm, TOP_RANKING_LIMIT, fold_origins,
};
use namebook_storage::{NameStore, StorageBackend};
use serde::Serialize;

use crate::{Degraded, ServiceError};

/// Outcome of a valid prefix search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// At least one record matched; counts already include this search.
    Found(Vec<NameRecord>),
    /// The term was valid but nothing starts with it.
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage {
    pub items: Vec<NameRecord>,
    pub pagination: Pagination,
    pub filter: ListFilter,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HomeSummary {
    pub total: u64,
    pub top: Vec<RankedName>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsOverview {
    /// Largest origins individually, the rest folded into `Other`.
    pub origins: Vec<OriginCount>,
    pub top: Vec<RankedName>,
}

pub struct NameService {
    storage: Arc<StorageBackend>,
}

impl NameService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    pub async fn count_all(&self) -> Degraded<u64> {
        Degraded::or_default(self.storage.count_all().await, "count_all")
    }

    pub async fn top_by_search_count(&self, limit: u32) -> Degraded<Vec<RankedName>> {
        Degraded::or_default(self.storage.top_by_search_count(limit).await, "top_by_search_count")
    }

    /// Total count and the top-10 ranking for the landing page.
    pub async fn home_summary(&self) -> Degraded<HomeSummary> {
        Degraded::or_default(self.storage.overview(TOP_RANKING_LIMIT).await, "home_summary")
            .map(|overview| HomeSummary { total: overview.total, top: overview.top })
    }

    /// Total, top-10 ranking and folded origin breakdown in one read.
    ///
    /// Failures are returned rather than degraded, for callers that must not
    /// mistake an outage for an empty table.
    pub async fn snapshot(&self) -> Result<NameOverview, ServiceError> {
        let mut overview = self.storage.overview(TOP_RANKING_LIMIT).await.map_err(|e| {
            tracing::error!(operation = "snapshot", error = %e, "read failed");
            ServiceError::Storage(e)
        })?;
        overview.origins = fold_origins(overview.origins, ORIGIN_BREAKDOWN_SLOTS);
        Ok(overview)
    }

    /// Validate `raw`, then run the prefix search and bump matching counters.
    ///
    /// Invalid terms are rejected before the store is touched.
    pub async fn search_by_prefix(&self, raw: &str) -> Result<SearchOutcome, ServiceError> {
        let term = SearchTerm::parse(raw)?;
        let records = self.storage.search_and_count(&term).await.map_err(|e| {
            tracing::error!(term = %term, error = %e, "search failed");
            ServiceError::Storage(e)
        })?;
        if records.is_empty() {
            return Ok(SearchOutcome::NoMatch);
        }
        Ok(SearchOutcome::Found(records))
    }

    pub async fn list_paged(&self, filter: ListFilter, request: PageRequest) -> Degraded<ListPage> {
        let result = self.storage.list_page(&filter, request).await;
        let (items, pagination) = match result {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(operation = "list_paged", error = %e, "read failed, serving empty result");
                return Degraded {
                    value: ListPage {
                        items: Vec::new(),
                        pagination: Pagination::resolve(request, 0),
                        filter,
                    },
                    failed: true,
                };
            },
        };
        Degraded::ok(ListPage { items, pagination, filter })
    }

    /// Validate and insert a new name.
    ///
    /// Duplicates are reported as `DuplicateName` whether the pre-check or the
    /// unique index caught them.
    pub async fn register(
        &self,
        name: &str,
        meaning: &str,
        origin: &str,
        choice_reason: Option<&str>,
    ) -> Result<NameRecord, ServiceError> {
        let new = NewName::parse(name, meaning, origin, choice_reason)?;
        match self.storage.insert_name(&new).await {
            Ok(record) => Ok(record),
            Err(e) if e.is_duplicate() => Err(ServiceError::DuplicateName(new.name)),
            Err(e) => {
                tracing::error!(name = %new.name, error = %e, "register failed");
                Err(ServiceError::Storage(e))
            },
        }
    }

    pub async fn aggregate_by_origin(&self) -> Degraded<Vec<OriginCount>> {
        Degraded::or_default(self.storage.origin_counts().await, "aggregate_by_origin")
    }

    /// Origin breakdown (top 10 plus `Other`) and the top-5 ranking.
    pub async fn stats_overview(&self) -> Degraded<StatsOverview> {
        Degraded::or_default(self.storage.overview(STATS_RANKING_LIMIT).await, "stats_overview").map(
            |overview| StatsOverview {
                origins: fold_origins(overview.origins, ORIGIN_BREAKDOWN_SLOTS),
                top: overview.top,
            },
        )
    }

    pub async fn export_all(&self) -> Degraded<Vec<NameRecord>> {
        Degraded::or_default(self.storage.export_all().await, "export_all")
    }
}

#[cfg(test)]
mod tests {
    use namebook_core::{NewName, ValidationError};
    use namebook_storage::MemoryStore;

    use super::*;

    fn service_over(store: &MemoryStore) -> NameService {
        NameService::new(Arc::new(StorageBackend::Memory(store.clone())))
    }

    fn new_name(name: &str, origin: &str) -> NewName {
        NewName {
            name: name.to_owned(),
            meaning: "m".to_owned(),
            origin: origin.to_owned(),
            choice_reason: None,
        }
    }

    #[tokio::test]
    async fn short_term_is_rejected_before_the_store() {
        let store = MemoryStore::new();
        store.seed(new_name("Abel", "Hebrew"), 0).await;
        store.set_unavailable(true).await;
        let service = service_over(&store);

        // A store error would surface if the store were reached.
        let err = service.search_by_prefix(" ab ").await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::SearchTermTooShort { min: 3, actual: 2 })
        ));
        let err = service.search_by_prefix("").await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ValidationError::EmptySearchTerm)));
    }

    #[tokio::test]
    async fn search_finds_and_counts_matches() {
        let store = MemoryStore::new();
        let a = store.seed(new_name("Abcdef", "Latin"), 0).await;
        let b = store.seed(new_name("abcxyz", "Latin"), 0).await;
        store.seed(new_name("Bcd", "Latin"), 0).await;
        let service = service_over(&store);

        let SearchOutcome::Found(hits) = service.search_by_prefix("abc").await.unwrap() else {
            panic!("expected matches");
        };
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].name, "Abcdef");
        assert_eq!(store.get(a).await.unwrap().search_count, 1);
        assert_eq!(store.get(b).await.unwrap().search_count, 1);
    }

    #[tokio::test]
    async fn search_without_matches_is_no_match() {
        let store = MemoryStore::new();
        store.seed(new_name("Ana", "Hebrew"), 0).await;
        let service = service_over(&store);
        assert_eq!(service.search_by_prefix("Zzz").await.unwrap(), SearchOutcome::NoMatch);
    }

    #[tokio::test]
    async fn search_store_failure_is_reported() {
        let store = MemoryStore::new();
        store.set_unavailable(true).await;
        let service = service_over(&store);
        let err = service.search_by_prefix("Ana").await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
    }

    #[tokio::test]
    async fn register_rejects_case_variant_duplicates() {
        let store = MemoryStore::new();
        let service = service_over(&store);
        let created = service.register("Ana", "grace", "Hebrew", None).await.unwrap();
        assert_eq!(created.search_count, 0);

        let err = service.register("  ANA ", "grace", "Hebrew", Some("again")).await.unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateName(ref n) if n == "ANA"));
        assert_eq!(service.count_all().await.value, 1);
    }

    #[tokio::test]
    async fn register_with_empty_meaning_creates_nothing() {
        let store = MemoryStore::new();
        let service = service_over(&store);
        let err = service.register("Ana", "  ", "Hebrew", None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ValidationError::MissingField("meaning"))));
        assert_eq!(service.count_all().await.value, 0);
    }

    #[tokio::test]
    async fn register_store_failure_is_explicit() {
        let store = MemoryStore::new();
        store.set_unavailable(true).await;
        let service = service_over(&store);
        let err = service.register("Ana", "grace", "Hebrew", None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
    }

    #[tokio::test]
    async fn reads_degrade_to_empty_on_store_failure() {
        let store = MemoryStore::new();
        store.seed(new_name("Ana", "Hebrew"), 3).await;
        store.set_unavailable(true).await;
        let service = service_over(&store);

        let summary = service.home_summary().await;
        assert!(summary.failed);
        assert_eq!(summary.value, HomeSummary::default());

        let page = service.list_paged(ListFilter::default(), PageRequest::new(2, 10)).await;
        assert!(page.failed);
        assert!(page.value.items.is_empty());
        assert_eq!(page.value.pagination.page, 1);
        assert_eq!(page.value.pagination.total_pages, 0);

        let export = service.export_all().await;
        assert!(export.failed);
        assert!(export.value.is_empty());
    }

    #[tokio::test]
    async fn stats_fold_origins_past_ten() {
        let store = MemoryStore::new();
        // 11 origins: O00 has 11 names, O01 has 10, ..., O10 has 1.
        for origin in 0..11u32 {
            for n in 0..(11 - origin) {
                store.seed(new_name(&format!("N{origin:02}-{n:02}"), &format!("O{origin:02}")), 0).await;
            }
        }
        let service = service_over(&store);

        let stats = service.stats_overview().await;
        assert!(!stats.failed);
        assert_eq!(stats.value.origins.len(), 11);
        assert_eq!(stats.value.origins[0].origin, "O00");
        assert_eq!(stats.value.origins[10].origin, "Other");
        assert_eq!(stats.value.origins[10].count, 1);
        assert!(stats.value.top.len() <= 5);
    }

    #[tokio::test]
    async fn aggregate_by_origin_keeps_every_origin() {
        let store = MemoryStore::new();
        store.seed(new_name("Ana", "Hebrew"), 0).await;
        store.seed(new_name("Bia", "Latin"), 0).await;
        store.seed(new_name("Caio", "Latin"), 0).await;
        let service = service_over(&store);

        let origins = service.aggregate_by_origin().await;
        assert!(!origins.failed);
        let pairs: Vec<_> = origins.value.iter().map(|c| (c.origin.as_str(), c.count)).collect();
        assert_eq!(pairs, [("Latin", 2), ("Hebrew", 1)]);
    }

    #[tokio::test]
    async fn snapshot_reports_store_failure_instead_of_empty_data() {
        let store = MemoryStore::new();
        store.seed(new_name("Ana", "Hebrew"), 3).await;
        let service = service_over(&store);

        let snapshot = service.snapshot().await.unwrap();
        assert_eq!(snapshot.total, 1);
        assert_eq!(snapshot.top[0].name, "Ana");
        assert_eq!(snapshot.origins[0].origin, "Hebrew");

        store.set_unavailable(true).await;
        let err = service.snapshot().await.unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn listing_serves_last_page_for_large_page_numbers() {
        let store = MemoryStore::new();
        for i in 0..25 {
            store.seed(new_name(&format!("Name{i:02}"), "Latin"), 0).await;
        }
        let service = service_over(&store);
        let page = service.list_paged(ListFilter::default(), PageRequest::new(5, 10)).await;
        assert!(!page.failed);
        assert_eq!(page.value.pagination.page, 3);
        assert_eq!(page.value.items.len(), 5);
        assert_eq!(page.value.items[0].name, "Name20");
    }
}
