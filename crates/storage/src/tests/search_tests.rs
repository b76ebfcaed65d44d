use namebook_core::SearchTerm;

use super::store_with;
use crate::{MemoryStore, NameStore, StorageError};

#[tokio::test]
async fn prefix_search_is_case_insensitive_and_ordered() {
    let store = store_with(&[("abcxyz", "Latin", 0), ("Abcdef", "Greek", 0), ("Zabc", "Latin", 0)]).await;

    let hits = store.search_and_count(&SearchTerm::parse("abc").unwrap()).await.unwrap();
    let names: Vec<_> = hits.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Abcdef", "abcxyz"]);
    assert!(hits.iter().all(|r| r.search_count == 1));
}

#[tokio::test]
async fn repeated_search_increments_by_exactly_k() {
    let store = store_with(&[("Bernardo", "Germanic", 0)]).await;
    let term = SearchTerm::parse("Ber").unwrap();
    for _ in 0..4 {
        store.search_and_count(&term).await.unwrap();
    }
    let hits = store.search_and_count(&term).await.unwrap();
    assert_eq!(hits[0].search_count, 5);
}

#[tokio::test]
async fn failed_counter_keeps_pre_search_value_for_that_record_only() {
    let store = MemoryStore::new();
    let broken = store.seed(super::new_name("Carla", "Latin"), 7).await;
    let fine = store.seed(super::new_name("Carlos", "Latin"), 2).await;
    store.fail_counter_updates(broken).await;

    let hits = store.search_and_count(&SearchTerm::parse("car").unwrap()).await.unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].search_count, 7);
    assert_eq!(hits[1].search_count, 3);
    assert_eq!(store.get(broken).await.unwrap().search_count, 7);
    assert_eq!(store.get(fine).await.unwrap().search_count, 3);
}

#[tokio::test]
async fn no_match_is_empty_not_error() {
    let store = store_with(&[("Ana", "Hebrew", 0)]).await;
    let hits = store.search_and_count(&SearchTerm::parse("xyz").unwrap()).await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn top_ranking_orders_by_count_then_id() {
    let store = store_with(&[("Ana", "H", 3), ("Bia", "L", 9), ("Caio", "L", 3)]).await;
    let top = store.top_by_search_count(2).await.unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!((top[0].rank, top[0].name.as_str(), top[0].search_count), (1, "Bia", 9));
    assert_eq!((top[1].rank, top[1].name.as_str()), (2, "Ana"));
}

#[tokio::test]
async fn unavailable_store_fails_reads() {
    let store = store_with(&[("Ana", "Hebrew", 0)]).await;
    store.set_unavailable(true).await;
    let err = store.count_all().await.unwrap_err();
    assert!(matches!(err, StorageError::Unavailable(_)));
    assert!(err.is_transient());
}
