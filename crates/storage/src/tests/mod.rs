//! Test utilities and module declarations for storage tests.

use crate::MemoryStore;
use namebook_core::NewName;

pub fn new_name(name: &str, origin: &str) -> NewName {
    NewName {
        name: name.to_owned(),
        meaning: format!("meaning of {name}"),
        origin: origin.to_owned(),
        choice_reason: None,
    }
}

pub async fn store_with(names: &[(&str, &str, u64)]) -> MemoryStore {
    let store = MemoryStore::new();
    for (name, origin, count) in names {
        store.seed(new_name(name, origin), *count).await;
    }
    store
}

mod search_tests;
