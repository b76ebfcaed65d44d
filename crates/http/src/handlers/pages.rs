use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use namebook_core::TOP_RANKING_LIMIT;

use crate::AppState;
use crate::handlers::export::EXPORT_FAILED_NOTICE;
use crate::query_types::HomeQuery;
use crate::views::{self, DEGRADED_NOTICE, Flash};

pub async fn home(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HomeQuery>,
) -> Html<String> {
    let summary = state.name_service.home_summary().await;
    let mut flashes = Vec::new();
    if query.notice.as_deref() == Some(EXPORT_FAILED_NOTICE) {
        flashes.push(Flash::error("Could not export the CSV file. Please try again."));
    }
    if summary.failed {
        flashes.push(Flash::error(DEGRADED_NOTICE));
    }
    views::home(&summary.value, &flashes)
}

pub async fn top10(State(state): State<Arc<AppState>>) -> Html<String> {
    let ranking = state.name_service.top_by_search_count(TOP_RANKING_LIMIT).await;
    let flashes: Vec<Flash> =
        ranking.failed.then(|| Flash::error(DEGRADED_NOTICE)).into_iter().collect();
    views::top10(&ranking.value, &flashes)
}

pub async fn stats(State(state): State<Arc<AppState>>) -> Html<String> {
    let overview = state.name_service.stats_overview().await;
    let flashes: Vec<Flash> = overview
        .failed
        .then(|| Flash::error("Could not build the statistics. Please try again."))
        .into_iter()
        .collect();
    views::stats(&overview.value, &flashes)
}
