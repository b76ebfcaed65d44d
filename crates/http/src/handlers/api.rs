//! JSON endpoints for scripts and monitoring.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use namebook_service::SearchOutcome;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::SearchForm;
use crate::response_types::{SearchResponse, StatsResponse};

pub async fn health() -> &'static str {
    "ok"
}

/// Unlike the HTML pages, a failed read is an error here, not an empty body.
pub async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>, ApiError> {
    let snapshot = state.name_service.snapshot().await.map_err(|_| {
        ApiError::ServiceUnavailable("statistics are temporarily unavailable".to_owned())
    })?;
    Ok(Json(StatsResponse { total: snapshot.total, top: snapshot.top, origins: snapshot.origins }))
}

/// Same prefix search as the HTML form, counters included.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchForm>,
) -> Result<Json<SearchResponse>, ApiError> {
    let term = query.term.unwrap_or_default();
    let results = match state.name_service.search_by_prefix(&term).await? {
        SearchOutcome::Found(records) => records,
        SearchOutcome::NoMatch => Vec::new(),
    };
    Ok(Json(SearchResponse { term: term.trim().to_owned(), results }))
}
