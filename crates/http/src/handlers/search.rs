use std::sync::Arc;

use axum::Form;
use axum::extract::{Query, State};
use axum::response::Html;
use namebook_core::ValidationError;
use namebook_service::{SearchOutcome, ServiceError};

use crate::AppState;
use crate::query_types::SearchForm;
use crate::views::{self, Flash, FlashKind};

/// `GET /search`: the empty form, or a search when `term` is in the query.
pub async fn search_page(
    State(state): State<Arc<AppState>>,
    Query(form): Query<SearchForm>,
) -> Html<String> {
    match form.term {
        Some(term) => run_search(&state, &term).await,
        None => views::search("", &[], &[]),
    }
}

pub async fn search_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Html<String> {
    run_search(&state, form.term.as_deref().unwrap_or("")).await
}

async fn run_search(state: &AppState, term: &str) -> Html<String> {
    match state.name_service.search_by_prefix(term).await {
        Ok(SearchOutcome::Found(records)) => {
            let flash = Flash::success(format!("Found {} name(s).", records.len()));
            views::search(term, &records, &[flash])
        },
        Ok(SearchOutcome::NoMatch) => {
            let flash = Flash::info(format!("No names start with '{}'.", term.trim()));
            views::search(term, &[], &[flash])
        },
        Err(e) => {
            let kind = match e {
                ServiceError::Validation(ValidationError::SearchTermTooShort { .. }) => {
                    FlashKind::Warning
                },
                _ => FlashKind::Error,
            };
            views::search(term, &[], &[Flash::new(kind, e.user_message())])
        },
    }
}
