//! HTTP front end for namebook.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::arithmetic_side_effects, reason = "Arithmetic is safe in context")]
#![allow(clippy::cast_precision_loss, reason = "Chart geometry tolerates lossy counts")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod charts;
mod handlers;
mod query_types;
mod response_types;
mod views;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use namebook_service::NameService;
use tower_http::trace::TraceLayer;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    pub name_service: Arc<NameService>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::pages::home))
        .route("/search", get(handlers::search::search_page).post(handlers::search::search_submit))
        .route("/list", get(handlers::names::list))
        .route("/register", get(handlers::names::register_form).post(handlers::names::register_submit))
        .route("/top10", get(handlers::pages::top10))
        .route("/stats", get(handlers::pages::stats))
        .route("/export", get(handlers::export::export_csv))
        .route("/health", get(handlers::api::health))
        .route("/api/stats", get(handlers::api::stats))
        .route("/api/search", get(handlers::api::search))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
