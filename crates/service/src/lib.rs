//! Service layer for namebook.
//!
//! Sits between the HTTP handlers and storage: validates input before the
//! store is touched, classifies search outcomes, and applies the failure
//! policy (reads degrade to empty results, writes report failure).

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod degraded;
mod error;
mod name_service;

pub use degraded::Degraded;
pub use error::ServiceError;
pub use name_service::{HomeSummary, ListPage, NameService, SearchOutcome, StatsOverview};
