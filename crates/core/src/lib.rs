//! Core types and helpers for namebook.
//!
//! Domain types shared across the storage, service and HTTP crates, plus the
//! pure pieces of logic that do not touch the database: input validation,
//! pagination arithmetic, origin breakdown folding and the delimited text
//! formats used for export and bulk loading.

mod config;
mod constants;
mod env_config;
mod error;
pub mod export;
pub mod import;
mod name;
mod pagination;
mod stats;

pub use config::{ACQUIRE_TIMEOUT_VAR, AppConfig, DATABASE_URL_VAR, PORT_VAR};
pub use constants::*;
pub use env_config::env_parse_with_default;
pub use error::{ConfigError, ValidationError};
pub use name::{NameRecord, NewName, RankedName, SearchTerm};
pub use pagination::{ListFilter, PageRequest, Pagination};
pub use stats::{NameOverview, OriginCount, fold_origins};
