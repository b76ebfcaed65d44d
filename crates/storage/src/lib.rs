//! Storage layer for namebook.
//!
//! `PgStorage` owns the PostgreSQL pool and every SQL statement against the
//! `names` table. `MemoryStore` implements the same `NameStore` trait without a
//! database, for tests and local experiments. `StorageBackend` dispatches to
//! either one.

mod backend;
mod error;
mod memory;
mod pg_storage;
mod schema;
#[cfg(test)]
mod tests;
pub mod traits;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::MemoryStore;
pub use pg_storage::{BulkLoadReport, PgStorage};
pub use schema::{SchemaReport, StepOutcome};
pub use traits::NameStore;
