use thiserror::Error;

use crate::MIN_SEARCH_TERM_CHARS;

/// Rejected user input. Reported back to the user, never logged as a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required form field was missing or blank after trimming.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The search form was submitted without a term.
    #[error("provide a term to search for")]
    EmptySearchTerm,

    /// The search term is shorter than the prefix minimum.
    #[error("type at least {min} characters to search (got {actual})")]
    SearchTermTooShort { min: usize, actual: usize },
}

impl ValidationError {
    pub(crate) const fn too_short(actual: usize) -> Self {
        Self::SearchTermTooShort { min: MIN_SEARCH_TERM_CHARS, actual }
    }
}

/// Startup configuration error. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL is not set (export it or add it to .env)")]
    MissingDatabaseUrl,
}
