//! Shared constants for namebook.

/// PostgreSQL connection pool: connections kept open when idle.
pub const PG_POOL_MIN_CONNECTIONS: u32 = 1;

/// PostgreSQL connection pool: hard upper bound on open connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 5;

/// PostgreSQL connection pool: default acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// Minimum length of a prefix search term, in characters, after trimming.
pub const MIN_SEARCH_TERM_CHARS: usize = 3;

/// Rows per page when the caller does not ask for a size.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Largest page size a caller may request.
pub const MAX_PER_PAGE: u32 = 100;

/// Size of the ranking shown on the home and top-10 pages.
pub const TOP_RANKING_LIMIT: u32 = 10;

/// Size of the ranking shown on the statistics page.
pub const STATS_RANKING_LIMIT: u32 = 5;

/// Number of origins listed individually before the rest are folded.
pub const ORIGIN_BREAKDOWN_SLOTS: usize = 10;

/// Label of the bucket that collects origins past the breakdown slots.
pub const OTHER_ORIGIN_LABEL: &str = "Other";

/// Default HTTP port when neither `PORT` nor `--port` is given.
pub const DEFAULT_HTTP_PORT: u16 = 5000;

/// File name suggested to browsers for the CSV export.
pub const EXPORT_FILE_NAME: &str = "names_export.csv";
