//! Response types (Serialize)

use namebook_core::{NameRecord, OriginCount, RankedName};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total: u64,
    pub top: Vec<RankedName>,
    pub origins: Vec<OriginCount>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub term: String,
    pub results: Vec<NameRecord>,
}
