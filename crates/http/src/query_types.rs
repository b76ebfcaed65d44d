//! Request/query types (Deserialize)
//!
//! Numeric query parameters arrive as strings and are parsed leniently: a
//! missing or garbled value falls back to the default instead of rejecting
//! the request.

use namebook_core::{DEFAULT_PER_PAGE, ListFilter, PageRequest};
use serde::Deserialize;

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.map(str::trim).and_then(|s| s.parse().ok()).unwrap_or(default)
}

#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub notice: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    pub term: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    #[serde(rename = "perPage")]
    pub per_page: Option<String>,
    pub name: Option<String>,
    pub origin: Option<String>,
    /// Set by the registration redirect.
    pub created: Option<String>,
}

impl ListQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            parse_or(self.page.as_deref(), 1),
            parse_or(self.per_page.as_deref(), i64::from(DEFAULT_PER_PAGE)),
        )
    }

    pub fn filter(&self) -> ListFilter {
        ListFilter::new(self.name.as_deref(), self.origin.as_deref())
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub origin: String,
    #[serde(rename = "choiceReason")]
    pub choice_reason: Option<String>,
}
