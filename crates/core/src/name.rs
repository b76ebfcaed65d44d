//! The name record and the validated inputs that create or query it.

use serde::{Deserialize, Serialize};

use crate::{MIN_SEARCH_TERM_CHARS, ValidationError};

/// A stored name with its metadata.
///
/// `id` is assigned by the store on insert. `search_count` starts at zero and
/// only ever grows, one step per search that matched the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    pub id: i64,
    pub name: String,
    pub meaning: String,
    pub origin: String,
    pub choice_reason: Option<String>,
    pub search_count: u64,
}

/// Validated input for registering a new name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewName {
    pub name: String,
    pub meaning: String,
    pub origin: String,
    pub choice_reason: Option<String>,
}

impl NewName {
    /// Trim every field and check the required ones.
    ///
    /// `name`, `meaning` and `origin` must be non-empty after trimming. A blank
    /// `choice_reason` becomes `None`.
    pub fn parse(
        name: &str,
        meaning: &str,
        origin: &str,
        choice_reason: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let name = required(name, "name")?;
        let meaning = required(meaning, "meaning")?;
        let origin = required(origin, "origin")?;
        let choice_reason =
            choice_reason.map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned);
        Ok(Self { name, meaning, origin, choice_reason })
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value.to_owned())
}

/// A prefix search term that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Trim and check the minimum length, counted in characters.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let term = raw.trim();
        if term.is_empty() {
            return Err(ValidationError::EmptySearchTerm);
        }
        let chars = term.chars().count();
        if chars < MIN_SEARCH_TERM_CHARS {
            return Err(ValidationError::too_short(chars));
        }
        Ok(Self(term.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of a search-count ranking. `rank` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedName {
    pub rank: u32,
    pub name: String,
    pub search_count: u64,
}

impl RankedName {
    /// Number `(name, count)` pairs in the order given, starting at 1.
    pub fn rank_all(rows: impl IntoIterator<Item = (String, u64)>) -> Vec<Self> {
        (1..)
            .zip(rows)
            .map(|(rank, (name, search_count))| Self { rank, name, search_count })
            .collect()
    }
}
