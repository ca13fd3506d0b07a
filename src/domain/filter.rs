use serde::{Deserialize, Serialize};

use super::{Category, Priority};

/// Describes one requested slice of the announcement feed. Built once per
/// navigation/search submission and treated as immutable: changing any
/// field means building a new filter (and discarding any window
/// materialized from the old one).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedFilter {
    pub category: Option<Category>,
    pub department: Option<String>,
    pub priority: Option<Priority>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl FeedFilter {
    /// An empty or whitespace-only search term applies no text predicate
    /// at all, which is not the same as matching the empty string.
    pub fn normalized(mut self) -> Self {
        if self
            .search
            .as_deref()
            .map(|s| s.trim().is_empty())
            .unwrap_or(false)
        {
            self.search = None;
        }
        self
    }

    /// The same predicates with pagination stripped, for count queries.
    pub fn without_pagination(&self) -> Self {
        Self {
            limit: None,
            offset: None,
            ..self.clone()
        }
    }
}
