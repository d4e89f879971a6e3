//! Feed query - filter and pagination options for a personalized feed

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::error::DomainError;

use super::normalize_tags;

/// Largest page a single feed request may ask for
pub const MAX_FEED_LIMIT: i64 = 20;

/// Filter and pagination options for `PostRepository::get_user_feed`
///
/// Multiple tags are combined with OR: a post matches when it carries any
/// of the requested tags. The search term is matched case-insensitively
/// against title and content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[validate(schema(function = "validate_window"))]
pub struct FeedQuery {
    #[validate(range(min = 1, max = 20, message = "Limit must be between 1 and 20"))]
    #[serde(default = "default_limit")]
    pub limit: i64,

    #[validate(range(min = 0, message = "Offset must not be negative"))]
    #[serde(default)]
    pub offset: i64,

    #[validate(length(max = 5, message = "At most 5 tags may be requested"))]
    #[serde(default)]
    pub tags: Vec<String>,

    #[validate(length(max = 100, message = "Search must be at most 100 characters"))]
    #[serde(default)]
    pub search: String,

    #[serde(default)]
    pub since: Option<DateTime<Utc>>,

    #[serde(default)]
    pub until: Option<DateTime<Utc>>,
}

fn default_limit() -> i64 {
    MAX_FEED_LIMIT
}

fn validate_window(query: &FeedQuery) -> Result<(), ValidationError> {
    match (query.since, query.until) {
        (Some(since), Some(until)) if since > until => {
            let mut err = ValidationError::new("time_window");
            err.message = Some("`since` must not be after `until`".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
            tags: Vec::new(),
            search: String::new(),
            since: None,
            until: None,
        }
    }
}

impl FeedQuery {
    /// Create a query for the first page with no filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Set the number of items to skip
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    /// Set the case-insensitive search term
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the tags, any of which a post must carry
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict to posts created at or after `since`
    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    /// Restrict to posts created at or before `until`
    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    /// Search term with surrounding whitespace removed, if any remains
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        (!term.is_empty()).then_some(term)
    }

    /// Requested tags, trimmed, without blanks or duplicates
    pub fn normalized_tags(&self) -> Vec<&str> {
        normalize_tags(&self.tags)
    }

    /// Validate and return the query, mapping failures to a domain error
    pub fn validated(self) -> Result<Self, DomainError> {
        self.validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;
        Ok(self)
    }
}
