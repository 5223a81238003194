//! Multi-predicate search requests.
//!
//! A [`SearchRequest`] holds up to five predicate categories. Categories are
//! combined with AND; the values listed within one category are combined with
//! OR. An unset category places no constraint on a document. A category set to
//! an empty list matches nothing, since no listed value can be satisfied.
//!
//! | Category | Field | Document matches when |
//! |----------|-------|-----------------------|
//! | title prefix | `title_prefixes` | title starts with any prefix |
//! | content | `contains_contents` | content contains any substring |
//! | author | `author_ids` | author id equals any listed id |
//! | lower bound | `created_from` | `created` is strictly after it |
//! | upper bound | `created_to` | `created` is strictly before it |
//!
//! All string comparisons are case-sensitive.

use crate::document::Document;
use chrono::{DateTime, Utc};

/// Predicates used by [`DocumentManager::search`](crate::DocumentManager::search).
///
/// # Examples
///
/// ```
/// use docstore::{Author, Document, SearchRequest};
///
/// let request = SearchRequest::new()
///     .with_title_prefixes(["ABC"])
///     .with_contents(["ABC"]);
///
/// let author = Author::new("a", "n");
/// assert!(request.matches(&Document::new("ABC Title", "ABC Content", author.clone())));
/// assert!(!request.matches(&Document::new("ABC Title", "XYZ Content", author)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct SearchRequest {
    /// Title must start with one of these.
    pub title_prefixes: Option<Vec<String>>,
    /// Content must contain one of these.
    pub contains_contents: Option<Vec<String>>,
    /// Author id must equal one of these.
    pub author_ids: Option<Vec<String>>,
    /// Exclusive lower bound on `created`.
    pub created_from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `created`.
    pub created_to: Option<DateTime<Utc>>,
}

fn collect<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

impl SearchRequest {
    /// Creates a request with no predicates, matching every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to titles starting with any of `prefixes`.
    #[must_use]
    pub fn with_title_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.title_prefixes = Some(collect(prefixes));
        self
    }

    /// Restricts results to content containing any of `substrings`.
    #[must_use]
    pub fn with_contents<I, S>(mut self, substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contains_contents = Some(collect(substrings));
        self
    }

    /// Restricts results to documents by any of `author_ids`.
    #[must_use]
    pub fn with_author_ids<I, S>(mut self, author_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.author_ids = Some(collect(author_ids));
        self
    }

    /// Restricts results to documents created strictly after `from`.
    #[must_use]
    pub fn created_from(mut self, from: DateTime<Utc>) -> Self {
        self.created_from = Some(from);
        self
    }

    /// Restricts results to documents created strictly before `to`.
    #[must_use]
    pub fn created_to(mut self, to: DateTime<Utc>) -> Self {
        self.created_to = Some(to);
        self
    }

    /// Returns `true` if no category is set.
    pub fn is_unconstrained(&self) -> bool {
        self.title_prefixes.is_none()
            && self.contains_contents.is_none()
            && self.author_ids.is_none()
            && self.created_from.is_none()
            && self.created_to.is_none()
    }

    /// Evaluates every set category against `document`.
    pub fn matches(&self, document: &Document) -> bool {
        any_of(&self.title_prefixes, |p| document.title.starts_with(p))
            && any_of(&self.contains_contents, |s| document.content.contains(s))
            && any_of(&self.author_ids, |id| document.author.id == *id)
            && self.created_from.map_or(true, |from| document.created > from)
            && self.created_to.map_or(true, |to| document.created < to)
    }
}

/// Unset category: vacuously true. Set category: true if any value matches.
fn any_of(values: &Option<Vec<String>>, pred: impl Fn(&str) -> bool) -> bool {
    match values {
        None => true,
        Some(values) => values.iter().any(|v| pred(v)),
    }
}
