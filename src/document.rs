//! Document and author records.

use chrono::{DateTime, Utc};

/// The author of a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Author {
    /// Author identifier, matched exactly by author-id search predicates.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl Author {
    /// Creates an author.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A document held by the repository.
///
/// `id` is `None` until the document is first saved, at which point the
/// store assigns one. After that the id never changes. `created` is set by
/// the caller when the document is built and is never modified by a save.
///
/// # Examples
///
/// ```
/// use docstore::{Author, Document};
///
/// let doc = Document::new("Title", "Body", Author::new("a-1", "Jane Doe"));
/// assert!(doc.id.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Document {
    /// Identifier, assigned on first save if absent.
    pub id: Option<String>,
    /// Title, matched by prefix.
    pub title: String,
    /// Body, matched by substring.
    pub content: String,
    /// Author of the document.
    pub author: Author,
    /// Creation time.
    pub created: DateTime<Utc>,
}

impl Document {
    /// Creates an unsaved document created now.
    pub fn new(title: impl Into<String>, content: impl Into<String>, author: Author) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
            author,
            created: Utc::now(),
        }
    }

    /// Sets the identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the creation time.
    #[must_use]
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    /// Returns the identifier, or `""` for an unsaved document.
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// Returns `true` if the identifier is set and non-empty.
    ///
    /// An empty identifier is treated as unset: saving such a document
    /// assigns it a fresh one.
    pub fn has_id(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }
}
