//! Authoritative in-memory document storage.
//!
//! The store is the source of truth for the lifetime of the process. Entries
//! are kept in insertion order: an update overwrites the entry in place and
//! keeps its position. There is no delete.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::id::{IdGenerator, UuidGenerator};
use std::sync::Arc;
use tracing::{debug, warn};

#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Attempts at drawing an unused identifier before giving up on a generator.
pub const MAX_ID_ATTEMPTS: usize = 64;

const ID_SPACE_EXHAUSTED: &str = "id generator produced only identifiers already in use";

/// Keyed document storage with identifier assignment.
///
/// # Examples
///
/// ```
/// use docstore::{Author, Document, SequentialGenerator, Store};
///
/// let mut store = Store::new(SequentialGenerator::new("d"));
/// let saved = store.upsert(Document::new("t", "c", Author::new("a", "n"))).unwrap();
/// assert_eq!(saved.id(), "d1");
/// assert_eq!(store.get("d1").unwrap().title, "t");
/// assert!(store.get("d2").is_none());
/// ```
#[derive(Debug)]
pub struct Store<G = UuidGenerator> {
    index: HashMap<String, usize>,
    documents: Vec<Arc<Document>>,
    id_generator: G,
}

impl Default for Store<UuidGenerator> {
    fn default() -> Self {
        Store::new(UuidGenerator)
    }
}

impl<G: IdGenerator> Store<G> {
    /// Creates an empty store that assigns identifiers with `id_generator`.
    pub fn new(id_generator: G) -> Self {
        Self {
            index: HashMap::new(),
            documents: Vec::new(),
            id_generator,
        }
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Returns `true` if a document with `id` is stored.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Inserts or overwrites a document.
    ///
    /// A document without an id, or with an empty one, gets a fresh id from
    /// the generator. When the id is already stored the entry is replaced, but
    /// the stored `created` timestamp is kept.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `document` is `None`, or if the generator
    /// yields [`MAX_ID_ATTEMPTS`] identifiers in a row that are already in use.
    pub fn upsert(&mut self, document: impl Into<Option<Document>>) -> Result<Arc<Document>> {
        let Some(mut document) = document.into() else {
            return Err(Error::InvalidArgument("document is absent"));
        };

        let id = match document.id.clone().filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => {
                let id = self.fresh_id()?;
                document.id = Some(id.clone());
                id
            }
        };

        if let Some(&slot) = self.index.get(id.as_str()) {
            document.created = self.documents[slot].created;
            let stored = Arc::new(document);
            self.documents[slot] = Arc::clone(&stored);
            debug!(%id, "updated document");
            return Ok(stored);
        }

        let stored = Arc::new(document);
        self.index.insert(id.clone(), self.documents.len());
        self.documents.push(Arc::clone(&stored));
        debug!(%id, "inserted document");
        Ok(stored)
    }

    fn fresh_id(&mut self) -> Result<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.id_generator.generate();
            if !self.index.contains_key(id.as_str()) {
                debug!(%id, "generated identifier");
                return Ok(id);
            }
            warn!(%id, "generated identifier already in use");
        }
        Err(Error::InvalidArgument(ID_SPACE_EXHAUSTED))
    }

    /// Returns the document stored under `id`.
    pub fn get(&self, id: &str) -> Option<Arc<Document>> {
        let slot = *self.index.get(id)?;
        Some(Arc::clone(&self.documents[slot]))
    }

    /// Iterates over every stored document once, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Document>> + '_ {
        self.documents.iter()
    }

    /// Returns every stored document once, in insertion order.
    pub fn all(&self) -> Vec<Arc<Document>> {
        self.documents.clone()
    }
}
