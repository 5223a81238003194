//! Identifier generation for newly saved documents.
//!
//! The store never calls a UUID function directly; it asks its
//! [`IdGenerator`]. Swapping in a [`SequentialGenerator`] gives deterministic
//! identifiers for tests and simulations.

use uuid::Uuid;

/// Produces identifiers for documents saved without one.
///
/// The store rejects a generated identifier that is already in use and asks
/// again, so generators only need to be unique with high probability.
///
/// Any `FnMut() -> String` closure is an `IdGenerator`:
///
/// ```
/// use docstore::{Author, Document, DocumentManager};
/// use core::num::NonZeroUsize;
///
/// let mut next = 0;
/// let mut manager = DocumentManager::with_id_generator(
///     NonZeroUsize::new(10).unwrap(),
///     move || {
///         next += 1;
///         format!("doc-{next}")
///     },
/// );
/// let saved = manager.save(Document::new("t", "c", Author::new("a", "n"))).unwrap();
/// assert_eq!(saved.id(), "doc-1");
/// ```
pub trait IdGenerator {
    /// Returns a fresh identifier.
    fn generate(&mut self) -> String;
}

impl<F> IdGenerator for F
where
    F: FnMut() -> String,
{
    fn generate(&mut self) -> String {
        self()
    }
}

/// Random version 4 UUIDs in hyphenated form. The default generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// `"{prefix}{n}"` with `n` counting up from a starting value.
#[derive(Debug, Clone)]
pub struct SequentialGenerator {
    prefix: String,
    next: u64,
}

impl SequentialGenerator {
    /// Creates a generator producing `prefix1`, `prefix2`, ...
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    /// Creates a generator whose first identifier uses `start`.
    pub fn starting_at(prefix: impl Into<String>, start: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: start,
        }
    }
}

impl Default for SequentialGenerator {
    fn default() -> Self {
        Self::new("doc-")
    }
}

impl IdGenerator for SequentialGenerator {
    fn generate(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uuid_generator_is_unique() {
        let mut generator = UuidGenerator;
        let ids: HashSet<String> = (0..1000).map(|_| generator.generate()).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| Uuid::parse_str(id).is_ok()));
    }

    #[test]
    fn test_sequential_generator() {
        let mut generator = SequentialGenerator::new("d");
        assert_eq!(generator.generate(), "d1");
        assert_eq!(generator.generate(), "d2");

        let mut generator = SequentialGenerator::starting_at("x-", 41);
        assert_eq!(generator.generate(), "x-41");
        assert_eq!(generator.generate(), "x-42");
    }

    #[test]
    fn test_closure_generator() {
        let mut generator = || "fixed".to_string();
        assert_eq!(IdGenerator::generate(&mut generator), "fixed");
    }
}
