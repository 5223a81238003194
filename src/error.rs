//! Error types for document repository operations.

use thiserror::Error;

/// Errors returned by [`DocumentManager`](crate::DocumentManager) and
/// [`Store`](crate::Store).
///
/// Lookups that find nothing and searches that match nothing are not errors;
/// they return `None` or an empty `Vec`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// A save could not be completed.
    ///
    /// Raised for an absent document. Also raised when the id generator
    /// yields [`MAX_ID_ATTEMPTS`](crate::store::MAX_ID_ATTEMPTS) identifiers in
    /// a row that are already stored, since the document cannot be given a
    /// usable id.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
