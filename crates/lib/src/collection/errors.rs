//! Error types for the object collection.
//!
//! These cover identifier bookkeeping: duplicates, lookups of absent objects
//! and the (practically unreachable) exhaustion of fresh identifiers.

use thiserror::Error;

use crate::object::ObjectId;

/// Errors that can occur while registering, allocating or looking up objects.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// The identifier is already taken in this collection.
    #[error("Duplicate identifier: {id}")]
    DuplicateIdentifier {
        /// The identifier that was registered twice
        id: ObjectId,
    },

    /// No object with this identifier exists.
    #[error("Object not found: {id}")]
    ObjectNotFound {
        /// The identifier that was looked up
        id: ObjectId,
    },

    /// The generator kept proposing identifiers that were already issued.
    #[error("Could not allocate a fresh identifier after {attempts} attempts")]
    IdentifierExhausted {
        /// Number of candidates rejected
        attempts: usize,
    },
}

impl CollectionError {
    /// Check if this error is a duplicate identifier.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, CollectionError::DuplicateIdentifier { .. })
    }

    /// Check if this error indicates a missing object.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CollectionError::ObjectNotFound { .. })
    }

    /// The identifier this error is about, if any.
    pub fn id(&self) -> Option<&ObjectId> {
        match self {
            CollectionError::DuplicateIdentifier { id } | CollectionError::ObjectNotFound { id } => {
                Some(id)
            }
            CollectionError::IdentifierExhausted { .. } => None,
        }
    }
}

// Conversion from CollectionError to the main Error type
impl From<CollectionError> for crate::Error {
    fn from(err: CollectionError) -> Self {
        crate::Error::Collection(err)
    }
}
