//! Error types for relationship access.
//!
//! Every variant here is raised at the point of the read or write that
//! detected it; accessors never leave a half-applied mutation behind.

use thiserror::Error;

use crate::object::ObjectId;

/// Errors raised while reading or writing relationships.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelationError {
    /// A stored identifier does not resolve to an object
    #[error("{owner}.{attribute} references missing object {id}")]
    BrokenReference {
        owner: ObjectId,
        attribute: String,
        id: ObjectId,
    },

    /// The related object is of a kind the relationship does not accept
    #[error("Type mismatch on `{relationship}`: expected {expected}, found {actual}")]
    TypeMismatch {
        relationship: String,
        expected: String,
        actual: String,
    },

    /// More than one object claims the owner through a to-one inverse
    #[error("Ambiguous inverse `{relationship}` of {owner}: {} candidates", .matches.len())]
    AmbiguousInverse {
        owner: ObjectId,
        relationship: String,
        matches: Vec<ObjectId>,
    },

    /// The operation is not defined for this relationship
    #[error("Operation '{operation}' is not supported by `{relationship}`")]
    UnsupportedOperation {
        operation: String,
        relationship: String,
    },

    /// The kind declares no relationship with this name
    #[error("{kind} has no relationship `{name}`")]
    UnknownRelationship { kind: String, name: String },

    /// The storage attribute holds a value that is not a reference
    #[error("{owner}.{attribute} holds a {found} where a reference was expected")]
    InvalidStorage {
        owner: ObjectId,
        attribute: String,
        found: &'static str,
    },
}

impl RelationError {
    /// Check if this error is a dangling reference
    pub fn is_broken_reference(&self) -> bool {
        matches!(self, RelationError::BrokenReference { .. })
    }

    /// Check if this error is a rejected target kind
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, RelationError::TypeMismatch { .. })
    }

    /// Check if this error is an ambiguous inverse
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, RelationError::AmbiguousInverse { .. })
    }

    /// Check if this error is an unsupported operation
    pub fn is_unsupported(&self) -> bool {
        matches!(self, RelationError::UnsupportedOperation { .. })
    }

    /// Check if this error indicates a relationship name was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, RelationError::UnknownRelationship { .. })
    }

    /// Check if this error reveals an inconsistent graph rather than a bad
    /// call
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            RelationError::BrokenReference { .. }
                | RelationError::AmbiguousInverse { .. }
                | RelationError::InvalidStorage { .. }
        )
    }

    /// Get the relationship name if the error is tied to one
    pub fn relationship(&self) -> Option<&str> {
        match self {
            RelationError::TypeMismatch { relationship, .. }
            | RelationError::AmbiguousInverse { relationship, .. }
            | RelationError::UnsupportedOperation { relationship, .. } => Some(relationship),
            RelationError::UnknownRelationship { name, .. } => Some(name),
            _ => None,
        }
    }
}

// Conversion from RelationError to the main Error type
impl From<RelationError> for crate::Error {
    fn from(err: RelationError) -> Self {
        crate::Error::Relation(err)
    }
}
