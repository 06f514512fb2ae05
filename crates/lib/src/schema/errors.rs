//! Error types for the relationship schema.
//!
//! The schema is static data, so these errors indicate a defect in the
//! descriptor tables rather than in a document.

use thiserror::Error;

use crate::object::Isa;

/// Inconsistencies found while validating the relationship registry.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// An inverse names a relationship the target kind does not declare.
    #[error("{kind}.{relationship} is the inverse of missing {target}.{of}")]
    MissingInverse {
        /// Kind owning the inverse relationship
        kind: Isa,
        /// Name of the inverse relationship
        relationship: &'static str,
        /// Target kind lacking the direct relationship
        target: Isa,
        /// Name of the direct relationship that was expected
        of: &'static str,
    },

    /// An inverse points at another inverse instead of a direct relationship.
    #[error("{kind}.{relationship} is the inverse of {target}.{of}, which is itself an inverse")]
    InverseOfInverse {
        /// Kind owning the inverse relationship
        kind: Isa,
        /// Name of the inverse relationship
        relationship: &'static str,
        /// Target kind
        target: Isa,
        /// Name of the inverse found on the target
        of: &'static str,
    },

    /// Two relationships of one kind store into the same attribute, or one
    /// kind declares the same relationship name twice.
    #[error("{kind} declares `{name}` more than once")]
    Duplicate {
        /// Kind with the duplicate declaration
        kind: Isa,
        /// Duplicated relationship name or storage attribute
        name: &'static str,
    },
}

impl SchemaError {
    /// The kind whose declarations are inconsistent.
    pub fn kind(&self) -> Isa {
        match self {
            SchemaError::MissingInverse { kind, .. }
            | SchemaError::InverseOfInverse { kind, .. }
            | SchemaError::Duplicate { kind, .. } => *kind,
        }
    }
}

// Conversion from SchemaError to the main Error type
impl From<SchemaError> for crate::Error {
    fn from(err: SchemaError) -> Self {
        crate::Error::Schema(err)
    }
}
