//! Error types for hydration.
//!
//! Hydration does not stop at the first problem. Every structural violation
//! found in one pass over the document is collected into a single
//! [`HydrationError`].

use std::fmt;

use thiserror::Error;

use crate::object::ObjectId;

/// One structural problem found in a document.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// Two objects share an identifier
    #[error("duplicate identifier {id}")]
    DuplicateIdentifier { id: ObjectId },

    /// A reference attribute names an object that does not exist
    #[error("{owner}.{attribute} references missing object {id}")]
    BrokenReference {
        owner: ObjectId,
        attribute: String,
        id: ObjectId,
    },

    /// An object map has no `isa` tag
    #[error("object {id} has no isa")]
    MissingIsa { id: ObjectId },

    /// An object entry is not shaped like an object
    #[error("object {id} is malformed: {reason}")]
    MalformedObject { id: ObjectId, reason: String },

    /// The document has no `rootObject` entry
    #[error("document has no root object")]
    MissingRootObject,

    /// The `rootObject` entry names an object that does not exist
    #[error("root object {id} does not exist")]
    BrokenRootObject { id: ObjectId },

    /// The document has no `objects` dictionary
    #[error("document has no objects dictionary")]
    MissingObjects,
}

impl Violation {
    /// Check if this violation is a duplicate identifier
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Violation::DuplicateIdentifier { .. })
    }

    /// Check if this violation is a dangling reference
    pub fn is_broken_reference(&self) -> bool {
        matches!(
            self,
            Violation::BrokenReference { .. } | Violation::BrokenRootObject { .. }
        )
    }

    /// The identifier the violation is about, if any
    pub fn id(&self) -> Option<&ObjectId> {
        match self {
            Violation::DuplicateIdentifier { id }
            | Violation::BrokenReference { id, .. }
            | Violation::MissingIsa { id }
            | Violation::MalformedObject { id, .. }
            | Violation::BrokenRootObject { id } => Some(id),
            Violation::MissingRootObject | Violation::MissingObjects => None,
        }
    }
}

/// Every violation found while hydrating one document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Hydration failed with {} violation(s): {}", .violations.len(), Summary(.violations))]
pub struct HydrationError {
    violations: Vec<Violation>,
}

impl HydrationError {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// All violations, in the order they were found.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Check if any violation is a duplicate identifier
    pub fn has_duplicates(&self) -> bool {
        self.violations.iter().any(Violation::is_duplicate)
    }

    /// Check if any violation is a dangling reference
    pub fn has_broken_references(&self) -> bool {
        self.violations.iter().any(Violation::is_broken_reference)
    }

    /// Identifiers named by dangling references, in the order found.
    pub fn broken_ids(&self) -> Vec<&ObjectId> {
        self.violations
            .iter()
            .filter(|violation| violation.is_broken_reference())
            .filter_map(Violation::id)
            .collect()
    }
}

struct Summary<'a>(&'a [Violation]);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

// Conversion from HydrationError to the main Error type
impl From<HydrationError> for crate::Error {
    fn from(err: HydrationError) -> Self {
        crate::Error::Hydration(err)
    }
}
