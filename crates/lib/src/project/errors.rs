//! Error types for project-level operations.

use thiserror::Error;

use crate::object::ObjectId;

/// Errors raised by the [`Project`](super::Project) helpers.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    /// The root object cannot be removed
    #[error("Cannot remove the root object {id}")]
    RootObjectRemoval { id: ObjectId },

    /// A group was expected
    #[error("{id} is a {kind}, not a group")]
    NotAGroup { id: ObjectId, kind: String },

    /// The object is not of the kind the operation works on
    #[error("{id} is a {actual}, expected {expected}")]
    InvalidKind {
        id: ObjectId,
        expected: String,
        actual: String,
    },

    /// A required to-one relationship has no value
    #[error("{owner} has no `{relationship}`")]
    Unset {
        owner: ObjectId,
        relationship: String,
    },
}

impl ProjectError {
    /// Check if this error is a rejected object kind
    pub fn is_kind_error(&self) -> bool {
        matches!(
            self,
            ProjectError::NotAGroup { .. } | ProjectError::InvalidKind { .. }
        )
    }

    /// Check if this error reveals an incomplete graph
    pub fn is_structural(&self) -> bool {
        matches!(self, ProjectError::Unset { .. })
    }
}

// Conversion from ProjectError to the main Error type
impl From<ProjectError> for crate::Error {
    fn from(err: ProjectError) -> Self {
        crate::Error::Project(err)
    }
}
