//!
//! pbxgraph: an in-memory object graph for Xcode project documents.
//! This library loads the flat identifier → object map of a project file into
//! typed objects, lets tools navigate and edit them through named
//! relationships, and flattens the result back into an equivalent document.
//!
//! ## Core Concepts
//!
//! * **Objects (`object::Object`)**: Typed records with an identifier, a kind (`isa`) and ordered attributes. Objects name each other by identifier only.
//! * **Collection (`collection::ObjectCollection`)**: The identifier → object map of one project. It allocates identifiers and guarantees that no identifier is ever issued twice.
//! * **Schema (`schema::Registry`)**: Static tables describing, per kind, which attributes are relationships, their cardinality and target kinds, and which relationships are the computed inverse of another.
//! * **Accessors (`relation::Accessor`)**: Read and write relationships while keeping both sides consistent.
//! * **Projector (`projector`)**: Hydrates a decoded document into a graph, validating it, and dehydrates a graph back into a document.
//! * **Project (`project::Project`)**: The façade used by tools: scaffolding, groups, files, targets, build phases, dependencies and predictable identifiers.
//! * **Natural sort (`natural_sort`)**: Orders names the way Xcode lists them.

pub mod alloc;
pub mod collection;
pub mod config;
pub mod constants;
pub mod document;
pub mod natural_sort;
pub mod object;
pub mod project;
pub mod projector;
pub mod relation;
pub mod schema;

/// Re-export the most used types for easier access.
pub use collection::ObjectCollection;
pub use config::ProjectOptions;
pub use document::{Document, JsonCodec, PlistCodec};
pub use object::{Isa, Object, ObjectId, Value};
pub use project::Project;

/// Result type used throughout the pbxgraph library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the pbxgraph library.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured identifier and storage errors from the collection module
    #[error(transparent)]
    Collection(collection::CollectionError),

    /// Structured relationship errors from the relation module
    #[error(transparent)]
    Relation(relation::RelationError),

    /// Structured schema table errors from the schema module
    #[error(transparent)]
    Schema(schema::SchemaError),

    /// Structured document validation errors from the projector module
    #[error(transparent)]
    Hydration(projector::HydrationError),

    /// Structured encoding and file errors from the document module
    #[error(transparent)]
    Codec(document::CodecError),

    /// Structured errors from the project helpers
    #[error(transparent)]
    Project(project::ProjectError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Collection(_) => "collection",
            Error::Relation(_) => "relation",
            Error::Schema(_) => "schema",
            Error::Hydration(_) => "projector",
            Error::Codec(_) => "document",
            Error::Project(_) => "project",
        }
    }

    /// Check if this error indicates an object, relationship or file was not
    /// found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Collection(collection_err) => collection_err.is_not_found(),
            Error::Relation(relation_err) => relation_err.is_not_found(),
            Error::Codec(codec_err) => codec_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error reports an identifier used twice.
    pub fn is_duplicate(&self) -> bool {
        match self {
            Error::Collection(collection_err) => collection_err.is_duplicate(),
            Error::Hydration(hydration_err) => hydration_err.has_duplicates(),
            _ => false,
        }
    }

    /// Check if this error reports a reference to a missing object.
    pub fn is_broken_reference(&self) -> bool {
        match self {
            Error::Relation(relation_err) => relation_err.is_broken_reference(),
            Error::Hydration(hydration_err) => hydration_err.has_broken_references(),
            _ => false,
        }
    }

    /// Check if this error is a rejected object kind.
    pub fn is_type_mismatch(&self) -> bool {
        match self {
            Error::Relation(relation_err) => relation_err.is_type_mismatch(),
            Error::Project(project_err) => project_err.is_kind_error(),
            _ => false,
        }
    }

    /// Check if this error reveals a malformed graph or schema rather than a
    /// rejected request.
    pub fn is_structural(&self) -> bool {
        match self {
            Error::Relation(relation_err) => relation_err.is_structural(),
            Error::Project(project_err) => project_err.is_structural(),
            Error::Schema(_) | Error::Hydration(_) => true,
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Codec(codec_err) => codec_err.is_io_error(),
            _ => false,
        }
    }

    /// Check if this error is a document encoding or decoding failure.
    pub fn is_serialization_error(&self) -> bool {
        match self {
            Error::Codec(codec_err) => codec_err.is_serialization_error(),
            _ => false,
        }
    }
}
