//! The object model of a project document.
//!
//! An [`Object`] is a typed record: an identifier, a kind and an ordered map of
//! attributes. Objects never hold references to each other; related objects are
//! named by identifier and resolved through the owning
//! [`ObjectCollection`](crate::collection::ObjectCollection).

mod id;
mod kind;
mod value;

pub use id::ObjectId;
pub use kind::{
    BUILD_PHASES, FILE_LIKE, GROUP_CHILDREN, GROUPS, Isa, KindMatch, ObjectKind, PACKAGE_REFERENCES,
    SYNCHRONIZED_EXCEPTION_SETS, TARGETS,
};
pub use value::{Attributes, Value};

/// A single addressable entity of the project graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    id: ObjectId,
    kind: ObjectKind,
    attributes: Attributes,
}

impl Object {
    /// Creates an object with the given attributes.
    pub fn new(id: ObjectId, kind: impl Into<ObjectKind>, attributes: Attributes) -> Self {
        Self {
            id,
            kind: kind.into(),
            attributes,
        }
    }

    /// The identifier of the object.
    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    /// The kind of the object.
    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    /// The modelled kind, `None` for opaque objects.
    pub fn isa(&self) -> Option<Isa> {
        self.kind.isa()
    }

    /// Returns true if the object is of the given kind.
    pub fn is(&self, isa: Isa) -> bool {
        self.isa() == Some(isa)
    }

    /// All attributes in stored order. The `isa` tag is not among them.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Mutable access to the attributes.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Reads an attribute.
    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.attributes.get(attribute)
    }

    /// Reads a text attribute.
    pub fn get_text(&self, attribute: &str) -> Option<&str> {
        self.get(attribute).and_then(Value::as_text)
    }

    /// Writes an attribute, keeping its position if it already exists.
    pub fn set(&mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.attributes.insert(attribute.into(), value.into())
    }

    /// Writes an attribute only if it is absent.
    pub fn set_default(&mut self, attribute: &str, value: impl Into<Value>) {
        if !self.attributes.contains_key(attribute) {
            self.attributes.insert(attribute.to_string(), value.into());
        }
    }

    /// Removes an attribute, preserving the order of the others.
    pub fn remove(&mut self, attribute: &str) -> Option<Value> {
        self.attributes.shift_remove(attribute)
    }

    /// The `name` attribute.
    pub fn name(&self) -> Option<&str> {
        self.get_text("name")
    }

    /// The `path` attribute.
    pub fn path(&self) -> Option<&str> {
        self.get_text("path")
    }

    pub(crate) fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }
}

impl std::fmt::Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name().or_else(|| self.path()) {
            Some(name) => write!(f, "<{} {} `{}`>", self.kind, self.id, name),
            None => write!(f, "<{} {}>", self.kind, self.id),
        }
    }
}
