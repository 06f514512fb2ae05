//! Reading and writing relationships between objects.
//!
//! An [`Accessor`] binds a [`RelationshipDescriptor`](crate::schema::RelationshipDescriptor)
//! to runtime behaviour. Which of the four behaviours applies is decided by
//! the descriptor alone:
//!
//! | cardinality | direct                          | inverse                                  |
//! |-------------|---------------------------------|------------------------------------------|
//! | one         | owner stores one identifier     | the single target naming the owner       |
//! | many        | owner stores an ordered list    | every target naming the owner, in order  |
//!
//! Writes keep both sides consistent in one step. Linking an object through a
//! relationship whose targets may have only one owner (a file belongs to one
//! group, a build phase to one target) unlinks it from its previous owner
//! first. Assigning a to-one inverse rewrites the direct storage of the old and
//! new target. Assigning a to-many inverse is rejected as ambiguous.
//!
//! The [`ObjectCollection`] methods defined here look the relationship up by
//! name on the owner's kind:
//!
//! ```
//! use pbxgraph::collection::ObjectCollection;
//! use pbxgraph::object::{Attributes, Isa};
//!
//! let mut objects = ObjectCollection::new();
//! let group = objects.create(Isa::PBXGroup, Attributes::new())?;
//! let file = objects.create(Isa::PBXFileReference, Attributes::new())?;
//!
//! objects.push(&group, "children", &file)?;
//! let parent = objects.get_one(&file, "group")?.map(|object| object.id().clone());
//! assert_eq!(parent, Some(group));
//! # Ok::<(), pbxgraph::Error>(())
//! ```

mod accessor;
mod errors;

pub use accessor::{Accessor, AccessorKind};
pub use errors::RelationError;

use crate::Result;
use crate::collection::ObjectCollection;
use crate::object::{Object, ObjectId};

impl ObjectCollection {
    /// Accessor for the relationship `name` of `owner`.
    pub fn accessor(&self, owner: &ObjectId, name: &str) -> Result<Accessor> {
        Accessor::for_object(self, owner, name)
    }

    /// Reads the to-one relationship `name` of `owner`.
    pub fn get_one(&self, owner: &ObjectId, name: &str) -> Result<Option<&Object>> {
        self.accessor(owner, name)?.get_one(self, owner)
    }

    /// Reads the to-many relationship `name` of `owner`.
    pub fn get_many(&self, owner: &ObjectId, name: &str) -> Result<Vec<&Object>> {
        self.accessor(owner, name)?.get_many(self, owner)
    }

    /// Writes the to-one relationship `name` of `owner`.
    pub fn set_one(&mut self, owner: &ObjectId, name: &str, target: Option<&ObjectId>) -> Result<()> {
        self.accessor(owner, name)?.set_one(self, owner, target)
    }

    /// Replaces the to-many relationship `name` of `owner`.
    pub fn set_many(&mut self, owner: &ObjectId, name: &str, targets: &[ObjectId]) -> Result<()> {
        self.accessor(owner, name)?.set_many(self, owner, targets)
    }

    /// Appends `target` to the to-many relationship `name` of `owner`.
    pub fn push(&mut self, owner: &ObjectId, name: &str, target: &ObjectId) -> Result<()> {
        self.accessor(owner, name)?.push(self, owner, target)
    }

    /// Unlinks `target` from the relationship `name` of `owner`.
    pub fn unlink(&mut self, owner: &ObjectId, name: &str, target: &ObjectId) -> Result<bool> {
        self.accessor(owner, name)?.remove(self, owner, target)
    }
}
