//! Runtime reads and writes of declared relationships.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::RelationError;
use crate::Result;
use crate::collection::ObjectCollection;
use crate::object::{Object, ObjectId, Value};
use crate::schema::{Cardinality, Direction, RelationshipDescriptor, registry};

/// The four behaviours a relationship can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    /// Owner stores one identifier.
    DirectOne,
    /// Owner stores an ordered identifier list.
    DirectMany,
    /// Exactly one object of the target kind names the owner.
    InverseOne,
    /// Any number of objects of the target kind name the owner.
    InverseMany,
}

/// Reads and writes one relationship through an [`ObjectCollection`].
///
/// The accessor holds no object state; every call names the owner by
/// identifier and resolves it in the collection it is given. Writes validate
/// everything up front and only then mutate, so a failed write leaves the
/// graph untouched.
#[derive(Debug, Clone, Copy)]
pub struct Accessor {
    descriptor: &'static RelationshipDescriptor,
}

impl Accessor {
    /// Accessor for `descriptor`.
    pub fn new(descriptor: &'static RelationshipDescriptor) -> Self {
        Self { descriptor }
    }

    /// Accessor for the relationship `name` declared by the kind of `owner`.
    pub fn for_object(collection: &ObjectCollection, owner: &ObjectId, name: &str) -> Result<Self> {
        let object = collection.try_get(owner)?;
        Ok(Self::new(registry().lookup(object.kind(), name)?))
    }

    /// The descriptor driving this accessor.
    pub fn descriptor(&self) -> &'static RelationshipDescriptor {
        self.descriptor
    }

    /// Behaviour selected by cardinality and direction.
    pub fn kind(&self) -> AccessorKind {
        match (self.descriptor.cardinality, self.descriptor.direction) {
            (Cardinality::One, Direction::Direct { .. }) => AccessorKind::DirectOne,
            (Cardinality::Many, Direction::Direct { .. }) => AccessorKind::DirectMany,
            (Cardinality::One, Direction::Inverse { .. }) => AccessorKind::InverseOne,
            (Cardinality::Many, Direction::Inverse { .. }) => AccessorKind::InverseMany,
        }
    }

    /// Reads a to-one relationship.
    pub fn get_one<'c>(
        &self,
        collection: &'c ObjectCollection,
        owner: &ObjectId,
    ) -> Result<Option<&'c Object>> {
        match self.kind() {
            AccessorKind::DirectOne => self.direct_get_one(collection, owner),
            AccessorKind::InverseOne => self.inverse_get_one(collection, owner),
            _ => Err(self.unsupported("get_one")),
        }
    }

    /// Reads a to-many relationship, in stored order for direct relationships
    /// and collection order for inverse ones.
    pub fn get_many<'c>(
        &self,
        collection: &'c ObjectCollection,
        owner: &ObjectId,
    ) -> Result<Vec<&'c Object>> {
        match self.kind() {
            AccessorKind::DirectMany => self.direct_get_many(collection, owner),
            AccessorKind::InverseMany => self.inverse_get_many(collection, owner),
            _ => Err(self.unsupported("get_many")),
        }
    }

    /// Points a to-one relationship at `target`, or clears it with `None`.
    pub fn set_one(
        &self,
        collection: &mut ObjectCollection,
        owner: &ObjectId,
        target: Option<&ObjectId>,
    ) -> Result<()> {
        match self.kind() {
            AccessorKind::DirectOne => self.direct_set_one(collection, owner, target),
            AccessorKind::InverseOne => self.inverse_set_one(collection, owner, target),
            _ => Err(self.unsupported("set_one")),
        }
    }

    /// Replaces a to-many relationship with `targets`, verbatim and in order.
    pub fn set_many(
        &self,
        collection: &mut ObjectCollection,
        owner: &ObjectId,
        targets: &[ObjectId],
    ) -> Result<()> {
        self.set_many_with(collection, owner, targets, |_, _| {})
    }

    /// Like [`set_many`](Self::set_many), running `hook` once on every object
    /// that was not linked before the write, prior to committing it.
    pub fn set_many_with<F>(
        &self,
        collection: &mut ObjectCollection,
        owner: &ObjectId,
        targets: &[ObjectId],
        hook: F,
    ) -> Result<()>
    where
        F: FnMut(&Object, &mut Object),
    {
        match self.kind() {
            AccessorKind::DirectMany => self.direct_set_many(collection, owner, targets, hook),
            AccessorKind::InverseMany => self.inverse_set_many(),
            _ => Err(self.unsupported("set_many")),
        }
    }

    /// Appends `target` to a direct to-many relationship.
    pub fn push(
        &self,
        collection: &mut ObjectCollection,
        owner: &ObjectId,
        target: &ObjectId,
    ) -> Result<()> {
        self.push_with(collection, owner, target, |_, _| {})
    }

    /// Like [`push`](Self::push), running `hook` on `target` if it was not
    /// linked yet.
    pub fn push_with<F>(
        &self,
        collection: &mut ObjectCollection,
        owner: &ObjectId,
        target: &ObjectId,
        hook: F,
    ) -> Result<()>
    where
        F: FnMut(&Object, &mut Object),
    {
        if self.kind() != AccessorKind::DirectMany {
            return Err(self.unsupported("push"));
        }
        let mut targets = self.stored_ids(collection, owner)?;
        targets.push(target.clone());
        self.direct_set_many(collection, owner, &targets, hook)
    }

    /// Unlinks `target` from the owner. Returns false if it was not linked.
    pub fn remove(
        &self,
        collection: &mut ObjectCollection,
        owner: &ObjectId,
        target: &ObjectId,
    ) -> Result<bool> {
        match self.kind() {
            AccessorKind::DirectOne | AccessorKind::DirectMany => {
                let attribute = self.attribute();
                let removed = collection
                    .try_get(owner)?
                    .get(attribute)
                    .is_some_and(|value| value.references(target));
                if removed {
                    detach(collection, owner, attribute, target);
                    debug!(owner = %owner, relationship = self.descriptor.name, target = %target, "Unlinked object");
                }
                Ok(removed)
            }
            AccessorKind::InverseOne | AccessorKind::InverseMany => {
                let linked = self
                    .inverse_matches(collection, owner)
                    .iter()
                    .any(|object| object.id() == target);
                if linked {
                    let Some(attribute) = self.mirrored_attribute(collection.try_get(target)?)
                    else {
                        return Ok(false);
                    };
                    detach(collection, target, attribute, owner);
                    debug!(owner = %owner, relationship = self.descriptor.name, target = %target, "Unlinked object");
                }
                Ok(linked)
            }
        }
    }

    fn direct_get_one<'c>(
        &self,
        collection: &'c ObjectCollection,
        owner: &ObjectId,
    ) -> Result<Option<&'c Object>> {
        let attribute = self.attribute();
        match collection.try_get(owner)?.get(attribute) {
            None => Ok(None),
            Some(Value::Ref(id)) => Ok(Some(self.resolve(collection, owner, id)?)),
            Some(other) => Err(self.invalid_storage(owner, other)),
        }
    }

    fn direct_get_many<'c>(
        &self,
        collection: &'c ObjectCollection,
        owner: &ObjectId,
    ) -> Result<Vec<&'c Object>> {
        self.stored_ids(collection, owner)?
            .iter()
            .map(|id| self.resolve(collection, owner, id))
            .collect()
    }

    fn direct_set_one(
        &self,
        collection: &mut ObjectCollection,
        owner: &ObjectId,
        target: Option<&ObjectId>,
    ) -> Result<()> {
        collection.try_get(owner)?;
        let attribute = self.attribute();
        let Some(target) = target else {
            if let Some(object) = collection.get_mut(owner) {
                object.remove(attribute);
            }
            debug!(owner = %owner, relationship = self.descriptor.name, "Cleared relationship");
            return Ok(());
        };
        self.check_target(collection, owner, target)?;
        if registry().is_exclusive(self.descriptor) {
            self.detach_from_other_owners(collection, owner, target);
        }
        collection
            .try_get_mut(owner)?
            .set(attribute, Value::Ref(target.clone()));
        debug!(owner = %owner, relationship = self.descriptor.name, target = %target, "Set relationship");
        Ok(())
    }

    fn direct_set_many<F>(
        &self,
        collection: &mut ObjectCollection,
        owner: &ObjectId,
        targets: &[ObjectId],
        mut hook: F,
    ) -> Result<()>
    where
        F: FnMut(&Object, &mut Object),
    {
        let previous: HashSet<ObjectId> = self.stored_ids(collection, owner)?.into_iter().collect();
        // Targets already in the list were accepted when they were linked or
        // loaded, so only their presence is checked again.
        for target in targets {
            if previous.contains(target) {
                self.existing_target(collection, owner, target)?;
            } else {
                self.check_target(collection, owner, target)?;
            }
        }

        let mut seen = HashSet::new();
        let linked: Vec<&ObjectId> = targets
            .iter()
            .filter(|id| !previous.contains(*id) && seen.insert(*id))
            .collect();

        if !linked.is_empty() {
            let snapshot = collection.try_get(owner)?.clone();
            for id in &linked {
                hook(&snapshot, collection.try_get_mut(id)?);
            }
            if registry().is_exclusive(self.descriptor) {
                for id in &linked {
                    self.detach_from_other_owners(collection, owner, id);
                }
            }
        }

        collection
            .try_get_mut(owner)?
            .set(self.attribute(), Value::RefList(targets.to_vec()));
        debug!(
            owner = %owner,
            relationship = self.descriptor.name,
            count = targets.len(),
            linked = linked.len(),
            "Set relationship list"
        );
        Ok(())
    }

    fn inverse_get_one<'c>(
        &self,
        collection: &'c ObjectCollection,
        owner: &ObjectId,
    ) -> Result<Option<&'c Object>> {
        collection.try_get(owner)?;
        let mut matches = self.inverse_matches(collection, owner);
        if matches.len() > 1 {
            return Err(RelationError::AmbiguousInverse {
                owner: owner.clone(),
                relationship: self.descriptor.name.to_string(),
                matches: matches.iter().map(|object| object.id().clone()).collect(),
            }
            .into());
        }
        Ok(matches.pop())
    }

    fn inverse_get_many<'c>(
        &self,
        collection: &'c ObjectCollection,
        owner: &ObjectId,
    ) -> Result<Vec<&'c Object>> {
        collection.try_get(owner)?;
        Ok(self.inverse_matches(collection, owner))
    }

    fn inverse_set_one(
        &self,
        collection: &mut ObjectCollection,
        owner: &ObjectId,
        target: Option<&ObjectId>,
    ) -> Result<()> {
        let owner_kind = collection.try_get(owner)?.kind().clone();

        // Validate the new side before touching anything.
        let attach = match target {
            Some(target) => {
                self.check_target(collection, owner, target)?;
                let target_object = collection.try_get(target)?;
                let mirrored = target_object
                    .isa()
                    .and_then(|isa| registry().mirrored(self.descriptor, isa))
                    .ok_or_else(|| self.unsupported("set_one"))?;
                if !mirrored.target.matches(&owner_kind) {
                    return Err(RelationError::TypeMismatch {
                        relationship: mirrored.name.to_string(),
                        expected: mirrored.target.to_string(),
                        actual: owner_kind.tag().to_string(),
                    }
                    .into());
                }
                let attribute = self.mirrored_attribute(target_object).ok_or_else(|| {
                    self.unsupported("set_one")
                })?;
                match target_object.get(attribute) {
                    None | Some(Value::Ref(_)) | Some(Value::RefList(_)) => {}
                    Some(other) => {
                        return Err(RelationError::InvalidStorage {
                            owner: target.clone(),
                            attribute: attribute.to_string(),
                            found: other.type_name(),
                        }
                        .into());
                    }
                }
                Some((target.clone(), attribute, mirrored.cardinality))
            }
            None => None,
        };

        let current: Vec<(ObjectId, &'static str)> = self
            .inverse_matches(collection, owner)
            .into_iter()
            .filter_map(|object| {
                self.mirrored_attribute(object)
                    .map(|attribute| (object.id().clone(), attribute))
            })
            .collect();

        if let Some((target, _, _)) = &attach {
            if current.len() == 1 && current[0].0 == *target {
                return Ok(());
            }
        }

        for (previous, attribute) in &current {
            if attach.as_ref().is_some_and(|(target, _, _)| target == previous) {
                continue;
            }
            detach(collection, previous, attribute, owner);
            debug!(owner = %owner, relationship = self.descriptor.name, previous = %previous, "Detached from previous owner");
        }

        let Some((target, attribute, cardinality)) = attach else {
            return Ok(());
        };
        let object = collection.try_get_mut(&target)?;
        let already_linked = object
            .get(attribute)
            .is_some_and(|value| value.references(owner));
        if !already_linked {
            match cardinality {
                Cardinality::One => {
                    object.set(attribute, Value::Ref(owner.clone()));
                }
                Cardinality::Many => {
                    let mut ids = object
                        .get(attribute)
                        .and_then(Value::as_ref_list)
                        .map(<[ObjectId]>::to_vec)
                        .unwrap_or_default();
                    ids.push(owner.clone());
                    object.set(attribute, Value::RefList(ids));
                }
            }
        }
        debug!(owner = %owner, relationship = self.descriptor.name, target = %target, "Set inverse relationship");
        Ok(())
    }

    fn inverse_set_many(&self) -> Result<()> {
        Err(self.unsupported("set_many"))
    }

    /// Objects of the target kind whose mirrored direct relationship names
    /// `owner`, in collection order.
    fn inverse_matches<'c>(&self, collection: &'c ObjectCollection, owner: &ObjectId) -> Vec<&'c Object> {
        let matches: Vec<&Object> = collection
            .matching(self.descriptor.target)
            .filter(|candidate| {
                self.mirrored_attribute(candidate)
                    .and_then(|attribute| candidate.get(attribute))
                    .is_some_and(|value| value.references(owner))
            })
            .collect();
        trace!(
            owner = %owner,
            relationship = self.descriptor.name,
            matches = matches.len(),
            "Scanned inverse relationship"
        );
        matches
    }

    /// Storage attribute of the mirrored direct relationship on `object`.
    fn mirrored_attribute(&self, object: &Object) -> Option<&'static str> {
        let isa = object.isa()?;
        registry()
            .mirrored(self.descriptor, isa)
            .and_then(|mirrored| mirrored.storage_attribute())
    }

    /// Removes `target` from every other owner of this direct relationship.
    fn detach_from_other_owners(
        &self,
        collection: &mut ObjectCollection,
        owner: &ObjectId,
        target: &ObjectId,
    ) {
        let attribute = self.attribute();
        let others: Vec<ObjectId> = collection
            .matching(self.descriptor.owner)
            .filter(|object| object.id() != owner)
            .filter(|object| {
                object
                    .get(attribute)
                    .is_some_and(|value| value.references(target))
            })
            .map(|object| object.id().clone())
            .collect();
        for other in &others {
            detach(collection, other, attribute, target);
            debug!(
                target = %target,
                relationship = self.descriptor.name,
                previous = %other,
                "Moved object to a new owner"
            );
        }
    }

    /// Identifiers stored by a direct to-many relationship.
    fn stored_ids(&self, collection: &ObjectCollection, owner: &ObjectId) -> Result<Vec<ObjectId>> {
        match collection.try_get(owner)?.get(self.attribute()) {
            None => Ok(Vec::new()),
            Some(Value::RefList(ids)) => Ok(ids.clone()),
            Some(other) => Err(self.invalid_storage(owner, other)),
        }
    }

    fn resolve<'c>(
        &self,
        collection: &'c ObjectCollection,
        owner: &ObjectId,
        id: &ObjectId,
    ) -> Result<&'c Object> {
        collection.get(id).ok_or_else(|| {
            RelationError::BrokenReference {
                owner: owner.clone(),
                attribute: self.attribute().to_string(),
                id: id.clone(),
            }
            .into()
        })
    }

    fn existing_target<'c>(
        &self,
        collection: &'c ObjectCollection,
        owner: &ObjectId,
        target: &ObjectId,
    ) -> Result<&'c Object> {
        collection.get(target).ok_or_else(|| {
            RelationError::BrokenReference {
                owner: owner.clone(),
                attribute: self
                    .descriptor
                    .storage_attribute()
                    .unwrap_or(self.descriptor.name)
                    .to_string(),
                id: target.clone(),
            }
            .into()
        })
    }

    fn check_target(
        &self,
        collection: &ObjectCollection,
        owner: &ObjectId,
        target: &ObjectId,
    ) -> Result<()> {
        let object = self.existing_target(collection, owner, target)?;
        if !self.descriptor.target.matches(object.kind()) {
            return Err(RelationError::TypeMismatch {
                relationship: self.descriptor.name.to_string(),
                expected: self.descriptor.target.to_string(),
                actual: object.kind().tag().to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Storage attribute of a direct relationship; inverse accessors never
    /// call this.
    fn attribute(&self) -> &'static str {
        self.descriptor
            .storage_attribute()
            .unwrap_or(self.descriptor.name)
    }

    fn invalid_storage(&self, owner: &ObjectId, found: &Value) -> crate::Error {
        RelationError::InvalidStorage {
            owner: owner.clone(),
            attribute: self.attribute().to_string(),
            found: found.type_name(),
        }
        .into()
    }

    fn unsupported(&self, operation: &str) -> crate::Error {
        RelationError::UnsupportedOperation {
            operation: operation.to_string(),
            relationship: self.descriptor.name.to_string(),
        }
        .into()
    }
}

/// Drops `id` from the reference stored under `attribute` of `holder`.
fn detach(collection: &mut ObjectCollection, holder: &ObjectId, attribute: &str, id: &ObjectId) {
    let Some(object) = collection.get_mut(holder) else {
        return;
    };
    let clear = match object.attributes_mut().get_mut(attribute) {
        Some(Value::RefList(ids)) => {
            ids.retain(|stored| stored != id);
            false
        }
        Some(Value::Ref(stored)) => stored == id,
        _ => false,
    };
    if clear {
        object.remove(attribute);
    }
}
