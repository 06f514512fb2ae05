//! The indexed set of all objects of a project.
//!
//! [`ObjectCollection`] exclusively owns every [`Object`]. It keeps the
//! identifier → object map together with the first-insertion order used when
//! writing the document back, and it is the single authority on which
//! identifiers have been issued. An identifier, once registered or allocated,
//! is never handed out again, even after its object is removed.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::Result;
use crate::alloc::IdGenerator;
use crate::object::{Attributes, Isa, KindMatch, Object, ObjectId, ObjectKind, Value};

mod errors;

pub use errors::CollectionError;

/// Upper bound on rejected candidates before allocation gives up.
const MAX_ALLOCATION_ATTEMPTS: usize = 1024;

/// A place in the graph that stores a reference: the owning object and the
/// attribute holding the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Referrer {
    /// Object whose attribute holds the reference
    pub owner: ObjectId,
    /// Attribute holding the reference
    pub attribute: String,
}

/// The full set of objects of a project, keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct ObjectCollection {
    objects: HashMap<ObjectId, Object>,
    /// First-insertion order; an exact listing of `objects.keys()`.
    order: Vec<ObjectId>,
    /// Every identifier ever registered or allocated.
    issued: HashSet<ObjectId>,
    /// Identifiers of removed objects.
    retired: HashSet<ObjectId>,
    generator: IdGenerator,
}

impl PartialEq for ObjectCollection {
    /// Two collections are equal when they hold the same objects in the same
    /// order; the generator state is irrelevant.
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order && self.objects == other.objects
    }
}

impl ObjectCollection {
    /// Creates an empty collection drawing identifiers from OS entropy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty collection drawing identifiers from `generator`.
    pub fn with_generator(generator: IdGenerator) -> Self {
        Self {
            generator,
            ..Self::default()
        }
    }

    /// Replaces the identifier generator used for future allocations.
    pub fn set_generator(&mut self, generator: IdGenerator) {
        self.generator = generator;
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if there are no objects.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns true if an object with this identifier exists.
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Returns true if the identifier was ever registered or allocated here.
    pub fn is_issued(&self, id: &ObjectId) -> bool {
        self.issued.contains(id)
    }

    /// Looks up an object.
    pub fn get(&self, id: &ObjectId) -> Option<&Object> {
        self.objects.get(id)
    }

    /// Looks up an object mutably.
    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id)
    }

    /// Looks up an object, failing with [`CollectionError::ObjectNotFound`].
    pub fn try_get(&self, id: &ObjectId) -> Result<&Object> {
        self.objects.get(id).ok_or_else(|| {
            CollectionError::ObjectNotFound { id: id.clone() }.into()
        })
    }

    /// Looks up an object mutably, failing with
    /// [`CollectionError::ObjectNotFound`].
    pub fn try_get_mut(&mut self, id: &ObjectId) -> Result<&mut Object> {
        self.objects.get_mut(id).ok_or_else(|| {
            CollectionError::ObjectNotFound { id: id.clone() }.into()
        })
    }

    /// Identifiers in first-insertion order.
    pub fn order(&self) -> &[ObjectId] {
        &self.order
    }

    /// Objects in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Object> {
        self.order.iter().filter_map(|id| self.objects.get(id))
    }

    /// Objects of one kind, in collection order.
    pub fn of_kind(&self, isa: Isa) -> impl Iterator<Item = &Object> {
        self.iter().filter(move |object| object.is(isa))
    }

    /// Objects accepted by `kinds`, in collection order.
    pub fn matching(&self, kinds: KindMatch) -> impl Iterator<Item = &Object> {
        self.iter().filter(move |object| kinds.matches(object.kind()))
    }

    /// Objects whose kind is not modelled, in collection order.
    pub fn unknown(&self) -> impl Iterator<Item = &Object> {
        self.iter().filter(|object| object.kind().is_unknown())
    }

    /// First object of `isa` whose text attribute equals `value`.
    pub fn find_by_attribute(&self, isa: Isa, attribute: &str, value: &str) -> Option<&Object> {
        self.of_kind(isa)
            .find(|object| object.get_text(attribute) == Some(value))
    }

    /// Reserves a caller-supplied identifier.
    ///
    /// Fails with [`CollectionError::DuplicateIdentifier`] if the identifier
    /// was already registered or allocated in this collection.
    pub fn register(&mut self, id: &ObjectId) -> Result<()> {
        if !self.issued.insert(id.clone()) {
            return Err(CollectionError::DuplicateIdentifier { id: id.clone() }.into());
        }
        Ok(())
    }

    /// Mints and reserves a fresh identifier.
    ///
    /// The identifier is distinct from every identifier ever issued by this
    /// collection, including those of removed objects and those reserved but
    /// not yet attached to an object.
    pub fn allocate(&mut self) -> Result<ObjectId> {
        for _ in 0..MAX_ALLOCATION_ATTEMPTS {
            let candidate = self.generator.next_candidate();
            if self.issued.insert(candidate.clone()) {
                return Ok(candidate);
            }
        }
        Err(CollectionError::IdentifierExhausted {
            attempts: MAX_ALLOCATION_ATTEMPTS,
        }
        .into())
    }

    /// Adds an object under its identifier.
    ///
    /// The identifier may have been reserved beforehand with
    /// [`register`](Self::register) or [`allocate`](Self::allocate); otherwise
    /// it is registered now. Fails if an object with the same identifier is
    /// present or was removed earlier.
    pub fn insert(&mut self, object: Object) -> Result<&Object> {
        let id = object.id().clone();
        if self.objects.contains_key(&id) || self.retired.contains(&id) {
            return Err(CollectionError::DuplicateIdentifier { id }.into());
        }
        self.issued.insert(id.clone());
        self.order.push(id.clone());
        let object = self.objects.entry(id).or_insert(object);
        Ok(&*object)
    }

    /// Creates an object of `kind` under a freshly allocated identifier.
    pub fn create(
        &mut self,
        kind: impl Into<ObjectKind>,
        attributes: Attributes,
    ) -> Result<ObjectId> {
        let id = self.allocate()?;
        let kind = kind.into();
        debug!(id = %id, kind = %kind, "Creating object");
        self.insert(Object::new(id.clone(), kind, attributes))?;
        Ok(id)
    }

    /// Every place storing a reference to `id`, in collection order.
    pub fn referrers(&self, id: &ObjectId) -> Vec<Referrer> {
        self.iter()
            .flat_map(|object| {
                object
                    .attributes()
                    .iter()
                    .filter(|(_, value)| value.references(id))
                    .map(|(attribute, _)| Referrer {
                        owner: object.id().clone(),
                        attribute: attribute.clone(),
                    })
            })
            .collect()
    }

    /// Removes every reference to `id` held by other objects.
    ///
    /// List entries are dropped and single references are cleared. Returns
    /// the places that were severed.
    pub fn sever(&mut self, id: &ObjectId) -> Vec<Referrer> {
        let referrers = self.referrers(id);
        for referrer in &referrers {
            let Some(owner) = self.objects.get_mut(&referrer.owner) else {
                continue;
            };
            match owner.get(&referrer.attribute) {
                Some(Value::Ref(_)) => {
                    owner.remove(&referrer.attribute);
                }
                Some(Value::RefList(_)) => {
                    if let Some(Value::RefList(ids)) =
                        owner.attributes_mut().get_mut(&referrer.attribute)
                    {
                        ids.retain(|stored| stored != id);
                    }
                }
                _ => {}
            }
        }
        referrers
    }

    /// Removes an object, severing every reference to it first.
    ///
    /// The identifier stays issued and will not be allocated again.
    pub fn remove(&mut self, id: &ObjectId) -> Result<Object> {
        if !self.objects.contains_key(id) {
            return Err(CollectionError::ObjectNotFound { id: id.clone() }.into());
        }
        let severed = self.sever(id);
        self.order.retain(|stored| stored != id);
        self.retired.insert(id.clone());
        let object = self
            .objects
            .remove(id)
            .ok_or_else(|| CollectionError::ObjectNotFound { id: id.clone() })?;
        debug!(id = %id, kind = %object.kind(), severed = severed.len(), "Removed object");
        Ok(object)
    }

    /// Renames an object, rewriting every stored reference to it.
    ///
    /// The object keeps its position in the collection order.
    pub(crate) fn rename(&mut self, from: &ObjectId, to: &ObjectId) -> Result<()> {
        if from == to {
            return Ok(());
        }
        // Removed identifiers stay retired, so a rename cannot bring one back.
        if self.objects.contains_key(to) || self.retired.contains(to) {
            return Err(CollectionError::DuplicateIdentifier { id: to.clone() }.into());
        }
        let mut object = self
            .objects
            .remove(from)
            .ok_or_else(|| CollectionError::ObjectNotFound { id: from.clone() })?;
        object.set_id(to.clone());
        self.objects.insert(to.clone(), object);
        self.issued.insert(to.clone());
        if let Some(slot) = self.order.iter_mut().find(|stored| **stored == *from) {
            *slot = to.clone();
        }
        for object in self.objects.values_mut() {
            for value in object.attributes_mut().values_mut() {
                match value {
                    Value::Ref(stored) if *stored == *from => *stored = to.clone(),
                    Value::RefList(ids) => {
                        for stored in ids.iter_mut().filter(|stored| **stored == *from) {
                            *stored = to.clone();
                        }
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}
