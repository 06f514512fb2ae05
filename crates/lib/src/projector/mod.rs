//! Conversion between documents and object graphs.
//!
//! **Hydration** turns a decoded [`Document`] into a [`ProjectGraph`]:
//!
//! 1. Every entry of the flat `objects` dictionary becomes an [`Object`]
//!    under its identifier, in document order. Duplicate identifiers and
//!    malformed entries are recorded and skipped.
//! 2. For objects of a modelled kind, every attribute the schema declares as
//!    a direct relationship is converted into a reference value.
//! 3. A validation pass checks that every reference, and the root object,
//!    resolves.
//!
//! All violations found along the way are reported together in one
//! [`HydrationError`]. Objects whose `isa` is not modelled are kept verbatim
//! and never validated.
//!
//! **Dehydration** writes the graph back: objects in collection order, each
//! starting with its `isa`, references written as plain identifier strings.
//! `hydrate(dehydrate(graph))` reproduces the graph exactly.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::alloc::IdGenerator;
use crate::collection::ObjectCollection;
use crate::constants::{ISA, OBJECTS, ROOT_OBJECT};
use crate::document::{Dictionary, Document, PlistValue};
use crate::object::{Attributes, Object, ObjectId, ObjectKind, Value};
use crate::schema::{Cardinality, registry};

mod errors;

pub use errors::{HydrationError, Violation};

/// A hydrated project: the object collection, the root object and the
/// remaining top-level entries of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectGraph {
    /// Top-level entries in document order. `objects` and `rootObject` are
    /// placeholders refreshed on dehydration.
    pub header: Dictionary,
    /// Identifier of the root `PBXProject`
    pub root: ObjectId,
    /// Every object of the project
    pub objects: ObjectCollection,
}

/// Hydrates a document, drawing identifiers for objects created later from
/// OS entropy.
pub fn hydrate(document: &Document) -> Result<ProjectGraph, HydrationError> {
    hydrate_with(document, IdGenerator::random())
}

/// Hydrates a document, drawing identifiers for objects created later from
/// `generator`.
pub fn hydrate_with(
    document: &Document,
    generator: IdGenerator,
) -> Result<ProjectGraph, HydrationError> {
    let Some(objects) = document.get(OBJECTS) else {
        let mut violations = vec![Violation::MissingObjects];
        if document.root_object().is_none() {
            violations.push(Violation::MissingRootObject);
        }
        return Err(report(violations));
    };
    let Some(objects) = objects.as_dictionary() else {
        return Err(report(vec![Violation::MissingObjects]));
    };
    let entries = objects
        .iter()
        .chain(document.repeated_objects().iter().map(|(id, value)| (id, value)))
        .map(|(id, value)| (id.as_str(), value));
    let root = document.root_object();

    let (collection, root) = hydrate_entries(root, entries, generator)?;

    let mut header = document.entries().clone();
    header.insert(OBJECTS.to_string(), PlistValue::Dictionary(Dictionary::new()));
    Ok(ProjectGraph {
        header,
        root,
        objects: collection,
    })
}

/// Hydrates a stream of `(identifier, object map)` entries.
///
/// Unlike a decoded dictionary, the stream may repeat an identifier; every
/// repetition is reported as [`Violation::DuplicateIdentifier`].
pub fn hydrate_entries<'a, I>(
    root: Option<&str>,
    entries: I,
    generator: IdGenerator,
) -> Result<(ObjectCollection, ObjectId), HydrationError>
where
    I: IntoIterator<Item = (&'a str, &'a PlistValue)>,
{
    let mut violations = Vec::new();
    let mut collection = ObjectCollection::with_generator(generator);
    let mut unknown_kinds = HashSet::new();

    for (id, entry) in entries {
        let id = ObjectId::new(id);
        if collection.register(&id).is_err() {
            violations.push(Violation::DuplicateIdentifier { id });
            continue;
        }
        let Some(map) = entry.as_dictionary() else {
            violations.push(Violation::MalformedObject {
                id,
                reason: format!("expected a dictionary, found a {}", entry.type_name()),
            });
            continue;
        };
        let Some(tag) = map.get(ISA).and_then(PlistValue::as_str) else {
            violations.push(Violation::MissingIsa { id });
            continue;
        };
        let kind = ObjectKind::from_tag(tag);
        if kind.is_unknown() && unknown_kinds.insert(tag.to_string()) {
            warn!(isa = %tag, id = %id, "Unknown object kind, keeping it verbatim");
        }

        let mut attributes: Attributes = map
            .iter()
            .filter(|(key, _)| key.as_str() != ISA)
            .map(|(key, value)| (key.clone(), to_value(value)))
            .collect();
        if let Err(reason) = convert_references(&kind, &mut attributes) {
            violations.push(Violation::MalformedObject { id, reason });
            continue;
        }
        if collection.insert(Object::new(id.clone(), kind, attributes)).is_err() {
            violations.push(Violation::DuplicateIdentifier { id });
        }
    }

    for object in collection.iter() {
        let Some(isa) = object.isa() else {
            continue;
        };
        for descriptor in registry().direct(isa) {
            let Some(attribute) = descriptor.storage_attribute() else {
                continue;
            };
            let Some(value) = object.get(attribute) else {
                continue;
            };
            for id in value.referenced_ids() {
                if !collection.contains(id) {
                    violations.push(Violation::BrokenReference {
                        owner: object.id().clone(),
                        attribute: attribute.to_string(),
                        id: id.clone(),
                    });
                }
            }
        }
    }

    let root = match root {
        None => {
            violations.push(Violation::MissingRootObject);
            None
        }
        Some(root) => {
            let root = ObjectId::new(root);
            if collection.contains(&root) {
                Some(root)
            } else {
                violations.push(Violation::BrokenRootObject { id: root });
                None
            }
        }
    };

    match root {
        Some(root) if violations.is_empty() => {
            info!(
                objects = collection.len(),
                unknown_kinds = unknown_kinds.len(),
                root = %root,
                "Hydrated project"
            );
            Ok((collection, root))
        }
        _ => Err(report(violations)),
    }
}

/// Flattens a graph back into a document.
pub fn dehydrate(graph: &ProjectGraph) -> Document {
    let mut objects = Dictionary::new();
    for object in graph.objects.iter() {
        objects.insert(object.id().to_string(), PlistValue::Dictionary(object_map(object)));
    }
    let mut document = Document::from_entries(graph.header.clone());
    document.insert(OBJECTS, objects);
    document.insert(ROOT_OBJECT, graph.root.to_string());
    document
}

/// The document form of one object: `isa` first, then its attributes in
/// stored order.
pub fn object_map(object: &Object) -> Dictionary {
    let mut map = Dictionary::with_capacity(object.attributes().len() + 1);
    map.insert(ISA.to_string(), PlistValue::from(object.kind().tag()));
    for (key, value) in object.attributes() {
        map.insert(key.clone(), to_plist(value));
    }
    map
}

fn report(violations: Vec<Violation>) -> HydrationError {
    for violation in &violations {
        warn!(%violation, "Hydration violation");
    }
    HydrationError::new(violations)
}

/// Rewrites the identifier-bearing attributes of a modelled kind as
/// references.
fn convert_references(kind: &ObjectKind, attributes: &mut Attributes) -> Result<(), String> {
    let Some(isa) = kind.isa() else {
        return Ok(());
    };
    for descriptor in registry().direct(isa) {
        let Some(attribute) = descriptor.storage_attribute() else {
            continue;
        };
        let Some(value) = attributes.get_mut(attribute) else {
            continue;
        };
        let converted = match (descriptor.cardinality, &*value) {
            (Cardinality::One, Value::Text(id)) => Value::Ref(ObjectId::new(id.as_str())),
            (Cardinality::Many, Value::List(items)) => {
                let ids: Option<Vec<ObjectId>> = items
                    .iter()
                    .map(|item| item.as_text().map(ObjectId::new))
                    .collect();
                match ids {
                    Some(ids) => Value::RefList(ids),
                    None => return Err(format!("`{attribute}` must list identifier strings")),
                }
            }
            (Cardinality::One, other) => {
                return Err(format!(
                    "`{attribute}` must be an identifier string, found a {}",
                    other.type_name()
                ));
            }
            (Cardinality::Many, other) => {
                return Err(format!(
                    "`{attribute}` must be an array of identifiers, found a {}",
                    other.type_name()
                ));
            }
        };
        *value = converted;
    }
    Ok(())
}

fn to_value(value: &PlistValue) -> Value {
    match value {
        PlistValue::Bool(b) => Value::Bool(*b),
        PlistValue::Integer(n) => Value::Int(*n),
        PlistValue::Real(n) => Value::Real(*n),
        PlistValue::String(s) => Value::Text(s.clone()),
        PlistValue::Array(items) => Value::List(items.iter().map(to_value).collect()),
        PlistValue::Dictionary(map) => Value::Dict(
            map.iter()
                .map(|(key, value)| (key.clone(), to_value(value)))
                .collect(),
        ),
    }
}

fn to_plist(value: &Value) -> PlistValue {
    match value {
        Value::Text(s) => PlistValue::String(s.clone()),
        Value::Bool(b) => PlistValue::Bool(*b),
        Value::Int(n) => PlistValue::Integer(*n),
        Value::Real(n) => PlistValue::Real(*n),
        Value::List(items) => PlistValue::Array(items.iter().map(to_plist).collect()),
        Value::Dict(map) => PlistValue::Dictionary(
            map.iter()
                .map(|(key, value)| (key.clone(), to_plist(value)))
                .collect(),
        ),
        Value::Ref(id) => PlistValue::String(id.to_string()),
        Value::RefList(ids) => {
            PlistValue::Array(ids.iter().map(|id| PlistValue::String(id.to_string())).collect())
        }
    }
}
