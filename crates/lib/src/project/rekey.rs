//! Predictable identifiers.
//!
//! Every object reachable from the root through direct relationships gets an
//! identifier derived from the path that first reaches it, so that two tools
//! building the same project produce the same document. Paths name the
//! storage attribute of each to-one hop; to-many hops add a structural
//! summary of the element so siblings stay apart.

use std::collections::HashSet;

use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use super::Project;
use crate::Result;
use crate::collection::ObjectCollection;
use crate::constants::ID_LENGTH;
use crate::object::{Isa, ObjectId, Value};
use crate::schema::registry;

/// How deep the element summary of a to-many hop looks into the graph.
const SUMMARY_DEPTH: usize = 4;

impl Project {
    /// Rewrites identifiers to values derived from each object's path from
    /// the root.
    ///
    /// Unreachable objects keep their identifiers. When two paths hash to the
    /// same identifier the later object keeps its own and a warning is
    /// logged. Returns the applied renames in collection order.
    pub fn predictable_ids(&mut self) -> Result<Vec<(ObjectId, ObjectId)>> {
        let mut paths = IndexMap::new();
        collect_paths(&self.graph.objects, &self.graph.root, String::new(), &mut paths);

        let mut planned = Vec::new();
        let mut seen = HashSet::new();
        for id in self.graph.objects.order() {
            let Some(path) = paths.get(id) else {
                continue;
            };
            let candidate = id_for_path(path);
            if seen.insert(candidate.clone()) {
                planned.push((id.clone(), candidate));
            } else {
                warn!(id = %id, path = %path, candidate = %candidate, "Generated duplicate identifier");
            }
        }

        let mut applied = Vec::with_capacity(planned.len());
        for (from, to) in planned {
            match self.graph.objects.rename(&from, &to) {
                Ok(()) => applied.push((from, to)),
                Err(err) if err.is_duplicate() => {
                    warn!(id = %from, candidate = %to, "Identifier already taken, keeping the old one");
                }
                Err(err) => return Err(err),
            }
        }

        let renamed: IndexMap<&ObjectId, &ObjectId> =
            applied.iter().map(|(from, to)| (from, to)).collect();
        if let Some(new_root) = renamed.get(&self.graph.root) {
            self.graph.root = (*new_root).clone();
        }
        fix_plain_identifiers(&mut self.graph.objects, &self.graph.root, &renamed);

        info!(renamed = applied.len(), objects = self.graph.objects.len(), "Assigned predictable identifiers");
        Ok(applied)
    }
}

/// Walks the direct relationships depth first. The first path reaching an
/// object is kept.
fn collect_paths(
    objects: &ObjectCollection,
    id: &ObjectId,
    path: String,
    paths: &mut IndexMap<ObjectId, String>,
) {
    if paths.contains_key(id) {
        return;
    }
    let Some(object) = objects.get(id) else {
        return;
    };
    paths.insert(id.clone(), path.clone());
    let Some(isa) = object.isa() else {
        return;
    };
    for descriptor in registry().direct(isa) {
        let Some(attribute) = descriptor.storage_attribute() else {
            continue;
        };
        match object.get(attribute) {
            Some(Value::Ref(target)) => {
                collect_paths(objects, target, format!("{path}/{attribute}"), paths);
            }
            Some(Value::RefList(targets)) => {
                for target in targets {
                    let component = summarize_object(objects, target, SUMMARY_DEPTH);
                    collect_paths(
                        objects,
                        target,
                        format!("{path}/{attribute}/{component}"),
                        paths,
                    );
                }
            }
            _ => {}
        }
    }
}

/// A textual summary of an object: its attributes sorted by key, references
/// expanded until `depth` runs out.
fn summarize_object(objects: &ObjectCollection, id: &ObjectId, depth: usize) -> String {
    if depth == 0 {
        return "|".to_string();
    }
    let Some(object) = objects.get(id) else {
        return id.to_string();
    };
    let mut entries: Vec<(&str, String)> = object
        .attributes()
        .iter()
        .map(|(key, value)| (key.as_str(), summarize_value(objects, value, depth - 1)))
        .collect();
    entries.push(("isa", object.kind().tag().to_string()));
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
        .into_iter()
        .map(|(key, summary)| format!("{key}:{summary},"))
        .collect()
}

fn summarize_value(objects: &ObjectCollection, value: &Value, depth: usize) -> String {
    if depth == 0 {
        return "|".to_string();
    }
    match value {
        Value::Ref(id) => summarize_object(objects, id, depth),
        Value::RefList(ids) => ids
            .iter()
            .map(|id| summarize_object(objects, id, depth - 1))
            .collect::<Vec<_>>()
            .join(","),
        Value::List(items) => items
            .iter()
            .map(|item| summarize_value(objects, item, depth - 1))
            .collect::<Vec<_>>()
            .join(","),
        Value::Dict(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            entries
                .into_iter()
                .map(|(key, value)| format!("{key}:{},", summarize_value(objects, value, depth - 1)))
                .collect()
        }
        scalar => scalar.to_string(),
    }
}

fn id_for_path(path: &str) -> ObjectId {
    let digest = hex::encode_upper(Sha256::digest(path.as_bytes()));
    ObjectId::new(&digest[..ID_LENGTH])
}

/// Identifiers stored as plain text: the remote target of container item
/// proxies and the keys of the root's per-target attributes.
fn fix_plain_identifiers(
    objects: &mut ObjectCollection,
    root: &ObjectId,
    renamed: &IndexMap<&ObjectId, &ObjectId>,
) {
    let proxies: Vec<ObjectId> = objects
        .of_kind(Isa::PBXContainerItemProxy)
        .map(|proxy| proxy.id().clone())
        .collect();
    for proxy in proxies {
        let Some(object) = objects.get_mut(&proxy) else {
            continue;
        };
        let replacement = object
            .get_text("remoteGlobalIDString")
            .and_then(|remote| renamed.get(&ObjectId::new(remote)))
            .map(|to| to.to_string());
        if let Some(replacement) = replacement {
            object.set("remoteGlobalIDString", replacement);
        }
    }

    let Some(root) = objects.get_mut(root) else {
        return;
    };
    let Some(Value::Dict(target_attributes)) = root
        .attributes_mut()
        .get_mut("attributes")
        .and_then(Value::as_dict_mut)
        .and_then(|attributes| attributes.get_mut("TargetAttributes"))
    else {
        return;
    };
    let rekeyed = std::mem::take(target_attributes)
        .into_iter()
        .map(|(key, value)| match renamed.get(&ObjectId::new(key.as_str())) {
            Some(to) => (to.to_string(), value),
            None => (key, value),
        })
        .collect();
    *target_attributes = rekeyed;
}
