//! Groups, file references and their presentation.

use std::path::Path;

use tracing::debug;

use super::{Project, ProjectError};
use crate::Result;
use crate::constants::{MAIN_GROUP_NAME, file_type_for_extension};
use crate::natural_sort::NaturalSortKey;
use crate::object::{Attributes, GROUPS, Isa, KindMatch, Object, ObjectId, Value};

/// Where groups go when listing the children of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupsPosition {
    /// Groups first, then files.
    Above,
    /// Files first, then groups.
    Below,
    /// Groups and files sorted together.
    #[default]
    Mixed,
}

impl Project {
    /// Creates a group named `name` inside `parent`.
    pub fn new_group(&mut self, parent: &ObjectId, name: &str) -> Result<ObjectId> {
        self.expect_group(parent)?;
        let mut attributes = Attributes::new();
        attributes.insert("name".to_string(), Value::from(name));
        let group = self.atomically(|project| {
            let group = project.create(Isa::PBXGroup, attributes)?;
            project.graph.objects.push(parent, "children", &group)?;
            Ok(group)
        })?;
        debug!(group = %group, parent = %parent, name, "Created group");
        Ok(group)
    }

    /// Creates a file reference for `path` inside `group`.
    ///
    /// The name is the last path component. The file type is derived from
    /// the extension; static archives get an explicit type.
    pub fn new_file(&mut self, group: &ObjectId, path: &str) -> Result<ObjectId> {
        self.expect_group(group)?;
        let mut attributes = Attributes::new();
        if let Some(file_name) = Path::new(path).file_name().and_then(|name| name.to_str()) {
            attributes.insert("name".to_string(), Value::from(file_name));
        }
        attributes.insert("path".to_string(), Value::from(path));
        let extension = Path::new(path).extension().and_then(|ext| ext.to_str());
        if let Some(file_type) = extension.and_then(file_type_for_extension) {
            let key = if extension.is_some_and(|ext| ext.eq_ignore_ascii_case("a")) {
                "explicitFileType"
            } else {
                "lastKnownFileType"
            };
            attributes.insert(key.to_string(), Value::from(file_type));
        }
        let file = self.atomically(|project| {
            let file = project.create(Isa::PBXFileReference, attributes)?;
            project.graph.objects.push(group, "children", &file)?;
            Ok(file)
        })?;
        debug!(file = %file, group = %group, path, "Created file reference");
        Ok(file)
    }

    /// Adds a reference to a system framework to the main group.
    pub fn add_system_framework(&mut self, name: &str) -> Result<ObjectId> {
        let main_group = self.main_group()?;
        let mut attributes = Attributes::new();
        attributes.insert("lastKnownFileType".to_string(), Value::from("wrapper.framework"));
        attributes.insert("name".to_string(), Value::from(format!("{name}.framework")));
        attributes.insert(
            "path".to_string(),
            Value::from(format!("System/Library/Frameworks/{name}.framework")),
        );
        attributes.insert("sourceTree".to_string(), Value::from("SDKROOT"));
        self.atomically(|project| {
            let file = project.create(Isa::PBXFileReference, attributes)?;
            project.graph.objects.push(&main_group, "children", &file)?;
            Ok(file)
        })
    }

    /// Moves a file reference or group into `group`, unlinking it from the
    /// group it was in.
    pub fn move_to_group(&mut self, object: &ObjectId, group: &ObjectId) -> Result<()> {
        self.expect_group(group)?;
        let relationship = self.parent_relationship(object)?;
        self.graph.objects.set_one(object, relationship, Some(group))
    }

    /// The group containing `object`, if any.
    pub fn parent_group(&self, object: &ObjectId) -> Result<Option<&Object>> {
        let relationship = self.parent_relationship(object)?;
        self.graph.objects.get_one(object, relationship)
    }

    /// The first group named `name`.
    pub fn group_named(&self, name: &str) -> Option<&Object> {
        self.graph
            .objects
            .matching(KindMatch::OneOf(GROUPS))
            .find(|group| group.name() == Some(name))
    }

    /// The name shown for an object: its name, else the last component of its
    /// path, else `Main Group` for the main group.
    pub fn display_name(&self, id: &ObjectId) -> Option<String> {
        let object = self.graph.objects.get(id)?;
        if let Some(name) = object.name() {
            return Some(name.to_string());
        }
        if let Some(path) = object.path() {
            let base = Path::new(path)
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(path);
            return Some(base.to_string());
        }
        match self.main_group() {
            Ok(main_group) if main_group == *id => Some(MAIN_GROUP_NAME.to_string()),
            _ => None,
        }
    }

    /// The children of `group` ordered by display name, the way Xcode lists
    /// them.
    pub fn sorted_children(
        &self,
        group: &ObjectId,
        position: GroupsPosition,
    ) -> Result<Vec<&Object>> {
        self.expect_group(group)?;
        let mut children = self.graph.objects.get_many(group, "children")?;
        children.sort_by_cached_key(|child| {
            let is_group = child.isa().is_some_and(Isa::is_group);
            let rank = match position {
                GroupsPosition::Above => u8::from(!is_group),
                GroupsPosition::Below => u8::from(is_group),
                GroupsPosition::Mixed => 0,
            };
            let name = self.display_name(child.id()).unwrap_or_default();
            (rank, NaturalSortKey::new(&name))
        });
        Ok(children)
    }

    fn expect_group(&self, id: &ObjectId) -> Result<&Object> {
        let object = self.graph.objects.try_get(id)?;
        if object.isa().is_some_and(Isa::is_group) {
            Ok(object)
        } else {
            Err(ProjectError::NotAGroup {
                id: id.clone(),
                kind: object.kind().tag().to_string(),
            }
            .into())
        }
    }

    /// Name of the inverse relationship linking `object` to its group.
    fn parent_relationship(&self, object: &ObjectId) -> Result<&'static str> {
        let found = self.graph.objects.try_get(object)?;
        match found.isa() {
            Some(isa) if isa.is_group() => Ok("parent"),
            Some(
                Isa::PBXFileReference
                | Isa::PBXReferenceProxy
                | Isa::PBXFileSystemSynchronizedRootGroup,
            ) => Ok("group"),
            _ => Err(ProjectError::InvalidKind {
                id: object.clone(),
                expected: "a group or file reference".to_string(),
                actual: found.kind().tag().to_string(),
            }
            .into()),
        }
    }
}
