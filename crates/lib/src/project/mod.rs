//! The project façade.
//!
//! [`Project`] owns a hydrated [`ProjectGraph`] together with the
//! [`ProjectOptions`] it was created or loaded with, and offers the
//! operations tools actually perform on a project file: scaffolding a new
//! project, loading and saving it through a [`PlistCodec`], adding groups,
//! files and targets, wiring build phases and dependencies, and rewriting
//! identifiers deterministically.
//!
//! Everything goes through the relationship accessors, so the graph stays
//! consistent after every call.
//!
//! ```
//! use pbxgraph::config::ProjectOptions;
//! use pbxgraph::project::Project;
//!
//! let mut project = Project::with_options(ProjectOptions::seeded(1))?;
//! let main = project.main_group()?;
//! let sources = project.new_group(&main, "Sources")?;
//! let file = project.new_file(&sources, "Sources/main.m")?;
//!
//! assert_eq!(project.display_name(&file).as_deref(), Some("main.m"));
//! assert_eq!(project.parent_group(&file)?.map(|group| group.id()), Some(&sources));
//! # Ok::<(), pbxgraph::Error>(())
//! ```

use std::path::Path;

use tracing::{debug, warn};

use crate::Result;
use crate::collection::ObjectCollection;
use crate::config::ProjectOptions;
use crate::constants::{ARCHIVE_VERSION, CLASSES, OBJECT_VERSION, OBJECTS, ROOT_OBJECT};
use crate::document::{Dictionary, Document, PlistCodec, PlistValue};
use crate::object::{Attributes, Isa, Object, ObjectId, Value};
use crate::projector::{self, ProjectGraph};
use crate::schema::defaults;

mod errors;
mod groups;
mod rekey;
mod targets;

pub use errors::ProjectError;
pub use groups::GroupsPosition;

/// A project document loaded into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    graph: ProjectGraph,
    options: ProjectOptions,
}

impl Project {
    /// Scaffolds a new project with default options.
    pub fn new() -> Result<Self> {
        Self::with_options(ProjectOptions::default())
    }

    /// Scaffolds a new project: a root object, a main group holding a
    /// `Products` group, and a Debug/Release configuration list.
    pub fn with_options(options: ProjectOptions) -> Result<Self> {
        let mut objects = ObjectCollection::with_generator(options.generator());

        let mut upgrade = Attributes::new();
        upgrade.insert(
            "LastUpgradeCheck".to_string(),
            Value::from(options.last_upgrade_check.as_str()),
        );
        let mut attributes = Attributes::new();
        attributes.insert("attributes".to_string(), Value::Dict(upgrade));
        attributes.insert("compatibilityVersion".to_string(), Value::from("Xcode 3.2"));
        attributes.insert(
            "developmentRegion".to_string(),
            Value::from(options.development_region.as_str()),
        );
        attributes.insert("hasScannedForEncodings".to_string(), Value::from("0"));
        attributes.insert(
            "knownRegions".to_string(),
            Value::List(options.known_regions.iter().map(|r| Value::from(r.as_str())).collect()),
        );
        attributes.insert("projectDirPath".to_string(), Value::from(""));
        attributes.insert("projectRoot".to_string(), Value::from(""));
        attributes.insert("targets".to_string(), Value::RefList(Vec::new()));
        let root = objects.create(Isa::PBXProject, attributes)?;

        let mut header = Dictionary::new();
        header.insert(
            ARCHIVE_VERSION.to_string(),
            PlistValue::from(options.archive_version.as_str()),
        );
        header.insert(CLASSES.to_string(), PlistValue::Dictionary(Dictionary::new()));
        header.insert(
            OBJECT_VERSION.to_string(),
            PlistValue::from(options.object_version.as_str()),
        );
        header.insert(OBJECTS.to_string(), PlistValue::Dictionary(Dictionary::new()));
        header.insert(ROOT_OBJECT.to_string(), PlistValue::from(root.as_str()));

        let mut project = Self {
            graph: ProjectGraph {
                header,
                root: root.clone(),
                objects,
            },
            options,
        };

        let main_group = project.create(Isa::PBXGroup, Attributes::new())?;
        project
            .graph
            .objects
            .set_one(&root, "main_group", Some(&main_group))?;
        let products = project.new_group(&main_group, crate::constants::PRODUCTS_GROUP_NAME)?;
        project
            .graph
            .objects
            .set_one(&root, "product_ref_group", Some(&products))?;
        let list = project.new_configuration_list()?;
        project
            .graph
            .objects
            .set_one(&root, "build_configuration_list", Some(&list))?;

        debug!(root = %root, objects = project.graph.objects.len(), "Scaffolded project");
        Ok(project)
    }

    /// Hydrates a decoded document with default options.
    pub fn from_document(document: &Document) -> Result<Self> {
        Self::from_document_with(document, ProjectOptions::default())
    }

    /// Hydrates a decoded document. Objects created afterwards draw their
    /// identifiers as `options` specify.
    pub fn from_document_with(document: &Document, options: ProjectOptions) -> Result<Self> {
        let graph = projector::hydrate_with(document, options.generator())?;
        Ok(Self { graph, options })
    }

    /// Wraps an already hydrated graph.
    pub fn from_graph(graph: ProjectGraph, options: ProjectOptions) -> Self {
        Self { graph, options }
    }

    /// Flattens the project into a document.
    pub fn to_document(&self) -> Document {
        projector::dehydrate(&self.graph)
    }

    /// Reads and hydrates a project file.
    pub fn open<P: AsRef<Path>, C: PlistCodec>(path: P, codec: &C) -> Result<Self> {
        Self::open_with(path, codec, ProjectOptions::default())
    }

    /// Reads and hydrates a project file with explicit options.
    pub fn open_with<P: AsRef<Path>, C: PlistCodec>(
        path: P,
        codec: &C,
        options: ProjectOptions,
    ) -> Result<Self> {
        let document = codec.read_file(path)?;
        Self::from_document_with(&document, options)
    }

    /// Dehydrates and writes the project file.
    pub fn save<P: AsRef<Path>, C: PlistCodec>(&self, path: P, codec: &C) -> Result<()> {
        codec.write_file(path, &self.to_document())
    }

    /// The options the project was created or loaded with.
    pub fn options(&self) -> &ProjectOptions {
        &self.options
    }

    /// The underlying graph.
    pub fn graph(&self) -> &ProjectGraph {
        &self.graph
    }

    /// Consumes the project, returning its graph.
    pub fn into_graph(self) -> ProjectGraph {
        self.graph
    }

    /// All objects.
    pub fn objects(&self) -> &ObjectCollection {
        &self.graph.objects
    }

    /// All objects, mutably. Writes should go through the relationship
    /// methods of [`ObjectCollection`] to keep the graph consistent.
    pub fn objects_mut(&mut self) -> &mut ObjectCollection {
        &mut self.graph.objects
    }

    /// Identifier of the root object.
    pub fn root_id(&self) -> &ObjectId {
        &self.graph.root
    }

    /// The root `PBXProject`.
    pub fn root(&self) -> Result<&Object> {
        self.graph.objects.try_get(&self.graph.root)
    }

    /// Objects of one kind, in document order.
    pub fn objects_of_kind(&self, isa: Isa) -> impl Iterator<Item = &Object> {
        self.graph.objects.of_kind(isa)
    }

    /// The main group.
    pub fn main_group(&self) -> Result<ObjectId> {
        self.required_one(&self.graph.root, "main_group")
    }

    /// The group holding product references, if the project has one.
    pub fn products_group(&self) -> Result<Option<ObjectId>> {
        Ok(self
            .graph
            .objects
            .get_one(&self.graph.root, "product_ref_group")?
            .map(|group| group.id().clone()))
    }

    /// The project's targets, in declared order.
    pub fn targets(&self) -> Result<Vec<&Object>> {
        self.graph.objects.get_many(&self.graph.root, "targets")
    }

    /// The first target named `name`.
    pub fn target_named(&self, name: &str) -> Result<Option<&Object>> {
        Ok(self
            .targets()?
            .into_iter()
            .find(|target| target.name() == Some(name)))
    }

    /// Creates an object of `isa` with the kind's default attributes,
    /// overridden by `attributes`.
    pub fn create(&mut self, isa: Isa, attributes: Attributes) -> Result<ObjectId> {
        let mut merged = defaults(isa);
        merged.extend(attributes);
        self.graph.objects.create(isa, merged)
    }

    /// Runs an edit that creates objects, removing every object it created
    /// if it fails. Objects are only appended while `edit` runs.
    pub(crate) fn atomically<T>(
        &mut self,
        edit: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let before = self.graph.objects.len();
        let result = edit(self);
        if let Err(err) = &result {
            let created = self.graph.objects.order().get(before..).unwrap_or_default().to_vec();
            for id in created.iter().rev() {
                if let Err(cleanup) = self.graph.objects.remove(id) {
                    warn!(id = %id, error = %cleanup, "Failed to remove object of a failed edit");
                }
            }
            if !created.is_empty() {
                debug!(removed = created.len(), error = %err, "Rolled back failed edit");
            }
        }
        result
    }

    /// Removes an object and every reference to it. The root object cannot be
    /// removed.
    pub fn remove(&mut self, id: &ObjectId) -> Result<Object> {
        if *id == self.graph.root {
            return Err(ProjectError::RootObjectRemoval { id: id.clone() }.into());
        }
        self.graph.objects.remove(id)
    }

    /// Resolves a to-one relationship that must be set.
    fn required_one(&self, owner: &ObjectId, relationship: &str) -> Result<ObjectId> {
        self.graph
            .objects
            .get_one(owner, relationship)?
            .map(|object| object.id().clone())
            .ok_or_else(|| {
                ProjectError::Unset {
                    owner: owner.clone(),
                    relationship: relationship.to_string(),
                }
                .into()
            })
    }

    /// Looks up an object and checks its kind.
    fn expect_kind(&self, id: &ObjectId, accepted: &[Isa], expected: &str) -> Result<&Object> {
        let object = self.graph.objects.try_get(id)?;
        match object.isa() {
            Some(isa) if accepted.contains(&isa) => Ok(object),
            _ => Err(ProjectError::InvalidKind {
                id: id.clone(),
                expected: expected.to_string(),
                actual: object.kind().tag().to_string(),
            }
            .into()),
        }
    }
}
