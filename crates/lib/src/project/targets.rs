//! Targets, build phases, dependencies and build settings.

use std::path::Path;

use tracing::{debug, info};

use super::{Project, ProjectError};
use crate::Result;
use crate::constants::{
    APPLICATION_PRODUCT_TYPE, DEFAULT_CONFIGURATION_NAME, DEFAULT_CONFIGURATIONS,
    DYNAMIC_LIBRARY_PRODUCT_TYPE, FRAMEWORK_PRODUCT_TYPE, STATIC_LIBRARY_PRODUCT_TYPE,
};
use crate::object::{Attributes, BUILD_PHASES, FILE_LIKE, Isa, Object, ObjectId, TARGETS, Value};

/// Extensions whose files go to the headers phase.
const HEADER_EXTENSIONS: &[&str] = &["h", "hpp"];

impl Project {
    /// Creates a configuration list holding one build configuration per
    /// default configuration name.
    pub(crate) fn new_configuration_list(&mut self) -> Result<ObjectId> {
        self.atomically(|project| {
            let mut configurations = Vec::with_capacity(DEFAULT_CONFIGURATIONS.len());
            for name in DEFAULT_CONFIGURATIONS {
                let mut attributes = Attributes::new();
                attributes.insert("name".to_string(), Value::from(*name));
                configurations.push(project.create(Isa::XCBuildConfiguration, attributes)?);
            }
            let mut attributes = Attributes::new();
            attributes.insert(
                "defaultConfigurationName".to_string(),
                Value::from(DEFAULT_CONFIGURATION_NAME),
            );
            let list = project.create(Isa::XCConfigurationList, attributes)?;
            project
                .graph
                .objects
                .set_many(&list, "build_configurations", &configurations)?;
            Ok(list)
        })
    }

    /// Creates a native target with its own configuration list and a product
    /// reference in the products group.
    pub fn new_native_target(&mut self, name: &str, product_type: &str) -> Result<ObjectId> {
        let mut attributes = Attributes::new();
        attributes.insert("name".to_string(), Value::from(name));
        attributes.insert("productName".to_string(), Value::from(name));
        attributes.insert("productType".to_string(), Value::from(product_type));
        let target = self.atomically(|project| {
            let target = project.create(Isa::PBXNativeTarget, attributes)?;

            let list = project.new_configuration_list()?;
            project
                .graph
                .objects
                .set_one(&target, "build_configuration_list", Some(&list))?;

            let product = project.new_product_reference(name, product_type)?;
            project
                .graph
                .objects
                .set_one(&target, "product_reference", Some(&product))?;

            let root = project.graph.root.clone();
            project.graph.objects.push(&root, "targets", &target)?;
            Ok(target)
        })?;
        info!(target = %target, name, product_type, "Created native target");
        Ok(target)
    }

    fn new_product_reference(&mut self, name: &str, product_type: &str) -> Result<ObjectId> {
        let (path, file_type) = match product_type {
            STATIC_LIBRARY_PRODUCT_TYPE => (format!("lib{name}.a"), Some("archive.ar")),
            DYNAMIC_LIBRARY_PRODUCT_TYPE => {
                (format!("lib{name}.dylib"), Some("compiled.mach-o.dylib"))
            }
            APPLICATION_PRODUCT_TYPE => (format!("{name}.app"), Some("wrapper.application")),
            FRAMEWORK_PRODUCT_TYPE => (format!("{name}.framework"), Some("wrapper.framework")),
            _ => (name.to_string(), None),
        };
        let mut attributes = Attributes::new();
        if let Some(file_type) = file_type {
            attributes.insert("explicitFileType".to_string(), Value::from(file_type));
        }
        attributes.insert("includeInIndex".to_string(), Value::from("0"));
        attributes.insert("path".to_string(), Value::from(path));
        attributes.insert("sourceTree".to_string(), Value::from("BUILT_PRODUCTS_DIR"));
        let product = self.create(Isa::PBXFileReference, attributes)?;
        if let Some(products) = self.products_group()? {
            self.graph.objects.push(&products, "children", &product)?;
        }
        Ok(product)
    }

    /// The build phase of kind `isa` of `target`.
    ///
    /// Headers, sources, frameworks and resources phases exist at most once
    /// per target; an existing one is returned. Other phase kinds are always
    /// created.
    pub fn build_phase(&mut self, target: &ObjectId, isa: Isa) -> Result<ObjectId> {
        self.expect_kind(target, TARGETS, "a target")?;
        if !isa.is_build_phase() {
            return Err(ProjectError::InvalidKind {
                id: target.clone(),
                expected: "a build phase kind".to_string(),
                actual: isa.to_string(),
            }
            .into());
        }
        if isa.is_unique_build_phase() {
            let existing = self
                .graph
                .objects
                .get_many(target, "build_phases")?
                .into_iter()
                .find(|phase| phase.is(isa))
                .map(|phase| phase.id().clone());
            if let Some(phase) = existing {
                return Ok(phase);
            }
        }
        let phase = self.atomically(|project| {
            let phase = project.create(isa, Attributes::new())?;
            project.graph.objects.push(target, "build_phases", &phase)?;
            Ok(phase)
        })?;
        debug!(target = %target, phase = %phase, kind = %isa, "Created build phase");
        Ok(phase)
    }

    /// Adds a shell script phase running `script` to `target`.
    pub fn add_shell_script_build_phase(
        &mut self,
        target: &ObjectId,
        name: &str,
        script: &str,
    ) -> Result<ObjectId> {
        self.expect_kind(target, TARGETS, "a target")?;
        let mut attributes = Attributes::new();
        attributes.insert("name".to_string(), Value::from(name));
        attributes.insert("shellScript".to_string(), Value::from(script));
        self.atomically(|project| {
            let phase = project.create(Isa::PBXShellScriptBuildPhase, attributes)?;
            project.graph.objects.push(target, "build_phases", &phase)?;
            Ok(phase)
        })
    }

    /// Adds `file` to `phase` through a new build file.
    pub fn add_file_to_phase(&mut self, phase: &ObjectId, file: &ObjectId) -> Result<ObjectId> {
        self.add_build_file(phase, file, None)
    }

    fn add_build_file(
        &mut self,
        phase: &ObjectId,
        file: &ObjectId,
        settings: Option<Attributes>,
    ) -> Result<ObjectId> {
        self.expect_kind(phase, BUILD_PHASES, "a build phase")?;
        self.expect_kind(file, FILE_LIKE, "a file reference or group")?;
        let mut attributes = Attributes::new();
        if let Some(settings) = settings {
            attributes.insert("settings".to_string(), Value::Dict(settings));
        }
        let build_file = self.atomically(|project| {
            let build_file = project.create(Isa::PBXBuildFile, attributes)?;
            project
                .graph
                .objects
                .set_one(&build_file, "file_ref", Some(file))?;
            project.graph.objects.push(phase, "files", &build_file)?;
            Ok(build_file)
        })?;
        debug!(phase = %phase, file = %file, build_file = %build_file, "Added file to phase");
        Ok(build_file)
    }

    /// Removes every build file of `phase` referring to `file`. Returns true
    /// if any was removed.
    pub fn remove_file_from_phase(&mut self, phase: &ObjectId, file: &ObjectId) -> Result<bool> {
        self.expect_kind(phase, BUILD_PHASES, "a build phase")?;
        let matching: Vec<ObjectId> = self
            .graph
            .objects
            .get_many(phase, "files")?
            .into_iter()
            .filter(|build_file| {
                build_file
                    .get("fileRef")
                    .is_some_and(|value| value.references(file))
            })
            .map(|build_file| build_file.id().clone())
            .collect();
        for build_file in &matching {
            self.graph.objects.remove(build_file)?;
        }
        Ok(!matching.is_empty())
    }

    /// Adds file references to the build phases of `target`: headers to the
    /// headers phase as public headers, everything else to the sources phase
    /// with `compiler_flags` if given.
    pub fn add_file_references(
        &mut self,
        target: &ObjectId,
        files: &[ObjectId],
        compiler_flags: Option<&str>,
    ) -> Result<Vec<ObjectId>> {
        self.atomically(|project| {
            let mut build_files = Vec::with_capacity(files.len());
            for file in files {
                let is_header = project
                    .graph
                    .objects
                    .try_get(file)?
                    .path()
                    .and_then(|path| Path::new(path).extension())
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| {
                        HEADER_EXTENSIONS
                            .iter()
                            .any(|header| ext.eq_ignore_ascii_case(header))
                    });
                let build_file = if is_header {
                    let phase = project.build_phase(target, Isa::PBXHeadersBuildPhase)?;
                    let mut settings = Attributes::new();
                    settings.insert("ATTRIBUTES".to_string(), Value::from(vec!["Public"]));
                    project.add_build_file(&phase, file, Some(settings))?
                } else {
                    let phase = project.build_phase(target, Isa::PBXSourcesBuildPhase)?;
                    let settings = compiler_flags.map(|flags| {
                        let mut settings = Attributes::new();
                        settings.insert("COMPILER_FLAGS".to_string(), Value::from(flags));
                        settings
                    });
                    project.add_build_file(&phase, file, settings)?
                };
                build_files.push(build_file);
            }
            Ok(build_files)
        })
    }

    /// Makes `target` depend on `other`, both targets of this project.
    ///
    /// Returns the existing dependency if there already is one.
    pub fn add_dependency(&mut self, target: &ObjectId, other: &ObjectId) -> Result<ObjectId> {
        self.expect_kind(target, TARGETS, "a target")?;
        let remote_info = self
            .expect_kind(other, TARGETS, "a target")?
            .name()
            .unwrap_or_default()
            .to_string();

        for dependency in self.graph.objects.get_many(target, "dependencies")? {
            let linked = self.graph.objects.get_one(dependency.id(), "target")?;
            if linked.is_some_and(|linked| linked.id() == other) {
                return Ok(dependency.id().clone());
            }
        }

        let mut attributes = Attributes::new();
        attributes.insert(
            "containerPortal".to_string(),
            Value::Ref(self.graph.root.clone()),
        );
        attributes.insert("proxyType".to_string(), Value::from("1"));
        attributes.insert(
            "remoteGlobalIDString".to_string(),
            Value::from(other.as_str()),
        );
        attributes.insert("remoteInfo".to_string(), Value::from(remote_info));
        let dependency = self.atomically(|project| {
            let proxy = project.create(Isa::PBXContainerItemProxy, attributes)?;
            let dependency = project.create(Isa::PBXTargetDependency, Attributes::new())?;
            project
                .graph
                .objects
                .set_one(&dependency, "target", Some(other))?;
            project
                .graph
                .objects
                .set_one(&dependency, "target_proxy", Some(&proxy))?;
            project.graph.objects.push(target, "dependencies", &dependency)?;
            Ok(dependency)
        })?;
        debug!(target = %target, other = %other, dependency = %dependency, "Added dependency");
        Ok(dependency)
    }

    /// The build settings of the configuration named `configuration` of
    /// `owner`, the root object or a target.
    pub fn build_settings(
        &self,
        owner: &ObjectId,
        configuration: &str,
    ) -> Result<Option<&Attributes>> {
        Ok(self
            .configuration_named(owner, configuration)?
            .and_then(|found| found.get("buildSettings"))
            .and_then(Value::as_dict))
    }

    /// Mutable build settings of the configuration named `configuration` of
    /// `owner`. An absent settings map is created.
    pub fn build_settings_mut(
        &mut self,
        owner: &ObjectId,
        configuration: &str,
    ) -> Result<Option<&mut Attributes>> {
        let Some(id) = self
            .configuration_named(owner, configuration)?
            .map(|found| found.id().clone())
        else {
            return Ok(None);
        };
        let configuration = self.graph.objects.try_get_mut(&id)?;
        Ok(configuration
            .attributes_mut()
            .entry("buildSettings".to_string())
            .or_insert_with(|| Value::Dict(Attributes::new()))
            .as_dict_mut())
    }

    fn configuration_named(&self, owner: &ObjectId, name: &str) -> Result<Option<&Object>> {
        let mut accepted = vec![Isa::PBXProject];
        accepted.extend_from_slice(TARGETS);
        self.expect_kind(owner, &accepted, "the project or a target")?;
        let list = self.required_one(owner, "build_configuration_list")?;
        Ok(self
            .graph
            .objects
            .get_many(&list, "build_configurations")?
            .into_iter()
            .find(|configuration| configuration.name() == Some(name)))
    }
}
