//! Relationship tables of the modelled kinds.

use super::RelationshipDescriptor as R;
use crate::object::{
    BUILD_PHASES, FILE_LIKE, GROUP_CHILDREN, GROUPS, Isa, KindMatch, PACKAGE_REFERENCES,
    SYNCHRONIZED_EXCEPTION_SETS, TARGETS,
};

const PROJECT: KindMatch = KindMatch::Exactly(Isa::PBXProject);
const GROUP: KindMatch = KindMatch::OneOf(GROUPS);
const TARGET: KindMatch = KindMatch::OneOf(TARGETS);
const PHASE: KindMatch = KindMatch::OneOf(BUILD_PHASES);
const FILE: KindMatch = KindMatch::OneOf(FILE_LIKE);
const CHILD: KindMatch = KindMatch::OneOfOrUnknown(GROUP_CHILDREN);
const NATIVE_TARGET: KindMatch = KindMatch::Exactly(Isa::PBXNativeTarget);
const SYNCHRONIZED_FOLDER: KindMatch = KindMatch::Exactly(Isa::PBXFileSystemSynchronizedRootGroup);
const PACKAGE: KindMatch = KindMatch::OneOf(PACKAGE_REFERENCES);
const PACKAGE_PRODUCT: KindMatch = KindMatch::Exactly(Isa::XCSwiftPackageProductDependency);
const FILE_REFERENCE: KindMatch = KindMatch::Exactly(Isa::PBXFileReference);
const REFERENCE_PROXY: KindMatch = KindMatch::Exactly(Isa::PBXReferenceProxy);
const BUILD_FILE: KindMatch = KindMatch::Exactly(Isa::PBXBuildFile);
const PROXY: KindMatch = KindMatch::Exactly(Isa::PBXContainerItemProxy);
const CONFIGURATION_LIST: KindMatch = KindMatch::Exactly(Isa::XCConfigurationList);
const CONFIGURATION: KindMatch = KindMatch::Exactly(Isa::XCBuildConfiguration);

/// Phases a synchronized folder can narrow membership of.
const MEMBERSHIP_PHASES: &[Isa] = &[Isa::PBXSourcesBuildPhase, Isa::PBXCopyFilesBuildPhase];

/// A container portal is the local project or the file reference of a
/// nested project.
const PORTALS: &[Isa] = &[Isa::PBXProject, Isa::PBXFileReference];

pub(super) static DESCRIPTORS: &[R] = &[
    // PBXProject
    R::has_many(PROJECT, "targets", "targets", TARGET),
    R::has_one(PROJECT, "build_configuration_list", "buildConfigurationList", CONFIGURATION_LIST),
    R::has_one(PROJECT, "main_group", "mainGroup", GROUP),
    R::has_one(PROJECT, "product_ref_group", "productRefGroup", GROUP),
    R::has_many(PROJECT, "package_references", "packageReferences", PACKAGE),
    // Groups
    R::has_many(GROUP, "children", "children", CHILD),
    R::inverse_one(GROUP, "parent", GROUP, "children"),
    R::has_one(
        KindMatch::Exactly(Isa::XCVersionGroup),
        "current_version",
        "currentVersion",
        FILE_REFERENCE,
    ),
    // File references
    R::inverse_one(FILE_REFERENCE, "group", GROUP, "children"),
    R::inverse_many(FILE_REFERENCE, "build_files", BUILD_FILE, "file_ref"),
    R::has_one(REFERENCE_PROXY, "remote_ref", "remoteRef", PROXY),
    R::inverse_one(REFERENCE_PROXY, "group", GROUP, "children"),
    R::inverse_many(REFERENCE_PROXY, "build_files", BUILD_FILE, "file_ref"),
    // Synchronized folders
    R::has_many(SYNCHRONIZED_FOLDER, "exceptions", "exceptions", KindMatch::OneOf(SYNCHRONIZED_EXCEPTION_SETS)),
    R::inverse_one(SYNCHRONIZED_FOLDER, "group", GROUP, "children"),
    R::has_one(
        KindMatch::Exactly(Isa::PBXFileSystemSynchronizedBuildFileExceptionSet),
        "target",
        "target",
        TARGET,
    ),
    R::has_one(
        KindMatch::Exactly(Isa::PBXFileSystemSynchronizedGroupBuildPhaseMembershipExceptionSet),
        "build_phase",
        "buildPhase",
        KindMatch::OneOf(MEMBERSHIP_PHASES),
    ),
    // Targets
    R::has_one(TARGET, "build_configuration_list", "buildConfigurationList", CONFIGURATION_LIST),
    R::has_many(TARGET, "build_phases", "buildPhases", PHASE),
    R::has_many(TARGET, "dependencies", "dependencies", KindMatch::Exactly(Isa::PBXTargetDependency)),
    R::inverse_one(TARGET, "project", PROJECT, "targets"),
    R::has_many(NATIVE_TARGET, "build_rules", "buildRules", KindMatch::Exactly(Isa::PBXBuildRule)),
    R::has_one(NATIVE_TARGET, "product_reference", "productReference", FILE_REFERENCE),
    R::has_many(
        NATIVE_TARGET,
        "file_system_synchronized_groups",
        "fileSystemSynchronizedGroups",
        SYNCHRONIZED_FOLDER,
    ),
    R::has_many(
        NATIVE_TARGET,
        "package_product_dependencies",
        "packageProductDependencies",
        PACKAGE_PRODUCT,
    ),
    // Build phases
    R::has_many(PHASE, "files", "files", BUILD_FILE),
    R::inverse_one(PHASE, "target", TARGET, "build_phases"),
    R::has_one(BUILD_FILE, "file_ref", "fileRef", FILE),
    R::inverse_one(BUILD_FILE, "phase", PHASE, "files"),
    R::has_one(BUILD_FILE, "product_ref", "productRef", PACKAGE_PRODUCT),
    // Dependencies
    R::has_one(KindMatch::Exactly(Isa::PBXTargetDependency), "target", "target", TARGET),
    R::has_one(KindMatch::Exactly(Isa::PBXTargetDependency), "target_proxy", "targetProxy", PROXY),
    R::has_one(PROXY, "container_portal", "containerPortal", KindMatch::OneOf(PORTALS)),
    // Swift packages
    R::has_one(PACKAGE_PRODUCT, "package", "package", PACKAGE),
    // Configurations
    R::has_many(CONFIGURATION_LIST, "build_configurations", "buildConfigurations", CONFIGURATION),
    R::has_one(CONFIGURATION, "base_configuration_reference", "baseConfigurationReference", FILE_REFERENCE),
    R::inverse_one(CONFIGURATION, "configuration_list", CONFIGURATION_LIST, "build_configurations"),
];
