//! Constants used throughout the pbxgraph library.
//!
//! This module provides central definitions for the reserved keys of a project
//! document and the default values written into freshly scaffolded projects.

/// Key of the type tag inside every object map.
pub const ISA: &str = "isa";

/// Top-level key holding the flat identifier → object map.
pub const OBJECTS: &str = "objects";

/// Top-level key holding the identifier of the root `PBXProject`.
pub const ROOT_OBJECT: &str = "rootObject";

/// Top-level key holding the archive version.
pub const ARCHIVE_VERSION: &str = "archiveVersion";

/// Top-level key holding the object version.
pub const OBJECT_VERSION: &str = "objectVersion";

/// Top-level key holding the (always empty) classes map.
pub const CLASSES: &str = "classes";

/// The last known archive version.
pub const LAST_KNOWN_ARCHIVE_VERSION: &str = "1";

/// The last known object version.
pub const LAST_KNOWN_OBJECT_VERSION: &str = "46";

/// Value written to `attributes.LastUpgradeCheck` of new projects.
pub const LAST_UPGRADE_CHECK: &str = "0420";

/// Number of hexadecimal characters in a generated identifier.
pub const ID_LENGTH: usize = 24;

/// Default `buildActionMask` of build phases.
pub const BUILD_ACTION_MASK: &str = "2147483647";

/// Default product type of native targets.
pub const STATIC_LIBRARY_PRODUCT_TYPE: &str = "com.apple.product-type.library.static";

/// Product type of dynamic library targets.
pub const DYNAMIC_LIBRARY_PRODUCT_TYPE: &str = "com.apple.product-type.library.dynamic";

/// Product type of application targets.
pub const APPLICATION_PRODUCT_TYPE: &str = "com.apple.product-type.application";

/// Product type of framework targets.
pub const FRAMEWORK_PRODUCT_TYPE: &str = "com.apple.product-type.framework";

/// Names of the configurations every new configuration list starts with.
pub const DEFAULT_CONFIGURATIONS: &[&str] = &["Debug", "Release"];

/// Configuration used when none is specified on the command line.
pub const DEFAULT_CONFIGURATION_NAME: &str = "Release";

/// Display name used for the main group when it has neither name nor path.
pub const MAIN_GROUP_NAME: &str = "Main Group";

/// Name of the group holding product references.
pub const PRODUCTS_GROUP_NAME: &str = "Products";

/// Known file types keyed by (lowercase) path extension.
pub const FILE_TYPES_BY_EXTENSION: &[(&str, &str)] = &[
    ("a", "archive.ar"),
    ("application", "wrapper.application"),
    ("dylib", "compiled.mach-o.dylib"),
    ("framework", "wrapper.framework"),
    ("h", "sourcecode.c.h"),
    ("m", "sourcecode.c.objc"),
    ("xcconfig", "text.xcconfig"),
    ("xcdatamodel", "wrapper.xcdatamodel"),
];

/// Looks up the file type for a path extension, ignoring case.
pub fn file_type_for_extension(extension: &str) -> Option<&'static str> {
    let extension = extension.to_ascii_lowercase();
    FILE_TYPES_BY_EXTENSION
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, file_type)| *file_type)
}
