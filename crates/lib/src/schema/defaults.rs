//! Attribute defaults applied to freshly constructed objects.
//!
//! Hydrated objects never receive defaults; their attributes are taken from
//! the document verbatim.

use crate::constants::{BUILD_ACTION_MASK, STATIC_LIBRARY_PRODUCT_TYPE};
use crate::object::{Attributes, Isa, Value};

/// Copy-files destination used when none is given: the resources folder.
const DEFAULT_DST_SUBFOLDER_SPEC: &str = "7";

/// The attributes every new object of `isa` starts with, in document order.
pub fn defaults(isa: Isa) -> Attributes {
    let mut attributes = Attributes::new();
    let mut set = |key: &str, value: Value| {
        attributes.insert(key.to_string(), value);
    };
    let empty_refs = || Value::RefList(Vec::new());

    if isa.is_build_phase() {
        set("buildActionMask", Value::from(BUILD_ACTION_MASK));
        set("files", empty_refs());
    }
    match isa {
        Isa::PBXGroup | Isa::PBXVariantGroup => {
            set("children", empty_refs());
            set("sourceTree", Value::from("<group>"));
        }
        Isa::XCVersionGroup => {
            set("children", empty_refs());
            set("sourceTree", Value::from("<group>"));
            set("versionGroupType", Value::from("wrapper.xcdatamodel"));
        }
        Isa::PBXFileReference | Isa::PBXFileSystemSynchronizedRootGroup => {
            set("sourceTree", Value::from("<group>"));
        }
        Isa::PBXNativeTarget => {
            set("buildPhases", empty_refs());
            set("buildRules", empty_refs());
            set("dependencies", empty_refs());
            set("productType", Value::from(STATIC_LIBRARY_PRODUCT_TYPE));
        }
        Isa::PBXAggregateTarget | Isa::PBXLegacyTarget => {
            set("buildPhases", empty_refs());
            set("dependencies", empty_refs());
        }
        Isa::PBXCopyFilesBuildPhase => {
            set("dstPath", Value::from(""));
            set("dstSubfolderSpec", Value::from(DEFAULT_DST_SUBFOLDER_SPEC));
        }
        Isa::PBXShellScriptBuildPhase => {
            set("inputPaths", Value::List(Vec::new()));
            set("outputPaths", Value::List(Vec::new()));
            set("shellPath", Value::from("/bin/sh"));
            set("shellScript", Value::from(""));
        }
        Isa::PBXBuildRule => {
            set("isEditable", Value::from("1"));
        }
        Isa::XCConfigurationList => {
            set("buildConfigurations", empty_refs());
            set("defaultConfigurationIsVisible", Value::from("0"));
        }
        Isa::XCBuildConfiguration => {
            set("buildSettings", Value::Dict(Attributes::new()));
        }
        _ => {}
    }
    if isa.is_build_phase() {
        set("runOnlyForDeploymentPostprocessing", Value::from("0"));
    }
    attributes
}
