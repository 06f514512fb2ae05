use pbxgraph::{Document, JsonCodec, Object, ObjectId, PlistCodec, Project, ProjectOptions};

/// A small but complete project: one target building `main.m`, a header that
/// belongs to no phase, and an object of a kind the library does not model.
pub const SAMPLE: &str = r#"{
    "archiveVersion": "1",
    "classes": {},
    "objectVersion": "46",
    "objects": {
        "ROOT": {
            "isa": "PBXProject",
            "attributes": {"LastUpgradeCheck": "0420"},
            "buildConfigurationList": "PROJECT_LIST",
            "compatibilityVersion": "Xcode 3.2",
            "developmentRegion": "English",
            "hasScannedForEncodings": "0",
            "knownRegions": ["en"],
            "mainGroup": "MAIN",
            "productRefGroup": "PRODUCTS",
            "projectDirPath": "",
            "projectRoot": "",
            "targets": ["TARGET"]
        },
        "MAIN": {"isa": "PBXGroup", "children": ["SOURCES", "PRODUCTS"], "sourceTree": "<group>"},
        "SOURCES": {"isa": "PBXGroup", "children": ["MAIN_M", "APP_H"], "name": "Sources", "sourceTree": "<group>"},
        "MAIN_M": {"isa": "PBXFileReference", "lastKnownFileType": "sourcecode.c.objc", "path": "main.m", "sourceTree": "<group>"},
        "APP_H": {"isa": "PBXFileReference", "lastKnownFileType": "sourcecode.c.h", "path": "App.h", "sourceTree": "<group>"},
        "PRODUCTS": {"isa": "PBXGroup", "children": ["PRODUCT"], "name": "Products", "sourceTree": "<group>"},
        "PRODUCT": {"isa": "PBXFileReference", "explicitFileType": "archive.ar", "includeInIndex": "0", "path": "libApp.a", "sourceTree": "BUILT_PRODUCTS_DIR"},
        "TARGET": {
            "isa": "PBXNativeTarget",
            "buildConfigurationList": "TARGET_LIST",
            "buildPhases": ["SOURCES_PHASE"],
            "buildRules": [],
            "dependencies": [],
            "name": "App",
            "productName": "App",
            "productReference": "PRODUCT",
            "productType": "com.apple.product-type.library.static"
        },
        "SOURCES_PHASE": {"isa": "PBXSourcesBuildPhase", "buildActionMask": "2147483647", "files": ["MAIN_M_BUILD"], "runOnlyForDeploymentPostprocessing": "0"},
        "MAIN_M_BUILD": {"isa": "PBXBuildFile", "fileRef": "MAIN_M"},
        "PROJECT_LIST": {"isa": "XCConfigurationList", "buildConfigurations": ["PROJECT_DEBUG"], "defaultConfigurationIsVisible": "0", "defaultConfigurationName": "Debug"},
        "PROJECT_DEBUG": {"isa": "XCBuildConfiguration", "buildSettings": {"SDKROOT": "iphoneos"}, "name": "Debug"},
        "TARGET_LIST": {"isa": "XCConfigurationList", "buildConfigurations": ["TARGET_DEBUG"], "defaultConfigurationIsVisible": "0", "defaultConfigurationName": "Debug"},
        "TARGET_DEBUG": {"isa": "XCBuildConfiguration", "buildSettings": {}, "name": "Debug"},
        "FANCY": {"isa": "PBXFancyFutureThing", "payload": {"nested": ["x", "y"]}, "related": "MAIN_M", "missing": "NOWHERE"}
    },
    "rootObject": "ROOT"
}"#;

/// Decodes JSON text into a document.
pub fn decode(json: &str) -> Document {
    JsonCodec::new()
        .decode(json.as_bytes())
        .expect("Failed to decode document")
}

/// The sample document.
pub fn sample_document() -> Document {
    decode(SAMPLE)
}

/// The sample document loaded as a project whose new objects draw seeded
/// identifiers.
pub fn sample_project() -> Project {
    Project::from_document_with(&sample_document(), ProjectOptions::seeded(99))
        .expect("Failed to load sample project")
}

/// A freshly scaffolded project with seeded identifiers.
pub fn seeded_project(seed: u64) -> Project {
    Project::with_options(ProjectOptions::seeded(seed)).expect("Failed to scaffold project")
}

/// Shorthand for identifiers in fixtures.
pub fn id(s: &str) -> ObjectId {
    ObjectId::new(s)
}

/// Identifiers of listed objects, in order.
pub fn ids(objects: Vec<&Object>) -> Vec<ObjectId> {
    objects.into_iter().map(|object| object.id().clone()).collect()
}
