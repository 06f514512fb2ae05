use pbxgraph::projector::{dehydrate, hydrate};
use pbxgraph::{Isa, Project, Value};

use crate::helpers::*;

/// The sample project with a synchronized folder, its exception sets and a
/// Swift package product linked into the target.
fn modern_json() -> String {
    SAMPLE
        .replace(
            r#""mainGroup": "MAIN","#,
            r#""mainGroup": "MAIN", "packageReferences": ["REMOTE_PKG", "LOCAL_PKG"],"#,
        )
        .replace(
            r#""children": ["SOURCES", "PRODUCTS"]"#,
            r#""children": ["SOURCES", "SYNCED", "PRODUCTS"]"#,
        )
        .replace(
            r#""dependencies": [],"#,
            r#""dependencies": [], "fileSystemSynchronizedGroups": ["SYNCED"], "packageProductDependencies": ["PRODUCT_DEP"],"#,
        )
        .replace(
            r#""files": ["MAIN_M_BUILD"]"#,
            r#""files": ["MAIN_M_BUILD", "PKG_BUILD"]"#,
        )
        .replace(
            r#""FANCY": {"#,
            r#""SYNCED": {"isa": "PBXFileSystemSynchronizedRootGroup", "exceptions": ["EXCEPT_FILES", "EXCEPT_PHASE"], "path": "Feature", "sourceTree": "<group>"},
        "EXCEPT_FILES": {"isa": "PBXFileSystemSynchronizedBuildFileExceptionSet", "membershipExceptions": ["Info.plist"], "target": "TARGET"},
        "EXCEPT_PHASE": {"isa": "PBXFileSystemSynchronizedGroupBuildPhaseMembershipExceptionSet", "buildPhase": "SOURCES_PHASE", "membershipExceptions": ["Generated.swift"]},
        "REMOTE_PKG": {"isa": "XCRemoteSwiftPackageReference", "repositoryURL": "https://github.com/apple/swift-collections", "requirement": {"kind": "upToNextMajorVersion", "minimumVersion": "1.0.0"}},
        "LOCAL_PKG": {"isa": "XCLocalSwiftPackageReference", "relativePath": "Packages/Core"},
        "PRODUCT_DEP": {"isa": "XCSwiftPackageProductDependency", "package": "REMOTE_PKG", "productName": "Collections"},
        "PKG_BUILD": {"isa": "PBXBuildFile", "productRef": "PRODUCT_DEP"},
        "FANCY": {"#,
        )
}

#[test]
fn test_package_and_synchronized_folder_references_hydrate() {
    let document = decode(&modern_json());
    let graph = hydrate(&document).unwrap();
    let objects = &graph.objects;

    let product = objects.get(&id("PRODUCT_DEP")).unwrap();
    assert!(product.is(Isa::XCSwiftPackageProductDependency));
    assert_eq!(product.get("package"), Some(&Value::Ref(id("REMOTE_PKG"))));
    let package = objects.get_one(&id("PRODUCT_DEP"), "package").unwrap().unwrap();
    assert_eq!(package.get_text("repositoryURL"), Some("https://github.com/apple/swift-collections"));

    let phase = objects.get_one(&id("EXCEPT_PHASE"), "build_phase").unwrap().unwrap();
    assert_eq!(phase.id(), &id("SOURCES_PHASE"));
    let target = objects.get_one(&id("EXCEPT_FILES"), "target").unwrap().unwrap();
    assert_eq!(target.id(), &id("TARGET"));
    assert_eq!(
        ids(objects.get_many(&id("SYNCED"), "exceptions").unwrap()),
        vec![id("EXCEPT_FILES"), id("EXCEPT_PHASE")]
    );
    assert_eq!(
        ids(objects.get_many(&id("ROOT"), "package_references").unwrap()),
        vec![id("REMOTE_PKG"), id("LOCAL_PKG")]
    );
    let build_file = objects.get_one(&id("PKG_BUILD"), "product_ref").unwrap().unwrap();
    assert_eq!(build_file.id(), &id("PRODUCT_DEP"));

    assert_eq!(dehydrate(&graph), document);
}

#[test]
fn test_broken_package_and_exception_references_are_reported() {
    let json = modern_json()
        .replace(r#""package": "REMOTE_PKG""#, r#""package": "GONE_PKG""#)
        .replace(r#""buildPhase": "SOURCES_PHASE""#, r#""buildPhase": "GONE_PHASE""#)
        .replace(r#""target": "TARGET""#, r#""target": "GONE_TARGET""#);
    let err = hydrate(&decode(&json)).unwrap_err();
    assert_eq!(
        err.broken_ids(),
        vec![&id("GONE_TARGET"), &id("GONE_PHASE"), &id("GONE_PKG")]
    );
}

#[test]
fn test_synchronized_folder_lives_in_a_group() {
    let mut project = Project::from_document(&decode(&modern_json())).unwrap();
    let main = id("MAIN");
    let synced = id("SYNCED");
    assert_eq!(project.parent_group(&synced).unwrap().unwrap().id(), &main);

    // A group holding a synchronized folder still takes new children.
    let file = project.new_file(&main, "README.md").unwrap();
    assert_eq!(
        ids(project.objects().get_many(&main, "children").unwrap()),
        vec![id("SOURCES"), synced.clone(), id("PRODUCTS"), file]
    );

    project.move_to_group(&synced, &id("SOURCES")).unwrap();
    assert_eq!(project.parent_group(&synced).unwrap().unwrap().id(), &id("SOURCES"));
    assert!(!ids(project.objects().get_many(&main, "children").unwrap()).contains(&synced));
}

#[test]
fn test_membership_exceptions_only_name_sources_or_copy_phases() {
    let mut project = Project::from_document(&decode(&modern_json())).unwrap();
    let headers = project
        .build_phase(&id("TARGET"), Isa::PBXHeadersBuildPhase)
        .unwrap();
    let err = project
        .objects_mut()
        .set_one(&id("EXCEPT_PHASE"), "build_phase", Some(&headers))
        .unwrap_err();
    assert!(err.is_type_mismatch());

    let copy = project
        .build_phase(&id("TARGET"), Isa::PBXCopyFilesBuildPhase)
        .unwrap();
    project
        .objects_mut()
        .set_one(&id("EXCEPT_PHASE"), "build_phase", Some(&copy))
        .unwrap();
}

#[test]
fn test_rekeying_reaches_packages_and_synchronized_folders() {
    let mut project = Project::from_document(&decode(&modern_json())).unwrap();
    let renames = project.predictable_ids().unwrap();
    for old in ["SYNCED", "EXCEPT_FILES", "EXCEPT_PHASE", "REMOTE_PKG", "LOCAL_PKG", "PRODUCT_DEP", "PKG_BUILD"] {
        assert!(
            renames.iter().any(|(from, _)| from.as_str() == old),
            "{old} was not renamed"
        );
    }

    let reloaded = Project::from_document(&project.to_document()).unwrap();
    let target = reloaded.target_named("App").unwrap().unwrap();
    let products = reloaded
        .objects()
        .get_many(target.id(), "package_product_dependencies")
        .unwrap();
    let package = reloaded
        .objects()
        .get_one(products[0].id(), "package")
        .unwrap()
        .unwrap();
    assert!(package.is(Isa::XCRemoteSwiftPackageReference));
}
