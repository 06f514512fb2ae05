use pbxgraph::constants::{APPLICATION_PRODUCT_TYPE, STATIC_LIBRARY_PRODUCT_TYPE};
use pbxgraph::document::PlistValue;
use pbxgraph::project::GroupsPosition;
use pbxgraph::{Isa, Project, ProjectOptions, Value};

use crate::helpers::*;

#[test]
fn test_scaffold_hydrates_cleanly() {
    let project = seeded_project(1);
    let document = project.to_document();
    let reloaded = Project::from_document(&document).expect("scaffold should hydrate");
    assert_eq!(reloaded.to_document(), document);
}

#[test]
fn test_scaffold_respects_options() {
    let options = ProjectOptions {
        development_region: "en".to_string(),
        known_regions: vec!["en".to_string(), "Base".to_string()],
        object_version: "50".to_string(),
        ..ProjectOptions::seeded(2)
    };
    let project = Project::with_options(options).unwrap();
    let root = project.root().unwrap();
    assert!(root.get("developmentRegion").unwrap() == "en");
    assert_eq!(
        root.get("knownRegions"),
        Some(&Value::from(vec!["en", "Base"]))
    );
    assert_eq!(
        project.to_document().get("objectVersion"),
        Some(&PlistValue::from("50"))
    );
}

#[test]
fn test_build_a_project_from_scratch() {
    let mut project = seeded_project(3);
    let main = project.main_group().unwrap();
    let sources = project.new_group(&main, "Sources").unwrap();
    let app_m = project.new_file(&sources, "Sources/AppDelegate.m").unwrap();
    let app_h = project.new_file(&sources, "Sources/AppDelegate.h").unwrap();
    let foundation = project.add_system_framework("Foundation").unwrap();

    let app = project.new_native_target("App", APPLICATION_PRODUCT_TYPE).unwrap();
    let kit = project.new_native_target("Kit", STATIC_LIBRARY_PRODUCT_TYPE).unwrap();
    project
        .add_file_references(&app, &[app_m.clone(), app_h], Some("-fobjc-arc"))
        .unwrap();
    let frameworks = project.build_phase(&app, Isa::PBXFrameworksBuildPhase).unwrap();
    project.add_file_to_phase(&frameworks, &foundation).unwrap();
    project.add_dependency(&app, &kit).unwrap();
    project
        .add_shell_script_build_phase(&app, "Lint", "make lint")
        .unwrap();

    let phase_kinds: Vec<_> = project
        .objects()
        .get_many(&app, "build_phases")
        .unwrap()
        .into_iter()
        .map(|phase| phase.kind().tag().to_string())
        .collect();
    assert_eq!(
        phase_kinds,
        vec![
            "PBXSourcesBuildPhase",
            "PBXHeadersBuildPhase",
            "PBXFrameworksBuildPhase",
            "PBXShellScriptBuildPhase"
        ]
    );

    let framework = project.objects().get(&foundation).unwrap();
    assert_eq!(framework.path(), Some("System/Library/Frameworks/Foundation.framework"));
    assert!(framework.get("sourceTree").unwrap() == "SDKROOT");

    let products = project.products_group().unwrap().unwrap();
    let product_names: Vec<String> = project
        .sorted_children(&products, GroupsPosition::Mixed)
        .unwrap()
        .into_iter()
        .filter_map(|child| project.display_name(child.id()))
        .collect();
    assert_eq!(product_names, vec!["App.app", "libKit.a"]);

    // The whole thing survives a document round trip.
    let reloaded = Project::from_document(&project.to_document()).unwrap();
    assert_eq!(reloaded.objects(), project.objects());
    assert_eq!(reloaded.group_named("Sources").unwrap().id(), &sources);
}
