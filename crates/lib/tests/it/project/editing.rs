use pbxgraph::project::{GroupsPosition, ProjectError};
use pbxgraph::{Error, Isa, Value};

use crate::helpers::*;

#[test]
fn test_loaded_project_navigation() {
    let project = sample_project();
    assert_eq!(project.main_group().unwrap(), id("MAIN"));
    assert_eq!(project.products_group().unwrap(), Some(id("PRODUCTS")));
    assert_eq!(project.target_named("App").unwrap().unwrap().id(), &id("TARGET"));
    assert!(project.target_named("Missing").unwrap().is_none());
    assert_eq!(project.display_name(&id("MAIN")).as_deref(), Some("Main Group"));
    assert_eq!(project.display_name(&id("APP_H")).as_deref(), Some("App.h"));
    assert_eq!(project.objects_of_kind(Isa::PBXFileReference).count(), 3);
}

#[test]
fn test_sorted_children_of_loaded_group() {
    let mut project = sample_project();
    let sources = id("SOURCES");
    project.new_file(&sources, "main10.m").unwrap();
    project.new_file(&sources, "main2.m").unwrap();
    project.new_group(&sources, "Helpers").unwrap();

    let listed = |position| -> Vec<String> {
        project
            .sorted_children(&sources, position)
            .unwrap()
            .into_iter()
            .filter_map(|child| project.display_name(child.id()))
            .collect()
    };
    assert_eq!(
        listed(GroupsPosition::Mixed),
        vec!["App.h", "Helpers", "main.m", "main2.m", "main10.m"]
    );
    assert_eq!(
        listed(GroupsPosition::Above),
        vec!["Helpers", "App.h", "main.m", "main2.m", "main10.m"]
    );
    // Storage order is untouched.
    let stored = ids(project.objects().get_many(&sources, "children").unwrap());
    assert_eq!(&stored[..2], &[id("MAIN_M"), id("APP_H")]);
}

#[test]
fn test_remove_file_everywhere() {
    let mut project = sample_project();
    let removed = project.remove(&id("MAIN_M")).unwrap();
    assert_eq!(removed.path(), Some("main.m"));

    let objects = project.objects();
    assert_eq!(
        objects.get(&id("SOURCES")).unwrap().get("children"),
        Some(&Value::RefList(vec![id("APP_H")]))
    );
    // The build file now points nowhere and reads as unset.
    assert!(objects.get_one(&id("MAIN_M_BUILD"), "file_ref").unwrap().is_none());

    // The document still hydrates.
    pbxgraph::Project::from_document(&project.to_document()).unwrap();
}

#[test]
fn test_remove_file_from_loaded_phase() {
    let mut project = sample_project();
    let phase = id("SOURCES_PHASE");
    assert!(project.remove_file_from_phase(&phase, &id("MAIN_M")).unwrap());
    assert!(project.objects().get(&id("MAIN_M_BUILD")).is_none());
    assert!(project.objects().contains(&id("MAIN_M")));
}

#[test]
fn test_build_settings_of_loaded_project() {
    let mut project = sample_project();
    let root = project.root_id().clone();
    let settings = project.build_settings(&root, "Debug").unwrap().unwrap();
    assert!(settings.get("SDKROOT").unwrap() == "iphoneos");

    project
        .build_settings_mut(&id("TARGET"), "Debug")
        .unwrap()
        .unwrap()
        .insert("PRODUCT_NAME".to_string(), Value::from("$(TARGET_NAME)"));
    let settings = project.build_settings(&id("TARGET"), "Debug").unwrap().unwrap();
    assert_eq!(settings.len(), 1);

    let err = project.build_settings(&id("MAIN"), "Debug").unwrap_err();
    assert!(matches!(err, Error::Project(ProjectError::InvalidKind { .. })));
}

#[test]
fn test_new_file_in_a_file_is_rejected() {
    let mut project = sample_project();
    let err = project.new_file(&id("MAIN_M"), "x.m").unwrap_err();
    assert!(err.is_type_mismatch());
}

#[test]
fn test_missing_main_group_is_reported() {
    let json = SAMPLE.replace(r#""mainGroup": "MAIN","#, "");
    let project = pbxgraph::Project::from_document(&decode(&json)).unwrap();
    let err = project.main_group().unwrap_err();
    assert!(matches!(err, Error::Project(ProjectError::Unset { .. })));
    // Without a main group nothing is displayed as `Main Group`.
    assert_eq!(project.display_name(&id("MAIN")), None);
}

#[test]
fn test_groups_holding_unmodelled_children_accept_new_children() {
    let json = SAMPLE.replace(
        r#""children": ["MAIN_M", "APP_H"]"#,
        r#""children": ["MAIN_M", "APP_H", "FANCY"]"#,
    );
    let mut project = pbxgraph::Project::from_document(&decode(&json)).unwrap();
    let sources = id("SOURCES");
    let before = project.objects().len();

    let file = project.new_file(&sources, "extra.m").unwrap();
    let group = project.new_group(&sources, "More").unwrap();
    assert_eq!(project.objects().len(), before + 2);
    assert_eq!(
        ids(project.objects().get_many(&sources, "children").unwrap()),
        vec![id("MAIN_M"), id("APP_H"), id("FANCY"), file, group]
    );

    // Unmodelled kinds can be linked as children directly as well.
    let main = id("MAIN");
    project
        .objects_mut()
        .push(&main, "children", &id("FANCY"))
        .unwrap();
    assert_eq!(ids(project.objects().get_many(&main, "children").unwrap()).len(), 3);
}

#[test]
fn test_failed_edits_leave_no_objects_behind() {
    let mut project = sample_project();
    let before = project.objects().len();
    let products = ids(project.objects().get_many(&id("PRODUCTS"), "children").unwrap());

    // Break the storage of the lists the helpers link into.
    for (owner, attribute) in [("ROOT", "targets"), ("SOURCES", "children"), ("TARGET", "buildPhases")] {
        project
            .objects_mut()
            .get_mut(&id(owner))
            .unwrap()
            .set(attribute, Value::from("not a list"));
    }

    assert!(project.new_native_target("Other", "com.apple.product-type.library.static").is_err());
    assert!(project.new_group(&id("SOURCES"), "Lost").is_err());
    assert!(project.new_file(&id("SOURCES"), "lost.m").is_err());
    assert!(project.build_phase(&id("TARGET"), Isa::PBXCopyFilesBuildPhase).is_err());
    assert!(project.add_shell_script_build_phase(&id("TARGET"), "Lint", "lint").is_err());

    assert_eq!(project.objects().len(), before);
    // The product reference linked before the failure is gone again.
    assert_eq!(
        ids(project.objects().get_many(&id("PRODUCTS"), "children").unwrap()),
        products
    );
}
