use pbxgraph::relation::RelationError;
use pbxgraph::schema::registry;
use pbxgraph::{Error, Isa, Value};

use crate::helpers::*;

/// Every direct link has a matching inverse link and vice versa.
fn assert_bidirectional(project: &pbxgraph::Project) {
    let objects = project.objects();
    for group in objects.iter().filter(|o| o.isa().is_some_and(Isa::is_group)) {
        for child in objects.get_many(group.id(), "children").unwrap() {
            let relationship = if child.isa().is_some_and(Isa::is_group) {
                "parent"
            } else {
                "group"
            };
            let parent = objects.get_one(child.id(), relationship).unwrap();
            assert_eq!(parent.map(|p| p.id()), Some(group.id()), "{child}");
        }
    }
    for phase in objects.iter().filter(|o| o.isa().is_some_and(Isa::is_build_phase)) {
        for build_file in objects.get_many(phase.id(), "files").unwrap() {
            let owner = objects.get_one(build_file.id(), "phase").unwrap();
            assert_eq!(owner.map(|p| p.id()), Some(phase.id()));
        }
        let target = objects.get_one(phase.id(), "target").unwrap().unwrap();
        let phases = ids(objects.get_many(target.id(), "build_phases").unwrap());
        assert!(phases.contains(phase.id()));
    }
}

#[test]
fn test_sample_is_bidirectionally_consistent() {
    assert_bidirectional(&sample_project());
}

#[test]
fn test_consistency_survives_edits() {
    let mut project = sample_project();
    let sources = id("SOURCES");
    let main = id("MAIN");
    let nested = project.new_group(&sources, "Nested").unwrap();
    let file = project.new_file(&nested, "Nested/util.m").unwrap();
    project.move_to_group(&id("APP_H"), &nested).unwrap();
    project.move_to_group(&nested, &main).unwrap();
    let target = id("TARGET");
    project.add_file_references(&target, &[file, id("APP_H")], None).unwrap();

    assert_bidirectional(&project);
    assert_eq!(
        ids(project.objects().get_many(&sources, "children").unwrap()),
        vec![id("MAIN_M")]
    );
}

#[test]
fn test_inverse_exclusivity() {
    let mut project = sample_project();
    let objects = project.objects_mut();
    let a = objects.create(Isa::PBXGroup, Default::default()).unwrap();
    let b = objects.create(Isa::PBXGroup, Default::default()).unwrap();
    let file = id("APP_H");

    objects.set_one(&file, "group", Some(&a)).unwrap();
    objects.set_one(&file, "group", Some(&b)).unwrap();

    assert!(!objects.get(&a).unwrap().get("children").unwrap().references(&file));
    assert!(objects.get(&b).unwrap().get("children").unwrap().references(&file));
    assert!(!objects.get(&id("SOURCES")).unwrap().get("children").unwrap().references(&file));
}

#[test]
fn test_direct_push_moves_exclusive_targets() {
    let mut project = sample_project();
    let objects = project.objects_mut();
    let other = objects.create(Isa::PBXGroup, Default::default()).unwrap();
    objects.push(&other, "children", &id("MAIN_M")).unwrap();

    assert_eq!(
        ids(objects.get_many(&id("SOURCES"), "children").unwrap()),
        vec![id("APP_H")]
    );
    assert_eq!(objects.get_one(&id("MAIN_M"), "group").unwrap().unwrap().id(), &other);
}

#[test]
fn test_shared_targets_are_not_moved() {
    // A file may be built by any number of build files.
    let mut project = sample_project();
    let phase = id("SOURCES_PHASE");
    project.add_file_to_phase(&phase, &id("MAIN_M")).unwrap();
    let referring = project.objects().get_many(&id("MAIN_M"), "build_files").unwrap();
    assert_eq!(referring.len(), 2);
}

#[test]
fn test_unlink() {
    let mut project = sample_project();
    let objects = project.objects_mut();
    assert!(objects.unlink(&id("SOURCES"), "children", &id("APP_H")).unwrap());
    assert!(!objects.unlink(&id("SOURCES"), "children", &id("APP_H")).unwrap());
    assert!(objects.get_one(&id("APP_H"), "group").unwrap().is_none());
}

#[test]
fn test_opaque_objects_have_no_relationships() {
    let project = sample_project();
    let err = project.objects().get_one(&id("FANCY"), "related").unwrap_err();
    assert!(matches!(
        err,
        Error::Relation(RelationError::UnknownRelationship { .. })
    ));
}

#[test]
fn test_invalid_storage_is_reported() {
    let mut project = sample_project();
    project
        .objects_mut()
        .get_mut(&id("SOURCES"))
        .unwrap()
        .set("children", Value::from("MAIN_M"));
    let err = project.objects().get_many(&id("SOURCES"), "children").unwrap_err();
    assert!(err.is_structural());
}

#[test]
fn test_builtin_schema_is_consistent() {
    registry().validate().expect("builtin schema should validate");
}
