use pbxgraph::{Project, ProjectOptions};

use crate::helpers::*;

#[test]
fn test_loaded_projects_agree_after_rekeying() {
    let mut first = sample_project();
    let mut second =
        Project::from_document_with(&sample_document(), ProjectOptions::seeded(5)).unwrap();
    first.predictable_ids().unwrap();
    second.predictable_ids().unwrap();
    assert_eq!(first.to_document(), second.to_document());
}

#[test]
fn test_reachable_objects_get_canonical_identifiers() {
    let mut project = sample_project();
    let renames = project.predictable_ids().unwrap();

    // Everything but the object nothing points at.
    assert_eq!(renames.len(), project.objects().len() - 1);
    assert!(renames.iter().all(|(from, _)| from.as_str() != "FANCY"));
    assert!(renames.iter().all(|(_, to)| to.is_canonical()));
    assert!(project.objects().contains(&id("FANCY")));
    assert!(project.root_id().is_canonical());
    let (_, main) = renames
        .iter()
        .find(|(from, _)| from.as_str() == "MAIN")
        .unwrap();
    assert_eq!(&project.main_group().unwrap(), main);
}

#[test]
fn test_rekeyed_project_survives_a_round_trip() {
    let mut project = sample_project();
    project.predictable_ids().unwrap();
    let document = project.to_document();
    let reloaded = Project::from_document(&document).unwrap();
    assert_eq!(reloaded.to_document(), document);

    let target = reloaded.target_named("App").unwrap().unwrap();
    let phases = reloaded.objects().get_many(target.id(), "build_phases").unwrap();
    assert_eq!(phases.len(), 1);
}

#[test]
fn test_rekeying_twice_changes_nothing() {
    let mut project = sample_project();
    project.predictable_ids().unwrap();
    let once = project.to_document();
    project.predictable_ids().unwrap();
    assert_eq!(project.to_document(), once);
}

#[test]
fn test_edits_after_rekeying_use_fresh_identifiers() {
    let mut project = sample_project();
    let renames = project.predictable_ids().unwrap();
    let main = project.main_group().unwrap();
    let group = project.new_group(&main, "Extra").unwrap();
    assert!(renames.iter().all(|(from, to)| *from != group && *to != group));
    assert!(!project.objects().contains(&id("MAIN")));
}
