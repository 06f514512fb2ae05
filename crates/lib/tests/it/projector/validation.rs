use pbxgraph::alloc::IdGenerator;
use pbxgraph::document::{Dictionary, PlistValue};
use pbxgraph::projector::{Violation, hydrate, hydrate_entries};
use pbxgraph::{Error, PlistCodec, Project};

use crate::helpers::*;

#[test]
fn test_broken_reference_names_the_missing_identifier() {
    let json = SAMPLE.replace(r#""fileRef": "MAIN_M""#, r#""fileRef": "GHOST""#);
    let err = hydrate(&decode(&json)).unwrap_err();
    assert!(err.has_broken_references());
    assert_eq!(err.broken_ids(), vec![&id("GHOST")]);
    assert!(err.violations().contains(&Violation::BrokenReference {
        owner: id("MAIN_M_BUILD"),
        attribute: "fileRef".to_string(),
        id: id("GHOST"),
    }));
}

#[test]
fn test_duplicate_identifiers_fail_hydration() {
    // A bad merge leaves two objects under one identifier, and a dangling
    // reference next to them.
    let json = SAMPLE
        .replace(
            r#""APP_H": {"isa""#,
            r#""MAIN_M": {"isa": "PBXGroup"}, "APP_H": {"isa""#,
        )
        .replace(r#""fileRef": "MAIN_M""#, r#""fileRef": "GONE""#);
    let document = pbxgraph::JsonCodec::new().decode(json.as_bytes()).unwrap();
    assert_eq!(document.repeated_objects().len(), 1);

    let err = hydrate(&document).unwrap_err();
    assert!(err.has_duplicates());
    assert_eq!(err.violations().len(), 2, "{err}");
    assert!(err
        .violations()
        .contains(&Violation::DuplicateIdentifier { id: id("MAIN_M") }));
    assert_eq!(err.broken_ids(), vec![&id("GONE")]);

    let err = Project::from_document(&document).unwrap_err();
    assert!(err.is_duplicate());
    assert!(err.is_broken_reference());

    // A stream of entries may repeat an identifier too.
    let group: Dictionary = [("isa".to_string(), PlistValue::from("PBXGroup"))]
        .into_iter()
        .collect();
    let group = PlistValue::Dictionary(group);
    let err = hydrate_entries(
        Some("G"),
        vec![("G", &group), ("G", &group)],
        IdGenerator::seeded(1),
    )
    .unwrap_err();
    assert_eq!(
        err.violations(),
        &[Violation::DuplicateIdentifier { id: id("G") }]
    );
}

#[test]
fn test_every_violation_is_reported_at_once() {
    let json = SAMPLE
        .replace(r#""mainGroup": "MAIN""#, r#""mainGroup": "NO_MAIN""#)
        .replace(r#""productReference": "PRODUCT""#, r#""productReference": 7"#)
        .replace(r#""rootObject": "ROOT""#, r#""rootObject": "NO_ROOT""#);
    let err: Error = hydrate(&decode(&json)).unwrap_err().into();
    assert!(err.is_structural());

    let Error::Hydration(err) = err else {
        panic!("expected a hydration error");
    };
    // The malformed target is skipped, which also breaks the root's
    // `targets` list.
    assert_eq!(err.violations().len(), 4, "{err}");
    assert!(err.violations().iter().any(|v| matches!(
        v,
        Violation::MalformedObject { id, .. } if id.as_str() == "TARGET"
    )));
    assert!(err
        .violations()
        .contains(&Violation::BrokenRootObject { id: id("NO_ROOT") }));
}

#[test]
fn test_project_from_corrupt_document() {
    let json = SAMPLE.replace(r#""children": ["PRODUCT"]"#, r#""children": ["PRODUCT", "LOST"]"#);
    let err = Project::from_document(&decode(&json)).unwrap_err();
    assert!(err.is_broken_reference());
    assert_eq!(err.module(), "projector");
}

#[test]
fn test_objects_must_be_dictionaries_with_isa() {
    let json = SAMPLE.replace(
        r#""FANCY": {"#,
        r#""LIST": ["not", "an", "object"], "BARE": {"name": "no isa"}, "FANCY": {"#,
    );
    let err = hydrate(&decode(&json)).unwrap_err();
    assert_eq!(err.violations().len(), 2);
    assert!(err.violations().contains(&Violation::MissingIsa { id: id("BARE") }));
}
