use pbxgraph::document::PlistValue;
use pbxgraph::projector::{dehydrate, hydrate};
use pbxgraph::{Isa, JsonCodec, PlistCodec, Value};

use crate::helpers::*;

#[test]
fn test_dehydrate_reproduces_the_document() {
    let document = sample_document();
    let graph = hydrate(&document).expect("Failed to hydrate");
    assert_eq!(dehydrate(&graph), document);
}

#[test]
fn test_hydrate_of_dehydrate_is_identity() {
    let graph = hydrate(&sample_document()).unwrap();
    let again = hydrate(&dehydrate(&graph)).unwrap();
    assert_eq!(again, graph);
}

#[test]
fn test_encoded_bytes_are_stable() {
    let codec = JsonCodec::pretty();
    let first = codec.encode(&sample_document()).unwrap();
    let graph = hydrate(&codec.decode(&first).unwrap()).unwrap();
    let second = codec.encode(&dehydrate(&graph)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_round_trip_after_edits_keeps_insertion_order() {
    let mut project = sample_project();
    let main = project.main_group().unwrap();
    let added = project.new_group(&main, "Added").unwrap();

    let document = project.to_document();
    let keys: Vec<&str> = document
        .objects()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys.first(), Some(&"ROOT"));
    assert_eq!(keys.last(), Some(&added.as_str()));

    let reloaded = pbxgraph::Project::from_document(&document).unwrap();
    assert_eq!(reloaded.objects().order(), project.objects().order());
}

#[test]
fn test_unknown_kind_is_kept_verbatim() {
    let document = sample_document();
    let graph = hydrate(&document).unwrap();

    let fancy = graph.objects.get(&id("FANCY")).unwrap();
    assert!(fancy.isa().is_none());
    assert_eq!(fancy.kind().tag(), "PBXFancyFutureThing");
    // Never converted, even though it looks like an identifier.
    assert_eq!(fancy.get("related"), Some(&Value::from("MAIN_M")));
    assert_eq!(graph.objects.unknown().count(), 1);

    let written = dehydrate(&graph);
    let original = &document.objects().unwrap()["FANCY"];
    assert_eq!(&written.objects().unwrap()["FANCY"], original);
    assert_eq!(
        original.as_dictionary().unwrap().get("missing"),
        Some(&PlistValue::from("NOWHERE"))
    );
}

#[test]
fn test_references_are_typed_after_hydration() {
    let graph = hydrate(&sample_document()).unwrap();
    let target = graph.objects.get(&id("TARGET")).unwrap();
    assert!(target.is(Isa::PBXNativeTarget));
    assert_eq!(
        target.get("buildPhases"),
        Some(&Value::RefList(vec![id("SOURCES_PHASE")]))
    );
    assert_eq!(target.get("productReference"), Some(&Value::Ref(id("PRODUCT"))));
    // Plain strings stay plain.
    assert_eq!(target.get("productName"), Some(&Value::from("App")));
}
