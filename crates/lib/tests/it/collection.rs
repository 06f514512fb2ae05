use std::collections::HashSet;

use pbxgraph::alloc::IdGenerator;
use pbxgraph::object::Attributes;
use pbxgraph::{Isa, ObjectCollection};
use proptest::prelude::*;

use crate::helpers::*;

#[test]
fn test_hydrated_identifiers_are_never_allocated() {
    let mut project = sample_project();
    let existing: HashSet<_> = project.objects().order().iter().cloned().collect();

    for _ in 0..64 {
        let created = project
            .create(Isa::PBXFileReference, Attributes::new())
            .expect("Failed to create object");
        assert!(!existing.contains(&created));
        assert!(created.is_canonical());
    }
}

#[test]
fn test_removed_identifiers_stay_retired() {
    let mut project = sample_project();
    let header = id("APP_H");
    project.remove(&header).expect("Failed to remove object");

    assert!(!project.objects().contains(&header));
    assert!(project.objects().is_issued(&header));
    let err = project.objects_mut().register(&header).unwrap_err();
    assert!(err.is_duplicate());
    assert_eq!(err.module(), "collection");
}

#[test]
fn test_find_by_attribute() {
    let project = sample_project();
    let found = project
        .objects()
        .find_by_attribute(Isa::PBXFileReference, "path", "main.m")
        .expect("main.m should be found");
    assert_eq!(found.id(), &id("MAIN_M"));
    assert!(project
        .objects()
        .find_by_attribute(Isa::PBXGroup, "path", "main.m")
        .is_none());
}

#[test]
fn test_referrers_lists_every_holder() {
    let project = sample_project();
    let referrers = project.objects().referrers(&id("MAIN_M"));
    let owners: Vec<_> = referrers.iter().map(|r| r.owner.clone()).collect();
    // The opaque object stores `MAIN_M` as text, not as a reference.
    assert_eq!(owners, vec![id("SOURCES"), id("MAIN_M_BUILD")]);
}

proptest! {
    #[test]
    fn prop_allocated_identifiers_are_unique(seed in any::<u64>(), count in 1usize..200) {
        let mut collection = ObjectCollection::with_generator(IdGenerator::seeded(seed));
        let mut seen = HashSet::new();
        for _ in 0..count {
            let id = collection.allocate().unwrap();
            prop_assert!(id.is_canonical());
            prop_assert!(seen.insert(id));
        }
    }

    #[test]
    fn prop_same_seed_collides_only_through_registration(seed in any::<u64>()) {
        let mut probe = IdGenerator::seeded(seed);
        let taken: Vec<_> = (0..4).map(|_| probe.next_candidate()).collect();

        let mut collection = ObjectCollection::with_generator(IdGenerator::seeded(seed));
        for id in &taken {
            collection.register(id).unwrap();
        }
        let fresh = collection.allocate().unwrap();
        prop_assert!(!taken.contains(&fresh));
    }
}
