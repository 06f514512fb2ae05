use std::cmp::Ordering;

use pbxgraph::natural_sort::{NaturalSortKey, compare_names, sort_names};
use proptest::prelude::*;

/// The order Xcode's "Sort by Name" produces for these names.
const CALIBRATED: &[&str] = &[
    "  a", " a", "..a", ".a", "0.1.1", "0.1.01", "0.1.2", "0.1.10", "1", "01", "1.", "1a", "2",
    "2 a", "10", "a", "A", "a ", "a  b", "a 2", "a a", "a.", "a1", "A1B001", "A01B1", "ffh ",
    "\u{FB03} ", "ffj ",
];

#[test]
fn test_calibrated_order() {
    let mut names: Vec<&str> = CALIBRATED.iter().rev().copied().collect();
    sort_names(&mut names);
    assert_eq!(names, CALIBRATED);

    // Interleaved input gives the same result.
    let mut names: Vec<&str> = CALIBRATED
        .iter()
        .step_by(2)
        .chain(CALIBRATED.iter().skip(1).step_by(2))
        .copied()
        .collect();
    sort_names(&mut names);
    assert_eq!(names, CALIBRATED);
}

#[test]
fn test_short_fixture() {
    let mut names = vec![" a", "a", "A", "1", "10", "2", ".a", "a."];
    sort_names(&mut names);
    assert_eq!(names, vec![" a", ".a", "1", "2", "10", "a", "A", "a."]);
}

#[test]
fn test_keys_sort_like_names() {
    let mut keys: Vec<NaturalSortKey> = CALIBRATED.iter().rev().map(|n| NaturalSortKey::new(n)).collect();
    keys.sort();
    let names: Vec<&str> = keys.iter().map(NaturalSortKey::name).collect();
    assert_eq!(names, CALIBRATED);
}

fn name() -> impl Strategy<Value = String> {
    "[aAbB01 ._éÉ]{0,6}"
}

proptest! {
    #[test]
    fn prop_reflexive(a in name()) {
        prop_assert_eq!(compare_names(&a, &a), Ordering::Equal);
    }

    #[test]
    fn prop_antisymmetric(a in name(), b in name()) {
        prop_assert_eq!(compare_names(&a, &b), compare_names(&b, &a).reverse());
    }

    #[test]
    fn prop_transitive(a in name(), b in name(), c in name()) {
        let ab = compare_names(&a, &b);
        let bc = compare_names(&b, &c);
        if ab != Ordering::Greater && bc != Ordering::Greater {
            prop_assert_ne!(compare_names(&a, &c), Ordering::Greater);
        }
        if ab == Ordering::Equal && bc == Ordering::Equal {
            prop_assert_eq!(compare_names(&a, &c), Ordering::Equal);
        }
    }

    #[test]
    fn prop_sorting_is_independent_of_input_order(mut names in prop::collection::vec(name(), 0..12)) {
        let mut forward = names.clone();
        sort_names(&mut forward);
        names.reverse();
        sort_names(&mut names);
        // Only names comparing equal may swap places.
        for (x, y) in forward.iter().zip(&names) {
            prop_assert_eq!(compare_names(x, y), Ordering::Equal);
        }
    }

    #[test]
    fn prop_digit_runs_compare_by_value(a in 0u64..100_000, b in 0u64..100_000) {
        prop_assert_eq!(
            compare_names(&format!("f{a}"), &format!("f{b}")),
            a.cmp(&b)
        );
    }
}
