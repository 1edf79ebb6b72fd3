#![cfg(feature = "serde")]

//! Integration tests for serde support.
//!
//! Ordered sets serialize as their element sequence and deserialize through
//! the usual de-duplicating constructor.

use ordered_set::{FrozenOrderedSet, OrderedSet, StableSet};
use proptest::prelude::*;
use rstest::rstest;
use serde::{Deserialize, Serialize};

// =============================================================================
// OrderedSet
// =============================================================================

#[rstest]
fn test_serializes_as_sequence() {
    let set: OrderedSet<i32> = [3, 1, 2].into_iter().collect();
    assert_eq!(serde_json::to_string(&set).unwrap(), "[3,1,2]");
}

#[rstest]
fn test_json_roundtrip() {
    let set: OrderedSet<String> = ["b", "a", "c"].into_iter().map(String::from).collect();
    let json = serde_json::to_string(&set).unwrap();
    let restored: OrderedSet<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(set, restored);
}

#[rstest]
fn test_empty_roundtrip() {
    let empty: OrderedSet<i32> = OrderedSet::new();
    let json = serde_json::to_string(&empty).unwrap();
    assert_eq!(json, "[]");
    let restored: OrderedSet<i32> = serde_json::from_str(&json).unwrap();
    assert!(restored.is_empty());
}

#[rstest]
fn test_empty_set_is_distinct_from_none() {
    let absent: Option<OrderedSet<i32>> = None;
    let present: Option<OrderedSet<i32>> = Some(OrderedSet::new());
    assert_eq!(serde_json::to_string(&absent).unwrap(), "null");
    assert_eq!(serde_json::to_string(&present).unwrap(), "[]");

    let restored: Option<OrderedSet<i32>> = serde_json::from_str("[]").unwrap();
    assert!(restored.is_some_and(|set| set.is_empty()));
    let restored: Option<OrderedSet<i32>> = serde_json::from_str("null").unwrap();
    assert!(restored.is_none());
}

#[rstest]
fn test_deserialize_folds_duplicates() {
    let set: OrderedSet<i32> = serde_json::from_str("[2, 1, 2, 3, 1]").unwrap();
    assert_eq!(set, [2, 1, 3]);
    assert_eq!(set.index_of(&3), Ok(2));
}

#[rstest]
#[case::object(r#"{"a": 1}"#)]
#[case::number("42")]
#[case::null("null")]
fn test_deserialize_rejects_non_sequences(#[case] json: &str) {
    assert!(serde_json::from_str::<OrderedSet<String>>(json).is_err());
}

#[rstest]
fn test_nested_in_struct() {
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Pipeline {
        name: String,
        stages: OrderedSet<String>,
    }

    let pipeline = Pipeline {
        name: "build".to_string(),
        stages: ["fetch", "compile", "test"].into_iter().map(String::from).collect(),
    };
    let json = serde_json::to_string(&pipeline).unwrap();
    assert_eq!(json, r#"{"name":"build","stages":["fetch","compile","test"]}"#);
    let restored: Pipeline = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, pipeline);
}

// =============================================================================
// StableSet and FrozenOrderedSet
// =============================================================================

#[rstest]
fn test_stable_set_keeps_order_on_the_wire() {
    let set: StableSet<i32> = [3, 1, 2].into_iter().collect();
    assert_eq!(serde_json::to_string(&set).unwrap(), "[3,1,2]");
    let restored: StableSet<i32> = serde_json::from_str("[3,1,2]").unwrap();
    assert_eq!(restored.as_slice(), &[3, 1, 2]);
}

#[rstest]
fn test_frozen_roundtrip() {
    let frozen: FrozenOrderedSet<i32> = [5, 4, 5].into_iter().collect();
    let json = serde_json::to_string(&frozen).unwrap();
    assert_eq!(json, "[5,4]");
    let restored: FrozenOrderedSet<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, frozen);
}

// =============================================================================
// Round-trip Law
// Description: from_json(to_json(set)) == set, including the empty set
// =============================================================================

proptest! {
    #[test]
    fn prop_json_roundtrip_law(elements in prop::collection::vec(any::<i64>(), 0..40)) {
        let set: OrderedSet<i64> = elements.into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        let restored: OrderedSet<i64> = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(restored, set);
    }
}
