//! Integration tests for Display and Debug implementations.
//!
//! Both are diagnostic: `Display` renders `{a, b}` in order, `Debug` names
//! the container.

use ordered_set::{FrozenOrderedSet, OrderedSet, OrderedSetError, StableSet};

// =============================================================================
// Display
// =============================================================================

#[test]
fn test_ordered_set_display() {
    let set: OrderedSet<i32> = [3, 1, 2].into_iter().collect();
    assert_eq!(format!("{set}"), "{3, 1, 2}");
}

#[test]
fn test_empty_display() {
    let set: OrderedSet<i32> = OrderedSet::new();
    assert_eq!(format!("{set}"), "{}");
}

#[test]
fn test_string_elements_display_unquoted() {
    let set: OrderedSet<&str> = ["x", "y"].into_iter().collect();
    assert_eq!(format!("{set}"), "{x, y}");
}

#[test]
fn test_frozen_display() {
    let frozen: FrozenOrderedSet<i32> = [1, 2].into_iter().collect();
    assert_eq!(format!("{frozen}"), "{1, 2}");
}

// =============================================================================
// Debug
// =============================================================================

#[test]
fn test_ordered_set_debug() {
    let set: OrderedSet<&str> = ["x", "y"].into_iter().collect();
    assert_eq!(format!("{set:?}"), r#"OrderedSet(["x", "y"])"#);
}

#[test]
fn test_empty_debug() {
    let set: OrderedSet<i32> = OrderedSet::new();
    assert_eq!(format!("{set:?}"), "OrderedSet()");
    let stable: StableSet<i32> = StableSet::new();
    assert_eq!(format!("{stable:?}"), "StableSet()");
}

#[test]
fn test_stable_set_debug() {
    let set: StableSet<i32> = [2, 1].into_iter().collect();
    assert_eq!(format!("{set:?}"), "StableSet([2, 1])");
}

#[test]
fn test_frozen_debug() {
    let frozen: FrozenOrderedSet<i32> = [1, 2].into_iter().collect();
    assert_eq!(format!("{frozen:?}"), "FrozenOrderedSet([1, 2])");
}

#[test]
fn test_error_display() {
    let error = OrderedSetError::IndexOutOfRange {
        index: 7,
        length: 2,
    };
    assert_eq!(
        error.to_string(),
        "index 7 out of range for ordered set of length 2"
    );
}
