//! Insertion-ordered sets.
//!
//! This module provides a set that also behaves like a sequence:
//!
//! - [`OrderedSet`]: a mutable set that remembers insertion order, with O(1)
//!   membership, O(1) positional access and O(1) position lookup by element
//! - [`StableSet`]: the same structure with order-insensitive equality
//! - [`FrozenOrderedSet`]: an immutable, hashable snapshot
//!
//! # Representation
//!
//! Every set keeps two coupled structures: the element sequence and a map
//! from element to its position in that sequence. Lookups in either
//! direction are O(1); removing an element shifts the tail of the sequence
//! and re-indexes it, so removal is O(n).
//!
//! ```text
//!   elements:  [ "a", "b", "r", "c", "d" ]
//!   positions: { "a": 0, "b": 1, "r": 2, "c": 3, "d": 4 }
//! ```
//!
//! # Examples
//!
//! ## `OrderedSet`
//!
//! ```rust
//! use ordered_set::OrderedSet;
//!
//! let mut letters: OrderedSet<char> = "abracadabra".chars().collect();
//! assert_eq!(letters, ['a', 'b', 'r', 'c', 'd']);
//! assert_eq!(letters.index_of(&'c'), Ok(3));
//! assert_eq!(letters.get(-1), Ok(&'d'));
//!
//! letters.discard(&'b');
//! assert_eq!(letters.index_of(&'c'), Ok(2));
//! ```
//!
//! ## Set algebra
//!
//! Results follow the order of the left-hand operand:
//!
//! ```rust
//! use ordered_set::OrderedSet;
//!
//! let left: OrderedSet<i32> = [1, 4, 3, 5, 7].into_iter().collect();
//! let right: OrderedSet<i32> = [9, 7, 1, 3, 2].into_iter().collect();
//!
//! assert_eq!(&left ^ &right, [4, 5, 9, 2]);
//! assert_eq!(&left & &right, [1, 3, 7]);
//! assert_eq!(&left - &right, [4, 5]);
//! assert_eq!(&left | &right, [1, 4, 3, 5, 7, 9, 2]);
//! ```
//!
//! ## `FrozenOrderedSet`
//!
//! ```rust
//! use ordered_set::FrozenOrderedSet;
//! use std::collections::HashMap;
//!
//! let key: FrozenOrderedSet<char> = "abc".chars().collect();
//! let mut scores = HashMap::new();
//! scores.insert(key.clone(), 10);
//! assert_eq!(scores.get(&key), Some(&10));
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type used by [`FrozenOrderedSet`].
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

// =============================================================================
// Hasher Selection
// =============================================================================

/// The hasher used for the element → position index.
///
/// `fxhash` selects `rustc_hash::FxBuildHasher`, `ahash` selects
/// `ahash::RandomState`; otherwise the standard library's SipHash-based
/// `RandomState` is used. If both features are enabled, `fxhash` wins.
#[cfg(feature = "fxhash")]
pub type DefaultHashBuilder = rustc_hash::FxBuildHasher;

/// The hasher used for the element → position index.
///
/// `fxhash` selects `rustc_hash::FxBuildHasher`, `ahash` selects
/// `ahash::RandomState`; otherwise the standard library's SipHash-based
/// `RandomState` is used. If both features are enabled, `fxhash` wins.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultHashBuilder = ahash::RandomState;

/// The hasher used for the element → position index.
///
/// `fxhash` selects `rustc_hash::FxBuildHasher`, `ahash` selects
/// `ahash::RandomState`; otherwise the standard library's SipHash-based
/// `RandomState` is used. If both features are enabled, `fxhash` wins.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultHashBuilder = std::collections::hash_map::RandomState;

mod algebra;
mod cursor;
mod frozen;
mod operand;
mod policy;
mod set;
#[cfg(feature = "serde")]
mod value;

pub use algebra::Adjacency;
pub use cursor::{Cursor, Direction};
pub use frozen::FrozenOrderedSet;
pub use operand::{OperandKind, SetOperand};
pub use policy::{EqualityPolicy, OrderInsensitive, OrderSensitive};
pub use set::{OrderedSet, OrderedSetIntoIterator, OrderedSetIterator, StableSet};

// =============================================================================
// Tests
// =============================================================================
