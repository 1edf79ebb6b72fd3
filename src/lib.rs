//! # ordered-set
//!
//! An insertion-ordered set: a collection that combines the uniqueness of a
//! set with the positional indexing of a sequence.
//!
//! ## Overview
//!
//! - **`OrderedSet`**: mutable, O(1) membership, O(1) access by position and
//!   O(1) position lookup by element
//! - **`StableSet`**: the same container with order-insensitive equality
//! - **`FrozenOrderedSet`**: an immutable, hashable snapshot with O(1) clone
//! - **Set algebra**: union, intersection, difference and symmetric
//!   difference against any [`SetOperand`], with results ordered by the
//!   left-hand set
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` as a plain sequence, plus comparison
//!   and update against `serde_json::Value`
//! - `rayon`: parallel iteration (implies `arc`)
//! - `arc`: share frozen sets with `Arc` instead of `Rc`, making them
//!   `Send + Sync`
//! - `fxhash`: use `rustc_hash::FxBuildHasher` for the position index
//! - `ahash`: use `ahash::RandomState` for the position index
//! - `full`: `serde` and `rayon`
//!
//! ## Example
//!
//! ```rust
//! use ordered_set::prelude::*;
//!
//! let mut set: OrderedSet<&str> = ["apple", "banana"].into_iter().collect();
//! set.add("cherry");
//! set.add("apple");
//!
//! assert_eq!(set, ["apple", "banana", "cherry"]);
//! assert_eq!(set.index_of("banana"), Ok(1));
//! assert_eq!(set.get(-1), Ok(&"cherry"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use ordered_set::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{OrderedSetError, OrderedSetResult};
    pub use crate::ordered::{
        Adjacency, FrozenOrderedSet, OperandKind, OrderedSet, SetOperand, StableSet,
    };
}

pub mod error;
pub mod ordered;

pub use error::{OrderedSetError, OrderedSetResult};
pub use ordered::{
    Adjacency, Cursor, DefaultHashBuilder, Direction, EqualityPolicy, FrozenOrderedSet,
    OperandKind, OrderInsensitive, OrderSensitive, OrderedSet, OrderedSetIntoIterator,
    OrderedSetIterator, SetOperand, StableSet,
};
