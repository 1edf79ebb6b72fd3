//! Operands accepted by set algebra and equality.
//!
//! Every collection an ordered set can be combined with implements
//! [`SetOperand`]. Besides membership and iteration, an operand reports its
//! [`OperandKind`], which is what equality dispatches on: comparing an
//! [`OrderedSet`](super::OrderedSet) with a `Vec` checks order, comparing it
//! with a `HashSet` does not.
//!
//! # Examples
//!
//! ```rust
//! use ordered_set::{OperandKind, OrderedSet, SetOperand};
//! use std::collections::HashSet;
//!
//! let sequence = vec![1, 2, 3];
//! let unordered: HashSet<i32> = [3, 2, 1].into_iter().collect();
//!
//! assert_eq!(sequence.kind(), OperandKind::OrderedSequence);
//! assert_eq!(unordered.kind(), OperandKind::UnorderedCollection);
//!
//! let set: OrderedSet<i32> = [1, 2, 3].into_iter().collect();
//! assert_eq!(set, sequence);
//! assert_eq!(set, unordered);
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};

/// The orderedness class of a comparison operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    /// A value whose iteration order is meaningful: vectors, slices, arrays,
    /// deques and order-sensitive sets.
    OrderedSequence,
    /// A value with no meaningful order: hash sets, tree sets, map keys and
    /// order-insensitive sets.
    UnorderedCollection,
    /// A value that is neither a set nor a sequence.
    Other,
}

/// A collection that can appear on the right-hand side of set algebra,
/// subset tests and equality.
///
/// The trait is object safe, so heterogeneous operand lists can be written
/// as `[&a as &dyn SetOperand<T>, &b]`.
pub trait SetOperand<T> {
    /// The orderedness class of this operand.
    fn kind(&self) -> OperandKind;

    /// Number of entries produced by [`elements`](Self::elements), repeats
    /// included.
    fn element_count(&self) -> usize;

    /// Returns `true` if the operand holds `element`.
    fn contains_element(&self, element: &T) -> bool;

    /// Iterates the operand's entries in its own order.
    fn elements(&self) -> Box<dyn Iterator<Item = &T> + '_>;

    /// Returns `true` if [`elements`](Self::elements) never yields the same
    /// value twice. Sets return `true`; sequences may hold repeats.
    fn elements_are_distinct(&self) -> bool {
        false
    }
}

// =============================================================================
// Sequences
// =============================================================================

impl<T: PartialEq> SetOperand<T> for [T] {
    #[inline]
    fn kind(&self) -> OperandKind {
        OperandKind::OrderedSequence
    }

    #[inline]
    fn element_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn contains_element(&self, element: &T) -> bool {
        self.contains(element)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }
}

impl<T: PartialEq, const N: usize> SetOperand<T> for [T; N] {
    #[inline]
    fn kind(&self) -> OperandKind {
        OperandKind::OrderedSequence
    }

    #[inline]
    fn element_count(&self) -> usize {
        N
    }

    #[inline]
    fn contains_element(&self, element: &T) -> bool {
        self.as_slice().contains(element)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }
}

impl<T: PartialEq> SetOperand<T> for Vec<T> {
    #[inline]
    fn kind(&self) -> OperandKind {
        OperandKind::OrderedSequence
    }

    #[inline]
    fn element_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn contains_element(&self, element: &T) -> bool {
        self.as_slice().contains(element)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }
}

impl<T: PartialEq> SetOperand<T> for VecDeque<T> {
    #[inline]
    fn kind(&self) -> OperandKind {
        OperandKind::OrderedSequence
    }

    #[inline]
    fn element_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn contains_element(&self, element: &T) -> bool {
        self.contains(element)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }
}

// =============================================================================
// Unordered collections
// =============================================================================

impl<T: Eq + Hash, S: BuildHasher> SetOperand<T> for HashSet<T, S> {
    #[inline]
    fn kind(&self) -> OperandKind {
        OperandKind::UnorderedCollection
    }

    #[inline]
    fn element_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn contains_element(&self, element: &T) -> bool {
        self.contains(element)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }

    #[inline]
    fn elements_are_distinct(&self) -> bool {
        true
    }
}

impl<T: Ord> SetOperand<T> for BTreeSet<T> {
    #[inline]
    fn kind(&self) -> OperandKind {
        OperandKind::UnorderedCollection
    }

    #[inline]
    fn element_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn contains_element(&self, element: &T) -> bool {
        self.contains(element)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }

    #[inline]
    fn elements_are_distinct(&self) -> bool {
        true
    }
}

/// A map participates through its keys.
impl<T: Eq + Hash, V, S: BuildHasher> SetOperand<T> for HashMap<T, V, S> {
    #[inline]
    fn kind(&self) -> OperandKind {
        OperandKind::UnorderedCollection
    }

    #[inline]
    fn element_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn contains_element(&self, element: &T) -> bool {
        self.contains_key(element)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.keys())
    }

    #[inline]
    fn elements_are_distinct(&self) -> bool {
        true
    }
}

/// A map participates through its keys.
impl<T: Ord, V> SetOperand<T> for BTreeMap<T, V> {
    #[inline]
    fn kind(&self) -> OperandKind {
        OperandKind::UnorderedCollection
    }

    #[inline]
    fn element_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn contains_element(&self, element: &T) -> bool {
        self.contains_key(element)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.keys())
    }

    #[inline]
    fn elements_are_distinct(&self) -> bool {
        true
    }
}
