//! Immutable, hashable ordered sets.
//!
//! [`FrozenOrderedSet`] is a snapshot of an [`OrderedSet`]. Its element
//! sequence and position index live behind a shared reference counter, so
//! cloning is O(1) and clones share storage. Because it can never change it
//! implements `Hash` and can be used as a map key or a member of another set.
//!
//! Equality and hashing are order-sensitive: two frozen sets with the same
//! elements in different orders are different keys.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::RangeBounds;

use super::algebra::{Membership, appears_in_order, equals_operand};
use super::set::{
    clamp_range, is_full_range, resolve_index, stepped_positions, write_braced,
    write_type_and_elements,
};
use super::{
    Adjacency, DefaultHashBuilder, EqualityPolicy, OperandKind, OrderSensitive, OrderedSet,
    OrderedSetIterator, ReferenceCounter, SetOperand,
};
use crate::error::{OrderedSetError, OrderedSetResult};

/// An immutable ordered set with O(1) cloning.
///
/// # Examples
///
/// ```rust
/// use ordered_set::{FrozenOrderedSet, OrderedSet};
///
/// let mut draft: OrderedSet<&str> = ["b", "a"].into_iter().collect();
/// let frozen = draft.freeze();
/// draft.add("c");
///
/// assert_eq!(frozen, ["b", "a"]);
/// assert_eq!(frozen.index_of("a"), Ok(1));
///
/// let shared = frozen.clone();
/// assert!(FrozenOrderedSet::ptr_eq(&frozen, &shared));
/// ```
pub struct FrozenOrderedSet<T> {
    elements: ReferenceCounter<[T]>,
    positions: ReferenceCounter<HashMap<T, usize, DefaultHashBuilder>>,
}

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(FrozenOrderedSet<i32>: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(FrozenOrderedSet<i32>: Send, Sync);

impl<T: Clone + Eq + Hash> FrozenOrderedSet<T> {
    /// Creates an empty frozen set.
    #[must_use]
    pub fn new() -> Self {
        OrderedSet::<T>::new().into()
    }

    /// Returns `true` if both values share the same storage.
    #[inline]
    #[must_use]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&this.elements, &other.elements)
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns `true` if the set contains the specified element.
    #[inline]
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.contains_key(element)
    }

    /// Returns the element at `index`; negative indices count from the end.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::IndexOutOfRange`] if `index` is outside
    /// `[-len, len - 1]`.
    pub fn get(&self, index: isize) -> OrderedSetResult<&T> {
        resolve_index(index, self.len())
            .map(|position| &self.elements[position])
            .ok_or(OrderedSetError::IndexOutOfRange {
                index,
                length: self.len(),
            })
    }

    /// Returns the first element.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.elements.first()
    }

    /// Returns the last element.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.elements.last()
    }

    /// Returns the elements in `range` as a frozen set.
    ///
    /// The full range `..` shares storage with `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::FrozenOrderedSet;
    ///
    /// let set: FrozenOrderedSet<i32> = (0..5).collect();
    /// assert_eq!(set.slice(1..3), [1, 2]);
    /// assert!(FrozenOrderedSet::ptr_eq(&set.slice(..), &set));
    /// ```
    #[must_use]
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Self {
        if is_full_range(&range) {
            return self.clone();
        }
        let (start, end) = clamp_range(&range, self.len());
        self.elements[start..end].iter().cloned().collect()
    }

    /// Returns the elements selected by `start`, `end` and `step`.
    ///
    /// Bounds behave as in [`OrderedSet::slice_by`].
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::InvalidArgument`] if `step` is zero.
    pub fn slice_by(
        &self,
        start: Option<isize>,
        end: Option<isize>,
        step: isize,
    ) -> OrderedSetResult<Self> {
        let positions = stepped_positions(start, end, step, self.len())?;
        Ok(positions
            .into_iter()
            .map(|position| self.elements[position].clone())
            .collect())
    }

    /// Returns the elements at each of `indices`, repeats preserved.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::IndexOutOfRange`] for the first index out
    /// of range.
    pub fn get_many<I>(&self, indices: I) -> OrderedSetResult<Vec<&T>>
    where
        I: IntoIterator<Item = isize>,
    {
        indices.into_iter().map(|index| self.get(index)).collect()
    }

    /// Returns the position of `element`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::KeyNotFound`] if `element` is absent.
    pub fn index_of<Q>(&self, element: &Q) -> OrderedSetResult<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions
            .get(element)
            .copied()
            .ok_or(OrderedSetError::KeyNotFound)
    }

    /// Returns the position of each key in `keys`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::KeyNotFound`] on the first absent key.
    pub fn indices_of<'q, Q, I>(&self, keys: I) -> OrderedSetResult<Vec<usize>>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        keys.into_iter().map(|key| self.index_of(key)).collect()
    }

    /// Returns an iterator over the elements in order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> OrderedSetIterator<'_, T> {
        OrderedSetIterator::new(&self.elements[..])
    }

    /// Returns the elements as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Returns a `Vec` containing clones of the elements in order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.elements.to_vec()
    }

    /// Returns a mutable copy of this set.
    #[must_use]
    pub fn thaw(&self) -> OrderedSet<T> {
        self.clone().into()
    }

    // =========================================================================
    // Set Algebra
    // =========================================================================

    /// Frozen counterpart of [`OrderedSet::union`].
    #[must_use]
    pub fn union<'a, O, I>(&self, others: I) -> Self
    where
        O: SetOperand<T> + ?Sized + 'a,
        I: IntoIterator<Item = &'a O>,
    {
        self.thaw().union(others).into()
    }

    /// Frozen counterpart of [`OrderedSet::intersection`].
    #[must_use]
    pub fn intersection<'a, O, I>(&self, others: I) -> Self
    where
        O: SetOperand<T> + ?Sized + 'a,
        I: IntoIterator<Item = &'a O>,
        T: 'a,
    {
        self.thaw().intersection(others).into()
    }

    /// Frozen counterpart of [`OrderedSet::difference`].
    #[must_use]
    pub fn difference<'a, O, I>(&self, others: I) -> Self
    where
        O: SetOperand<T> + ?Sized + 'a,
        I: IntoIterator<Item = &'a O>,
        T: 'a,
    {
        self.thaw().difference(others).into()
    }

    /// Frozen counterpart of [`OrderedSet::symmetric_difference`].
    #[must_use]
    pub fn symmetric_difference<O>(&self, other: &O) -> Self
    where
        O: SetOperand<T> + ?Sized,
    {
        self.thaw().symmetric_difference(other).into()
    }

    /// Returns `true` if every element of `self` is in `other`.
    #[must_use]
    pub fn is_subset<O>(&self, other: &O) -> bool
    where
        O: SetOperand<T> + ?Sized,
    {
        if self.len() > other.element_count() {
            return false;
        }
        let membership = Membership::of(other);
        self.iter().all(|element| membership.contains(element))
    }

    /// Returns `true` if every element of `other` is in `self`.
    #[must_use]
    pub fn is_superset<O>(&self, other: &O) -> bool
    where
        O: SetOperand<T> + ?Sized,
    {
        if other.elements_are_distinct() && other.element_count() > self.len() {
            return false;
        }
        other.elements().all(|element| self.contains(element))
    }

    /// Returns `true` if `self` is a strict subset of `other`.
    #[must_use]
    pub fn is_proper_subset<O>(&self, other: &O) -> bool
    where
        O: SetOperand<T> + ?Sized,
    {
        self.is_subset(other) && other.elements().any(|element| !self.contains(element))
    }

    /// Returns `true` if `self` is a strict superset of `other`.
    #[must_use]
    pub fn is_proper_superset<O>(&self, other: &O) -> bool
    where
        O: SetOperand<T> + ?Sized,
    {
        if !self.is_superset(other) {
            return false;
        }
        let membership = Membership::of(other);
        self.iter().any(|element| !membership.contains(element))
    }

    /// Returns `true` if `self` and `other` share no element.
    #[must_use]
    pub fn is_disjoint<O>(&self, other: &O) -> bool
    where
        O: SetOperand<T> + ?Sized,
    {
        other.elements().all(|element| !self.contains(element))
    }

    /// Frozen counterpart of [`OrderedSet::is_ordered_subset`].
    #[must_use]
    pub fn is_ordered_subset<O>(&self, other: &O, adjacency: Adjacency) -> bool
    where
        O: SetOperand<T> + ?Sized,
    {
        let needle: Vec<&T> = self.iter().collect();
        let haystack: Vec<&T> = other.elements().collect();
        appears_in_order(&needle, &haystack, adjacency)
    }

    /// Frozen counterpart of [`OrderedSet::is_ordered_superset`].
    #[must_use]
    pub fn is_ordered_superset<O>(&self, other: &O, adjacency: Adjacency) -> bool
    where
        O: SetOperand<T> + ?Sized,
    {
        let needle: Vec<&T> = other.elements().collect();
        let haystack: Vec<&T> = self.iter().collect();
        appears_in_order(&needle, &haystack, adjacency)
    }
}

impl<T: Clone + Eq + Hash, E: EqualityPolicy> OrderedSet<T, E> {
    /// Returns an immutable snapshot of this set.
    #[must_use]
    pub fn freeze(&self) -> FrozenOrderedSet<T> {
        self.clone().into()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl<T: Clone + Eq + Hash, E: EqualityPolicy> From<OrderedSet<T, E>> for FrozenOrderedSet<T> {
    fn from(set: OrderedSet<T, E>) -> Self {
        let (elements, positions) = set.into_parts();
        Self {
            elements: ReferenceCounter::from(elements),
            positions: ReferenceCounter::new(positions),
        }
    }
}

impl<T: Clone + Eq + Hash, E: EqualityPolicy> From<FrozenOrderedSet<T>> for OrderedSet<T, E> {
    fn from(frozen: FrozenOrderedSet<T>) -> Self {
        Self::from_parts(
            frozen.elements.to_vec(),
            ReferenceCounter::unwrap_or_clone(frozen.positions),
        )
    }
}

impl<T: Clone + Eq + Hash> FromIterator<T> for FrozenOrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iterable: I) -> Self {
        iterable.into_iter().collect::<OrderedSet<T>>().into()
    }
}

impl<'a, T: Clone + Eq + Hash> IntoIterator for &'a FrozenOrderedSet<T> {
    type Item = &'a T;
    type IntoIter = OrderedSetIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for FrozenOrderedSet<T> {
    fn clone(&self) -> Self {
        Self {
            elements: ReferenceCounter::clone(&self.elements),
            positions: ReferenceCounter::clone(&self.positions),
        }
    }
}

impl<T: Clone + Eq + Hash> Default for FrozenOrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, O> PartialEq<O> for FrozenOrderedSet<T>
where
    T: Clone + Eq + Hash,
    O: SetOperand<T> + ?Sized,
{
    fn eq(&self, other: &O) -> bool {
        equals_operand(
            self.as_slice(),
            |element| self.contains(element),
            OrderSensitive::compares_order,
            other,
        )
    }
}

impl<T: Clone + Eq + Hash> Eq for FrozenOrderedSet<T> {}

/// `<`, `<=`, `>` and `>=` test containment and ignore order, as for
/// [`OrderedSet`].
impl<T, O> PartialOrd<O> for FrozenOrderedSet<T>
where
    T: Clone + Eq + Hash,
    O: SetOperand<T> + ?Sized,
{
    fn partial_cmp(&self, other: &O) -> Option<Ordering> {
        if self.eq(other) {
            Some(Ordering::Equal)
        } else if self.is_proper_subset(other) {
            Some(Ordering::Less)
        } else if self.is_proper_superset(other) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }

    fn lt(&self, other: &O) -> bool {
        self.is_proper_subset(other)
    }

    fn le(&self, other: &O) -> bool {
        self.is_subset(other)
    }

    fn gt(&self, other: &O) -> bool {
        self.is_proper_superset(other)
    }

    fn ge(&self, other: &O) -> bool {
        self.is_superset(other)
    }
}

/// Hashes the elements in order, so equal frozen sets hash equally.
///
/// # Examples
///
/// ```rust
/// use ordered_set::FrozenOrderedSet;
/// use std::collections::HashSet;
///
/// let mut seen: HashSet<FrozenOrderedSet<i32>> = HashSet::new();
/// seen.insert([1, 2].into_iter().collect());
/// assert!(seen.contains(&[1, 2].into_iter().collect::<FrozenOrderedSet<i32>>()));
/// assert!(!seen.contains(&[2, 1].into_iter().collect::<FrozenOrderedSet<i32>>()));
/// ```
impl<T: Hash> Hash for FrozenOrderedSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.elements.len().hash(state);
        for element in self.elements.iter() {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for FrozenOrderedSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_type_and_elements(formatter, "FrozenOrderedSet", &self.elements[..])
    }
}

impl<T: fmt::Display> fmt::Display for FrozenOrderedSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_braced(formatter, &self.elements[..])
    }
}

impl<T: Clone + Eq + Hash> SetOperand<T> for FrozenOrderedSet<T> {
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

    #[inline]
    fn elements_are_distinct(&self) -> bool {
        true
    }
}

// =============================================================================
// Rayon Support
// =============================================================================

#[cfg(feature = "rayon")]
impl<T: Sync> FrozenOrderedSet<T> {
    /// Returns a parallel iterator over the elements.
    #[must_use]
    pub fn par_iter(&self) -> rayon::slice::Iter<'_, T> {
        use rayon::prelude::*;
        self.elements[..].par_iter()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for FrozenOrderedSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.elements.len()))?;
        for element in self.elements.iter() {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for FrozenOrderedSet<T>
where
    T: serde::Deserialize<'de> + Clone + Eq + Hash,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <OrderedSet<T> as serde::Deserialize<'de>>::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::hash::DefaultHasher;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[rstest]
    fn test_freeze_is_a_snapshot() {
        let mut set: OrderedSet<i32> = [1, 2].into_iter().collect();
        let frozen = set.freeze();
        set.add(3);
        set.discard(&1);
        assert_eq!(frozen.as_slice(), &[1, 2]);
        assert_eq!(frozen.index_of(&2), Ok(1));
    }

    #[rstest]
    fn test_clone_shares_storage() {
        let frozen: FrozenOrderedSet<i32> = (0..3).collect();
        let copy = frozen.clone();
        assert!(FrozenOrderedSet::ptr_eq(&frozen, &copy));
        let rebuilt: FrozenOrderedSet<i32> = (0..3).collect();
        assert!(!FrozenOrderedSet::ptr_eq(&frozen, &rebuilt));
        assert_eq!(frozen, rebuilt);
    }

    #[rstest]
    fn test_thaw_round_trip() {
        let frozen: FrozenOrderedSet<char> = "abracadabra".chars().collect();
        let mut thawed = frozen.thaw();
        assert!(thawed.is_consistent());
        thawed.add('z');
        assert_eq!(frozen.len(), 5);
        assert_eq!(thawed.len(), 6);
    }

    #[rstest]
    fn test_hash_follows_order() {
        let forward: FrozenOrderedSet<i32> = [1, 2, 3].into_iter().collect();
        let same: FrozenOrderedSet<i32> = [1, 2, 3, 2].into_iter().collect();
        let backward: FrozenOrderedSet<i32> = [3, 2, 1].into_iter().collect();
        assert_eq!(hash_of(&forward), hash_of(&same));
        assert_ne!(forward, backward);
        assert_ne!(hash_of(&forward), hash_of(&backward));
    }

    #[rstest]
    fn test_queries() {
        let frozen: FrozenOrderedSet<char> = "abracadabra".chars().collect();
        assert_eq!(frozen.get(-1), Ok(&'d'));
        assert_eq!(
            frozen.get(5),
            Err(OrderedSetError::IndexOutOfRange {
                index: 5,
                length: 5
            })
        );
        assert_eq!(frozen.first(), Some(&'a'));
        assert_eq!(frozen.last(), Some(&'d'));
        assert_eq!(frozen.indices_of(&['r', 'a']), Ok(vec![2, 0]));
        let picked: String = frozen.get_many([1, 0, 4]).unwrap().into_iter().collect();
        assert_eq!(picked, "bad");
        assert_eq!(frozen.slice(3..99), ['c', 'd']);
    }

    #[rstest]
    fn test_algebra_returns_frozen() {
        let left: FrozenOrderedSet<i32> = [1, 4, 3, 5, 7].into_iter().collect();
        let right: FrozenOrderedSet<i32> = [9, 7, 1, 3, 2].into_iter().collect();
        assert_eq!(left.symmetric_difference(&right), [4, 5, 9, 2]);
        assert_eq!(left.union([&right]), [1, 4, 3, 5, 7, 9, 2]);
        assert_eq!(left.intersection([&right]), [1, 3, 7]);
        assert_eq!(left.difference([&right]), [4, 5]);
        assert!(left.is_disjoint(&vec![0]));
        assert!(left.is_ordered_superset(&vec![4, 5], Adjacency::NonConsecutive));
    }

    #[rstest]
    fn test_compares_with_mutable_sets() {
        let frozen: FrozenOrderedSet<i32> = [1, 2].into_iter().collect();
        let ordered: OrderedSet<i32> = [1, 2].into_iter().collect();
        let reordered: OrderedSet<i32> = [2, 1].into_iter().collect();
        assert_eq!(frozen, ordered);
        assert_eq!(ordered, frozen);
        assert_ne!(frozen, reordered);
        assert_eq!(frozen.partial_cmp(&vec![1, 2, 3]), Some(Ordering::Less));
    }

    #[rstest]
    fn test_slice_by() {
        let set: FrozenOrderedSet<char> = "abcdef".chars().collect();
        assert_eq!(set.slice_by(None, None, -1), Ok("fedcba".chars().collect()));
        assert_eq!(set.slice_by(Some(1), Some(-1), 2), Ok("bd".chars().collect()));
        assert!(set.slice_by(None, None, 0).is_err());
    }

    #[rstest]
    fn test_comparison_operators_ignore_order() {
        let forward: FrozenOrderedSet<i32> = [1, 2, 3].into_iter().collect();
        let backward: FrozenOrderedSet<i32> = [3, 2, 1].into_iter().collect();
        assert!(forward <= backward);
        assert!(forward >= backward);
        assert!(!forward.lt(&backward));
        assert!(forward > vec![2, 1]);
        assert!(forward < vec![4, 3, 2, 1]);
    }

    #[rstest]
    fn test_debug_and_display() {
        let frozen: FrozenOrderedSet<i32> = [1, 2].into_iter().collect();
        assert_eq!(format!("{frozen:?}"), "FrozenOrderedSet([1, 2])");
        assert_eq!(format!("{frozen}"), "{1, 2}");
        let empty: FrozenOrderedSet<i32> = FrozenOrderedSet::new();
        assert_eq!(format!("{empty:?}"), "FrozenOrderedSet()");
    }
}
