//! Set algebra, containment tests and comparisons for [`OrderedSet`].
//!
//! Every operation here accepts any [`SetOperand`]: another ordered set, a
//! `Vec`, an array, a `HashSet`, map keys, or `dyn SetOperand<T>` when the
//! operands are heterogeneous. Results are ordered by the left-hand set:
//!
//! | Operation              | Result order                                        |
//! |------------------------|-----------------------------------------------------|
//! | `union`                | self, then new elements of each operand in turn     |
//! | `intersection`         | self                                                |
//! | `difference`           | self                                                |
//! | `symmetric_difference` | `self - other` in self's order, then `other - self` |
//!
//! Containment tests (`is_subset`, `is_superset`, `is_disjoint`) ignore order.
//! [`is_ordered_subset`](OrderedSet::is_ordered_subset) is the order-aware
//! counterpart.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Sub, SubAssign};

use smallvec::SmallVec;

use super::{DefaultHashBuilder, EqualityPolicy, OperandKind, OrderedSet, SetOperand};

/// Membership test for one operand.
///
/// Sets already answer `contains_element` without scanning. Sequences are
/// indexed once into a hash set so that repeated lookups stay O(1).
pub(super) enum Membership<'a, T, O: ?Sized> {
    Direct(&'a O),
    Indexed(HashSet<&'a T, DefaultHashBuilder>),
}

impl<'a, T, O> Membership<'a, T, O>
where
    T: Eq + Hash,
    O: SetOperand<T> + ?Sized,
{
    pub(super) fn of(operand: &'a O) -> Self {
        if operand.elements_are_distinct() {
            Self::Direct(operand)
        } else {
            Self::Indexed(operand.elements().collect())
        }
    }

    #[inline]
    pub(super) fn contains(&self, element: &T) -> bool {
        match self {
            Self::Direct(operand) => operand.contains_element(element),
            Self::Indexed(index) => index.contains(element),
        }
    }
}

/// How strictly [`OrderedSet::is_ordered_subset`] reads "in order".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Adjacency {
    /// The elements must appear as one contiguous run.
    Consecutive,
    /// The elements must appear in the same relative order, with anything
    /// in between.
    NonConsecutive,
}

impl<T: Clone + Eq + Hash, E: EqualityPolicy> OrderedSet<T, E> {
    // =========================================================================
    // Set Algebra
    // =========================================================================

    /// Returns every element of `self` followed by the new elements of each
    /// operand, in the order the operands are given.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::OrderedSet;
    ///
    /// let set: OrderedSet<i32> = [3, 1, 4, 1, 5].into_iter().collect();
    /// assert_eq!(set.union(&[[1, 3], [2, 0]]), [3, 1, 4, 5, 2, 0]);
    /// ```
    #[must_use]
    pub fn union<'a, O, I>(&self, others: I) -> Self
    where
        O: SetOperand<T> + ?Sized + 'a,
        I: IntoIterator<Item = &'a O>,
    {
        let mut result = self.clone();
        result.update_from(others);
        result
    }

    /// Returns the elements of `self` present in every operand.
    ///
    /// With no operands the result is a copy of `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::OrderedSet;
    ///
    /// let set: OrderedSet<i32> = [0, 1, 2, 3].into_iter().collect();
    /// assert_eq!(set.intersection([&vec![1, 2, 3]]), [1, 2, 3]);
    /// ```
    #[must_use]
    pub fn intersection<'a, O, I>(&self, others: I) -> Self
    where
        O: SetOperand<T> + ?Sized + 'a,
        I: IntoIterator<Item = &'a O>,
        T: 'a,
    {
        let others: SmallVec<[Membership<'a, T, O>; 4]> =
            others.into_iter().map(Membership::of).collect();
        self.iter()
            .filter(|element| others.iter().all(|other| other.contains(element)))
            .cloned()
            .collect()
    }

    /// Returns the elements of `self` absent from every operand.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::OrderedSet;
    ///
    /// let set: OrderedSet<i32> = [1, 2, 3, 4, 5].into_iter().collect();
    /// assert_eq!(set.difference([&vec![2], &vec![4, 9]]), [1, 3, 5]);
    /// ```
    #[must_use]
    pub fn difference<'a, O, I>(&self, others: I) -> Self
    where
        O: SetOperand<T> + ?Sized + 'a,
        I: IntoIterator<Item = &'a O>,
        T: 'a,
    {
        let others: SmallVec<[Membership<'a, T, O>; 4]> =
            others.into_iter().map(Membership::of).collect();
        self.iter()
            .filter(|element| !others.iter().any(|other| other.contains(element)))
            .cloned()
            .collect()
    }

    /// Returns the elements in exactly one of `self` and `other`.
    ///
    /// Elements only in `self` come first, in self's order; elements only in
    /// `other` follow, in other's order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::OrderedSet;
    ///
    /// let left: OrderedSet<i32> = [1, 4, 3, 5, 7].into_iter().collect();
    /// let right: OrderedSet<i32> = [9, 7, 1, 3, 2].into_iter().collect();
    /// assert_eq!(left.symmetric_difference(&right), [4, 5, 9, 2]);
    /// ```
    #[must_use]
    pub fn symmetric_difference<O>(&self, other: &O) -> Self
    where
        O: SetOperand<T> + ?Sized,
    {
        let membership = Membership::of(other);
        let mut result: Self = self
            .iter()
            .filter(|element| !membership.contains(element))
            .cloned()
            .collect();
        result.update(
            other
                .elements()
                .filter(|element| !self.contains(*element))
                .cloned(),
        );
        result
    }

    /// Adds the elements of every operand, in order. In-place [`union`](Self::union).
    pub fn update_from<'a, O, I>(&mut self, others: I)
    where
        O: SetOperand<T> + ?Sized + 'a,
        I: IntoIterator<Item = &'a O>,
    {
        for other in others {
            self.update(other.elements().cloned());
        }
    }

    /// Keeps only the elements present in every operand.
    pub fn intersection_update<'a, O, I>(&mut self, others: I)
    where
        O: SetOperand<T> + ?Sized + 'a,
        I: IntoIterator<Item = &'a O>,
        T: 'a,
    {
        let others: SmallVec<[Membership<'a, T, O>; 4]> =
            others.into_iter().map(Membership::of).collect();
        self.retain(|element| others.iter().all(|other| other.contains(element)));
    }

    /// Removes every element present in any operand.
    pub fn difference_update<'a, O, I>(&mut self, others: I)
    where
        O: SetOperand<T> + ?Sized + 'a,
        I: IntoIterator<Item = &'a O>,
        T: 'a,
    {
        let others: SmallVec<[Membership<'a, T, O>; 4]> =
            others.into_iter().map(Membership::of).collect();
        self.retain(|element| !others.iter().any(|other| other.contains(element)));
    }

    /// Replaces `self` with [`symmetric_difference`](Self::symmetric_difference).
    pub fn symmetric_difference_update<O>(&mut self, other: &O)
    where
        O: SetOperand<T> + ?Sized,
    {
        let additions: Vec<T> = other
            .elements()
            .filter(|element| !self.contains(*element))
            .cloned()
            .collect();
        let membership = Membership::of(other);
        self.retain(|element| !membership.contains(element));
        self.update(additions);
    }

    // =========================================================================
    // Containment
    // =========================================================================

    /// Returns `true` if every element of `self` is in `other`.
    ///
    /// Order is ignored. A set longer than `other` is rejected before any
    /// element is looked at.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::OrderedSet;
    ///
    /// let set: OrderedSet<i32> = [2, 1].into_iter().collect();
    /// assert!(set.is_subset(&vec![1, 2, 3]));
    /// assert!(!set.is_subset(&vec![1]));
    /// ```
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

    /// Returns `true` if `self` is a subset of `other` and `other` holds at
    /// least one element `self` does not.
    #[must_use]
    pub fn is_proper_subset<O>(&self, other: &O) -> bool
    where
        O: SetOperand<T> + ?Sized,
    {
        self.is_subset(other) && other.elements().any(|element| !self.contains(element))
    }

    /// Returns `true` if `self` is a superset of `other` and holds at least
    /// one element `other` does not.
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

    /// Returns `true` if the elements of `self` appear in `other` in the
    /// same order.
    ///
    /// Order is taken from `other`'s iteration order, so this is only
    /// meaningful for sequence-like operands.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::{Adjacency, OrderedSet};
    ///
    /// let set: OrderedSet<i32> = [2, 4].into_iter().collect();
    /// assert!(set.is_ordered_subset(&vec![1, 2, 3, 4], Adjacency::NonConsecutive));
    /// assert!(!set.is_ordered_subset(&vec![1, 2, 3, 4], Adjacency::Consecutive));
    /// assert!(set.is_ordered_subset(&vec![1, 2, 4], Adjacency::Consecutive));
    /// assert!(!set.is_ordered_subset(&vec![4, 2], Adjacency::NonConsecutive));
    /// ```
    #[must_use]
    pub fn is_ordered_subset<O>(&self, other: &O, adjacency: Adjacency) -> bool
    where
        O: SetOperand<T> + ?Sized,
    {
        let needle: Vec<&T> = self.iter().collect();
        let haystack: Vec<&T> = other.elements().collect();
        appears_in_order(&needle, &haystack, adjacency)
    }

    /// Returns `true` if the elements of `other` appear in `self` in the
    /// same order.
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

/// Returns `true` if `needle` occurs in `haystack` under `adjacency`.
pub(super) fn appears_in_order<T: PartialEq>(
    needle: &[&T],
    haystack: &[&T],
    adjacency: Adjacency,
) -> bool {
    if needle.is_empty() {
        return true;
    }
    match adjacency {
        Adjacency::Consecutive => haystack.windows(needle.len()).any(|window| window == needle),
        Adjacency::NonConsecutive => {
            let mut remaining = haystack.iter();
            needle
                .iter()
                .all(|wanted| remaining.any(|candidate| candidate == wanted))
        }
    }
}

/// Compares a deduplicated sequence against an operand.
///
/// `holds` answers membership for `elements` in O(1). `compares_order`
/// decides, from the operand's kind, whether positions must match.
pub(super) fn equals_operand<T, O>(
    elements: &[T],
    holds: impl Fn(&T) -> bool,
    compares_order: impl FnOnce(OperandKind) -> bool,
    other: &O,
) -> bool
where
    T: Eq + Hash,
    O: SetOperand<T> + ?Sized,
{
    let kind = other.kind();
    if kind == OperandKind::Other {
        return false;
    }
    if compares_order(kind) {
        return elements.len() == other.element_count() && elements.iter().eq(other.elements());
    }
    if other.elements_are_distinct() {
        elements.len() == other.element_count()
            && elements.iter().all(|element| other.contains_element(element))
    } else if other.element_count() < elements.len() {
        false
    } else {
        let membership = Membership::of(other);
        elements.iter().all(|element| membership.contains(element)) && other.elements().all(holds)
    }
}

// =============================================================================
// Comparison Traits
// =============================================================================

impl<T, E, O> PartialEq<O> for OrderedSet<T, E>
where
    T: Clone + Eq + Hash,
    E: EqualityPolicy,
    O: SetOperand<T> + ?Sized,
{
    fn eq(&self, other: &O) -> bool {
        equals_operand(
            self.as_slice(),
            |element| self.contains(element),
            E::compares_order,
            other,
        )
    }
}

impl<T: Clone + Eq + Hash, E: EqualityPolicy> Eq for OrderedSet<T, E> {}

/// Sets are partially ordered by containment.
///
/// `<`, `<=`, `>` and `>=` ignore order and test proper and plain
/// containment. `partial_cmp` also consults `==`, so two order-sensitive
/// sets holding the same elements in different orders compare as `None`
/// while `a <= b` and `a >= b` both hold.
impl<T, E, O> PartialOrd<O> for OrderedSet<T, E>
where
    T: Clone + Eq + Hash,
    E: EqualityPolicy,
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

// =============================================================================
// Operators
// =============================================================================

impl<T, E, O> BitOr<&O> for &OrderedSet<T, E>
where
    T: Clone + Eq + Hash,
    E: EqualityPolicy,
    O: SetOperand<T> + ?Sized,
{
    type Output = OrderedSet<T, E>;

    fn bitor(self, other: &O) -> Self::Output {
        self.union([other])
    }
}

impl<T, E, O> BitAnd<&O> for &OrderedSet<T, E>
where
    T: Clone + Eq + Hash,
    E: EqualityPolicy,
    O: SetOperand<T> + ?Sized,
{
    type Output = OrderedSet<T, E>;

    fn bitand(self, other: &O) -> Self::Output {
        self.intersection([other])
    }
}

impl<T, E, O> Sub<&O> for &OrderedSet<T, E>
where
    T: Clone + Eq + Hash,
    E: EqualityPolicy,
    O: SetOperand<T> + ?Sized,
{
    type Output = OrderedSet<T, E>;

    fn sub(self, other: &O) -> Self::Output {
        self.difference([other])
    }
}

impl<T, E, O> BitXor<&O> for &OrderedSet<T, E>
where
    T: Clone + Eq + Hash,
    E: EqualityPolicy,
    O: SetOperand<T> + ?Sized,
{
    type Output = OrderedSet<T, E>;

    fn bitxor(self, other: &O) -> Self::Output {
        self.symmetric_difference(other)
    }
}

impl<T, E, O> BitOrAssign<&O> for OrderedSet<T, E>
where
    T: Clone + Eq + Hash,
    E: EqualityPolicy,
    O: SetOperand<T> + ?Sized,
{
    fn bitor_assign(&mut self, other: &O) {
        self.update_from([other]);
    }
}

impl<T, E, O> BitAndAssign<&O> for OrderedSet<T, E>
where
    T: Clone + Eq + Hash,
    E: EqualityPolicy,
    O: SetOperand<T> + ?Sized,
{
    fn bitand_assign(&mut self, other: &O) {
        self.intersection_update([other]);
    }
}

impl<T, E, O> SubAssign<&O> for OrderedSet<T, E>
where
    T: Clone + Eq + Hash,
    E: EqualityPolicy,
    O: SetOperand<T> + ?Sized,
{
    fn sub_assign(&mut self, other: &O) {
        self.difference_update([other]);
    }
}

impl<T, E, O> BitXorAssign<&O> for OrderedSet<T, E>
where
    T: Clone + Eq + Hash,
    E: EqualityPolicy,
    O: SetOperand<T> + ?Sized,
{
    fn bitxor_assign(&mut self, other: &O) {
        self.symmetric_difference_update(other);
    }
}
