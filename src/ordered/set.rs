//! The mutable ordered set.
//!
//! [`OrderedSet`] stores its elements twice: once in a `Vec` that defines
//! iteration order and positions, and once as keys of a `HashMap` that maps
//! each element back to its position. Every mutator updates both and bumps a
//! generation counter that [`Cursor`](super::Cursor) uses to detect changes.
//!
//! # Time Complexity
//!
//! | Operation          | Complexity        |
//! |--------------------|-------------------|
//! | `add` / `insert`   | O(1) amortized    |
//! | `contains`         | O(1) expected     |
//! | `get`              | O(1)              |
//! | `index_of`         | O(1) expected     |
//! | `pop`              | O(1)              |
//! | `discard` / `remove` / `pop_at` | O(n) |
//! | `move_to_end`      | O(n)              |
//! | `slice`            | O(k)              |
//!
//! Removal is O(n) because every element after the removed one moves down a
//! position and has to be re-indexed. This keeps positional access and
//! position lookup O(1).

use std::borrow::{Borrow, Cow};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ops::{Bound, RangeBounds};

use super::{
    DefaultHashBuilder, EqualityPolicy, OperandKind, OrderInsensitive, OrderSensitive, SetOperand,
};
use crate::error::{OrderedSetError, OrderedSetResult};

/// A set that remembers the order in which elements were first added.
///
/// Each element has a position: the first element added is at `0`, the next
/// at `1`, and so on. Positions stay contiguous; removing an element moves
/// everything after it down by one.
///
/// The `E` parameter selects the equality policy. The default,
/// [`OrderSensitive`], makes `OrderedSet([1, 2]) != OrderedSet([2, 1])`
/// while still treating `OrderedSet([1, 2])` and `HashSet{2, 1}` as equal.
/// See [`StableSet`] for the order-insensitive variant.
///
/// # Type Parameters
///
/// * `T` - The element type. Must implement `Clone`, `Eq` and `Hash`.
/// * `E` - The equality policy.
///
/// # Examples
///
/// ```rust
/// use ordered_set::OrderedSet;
///
/// let mut set: OrderedSet<&str> = OrderedSet::new();
/// assert_eq!(set.add("x"), 0);
/// assert_eq!(set.add("y"), 1);
/// assert_eq!(set.add("x"), 0); // already present
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set, ["x", "y"]);
/// ```
pub struct OrderedSet<T, E = OrderSensitive> {
    elements: Vec<T>,
    positions: HashMap<T, usize, DefaultHashBuilder>,
    generation: u64,
    policy: PhantomData<E>,
}

/// An [`OrderedSet`] whose equality ignores order.
///
/// A `StableSet` still iterates, indexes and slices in insertion order;
/// only comparisons treat it as a plain set.
///
/// # Examples
///
/// ```rust
/// use ordered_set::StableSet;
///
/// let forward: StableSet<i32> = [1, 2, 3].into_iter().collect();
/// let backward: StableSet<i32> = [3, 2, 1].into_iter().collect();
///
/// assert_eq!(forward, backward);
/// assert_eq!(forward.get(0), Ok(&1));
/// assert_eq!(backward.get(0), Ok(&3));
/// ```
pub type StableSet<T> = OrderedSet<T, OrderInsensitive>;

/// Resolves a possibly negative position against `length`.
///
/// Negative positions count from the end, so `-1` is the last element.
#[inline]
pub(super) fn resolve_index(index: isize, length: usize) -> Option<usize> {
    if index >= 0 {
        let position = index.unsigned_abs();
        (position < length).then_some(position)
    } else {
        length.checked_sub(index.unsigned_abs())
    }
}

/// Converts a range of positions into clamped `start..end` bounds.
pub(super) fn clamp_range<R: RangeBounds<usize>>(range: &R, length: usize) -> (usize, usize) {
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start.saturating_add(1),
        Bound::Unbounded => 0,
    }
    .min(length);
    let end = match range.end_bound() {
        Bound::Included(&end) => end.saturating_add(1),
        Bound::Excluded(&end) => end,
        Bound::Unbounded => length,
    }
    .min(length);
    (start, end.max(start))
}

/// Resolves `start`, `end` and `step` into the positions they select.
///
/// Bounds may be negative and are clamped to the set; omitted bounds
/// default to the first or last position depending on the direction of
/// `step`.
pub(super) fn stepped_positions(
    start: Option<isize>,
    end: Option<isize>,
    step: isize,
    length: usize,
) -> OrderedSetResult<Vec<usize>> {
    if step == 0 {
        return Err(OrderedSetError::InvalidArgument {
            expected: "a non-zero slice step",
            found: "0".to_string(),
        });
    }
    let length = isize::try_from(length).unwrap_or(isize::MAX);
    let (lower, upper) = if step > 0 { (0, length) } else { (-1, length - 1) };
    let clamp = |bound: isize| {
        let bound = if bound < 0 { bound.saturating_add(length) } else { bound };
        bound.clamp(lower, upper)
    };
    let (default_start, default_end) = if step > 0 { (lower, upper) } else { (upper, lower) };
    let mut position = start.map_or(default_start, clamp);
    let end = end.map_or(default_end, clamp);

    let mut positions = Vec::new();
    while (step > 0 && position < end) || (step < 0 && position > end) {
        positions.push(position.unsigned_abs());
        position = position.saturating_add(step);
    }
    Ok(positions)
}

/// Returns `true` if `range` is the canonical full range `..`.
#[inline]
pub(super) fn is_full_range<R: RangeBounds<usize>>(range: &R) -> bool {
    matches!(
        (range.start_bound(), range.end_bound()),
        (Bound::Unbounded, Bound::Unbounded)
    )
}

impl<T, E: EqualityPolicy> OrderedSet<T, E> {
    /// Creates a new empty set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::OrderedSet;
    ///
    /// let set: OrderedSet<i32> = OrderedSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty set with room for at least `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity_and_hasher(capacity, DefaultHashBuilder::default()),
            generation: 0,
            policy: PhantomData,
        }
    }

    /// Returns the number of elements in the set.
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

    /// Returns the first element, or `None` if the set is empty.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.elements.first()
    }

    /// Returns the last element, or `None` if the set is empty.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.elements.last()
    }

    /// Returns the elements as a slice, in order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Consumes the set and returns its elements in order.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }

    /// Returns an iterator over the elements in order.
    ///
    /// The iterator is double-ended, so `set.iter().rev()` walks the set
    /// back to front. Because it borrows the set, the set cannot be mutated
    /// while the iterator is alive; use [`cursor`](Self::cursor) for a
    /// detached iterator that detects modification at run time instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::OrderedSet;
    ///
    /// let set: OrderedSet<char> = "abracadabra".chars().collect();
    /// let reversed: String = set.iter().rev().collect();
    /// assert_eq!(reversed, "dcrba");
    /// ```
    #[inline]
    #[must_use]
    pub fn iter(&self) -> OrderedSetIterator<'_, T> {
        OrderedSetIterator::new(&self.elements)
    }

    /// Returns the number of structural modifications made to this set.
    #[inline]
    pub(crate) const fn generation(&self) -> u64 {
        self.generation
    }

    pub(super) fn from_parts(
        elements: Vec<T>,
        positions: HashMap<T, usize, DefaultHashBuilder>,
    ) -> Self {
        Self {
            elements,
            positions,
            generation: 0,
            policy: PhantomData,
        }
    }

    pub(super) fn into_parts(self) -> (Vec<T>, HashMap<T, usize, DefaultHashBuilder>) {
        (self.elements, self.positions)
    }

    #[inline]
    fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl<T: Clone + Eq + Hash, E: EqualityPolicy> OrderedSet<T, E> {
    /// Builds a set from an iterator of results, stopping at the first error.
    ///
    /// This is the fallible counterpart of `collect()`: the first `Err`
    /// produced by the input is returned and the partially built set is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns the first error yielded by `iterable`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::OrderedSet;
    ///
    /// let parsed: Result<OrderedSet<i32>, _> =
    ///     OrderedSet::try_from_iter("3 1 3 2".split(' ').map(str::parse::<i32>));
    /// assert_eq!(parsed.unwrap(), [3, 1, 2]);
    ///
    /// let failed: Result<OrderedSet<i32>, _> =
    ///     OrderedSet::try_from_iter("3 x 2".split(' ').map(str::parse::<i32>));
    /// assert!(failed.is_err());
    /// ```
    pub fn try_from_iter<X, I>(iterable: I) -> Result<Self, X>
    where
        I: IntoIterator<Item = Result<T, X>>,
    {
        let mut set = Self::new();
        set.try_update(iterable)?;
        Ok(set)
    }

    /// Returns `true` if the set contains the specified element.
    ///
    /// The element may be any borrowed form of the set's element type, so an
    /// `OrderedSet<String>` can be queried with a `&str`.
    ///
    /// # Complexity
    ///
    /// O(1) expected.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::OrderedSet;
    ///
    /// let set: OrderedSet<String> = ["hello".to_string(), "world".to_string()]
    ///     .into_iter()
    ///     .collect();
    /// assert!(set.contains("hello"));
    /// assert!(!set.contains("other"));
    /// ```
    #[inline]
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.contains_key(element)
    }

    /// Returns the element at `index`.
    ///
    /// Negative indices count from the end: `-1` is the last element.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::IndexOutOfRange`] if `index` is outside
    /// `[-len, len - 1]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::{OrderedSet, OrderedSetError};
    ///
    /// let set: OrderedSet<char> = "abracadabra".chars().collect();
    /// assert_eq!(set.get(0), Ok(&'a'));
    /// assert_eq!(set.get(3), Ok(&'c'));
    /// assert_eq!(set.get(-1), Ok(&'d'));
    /// assert_eq!(
    ///     set.get(100),
    ///     Err(OrderedSetError::IndexOutOfRange { index: 100, length: 5 })
    /// );
    /// ```
    pub fn get(&self, index: isize) -> OrderedSetResult<&T> {
        resolve_index(index, self.len())
            .map(|position| &self.elements[position])
            .ok_or(OrderedSetError::IndexOutOfRange {
                index,
                length: self.len(),
            })
    }

    /// Returns the elements in `range` as a set.
    ///
    /// Bounds past the end are clamped, and an empty or inverted range gives
    /// an empty set. The canonical full range `..` returns the set itself
    /// (`Cow::Borrowed`); every other range returns an independent set, even
    /// one that happens to cover every element. Use `clone()` for an
    /// independent copy of the whole set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::OrderedSet;
    /// use std::borrow::Cow;
    ///
    /// let set: OrderedSet<char> = "abracadabra".chars().collect();
    /// assert_eq!(*set.slice(1..3), ['b', 'r']);
    /// assert!(matches!(set.slice(..), Cow::Borrowed(_)));
    /// assert!(matches!(set.slice(0..), Cow::Owned(_)));
    /// ```
    #[must_use]
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Cow<'_, Self> {
        if is_full_range(&range) {
            return Cow::Borrowed(self);
        }
        let (start, end) = clamp_range(&range, self.len());
        Cow::Owned(self.elements[start..end].iter().cloned().collect())
    }

    /// Returns the elements selected by `start`, `end` and `step` as a new set.
    ///
    /// Negative bounds count from the end and out-of-range bounds are
    /// clamped. A negative `step` walks backwards, so `slice_by(None, None, -1)`
    /// is the set in reverse order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::InvalidArgument`] if `step` is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::OrderedSet;
    ///
    /// let set: OrderedSet<char> = "abcdef".chars().collect();
    /// assert_eq!(set.slice_by(None, None, -1).unwrap(), ['f', 'e', 'd', 'c', 'b', 'a']);
    /// assert_eq!(set.slice_by(Some(1), Some(-1), 2).unwrap(), ['b', 'd']);
    /// assert!(set.slice_by(None, None, 0).is_err());
    /// ```
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

    /// Returns the elements at each of `indices`, in the order requested.
    ///
    /// This is "fancy indexing": the result is a plain sequence, so repeated
    /// indices yield repeated elements. Negative indices count from the end.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::IndexOutOfRange`] for the first index that
    /// is out of range; no partial result is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::OrderedSet;
    ///
    /// let set: OrderedSet<char> = "abracadabra".chars().collect();
    /// let picked: String = set
    ///     .get_many([1, 0, 4, 3, 0, 2])
    ///     .unwrap()
    ///     .into_iter()
    ///     .collect();
    /// assert_eq!(picked, "badcar");
    /// ```
    pub fn get_many<I>(&self, indices: I) -> OrderedSetResult<Vec<&T>>
    where
        I: IntoIterator<Item = isize>,
    {
        indices.into_iter().map(|index| self.get(index)).collect()
    }

    /// Returns the position of `element`.
    ///
    /// The argument is always treated as one key, even when the element type
    /// is itself a collection such as `String` or a tuple. Use
    /// [`indices_of`](Self::indices_of) to look up several keys at once.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::KeyNotFound`] if `element` is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::{OrderedSet, OrderedSetError};
    ///
    /// let set: OrderedSet<String> = ["a", "b", "br"].iter().map(|s| s.to_string()).collect();
    /// assert_eq!(set.index_of("br"), Ok(2));
    /// assert_eq!(set.index_of("x"), Err(OrderedSetError::KeyNotFound));
    /// ```
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
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::OrderedSet;
    ///
    /// let set: OrderedSet<char> = "abracadabra".chars().collect();
    /// assert_eq!(set.indices_of(&['b', 'r']), Ok(vec![1, 2]));
    /// ```
    pub fn indices_of<'q, Q, I>(&self, keys: I) -> OrderedSetResult<Vec<usize>>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        keys.into_iter().map(|key| self.index_of(key)).collect()
    }

    /// Returns a `Vec` containing clones of the elements in order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.elements.clone()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Adds `element` at the end if it is absent and returns its position.
    ///
    /// If the element is already present, the set is unchanged and its
    /// existing position is returned.
    ///
    /// # Complexity
    ///
    /// O(1) amortized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::OrderedSet;
    ///
    /// let mut set: OrderedSet<&str> = OrderedSet::new();
    /// assert_eq!(set.add("a"), 0);
    /// assert_eq!(set.add("b"), 1);
    /// assert_eq!(set.add("a"), 0);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn add(&mut self, element: T) -> usize {
        if let Some(&position) = self.positions.get(&element) {
            return position;
        }
        let position = self.elements.len();
        self.positions.insert(element.clone(), position);
        self.elements.push(element);
        self.bump_generation();
        position
    }

    /// Adds `element` and returns `true` if it was not already present.
    pub fn insert(&mut self, element: T) -> bool {
        let length = self.len();
        self.add(element);
        self.len() != length
    }

    /// Adds every element of `iterable` in turn.
    ///
    /// Returns the position of the last element seen (whether it was new or
    /// already present), or `None` if `iterable` was empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::OrderedSet;
    ///
    /// let mut set: OrderedSet<i32> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(set.update([5, 1, 4]), Some(4));
    /// assert_eq!(set.update([2]), Some(1));
    /// assert_eq!(set.update(std::iter::empty()), None);
    /// assert_eq!(set, [1, 2, 3, 5, 4]);
    /// ```
    pub fn update<I>(&mut self, iterable: I) -> Option<usize>
    where
        I: IntoIterator<Item = T>,
    {
        iterable
            .into_iter()
            .fold(None, |_, element| Some(self.add(element)))
    }

    /// Adds every `Ok` element of `iterable`, stopping at the first `Err`.
    ///
    /// Elements added before the error stay in the set.
    ///
    /// # Errors
    ///
    /// Returns the first error yielded by `iterable`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::OrderedSet;
    ///
    /// let mut set: OrderedSet<i32> = OrderedSet::new();
    /// let outcome = set.try_update([Ok(1), Ok(2), Err("boom"), Ok(3)]);
    /// assert_eq!(outcome, Err("boom"));
    /// assert_eq!(set, [1, 2]);
    /// ```
    pub fn try_update<X, I>(&mut self, iterable: I) -> Result<Option<usize>, X>
    where
        I: IntoIterator<Item = Result<T, X>>,
    {
        let mut last_position = None;
        for element in iterable {
            last_position = Some(self.add(element?));
        }
        Ok(last_position)
    }

    /// Removes `element` if present and returns whether it was removed.
    ///
    /// A missing element is not an error. Every element after the removed
    /// one moves down a position.
    ///
    /// # Complexity
    ///
    /// O(n) in the number of elements after the removed one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::OrderedSet;
    ///
    /// let mut set: OrderedSet<char> = "abracadabra".chars().collect();
    /// assert!(set.discard(&'r'));
    /// assert!(!set.discard(&'r'));
    /// assert_eq!(set, ['a', 'b', 'c', 'd']);
    /// assert_eq!(set.index_of(&'c'), Ok(2));
    /// ```
    pub fn discard<Q>(&mut self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.positions.get(element).copied() {
            Some(position) => {
                self.remove_position(position);
                true
            }
            None => false,
        }
    }

    /// Removes and returns `element`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::KeyNotFound`] if `element` is absent.
    pub fn remove<Q>(&mut self, element: &Q) -> OrderedSetResult<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let position = self.index_of(element)?;
        Ok(self.remove_position(position))
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::EmptySet`] if the set is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::{OrderedSet, OrderedSetError};
    ///
    /// let mut set: OrderedSet<i32> = [2, 3, 1].into_iter().collect();
    /// assert_eq!(set.pop(), Ok(1));
    /// assert_eq!(set.pop(), Ok(3));
    /// assert_eq!(set.pop(), Ok(2));
    /// assert_eq!(set.pop(), Err(OrderedSetError::EmptySet));
    /// ```
    pub fn pop(&mut self) -> OrderedSetResult<T> {
        let element = self.elements.pop().ok_or(OrderedSetError::EmptySet)?;
        self.positions.remove(&element);
        self.bump_generation();
        Ok(element)
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::EmptySet`] if the set is empty.
    pub fn pop_first(&mut self) -> OrderedSetResult<T> {
        if self.is_empty() {
            return Err(OrderedSetError::EmptySet);
        }
        Ok(self.remove_position(0))
    }

    /// Removes and returns the element at `index`.
    ///
    /// Negative indices count from the end.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::EmptySet`] if the set is empty, and
    /// [`OrderedSetError::IndexOutOfRange`] if `index` is outside
    /// `[-len, len - 1]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::OrderedSet;
    ///
    /// let mut set: OrderedSet<char> = "abcde".chars().collect();
    /// assert_eq!(set.pop_at(1), Ok('b'));
    /// assert_eq!(set.pop_at(-1), Ok('e'));
    /// assert_eq!(set, ['a', 'c', 'd']);
    /// ```
    pub fn pop_at(&mut self, index: isize) -> OrderedSetResult<T> {
        if self.is_empty() {
            return Err(OrderedSetError::EmptySet);
        }
        let position =
            resolve_index(index, self.len()).ok_or(OrderedSetError::IndexOutOfRange {
                index,
                length: self.len(),
            })?;
        Ok(self.remove_position(position))
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.positions.clear();
        self.bump_generation();
    }

    /// Moves an existing element to the end, keeping the relative order of
    /// the others.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::KeyNotFound`] if `element` is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::OrderedSet;
    ///
    /// let mut set: OrderedSet<char> = "abcd".chars().collect();
    /// set.move_to_end(&'a').unwrap();
    /// assert_eq!(set, ['b', 'c', 'd', 'a']);
    /// assert!(set.move_to_end(&'z').is_err());
    /// ```
    pub fn move_to_end<Q>(&mut self, element: &Q) -> OrderedSetResult<()>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let position = self.index_of(element)?;
        if position + 1 == self.len() {
            return Ok(());
        }
        let moved = self.elements.remove(position);
        self.elements.push(moved);
        self.reindex_from(position);
        self.bump_generation();
        Ok(())
    }

    /// Keeps only the elements for which `predicate` returns `true`.
    ///
    /// Surviving elements keep their relative order.
    pub fn retain<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&T) -> bool,
    {
        let length = self.len();
        let positions = &mut self.positions;
        self.elements.retain(|element| {
            let keep = predicate(element);
            if !keep {
                positions.remove(element);
            }
            keep
        });
        if self.len() != length {
            self.reindex_from(0);
            self.bump_generation();
        }
    }

    /// Reverses the order of the elements in place.
    pub fn reverse(&mut self) {
        self.elements.reverse();
        self.reindex_from(0);
        self.bump_generation();
    }

    /// Sorts the elements in place.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.elements.sort();
        self.reindex_from(0);
        self.bump_generation();
    }

    /// Sorts the elements in place with a comparator function.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.elements.sort_by(compare);
        self.reindex_from(0);
        self.bump_generation();
    }

    /// Removes the element at `position` (which must be in range).
    fn remove_position(&mut self, position: usize) -> T {
        let element = self.elements.remove(position);
        self.positions.remove(&element);
        self.reindex_from(position);
        self.bump_generation();
        element
    }

    /// Rewrites the index entry of every element from `start` onwards.
    fn reindex_from(&mut self, start: usize) {
        let shifted = self.elements.len().saturating_sub(start);
        if shifted > 0 {
            log::trace!("re-indexing {shifted} elements from position {start}");
        }
        for (position, element) in self.elements.iter().enumerate().skip(start) {
            if let Some(slot) = self.positions.get_mut(element) {
                *slot = position;
            }
        }
    }

    /// Checks that the sequence and the index agree.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        self.elements.len() == self.positions.len()
            && self
                .elements
                .iter()
                .enumerate()
                .all(|(position, element)| self.positions.get(element) == Some(&position))
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T: Clone, E> Clone for OrderedSet<T, E> {
    fn clone(&self) -> Self {
        Self {
            elements: self.elements.clone(),
            positions: self.positions.clone(),
            generation: self.generation,
            policy: PhantomData,
        }
    }
}

impl<T, E: EqualityPolicy> Default for OrderedSet<T, E> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash, E: EqualityPolicy> FromIterator<T> for OrderedSet<T, E> {
    fn from_iter<I: IntoIterator<Item = T>>(iterable: I) -> Self {
        let iterator = iterable.into_iter();
        let (lower, _) = iterator.size_hint();
        let mut set = Self::with_capacity(lower);
        set.update(iterator);
        set
    }
}

impl<T: Clone + Eq + Hash, E: EqualityPolicy, const N: usize> From<[T; N]> for OrderedSet<T, E> {
    fn from(array: [T; N]) -> Self {
        array.into_iter().collect()
    }
}

impl<T: Clone + Eq + Hash, E: EqualityPolicy> From<Vec<T>> for OrderedSet<T, E> {
    fn from(vector: Vec<T>) -> Self {
        vector.into_iter().collect()
    }
}

impl<T: Clone + Eq + Hash, E: EqualityPolicy> Extend<T> for OrderedSet<T, E> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        self.update(iterable);
    }
}

impl<'a, T: Clone + Eq + Hash + 'a, E: EqualityPolicy> Extend<&'a T> for OrderedSet<T, E> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iterable: I) {
        self.update(iterable.into_iter().cloned());
    }
}

impl<T, E> IntoIterator for OrderedSet<T, E> {
    type Item = T;
    type IntoIter = OrderedSetIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        OrderedSetIntoIterator {
            inner: self.elements.into_iter(),
        }
    }
}

impl<'a, T, E: EqualityPolicy> IntoIterator for &'a OrderedSet<T, E> {
    type Item = &'a T;
    type IntoIter = OrderedSetIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, E: EqualityPolicy> fmt::Debug for OrderedSet<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_type_and_elements(formatter, E::TYPE_NAME, &self.elements)
    }
}

impl<T: fmt::Display, E> fmt::Display for OrderedSet<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_braced(formatter, &self.elements)
    }
}

/// Writes `Name([a, b])`, or `Name()` when `elements` is empty.
pub(super) fn write_type_and_elements<T: fmt::Debug>(
    formatter: &mut fmt::Formatter<'_>,
    type_name: &str,
    elements: &[T],
) -> fmt::Result {
    formatter.write_str(type_name)?;
    if elements.is_empty() {
        return formatter.write_str("()");
    }
    formatter.write_str("(")?;
    formatter.debug_list().entries(elements).finish()?;
    formatter.write_str(")")
}

/// Writes `{a, b}` using each element's `Display`.
pub(super) fn write_braced<T: fmt::Display>(
    formatter: &mut fmt::Formatter<'_>,
    elements: &[T],
) -> fmt::Result {
    write!(formatter, "{{")?;
    let mut first = true;
    for element in elements {
        if first {
            first = false;
        } else {
            write!(formatter, ", ")?;
        }
        write!(formatter, "{element}")?;
    }
    write!(formatter, "}}")
}

impl<T: Clone + Eq + Hash, E: EqualityPolicy> SetOperand<T> for OrderedSet<T, E> {
    #[inline]
    fn kind(&self) -> OperandKind {
        E::OPERAND_KIND
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
// Iterators
// =============================================================================

/// Iterator over references to the elements of an ordered set, in order.
pub struct OrderedSetIterator<'a, T> {
    inner: std::slice::Iter<'a, T>,
}

impl<'a, T> OrderedSetIterator<'a, T> {
    #[inline]
    pub(super) fn new(elements: &'a [T]) -> Self {
        Self {
            inner: elements.iter(),
        }
    }
}

impl<T> Clone for OrderedSetIterator<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for OrderedSetIterator<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for OrderedSetIterator<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for OrderedSetIterator<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for OrderedSetIterator<'_, T> {}

/// Owning iterator over the elements of an [`OrderedSet`], in order.
pub struct OrderedSetIntoIterator<T> {
    inner: std::vec::IntoIter<T>,
}

impl<T> Iterator for OrderedSetIntoIterator<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for OrderedSetIntoIterator<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for OrderedSetIntoIterator<T> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for OrderedSetIntoIterator<T> {}

// =============================================================================
// Rayon Support
// =============================================================================

#[cfg(feature = "rayon")]
impl<T: Sync, E: EqualityPolicy> OrderedSet<T, E> {
    /// Returns a parallel iterator over the elements.
    ///
    /// Element order is preserved by order-aware consumers such as
    /// `collect::<Vec<_>>()`.
    #[must_use]
    pub fn par_iter(&self) -> rayon::slice::Iter<'_, T> {
        use rayon::prelude::*;
        self.elements.par_iter()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize, E> serde::Serialize for OrderedSet<T, E> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.elements.len()))?;
        for element in &self.elements {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct OrderedSetVisitor<T, E> {
    marker: PhantomData<(T, E)>,
}

#[cfg(feature = "serde")]
impl<T, E> OrderedSetVisitor<T, E> {
    const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T, E> serde::de::Visitor<'de> for OrderedSetVisitor<T, E>
where
    T: serde::Deserialize<'de> + Clone + Eq + Hash,
    E: EqualityPolicy,
{
    type Value = OrderedSet<T, E>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        // The hint comes from untrusted input, so cap the pre-allocation.
        let mut set = OrderedSet::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        let mut received = 0_usize;
        while let Some(element) = seq.next_element()? {
            received += 1;
            set.add(element);
        }
        if received != set.len() {
            log::debug!(
                "folded {} duplicate elements while deserializing {}",
                received - set.len(),
                E::TYPE_NAME
            );
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, E> serde::Deserialize<'de> for OrderedSet<T, E>
where
    T: serde::Deserialize<'de> + Clone + Eq + Hash,
    E: EqualityPolicy,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(OrderedSetVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn abracadabra() -> OrderedSet<char> {
        "abracadabra".chars().collect()
    }

    #[rstest]
    #[case::first(0, 3, Some(0))]
    #[case::last(2, 3, Some(2))]
    #[case::past_end(3, 3, None)]
    #[case::negative_last(-1, 3, Some(2))]
    #[case::negative_first(-3, 3, Some(0))]
    #[case::negative_past_start(-4, 3, None)]
    #[case::empty(0, 0, None)]
    #[case::empty_negative(-1, 0, None)]
    fn test_resolve_index(
        #[case] index: isize,
        #[case] length: usize,
        #[case] expected: Option<usize>,
    ) {
        assert_eq!(resolve_index(index, length), expected);
    }

    #[rstest]
    #[case::inside(1..3, 5, (1, 3))]
    #[case::past_end(3..10, 5, (3, 5))]
    #[case::inverted(std::ops::Range { start: 4, end: 2 }, 5, (4, 4))]
    #[case::beyond(7..9, 5, (5, 5))]
    fn test_clamp_range(
        #[case] range: std::ops::Range<usize>,
        #[case] length: usize,
        #[case] expected: (usize, usize),
    ) {
        assert_eq!(clamp_range(&range, length), expected);
    }

    #[rstest]
    #[case::forward(None, None, 1, 4, vec![0, 1, 2, 3])]
    #[case::backward(None, None, -1, 4, vec![3, 2, 1, 0])]
    #[case::negative_end(Some(1), Some(-1), 2, 6, vec![1, 3])]
    #[case::open_end(Some(1), None, 2, 6, vec![1, 3, 5])]
    #[case::backward_from_negative(Some(-2), None, -2, 6, vec![4, 2, 0])]
    #[case::clamped(Some(-100), Some(100), 3, 7, vec![0, 3, 6])]
    #[case::backward_clamped(Some(100), Some(-100), -3, 7, vec![6, 3, 0])]
    #[case::empty_direction(Some(3), Some(1), 1, 6, vec![])]
    #[case::empty_set(None, None, -1, 0, vec![])]
    fn test_stepped_positions(
        #[case] start: Option<isize>,
        #[case] end: Option<isize>,
        #[case] step: isize,
        #[case] length: usize,
        #[case] expected: Vec<usize>,
    ) {
        assert_eq!(stepped_positions(start, end, step, length), Ok(expected));
    }

    #[rstest]
    fn test_stepped_positions_rejects_zero_step() {
        assert!(matches!(
            stepped_positions(None, None, 0, 3),
            Err(OrderedSetError::InvalidArgument { .. })
        ));
    }

    #[rstest]
    fn test_clamp_range_inclusive() {
        assert_eq!(clamp_range(&(1..=2), 5), (1, 3));
        assert_eq!(clamp_range(&(..=usize::MAX), 5), (0, 5));
    }

    #[rstest]
    fn test_construction_keeps_first_occurrence() {
        let set = abracadabra();
        assert_eq!(set.as_slice(), &['a', 'b', 'r', 'c', 'd']);
        assert!(set.is_consistent());
    }

    #[rstest]
    fn test_add_bumps_generation_only_for_new_elements() {
        let mut set: OrderedSet<i32> = OrderedSet::new();
        set.add(1);
        let generation = set.generation();
        set.add(1);
        assert_eq!(set.generation(), generation);
        set.add(2);
        assert_ne!(set.generation(), generation);
    }

    #[rstest]
    fn test_discard_reindexes_tail() {
        let mut set = abracadabra();
        assert!(set.discard(&'b'));
        assert!(set.is_consistent());
        assert_eq!(set.index_of(&'r'), Ok(1));
        assert_eq!(set.index_of(&'d'), Ok(3));
    }

    #[rstest]
    fn test_discard_missing_keeps_generation() {
        let mut set = abracadabra();
        let generation = set.generation();
        assert!(!set.discard(&'z'));
        assert_eq!(set.generation(), generation);
    }

    #[rstest]
    fn test_remove_returns_element() {
        let mut set: OrderedSet<String> = ["x".to_string(), "y".to_string()].into_iter().collect();
        assert_eq!(set.remove("x"), Ok("x".to_string()));
        assert_eq!(set.remove("x"), Err(OrderedSetError::KeyNotFound));
        assert!(set.is_consistent());
    }

    #[rstest]
    fn test_pop_at_errors() {
        let mut set: OrderedSet<i32> = OrderedSet::new();
        assert_eq!(set.pop_at(0), Err(OrderedSetError::EmptySet));
        set.add(1);
        assert_eq!(
            set.pop_at(2),
            Err(OrderedSetError::IndexOutOfRange {
                index: 2,
                length: 1
            })
        );
        assert_eq!(set.pop_at(-1), Ok(1));
    }

    #[rstest]
    fn test_pop_first() {
        let mut set: OrderedSet<char> = "abcd".chars().collect();
        assert_eq!(set.pop(), Ok('d'));
        assert_eq!(set.pop_first(), Ok('a'));
        assert_eq!(set.pop(), Ok('c'));
        assert_eq!(set.pop_first(), Ok('b'));
        assert_eq!(set.pop_first(), Err(OrderedSetError::EmptySet));
    }

    #[rstest]
    fn test_move_to_end_last_element_is_noop() {
        let mut set: OrderedSet<char> = "abc".chars().collect();
        let generation = set.generation();
        assert_eq!(set.move_to_end(&'c'), Ok(()));
        assert_eq!(set.generation(), generation);
        assert_eq!(set.as_slice(), &['a', 'b', 'c']);
    }

    #[rstest]
    fn test_move_to_end_reindexes() {
        let mut set: OrderedSet<char> = "abcd".chars().collect();
        set.move_to_end(&'b').unwrap();
        assert_eq!(set.as_slice(), &['a', 'c', 'd', 'b']);
        assert!(set.is_consistent());
    }

    #[rstest]
    fn test_retain_keeps_order() {
        let mut set: OrderedSet<i32> = (0..10).collect();
        set.retain(|value| value % 3 == 0);
        assert_eq!(set.as_slice(), &[0, 3, 6, 9]);
        assert!(set.is_consistent());
    }

    #[rstest]
    fn test_retain_everything_keeps_generation() {
        let mut set: OrderedSet<i32> = (0..4).collect();
        let generation = set.generation();
        set.retain(|_| true);
        assert_eq!(set.generation(), generation);
    }

    #[rstest]
    fn test_reverse_and_sort() {
        let mut set: OrderedSet<i32> = [3, 1, 2].into_iter().collect();
        set.reverse();
        assert_eq!(set.as_slice(), &[2, 1, 3]);
        assert!(set.is_consistent());
        set.sort();
        assert_eq!(set.as_slice(), &[1, 2, 3]);
        assert!(set.is_consistent());
        set.sort_by(|left, right| right.cmp(left));
        assert_eq!(set.as_slice(), &[3, 2, 1]);
        assert_eq!(set.index_of(&3), Ok(0));
    }

    #[rstest]
    fn test_clear() {
        let mut set = abracadabra();
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(&'a'));
        assert!(set.is_consistent());
    }

    #[rstest]
    fn test_clone_is_independent() {
        let original = abracadabra();
        let mut copy = original.clone();
        copy.add('z');
        copy.discard(&'a');
        assert_eq!(original.as_slice(), &['a', 'b', 'r', 'c', 'd']);
        assert!(original.is_consistent());
        assert!(copy.is_consistent());
    }

    #[rstest]
    fn test_extend_by_reference() {
        let mut set: OrderedSet<i32> = OrderedSet::new();
        let values = vec![1, 2, 1];
        set.extend(&values);
        assert_eq!(set.as_slice(), &[1, 2]);
    }

    #[rstest]
    fn test_into_iter_owned_and_reversed() {
        let set = abracadabra();
        let reversed: Vec<char> = set.clone().into_iter().rev().collect();
        assert_eq!(reversed, vec!['d', 'c', 'r', 'b', 'a']);
        assert_eq!(set.iter().len(), 5);
    }

    #[rstest]
    fn test_debug_format() {
        let set: OrderedSet<i32> = [1].into_iter().collect();
        assert_eq!(format!("{set:?}"), "OrderedSet([1])");
        let empty: OrderedSet<i32> = OrderedSet::new();
        assert_eq!(format!("{empty:?}"), "OrderedSet()");
        let stable: StableSet<i32> = [2, 1].into_iter().collect();
        assert_eq!(format!("{stable:?}"), "StableSet([2, 1])");
    }

    #[rstest]
    fn test_display_format() {
        let set: OrderedSet<i32> = [3, 1, 2].into_iter().collect();
        assert_eq!(format!("{set}"), "{3, 1, 2}");
        let empty: OrderedSet<i32> = OrderedSet::new();
        assert_eq!(format!("{empty}"), "{}");
    }
}
