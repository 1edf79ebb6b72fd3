//! Detached, modification-checked iteration.
//!
//! [`OrderedSet::iter`] borrows the set, so the borrow checker already rules
//! out mutation while it is alive. A [`Cursor`] holds no borrow between
//! steps: it remembers how many elements it has consumed, and the set's
//! generation and length when it was created. Each [`Cursor::advance`]
//! checks both first and refuses to continue once the set has changed.
//!
//! # Examples
//!
//! ```rust
//! use ordered_set::{OrderedSet, OrderedSetError};
//!
//! let mut set: OrderedSet<i32> = [1, 2, 3].into_iter().collect();
//! let mut cursor = set.cursor();
//!
//! assert_eq!(cursor.advance(&set), Ok(Some(&1)));
//! set.add(4);
//! assert!(matches!(
//!     cursor.advance(&set),
//!     Err(OrderedSetError::ConcurrentModification { .. })
//! ));
//! ```

use super::{EqualityPolicy, OrderedSet};
use crate::error::{OrderedSetError, OrderedSetResult};

/// The direction a [`Cursor`] walks the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// From the first element to the last.
    Forward,
    /// From the last element to the first.
    Backward,
}

/// A detached iterator position over an [`OrderedSet`].
///
/// A cursor is only meaningful for the set that created it (or an unmodified
/// clone of it). Handing it a different set is caught when the lengths
/// differ; a different set of the same length and generation is walked as
/// if it were the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    consumed: usize,
    generation: u64,
    length: usize,
    direction: Direction,
}

impl Cursor {
    const fn new(generation: u64, length: usize, direction: Direction) -> Self {
        Self {
            consumed: 0,
            generation,
            length,
            direction,
        }
    }

    /// Returns the direction this cursor walks.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns `true` if `set` has not changed since this cursor was created.
    #[must_use]
    pub fn is_valid_for<T, E: EqualityPolicy>(&self, set: &OrderedSet<T, E>) -> bool {
        self.generation == set.generation() && self.length == set.len()
    }

    /// Yields the next element of `set`, or `None` once every element has
    /// been visited.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::ConcurrentModification`] if `set` was
    /// structurally modified after the cursor was created, or if `set` is not
    /// the set the cursor came from and its length differs. The cursor stays
    /// invalid from then on. A foreign set with the same generation and
    /// length is not detected.
    pub fn advance<'a, T, E: EqualityPolicy>(
        &mut self,
        set: &'a OrderedSet<T, E>,
    ) -> OrderedSetResult<Option<&'a T>> {
        if !self.is_valid_for(set) {
            log::debug!(
                "cursor invalidated: set generation moved from {} to {}, length from {} to {}",
                self.generation,
                set.generation(),
                self.length,
                set.len()
            );
            return Err(OrderedSetError::ConcurrentModification {
                expected: self.generation,
                found: set.generation(),
            });
        }
        let elements = set.as_slice();
        if self.consumed >= elements.len() {
            return Ok(None);
        }
        let position = match self.direction {
            Direction::Forward => self.consumed,
            Direction::Backward => elements.len() - 1 - self.consumed,
        };
        self.consumed += 1;
        Ok(Some(&elements[position]))
    }

    /// Returns how many elements remain.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::ConcurrentModification`] if `set` changed.
    pub fn remaining<T, E: EqualityPolicy>(
        &self,
        set: &OrderedSet<T, E>,
    ) -> OrderedSetResult<usize> {
        if self.is_valid_for(set) {
            Ok(set.len().saturating_sub(self.consumed))
        } else {
            Err(OrderedSetError::ConcurrentModification {
                expected: self.generation,
                found: set.generation(),
            })
        }
    }
}

impl<T, E: EqualityPolicy> OrderedSet<T, E> {
    /// Returns a cursor positioned before the first element.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.generation(), self.len(), Direction::Forward)
    }

    /// Returns a cursor positioned after the last element, walking backwards.
    #[must_use]
    pub fn cursor_rev(&self) -> Cursor {
        Cursor::new(self.generation(), self.len(), Direction::Backward)
    }
}
