//! Error types for ordered-set operations.
//!
//! Every fallible operation in this crate returns [`OrderedSetError`]. The
//! variants are deliberately fine-grained so that callers can tell an empty
//! set apart from an out-of-range position or an absent key.

use std::fmt;

/// Errors that can occur when querying or mutating an ordered set.
///
/// # Examples
///
/// ```rust
/// use ordered_set::{OrderedSet, OrderedSetError};
///
/// let mut set: OrderedSet<i32> = OrderedSet::new();
/// assert_eq!(set.pop(), Err(OrderedSetError::EmptySet));
///
/// set.add(1);
/// assert_eq!(
///     set.get(5),
///     Err(OrderedSetError::IndexOutOfRange { index: 5, length: 1 })
/// );
/// assert_eq!(set.index_of(&7), Err(OrderedSetError::KeyNotFound));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderedSetError {
    /// The requested element is not in the set.
    KeyNotFound,

    /// A position fell outside `[-length, length - 1]`.
    IndexOutOfRange {
        /// The position that was requested, as given by the caller.
        index: isize,
        /// The length of the set at the time of the request.
        length: usize,
    },

    /// An element was requested from an empty set.
    EmptySet,

    /// A mutation received a value that cannot be iterated.
    InvalidArgument {
        /// What the operation needed.
        expected: &'static str,
        /// A short description of what it got instead.
        found: String,
    },

    /// A binary operation received an operand that cannot be reconciled
    /// with a set or a sequence.
    InvalidOperandType {
        /// The operation that rejected the operand.
        operation: &'static str,
        /// A short description of the rejected operand.
        found: String,
    },

    /// A cursor observed that the set changed after the cursor was created.
    ConcurrentModification {
        /// The generation captured when the cursor was created.
        expected: u64,
        /// The generation of the set when the cursor advanced.
        found: u64,
    },
}

impl fmt::Display for OrderedSetError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyNotFound => write!(formatter, "key not found in ordered set"),
            Self::IndexOutOfRange { index, length } => {
                write!(
                    formatter,
                    "index {index} out of range for ordered set of length {length}"
                )
            }
            Self::EmptySet => write!(formatter, "ordered set is empty"),
            Self::InvalidArgument { expected, found } => {
                write!(formatter, "invalid argument: expected {expected}, got {found}")
            }
            Self::InvalidOperandType { operation, found } => {
                write!(
                    formatter,
                    "unsupported operand for {operation}: {found} is neither a set nor a sequence"
                )
            }
            Self::ConcurrentModification { expected, found } => {
                write!(
                    formatter,
                    "ordered set changed during iteration (generation {expected} -> {found})"
                )
            }
        }
    }
}

impl std::error::Error for OrderedSetError {}

/// A specialized `Result` type for ordered-set operations.
pub type OrderedSetResult<A> = Result<A, OrderedSetError>;
