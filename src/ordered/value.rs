//! Comparison and update against runtime-typed JSON values.
//!
//! Statically typed operands go through [`SetOperand`](super::SetOperand).
//! When the other side is only known at run time, for instance a value read
//! from a configuration file, it arrives as a [`serde_json::Value`] and is
//! classified here:
//!
//! - an array is an ordered sequence of elements
//! - an object is an unordered collection of its keys
//! - anything else is neither, and is rejected
//!
//! Object keys are JSON strings, so they only match sets whose element type
//! deserializes from a string.
//!
//! # Examples
//!
//! ```rust
//! use ordered_set::{OrderedSet, OrderedSetError};
//! use serde_json::json;
//!
//! let set: OrderedSet<String> = ["a".to_string(), "b".to_string()].into_iter().collect();
//!
//! assert_eq!(set.try_eq_value(&json!(["a", "b"])), Ok(true));
//! assert_eq!(set.try_eq_value(&json!(["b", "a"])), Ok(false));
//! assert_eq!(set.try_eq_value(&json!({"b": 1, "a": 2})), Ok(true));
//! assert!(matches!(
//!     set.try_eq_value(&json!(3)),
//!     Err(OrderedSetError::InvalidOperandType { .. })
//! ));
//! ```

use std::collections::HashSet;
use std::hash::Hash;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{EqualityPolicy, OrderedSet};
use crate::error::{OrderedSetError, OrderedSetResult};

/// A JSON value read as a collection of `T`.
enum DynamicOperand<T> {
    Sequence(Vec<T>),
    Keys(Vec<T>),
}

/// Names the JSON type of `value` for error messages.
const fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn read_operand<T, F>(value: &Value, reject: F) -> OrderedSetResult<DynamicOperand<T>>
where
    T: DeserializeOwned,
    F: Fn(String) -> OrderedSetError,
{
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| {
                T::deserialize(item)
                    .map_err(|_| reject(format!("array containing {}", describe(item))))
            })
            .collect::<OrderedSetResult<Vec<T>>>()
            .map(DynamicOperand::Sequence),
        Value::Object(map) => map
            .keys()
            .map(|key| {
                T::deserialize(Value::String(key.clone()))
                    .map_err(|_| reject(format!("object with key {key:?}")))
            })
            .collect::<OrderedSetResult<Vec<T>>>()
            .map(DynamicOperand::Keys),
        other => Err(reject(describe(other).to_string())),
    }
}

impl<T, E> OrderedSet<T, E>
where
    T: Clone + Eq + Hash + DeserializeOwned,
    E: EqualityPolicy,
{
    fn read_comparison_operand(
        value: &Value,
        operation: &'static str,
    ) -> OrderedSetResult<DynamicOperand<T>> {
        read_operand(value, |found| OrderedSetError::InvalidOperandType {
            operation,
            found,
        })
    }

    /// Compares the set with a JSON value using the usual equality rules.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::InvalidOperandType`] if `value` is not an
    /// array or object, or holds an entry that does not deserialize as `T`.
    pub fn try_eq_value(&self, value: &Value) -> OrderedSetResult<bool> {
        Ok(match Self::read_comparison_operand(value, "eq")? {
            DynamicOperand::Sequence(items) => *self == items,
            DynamicOperand::Keys(keys) => *self == keys.into_iter().collect::<HashSet<T>>(),
        })
    }

    /// Returns `true` if every element of the set is in `value`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::InvalidOperandType`] under the same
    /// conditions as [`try_eq_value`](Self::try_eq_value).
    pub fn try_is_subset_value(&self, value: &Value) -> OrderedSetResult<bool> {
        Ok(match Self::read_comparison_operand(value, "is_subset")? {
            DynamicOperand::Sequence(items) => self.is_subset(&items),
            DynamicOperand::Keys(keys) => self.is_subset(&keys),
        })
    }

    /// Returns `true` if every entry of `value` is in the set.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::InvalidOperandType`] under the same
    /// conditions as [`try_eq_value`](Self::try_eq_value).
    pub fn try_is_superset_value(&self, value: &Value) -> OrderedSetResult<bool> {
        Ok(match Self::read_comparison_operand(value, "is_superset")? {
            DynamicOperand::Sequence(items) => self.is_superset(&items),
            DynamicOperand::Keys(keys) => self.is_superset(&keys),
        })
    }

    /// Adds the entries of `value` as [`update`](Self::update) would.
    ///
    /// Array items are added in order; object keys in the object's
    /// iteration order. The value is fully read before the set changes.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::InvalidArgument`] if `value` is not an
    /// array or object, or holds an entry that does not deserialize as `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_set::{OrderedSet, OrderedSetError};
    /// use serde_json::json;
    ///
    /// let mut set: OrderedSet<i32> = [1].into_iter().collect();
    /// assert_eq!(set.try_update_value(&json!([3, 1, 2])), Ok(Some(2)));
    /// assert_eq!(set, [1, 3, 2]);
    ///
    /// assert_eq!(
    ///     set.try_update_value(&json!(7)),
    ///     Err(OrderedSetError::InvalidArgument {
    ///         expected: "an array or object",
    ///         found: "number".to_string(),
    ///     })
    /// );
    /// ```
    pub fn try_update_value(&mut self, value: &Value) -> OrderedSetResult<Option<usize>> {
        let operand = read_operand(value, |found| OrderedSetError::InvalidArgument {
            expected: "an array or object",
            found,
        })?;
        Ok(match operand {
            DynamicOperand::Sequence(items) | DynamicOperand::Keys(items) => self.update(items),
        })
    }
}
