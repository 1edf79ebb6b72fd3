//! Equality policies for [`OrderedSet`](super::OrderedSet).
//!
//! An ordered set always remembers its order. What differs between use cases
//! is whether that order takes part in equality: a feature index wants
//! `[a, b] != [b, a]`, while a deduplicated work list usually only cares
//! about membership. Rather than two parallel types, the set carries a
//! zero-sized policy marker:
//!
//! - [`OrderSensitive`]: equality against sequence-like operands requires the
//!   same order. This is the policy of [`OrderedSet`](super::OrderedSet).
//! - [`OrderInsensitive`]: equality is always plain set equality. This is the
//!   policy of [`StableSet`](super::StableSet).

use super::OperandKind;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::OrderSensitive {}
    impl Sealed for super::OrderInsensitive {}
}

/// Decides how an ordered set compares against other collections.
///
/// This trait is sealed; the two policies below are the only implementations.
pub trait EqualityPolicy: sealed::Sealed + 'static {
    /// Name used by the `Debug` representation.
    const TYPE_NAME: &'static str;

    /// The kind this set reports when it is itself used as an operand.
    const OPERAND_KIND: OperandKind;

    /// Returns `true` if equality against an operand of `kind` must compare
    /// element order.
    fn compares_order(kind: OperandKind) -> bool;
}

/// Order takes part in equality against sequence-like operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OrderSensitive;

/// Equality ignores order entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OrderInsensitive;

impl EqualityPolicy for OrderSensitive {
    const TYPE_NAME: &'static str = "OrderedSet";
    const OPERAND_KIND: OperandKind = OperandKind::OrderedSequence;

    #[inline]
    fn compares_order(kind: OperandKind) -> bool {
        kind == OperandKind::OrderedSequence
    }
}

impl EqualityPolicy for OrderInsensitive {
    const TYPE_NAME: &'static str = "StableSet";
    const OPERAND_KIND: OperandKind = OperandKind::UnorderedCollection;

    #[inline]
    fn compares_order(_kind: OperandKind) -> bool {
        false
    }
}
