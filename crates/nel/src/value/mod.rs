//! Value representation for runtime values

mod display;
mod impls;
mod number;
#[cfg(feature = "serde")]
mod serialize;

pub use number::Number;

use std::sync::Arc;

/// Runtime value produced by evaluating a NEL expression.
///
/// The set of kinds is closed. Operators pattern-match on these variants
/// and reject mismatches instead of coercing between kinds.
#[derive(Clone, PartialEq)]
pub enum Value {
    /// The `null` literal, or a variable explicitly set to null
    Null,

    /// Boolean: `true` or `false`
    Bool(bool),

    /// Integral or fractional number
    Number(Number),

    /// Immutable text, shared between clones
    String(Arc<String>),
}
