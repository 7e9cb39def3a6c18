//! Numbers that remember whether they are integral or fractional

use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

/// A NEL number.
///
/// Integer literals produce [`Number::Int`] and decimal literals produce
/// [`Number::Float`]. The distinction survives arithmetic where it can:
/// `+`, `-` and `*` on two integers stay integral, while `/` and `%`
/// always produce a float.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Integral number
    Int(i64),
    /// Fractional number
    Float(f64),
}

impl Number {
    /// Whether this number came from integral arithmetic.
    pub fn is_integral(self) -> bool {
        matches!(self, Number::Int(_))
    }

    /// Numeric value as `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    /// Integral value, if this is an `Int`.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Number::Int(n) => Some(n),
            Number::Float(_) => None,
        }
    }

    /// Whether the numeric value is zero (`0`, `0.0` or `-0.0`).
    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(n) => n == 0,
            Number::Float(f) => f == 0.0,
        }
    }

    fn integral_or_float(
        self,
        other: Number,
        int_op: fn(i64, i64) -> Option<i64>,
        float_op: fn(f64, f64) -> f64,
    ) -> Number {
        if let (Number::Int(a), Number::Int(b)) = (self, other) {
            if let Some(n) = int_op(a, b) {
                return Number::Int(n);
            }
        }
        Number::Float(float_op(self.as_f64(), other.as_f64()))
    }
}

impl Neg for Number {
    type Output = Number;

    /// Negate, keeping the kind. `-i64::MIN` does not fit and becomes a float.
    fn neg(self) -> Number {
        match self {
            Number::Int(n) => n
                .checked_neg()
                .map(Number::Int)
                .unwrap_or_else(|| Number::Float(-(n as f64))),
            Number::Float(f) => Number::Float(-f),
        }
    }
}

impl Add for Number {
    type Output = Number;

    /// Integral when both sides are, falling back to a float on overflow.
    fn add(self, other: Number) -> Number {
        self.integral_or_float(other, i64::checked_add, |a, b| a + b)
    }
}

impl Sub for Number {
    type Output = Number;

    fn sub(self, other: Number) -> Number {
        self.integral_or_float(other, i64::checked_sub, |a, b| a - b)
    }
}

impl Mul for Number {
    type Output = Number;

    fn mul(self, other: Number) -> Number {
        self.integral_or_float(other, i64::checked_mul, |a, b| a * b)
    }
}

impl Div for Number {
    type Output = Number;

    /// Always fractional. The evaluator rejects a zero divisor before getting here.
    fn div(self, other: Number) -> Number {
        Number::Float(self.as_f64() / other.as_f64())
    }
}

impl Rem for Number {
    type Output = Number;

    /// Always fractional; the sign follows the dividend.
    fn rem(self, other: Number) -> Number {
        Number::Float(self.as_f64() % other.as_f64())
    }
}

impl PartialEq for Number {
    /// Numbers compare by value: `Int(2) == Float(2.0)`.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Int(n)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::Int(n as i64)
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::Float(f)
    }
}
