//! Display and Debug implementations for Value

use std::fmt;

use super::*;

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(Number::Int(n)) => write!(f, "{}", n),
            Value::Number(Number::Float(n)) => write!(f, "{:?}", n),
            Value::String(s) => write!(f, "{:?}", s.as_str()),
        }
    }
}

/// Renders values as NEL literal text.
///
/// Floats always carry a fractional part (`2.0`, not `2`) so the kind
/// stays visible. Strings are double-quoted without escaping, matching
/// the literal syntax.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(n) if n.is_finite() && n.fract() == 0.0 => write!(f, "{:.1}", n),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_scalars() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::int(42).to_string(), "42");
        assert_eq!(Value::int(-7).to_string(), "-7");
    }

    #[test]
    fn test_display_floats_keep_fraction() {
        assert_eq!(Value::float(2.0).to_string(), "2.0");
        assert_eq!(Value::float(1250.5).to_string(), "1250.5");
        assert_eq!(Value::float(-0.25).to_string(), "-0.25");
        assert_eq!(Value::float(f64::INFINITY).to_string(), "inf");
    }

    #[test]
    fn test_display_string_is_quoted() {
        assert_eq!(Value::string("hello").to_string(), "\"hello\"");
    }

    #[test]
    fn test_debug_output() {
        assert_eq!(format!("{:?}", Value::int(3)), "3");
        assert_eq!(format!("{:?}", Value::float(3.0)), "3.0");
        assert_eq!(format!("{:?}", Value::string("a\"b")), "\"a\\\"b\"");
    }
}
