//! Standard prelude with built-in helpers

use super::{Helper, HelperContext, Helpers};
use crate::error::type_name;
use crate::value::{Number, Value};

impl Helpers {
    /// Load the standard helpers into this registry.
    ///
    /// Host-registered helpers with the same names are replaced.
    pub fn load_prelude(&mut self) {
        // Numbers
        self.register(Helper::new("abs", Some(1), helper_abs));
        self.register(Helper::new("min", None, helper_min));
        self.register(Helper::new("max", None, helper_max));
        self.register(Helper::new("round", Some(1), helper_round));
        self.register(Helper::new("floor", Some(1), helper_floor));
        self.register(Helper::new("ceil", Some(1), helper_ceil));

        // Strings
        self.register(Helper::new("len", Some(1), helper_len));
        self.register(Helper::new("lower", Some(1), helper_lower));
        self.register(Helper::new("upper", Some(1), helper_upper));
        self.register(Helper::new("contains", Some(2), helper_contains));

        // Nulls
        self.register(Helper::new("coalesce", None, helper_coalesce));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Built-in Helper Implementations
// ═══════════════════════════════════════════════════════════════════════

fn arg(args: &[Value], index: usize) -> Result<&Value, String> {
    args.get(index)
        .ok_or_else(|| format!("missing argument {}, got {}", index + 1, args.len()))
}

fn expect_number(value: &Value) -> Result<Number, String> {
    value
        .as_number()
        .ok_or_else(|| format!("expected a number, got {}", type_name(value)))
}

fn expect_str(value: &Value) -> Result<&str, String> {
    value
        .as_str()
        .ok_or_else(|| format!("expected a string, got {}", type_name(value)))
}

fn helper_abs(_: &HelperContext<'_>, args: &[Value]) -> Result<Value, String> {
    let n = expect_number(arg(args, 0)?)?;
    let abs = match n {
        Number::Int(i) => i
            .checked_abs()
            .map_or_else(|| Number::Float((i as f64).abs()), Number::Int),
        Number::Float(f) => Number::Float(f.abs()),
    };
    Ok(Value::Number(abs))
}

fn extremum(args: &[Value], pick_right: fn(Number, Number) -> bool) -> Result<Value, String> {
    let (first, rest) = args
        .split_first()
        .ok_or_else(|| "expects at least 1 argument, got 0".to_string())?;

    let mut best = expect_number(first)?;
    for arg in rest {
        let n = expect_number(arg)?;
        if pick_right(best, n) {
            best = n;
        }
    }
    Ok(Value::Number(best))
}

fn helper_min(_: &HelperContext<'_>, args: &[Value]) -> Result<Value, String> {
    extremum(args, |best, n| n < best)
}

fn helper_max(_: &HelperContext<'_>, args: &[Value]) -> Result<Value, String> {
    extremum(args, |best, n| n > best)
}

fn rounding(args: &[Value], op: fn(f64) -> f64) -> Result<Value, String> {
    match expect_number(arg(args, 0)?)? {
        Number::Int(i) => Ok(Value::int(i)),
        Number::Float(f) => Ok(Value::float(op(f))),
    }
}

fn helper_round(_: &HelperContext<'_>, args: &[Value]) -> Result<Value, String> {
    rounding(args, f64::round)
}

fn helper_floor(_: &HelperContext<'_>, args: &[Value]) -> Result<Value, String> {
    rounding(args, f64::floor)
}

fn helper_ceil(_: &HelperContext<'_>, args: &[Value]) -> Result<Value, String> {
    rounding(args, f64::ceil)
}

fn helper_len(_: &HelperContext<'_>, args: &[Value]) -> Result<Value, String> {
    let s = expect_str(arg(args, 0)?)?;
    Ok(Value::from(s.chars().count() as u64))
}

fn helper_lower(_: &HelperContext<'_>, args: &[Value]) -> Result<Value, String> {
    Ok(Value::string(expect_str(arg(args, 0)?)?.to_lowercase()))
}

fn helper_upper(_: &HelperContext<'_>, args: &[Value]) -> Result<Value, String> {
    Ok(Value::string(expect_str(arg(args, 0)?)?.to_uppercase()))
}

fn helper_contains(_: &HelperContext<'_>, args: &[Value]) -> Result<Value, String> {
    let haystack = expect_str(arg(args, 0)?)?;
    let needle = expect_str(arg(args, 1)?)?;
    Ok(Value::Bool(haystack.contains(needle)))
}

fn helper_coalesce(_: &HelperContext<'_>, args: &[Value]) -> Result<Value, String> {
    Ok(args
        .iter()
        .find(|v| !v.is_null())
        .cloned()
        .unwrap_or(Value::Null))
}
