//! Binary operation evaluation

use std::cmp::Ordering;

use crate::ast::{BinaryNode, BinaryOp, Node};
use crate::value::Number;
use crate::{Environment, EvalContext, EvalError, Value};

use super::Evaluate;

impl Evaluate for BinaryNode {
    fn eval(&self, env: &mut Environment<'_>, ctx: &EvalContext) -> Result<Value, EvalError> {
        // Short-circuit evaluation for && and ||
        match self.op {
            BinaryOp::And => return eval_and(&self.left, &self.right, env, ctx),
            BinaryOp::Or => return eval_or(&self.left, &self.right, env, ctx),
            _ => {}
        }

        // Evaluate both operands
        let left = self.left.eval(env, ctx)?;
        let right = self.right.eval(env, ctx)?;

        match self.op {
            // Arithmetic
            BinaryOp::Add => eval_arithmetic(self.op, left, right, |a, b| a + b),
            BinaryOp::Sub => eval_arithmetic(self.op, left, right, |a, b| a - b),
            BinaryOp::Mul => eval_arithmetic(self.op, left, right, |a, b| a * b),
            BinaryOp::Div => eval_division(self.op, left, right, |a, b| a / b),
            BinaryOp::Rem => eval_division(self.op, left, right, |a, b| a % b),

            // Equality works across all kinds
            BinaryOp::Eq => Ok(Value::Bool(left == right)),
            BinaryOp::Ne => Ok(Value::Bool(left != right)),

            // Ordering needs numbers
            BinaryOp::Lt => eval_comparison(self.op, left, right, |o| o == Ordering::Less),
            BinaryOp::Le => eval_comparison(self.op, left, right, |o| o != Ordering::Greater),
            BinaryOp::Gt => eval_comparison(self.op, left, right, |o| o == Ordering::Greater),
            BinaryOp::Ge => eval_comparison(self.op, left, right, |o| o != Ordering::Less),

            BinaryOp::And | BinaryOp::Or => unreachable!("handled above"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Short-Circuit Logical Operators
// ═══════════════════════════════════════════════════════════════════════

fn eval_and(
    left: &Node,
    right: &Node,
    env: &mut Environment<'_>,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let left_val = left.eval(env, ctx)?;
    match left_val {
        Value::Bool(false) => Ok(Value::Bool(false)), // Short-circuit
        Value::Bool(true) => {
            let right_val = right.eval(env, ctx)?;
            match right_val {
                Value::Bool(b) => Ok(Value::Bool(b)),
                _ => Err(EvalError::invalid_binary_operands("&&", &left_val, &right_val)),
            }
        }
        _ => Err(EvalError::invalid_unary_operand("&&", &left_val)),
    }
}

fn eval_or(
    left: &Node,
    right: &Node,
    env: &mut Environment<'_>,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let left_val = left.eval(env, ctx)?;
    match left_val {
        Value::Bool(true) => Ok(Value::Bool(true)), // Short-circuit
        Value::Bool(false) => {
            let right_val = right.eval(env, ctx)?;
            match right_val {
                Value::Bool(b) => Ok(Value::Bool(b)),
                _ => Err(EvalError::invalid_binary_operands("||", &left_val, &right_val)),
            }
        }
        _ => Err(EvalError::invalid_unary_operand("||", &left_val)),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Arithmetic
// ═══════════════════════════════════════════════════════════════════════

fn numbers(op: BinaryOp, left: &Value, right: &Value) -> Result<(Number, Number), EvalError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(EvalError::invalid_binary_operands(op.as_str(), left, right)),
    }
}

fn eval_arithmetic(
    op: BinaryOp,
    left: Value,
    right: Value,
    apply: fn(Number, Number) -> Number,
) -> Result<Value, EvalError> {
    let (a, b) = numbers(op, &left, &right)?;
    Ok(Value::Number(apply(a, b)))
}

/// `/` and `%`: a zero divisor is an error rather than an infinity or NaN.
fn eval_division(
    op: BinaryOp,
    left: Value,
    right: Value,
    apply: fn(Number, Number) -> Number,
) -> Result<Value, EvalError> {
    let (a, b) = numbers(op, &left, &right)?;
    if b.is_zero() {
        return Err(EvalError::division_by_zero(op.as_str()));
    }
    Ok(Value::Number(apply(a, b)))
}

// ═══════════════════════════════════════════════════════════════════════
// Comparison
// ═══════════════════════════════════════════════════════════════════════

/// An unordered pair (a NaN operand) satisfies no comparison.
fn eval_comparison(
    op: BinaryOp,
    left: Value,
    right: Value,
    test: fn(Ordering) -> bool,
) -> Result<Value, EvalError> {
    let (a, b) = numbers(op, &left, &right)?;
    Ok(Value::Bool(a.partial_cmp(&b).is_some_and(test)))
}
