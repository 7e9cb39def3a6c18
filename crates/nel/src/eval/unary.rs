//! Unary operation evaluation

use crate::ast::{UnaryNode, UnaryOp};
use crate::{Environment, EvalContext, EvalError, Value};

use super::Evaluate;

impl Evaluate for UnaryNode {
    fn eval(&self, env: &mut Environment<'_>, ctx: &EvalContext) -> Result<Value, EvalError> {
        let operand = self.operand.eval(env, ctx)?;

        match (self.op, &operand) {
            (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
            (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-*n)),
            (op, _) => Err(EvalError::invalid_unary_operand(op.as_str(), &operand)),
        }
    }
}
