//! Literal evaluation

use crate::ast::LiteralNode;
use crate::{Environment, EvalContext, EvalError, Value};

use super::Evaluate;

impl Evaluate for LiteralNode {
    fn eval(&self, _env: &mut Environment<'_>, _ctx: &EvalContext) -> Result<Value, EvalError> {
        Ok(self.value.clone())
    }
}
