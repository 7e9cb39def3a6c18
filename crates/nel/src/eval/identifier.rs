//! Variable path resolution

use crate::ast::IdentifierNode;
use crate::variables::Variable;
use crate::{Environment, EvalContext, EvalError, Value};

use super::Evaluate;

impl Evaluate for IdentifierNode {
    /// Walk the segments through the variable tree.
    ///
    /// The path must end on a value. A missing key, a path running through
    /// a value, and a path stopping on a group are all `UnknownVariable`.
    fn eval(&self, env: &mut Environment<'_>, _ctx: &EvalContext) -> Result<Value, EvalError> {
        match env.variables().lookup(self.segments.as_slice()) {
            Some(Variable::Value(value)) => Ok(value.clone()),
            Some(Variable::Map(_)) | None => Err(EvalError::unknown_variable(&self.path())),
        }
    }
}
