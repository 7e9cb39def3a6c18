//! Expression evaluation
//!
//! A tree-walk over the closed [`Node`] set. Every node kind has its own
//! [`Evaluate`] impl in a submodule; [`Node`] dispatches to them and guards
//! nesting depth on the way down.

pub mod binary;
pub mod call;
pub mod identifier;
pub mod literal;
pub mod unary;

use crate::ast::Node;
use crate::{Environment, EvalContext, EvalError, Helpers, Value, Variables};

const LOG_TARGET: &str = "nel::eval";

/// Trait for evaluating AST nodes to values.
///
/// This is the core abstraction for the tree-walking evaluator.
/// Evaluation reads the environment and never writes to it, apart from the
/// nesting counter.
pub trait Evaluate {
    /// Evaluate this AST node in the given environment.
    fn eval(&self, env: &mut Environment<'_>, ctx: &EvalContext) -> Result<Value, EvalError>;
}

// ═══════════════════════════════════════════════════════════════════════
// Main Node Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Node {
    fn eval(&self, env: &mut Environment<'_>, ctx: &EvalContext) -> Result<Value, EvalError> {
        env.enter()?;

        let result = match self {
            Node::Literal(node) => node.eval(env, ctx),
            Node::Identifier(node) => node.eval(env, ctx),
            Node::Unary(node) => node.eval(env, ctx),
            Node::Binary(node) => node.eval(env, ctx),
            Node::Call(node) => node.eval(env, ctx),
        };

        env.exit();

        if ctx.trace {
            match &result {
                Ok(value) => log::trace!(target: LOG_TARGET, "{} => {:?}", self, value),
                Err(err) => log::trace!(target: LOG_TARGET, "{} failed: {}", self, err),
            }
        }

        result
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Evaluate a parsed tree against variables and helpers.
///
/// # Example
///
/// ```
/// use nel::{eval_node, parse_str, EvalContext, Helpers, Value, Variables};
///
/// let ast = parse_str("1 + 2 * 3").unwrap();
/// let result = eval_node(&ast, &Variables::new(), &Helpers::new(), &EvalContext::default());
/// assert_eq!(result, Ok(Value::int(7)));
/// ```
pub fn eval_node(
    node: &Node,
    variables: &Variables,
    helpers: &Helpers,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let mut env = Environment::new(variables, helpers).with_max_depth(ctx.max_depth);
    node.eval(&mut env, ctx)
}
