//! Named, pre-parsed rules

use std::sync::Arc;

use crate::ast::Node;
use crate::error::{EvalError, EvalErrorKind, Result, SyntaxError};
use crate::eval::eval_node;
use crate::parser::parse_str;
use crate::profile::Profile;
use crate::{EvalContext, Helpers, Value, Variables};

/// A rule parsed once and evaluated many times.
///
/// Cloning is cheap: the tree is shared behind an `Arc`.
///
/// # Example
///
/// ```
/// use nel::{Expression, Helpers, Variables};
///
/// let rule = Expression::new("strong_army", "nation.military.soldiers >= 10000")
///     .unwrap()
///     .with_description("Nation fields a large army");
///
/// let mut vars = Variables::new();
/// vars.insert_path("nation.military.soldiers", 15000);
///
/// assert_eq!(rule.evaluate_bool(&vars, &Helpers::new()), Ok(true));
/// ```
#[derive(Debug, Clone)]
pub struct Expression {
    name: String,
    description: Option<String>,
    source: String,
    ast: Arc<Node>,
}

impl Expression {
    /// Parse `source` into an expression named after its own text.
    ///
    /// # Errors
    /// Returns an error if the expression cannot be parsed
    pub fn compile(source: impl Into<String>) -> std::result::Result<Self, SyntaxError> {
        let source = source.into();
        Self::new(source.clone(), source)
    }

    /// Parse `source` into a named expression.
    ///
    /// # Errors
    /// Returns an error if the expression cannot be parsed
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> std::result::Result<Self, SyntaxError> {
        let source = source.into();
        let ast = parse_str(&source)?;

        Ok(Self {
            name: name.into(),
            description: None,
            source,
            ast: Arc::new(ast),
        })
    }

    /// Attach a human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The description, if one was attached.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed tree.
    #[must_use]
    pub fn ast(&self) -> &Node {
        &self.ast
    }

    /// Variable paths the expression reads, in order of first use.
    #[must_use]
    pub fn identifiers(&self) -> Vec<String> {
        self.ast.identifiers()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Evaluation
    // ═══════════════════════════════════════════════════════════════════

    /// Evaluate with the default context.
    pub fn evaluate(
        &self,
        variables: &Variables,
        helpers: &Helpers,
    ) -> std::result::Result<Value, EvalError> {
        self.evaluate_with(variables, helpers, &EvalContext::default())
    }

    /// Evaluate with an explicit context.
    pub fn evaluate_with(
        &self,
        variables: &Variables,
        helpers: &Helpers,
        ctx: &EvalContext,
    ) -> std::result::Result<Value, EvalError> {
        eval_node(&self.ast, variables, helpers, ctx)
    }

    /// Evaluate as a condition.
    ///
    /// # Errors
    /// A result that is not a boolean is a `TypeMismatch`.
    pub fn evaluate_bool(
        &self,
        variables: &Variables,
        helpers: &Helpers,
    ) -> std::result::Result<bool, EvalError> {
        let value = self.evaluate(variables, helpers)?;
        value.as_bool().ok_or_else(|| {
            EvalError::new(
                EvalErrorKind::TypeMismatch,
                format!(
                    "rule `{}` produced {}, expected bool",
                    self.name,
                    crate::error::type_name(&value)
                ),
            )
        })
    }

    /// Evaluate against a snapshot taken from `profile`.
    pub fn evaluate_profile<P: Profile + ?Sized>(
        &self,
        profile: &P,
        helpers: &Helpers,
    ) -> Result<Value> {
        Ok(self.evaluate(&profile.variables(), helpers)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nation() -> Variables {
        let mut vars = Variables::new();
        vars.insert_path("nation.score", 1250.5);
        vars.insert_path("nation.military.soldiers", 15000);
        vars
    }

    #[test]
    fn test_compile_names_after_source() {
        let expr = Expression::compile("nation.score > 500").unwrap();
        assert_eq!(expr.name(), "nation.score > 500");
        assert_eq!(expr.source(), "nation.score > 500");
        assert!(expr.description().is_none());
    }

    #[test]
    fn test_compile_invalid() {
        let err = Expression::compile("(x > 5").unwrap_err();
        assert_eq!(err.position, 6);
    }

    #[test]
    fn test_evaluate_many_times() {
        let expr = Expression::new("score", "nation.score * 2").unwrap();
        let vars = nation();
        let helpers = Helpers::new();
        let first = expr.evaluate(&vars, &helpers).unwrap();
        let second = expr.evaluate(&vars, &helpers).unwrap();
        assert_eq!(first, Value::float(2501.0));
        assert_eq!(first, second);
    }

    #[test]
    fn test_evaluate_bool() {
        let helpers = Helpers::new();
        let vars = nation();

        let rule = Expression::compile("nation.military.soldiers > 20000").unwrap();
        assert_eq!(rule.evaluate_bool(&vars, &helpers), Ok(false));

        let not_a_rule = Expression::new("soldiers", "nation.military.soldiers").unwrap();
        let err = not_a_rule.evaluate_bool(&vars, &helpers).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::TypeMismatch);
        assert_eq!(err.message, "rule `soldiers` produced int, expected bool");
    }

    #[test]
    fn test_identifiers() {
        let expr = Expression::compile("a.b > 1 && c || a.b < 0").unwrap();
        assert_eq!(expr.identifiers(), vec!["a.b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_clone_shares_tree() {
        let expr = Expression::compile("1 + 1").unwrap();
        let copy = expr.clone();
        assert!(Arc::ptr_eq(&expr.ast, &copy.ast));
    }
}
