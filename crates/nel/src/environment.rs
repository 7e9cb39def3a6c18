//! Runtime environment for a single evaluation

use crate::error::{EvalError, EvalErrorKind};
use crate::helpers::Helpers;
use crate::variables::Variables;

/// Everything an evaluation reads from, plus its nesting counter.
///
/// The environment only borrows the host's variables and helpers, so
/// evaluation can never change them. A fresh environment is created for
/// every evaluation; the parsed tree itself carries no state.
///
/// # Example
///
/// ```
/// use nel::{Environment, Helpers, Variables};
///
/// let vars = Variables::new();
/// let helpers = Helpers::new();
/// let mut env = Environment::new(&vars, &helpers).with_max_depth(1);
///
/// assert!(env.enter().is_ok());
/// assert!(env.enter().is_err()); // limit reached
/// env.exit();
/// assert_eq!(env.depth(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Environment<'a> {
    variables: &'a Variables,
    helpers: &'a Helpers,

    /// Current node nesting (for stack overflow protection)
    depth: usize,

    /// Maximum allowed nesting
    max_depth: usize,
}

impl<'a> Environment<'a> {
    /// Create an environment over borrowed variables and helpers.
    pub fn new(variables: &'a Variables, helpers: &'a Helpers) -> Self {
        Self {
            variables,
            helpers,
            depth: 0,
            max_depth: 256,
        }
    }

    /// Use a custom nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The variables expressions read from.
    pub fn variables(&self) -> &'a Variables {
        self.variables
    }

    /// The helpers expressions may call.
    pub fn helpers(&self) -> &'a Helpers {
        self.helpers
    }

    // ═══════════════════════════════════════════════════════════════════
    // Depth Tracking (Stack Overflow Protection)
    // ═══════════════════════════════════════════════════════════════════

    /// Enter a node. Returns error if max depth exceeded.
    pub fn enter(&mut self) -> Result<(), EvalError> {
        if self.depth >= self.max_depth {
            return Err(EvalError::new(
                EvalErrorKind::DepthExceeded,
                format!("expression nesting exceeds maximum depth of {}", self.max_depth),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave a node.
    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Get current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_exit() {
        let vars = Variables::new();
        let helpers = Helpers::new();
        let mut env = Environment::new(&vars, &helpers);

        env.enter().unwrap();
        env.enter().unwrap();
        assert_eq!(env.depth(), 2);
        env.exit();
        env.exit();
        env.exit();
        assert_eq!(env.depth(), 0);
    }

    #[test]
    fn test_depth_exceeded() {
        let vars = Variables::new();
        let helpers = Helpers::new();
        let mut env = Environment::new(&vars, &helpers).with_max_depth(2);

        env.enter().unwrap();
        env.enter().unwrap();
        let err = env.enter().unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::DepthExceeded);
        assert_eq!(env.depth(), 2);
    }

    #[test]
    fn test_borrows_host_data() {
        let mut vars = Variables::new();
        vars.insert("x", 1);
        let helpers = Helpers::with_prelude();
        let env = Environment::new(&vars, &helpers);

        assert!(env.variables().get("x").is_some());
        assert!(env.helpers().contains("abs"));
    }
}
