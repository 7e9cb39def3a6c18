//! Evaluation context configuration

/// Configuration for evaluation.
///
/// This is passed through all evaluation calls and controls the nesting
/// limit and tracing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalContext {
    /// Maximum node nesting, leaves included (stack overflow protection)
    pub max_depth: usize,

    /// Whether to log every evaluated node at trace level (for debugging)
    pub trace: bool,
}

impl Default for EvalContext {
    fn default() -> Self {
        Self {
            max_depth: 256,
            trace: false,
        }
    }
}

impl EvalContext {
    /// Create a new context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a custom nesting limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    /// Enable or disable per-node tracing.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let ctx = EvalContext::new();
        assert_eq!(ctx.max_depth, 256);
        assert!(!ctx.trace);
    }

    #[test]
    fn test_builders() {
        let ctx = EvalContext::with_max_depth(8).with_trace(true);
        assert_eq!(ctx.max_depth, 8);
        assert!(ctx.trace);
    }
}
