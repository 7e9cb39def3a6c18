//! Helper functions callable from expressions
//!
//! Helpers are plain data handed to the evaluator. Nothing is looked up
//! from global state: an expression can only call what the host put in the
//! [`Helpers`] registry for that evaluation.

mod prelude;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{EvalError, EvalErrorKind};
use crate::value::Value;
use crate::variables::Variables;

/// Type alias for helper function pointers to reduce complexity
pub type HelperFnPtr =
    Arc<dyn Fn(&HelperContext<'_>, &[Value]) -> Result<Value, String> + Send + Sync>;

/// What a helper can see besides its arguments.
#[derive(Debug, Clone, Copy)]
pub struct HelperContext<'a> {
    /// The name the helper was called by
    pub name: &'a str,

    /// The variables of the evaluation in progress
    pub variables: &'a Variables,
}

/// A named native function exposed to expressions.
#[derive(Clone)]
pub struct Helper {
    name: String,
    arity: Option<usize>,
    func: HelperFnPtr,
}

impl fmt::Debug for Helper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Helper({})", self.name)
    }
}

impl Helper {
    /// Create a helper from a closure.
    pub fn new<F>(name: impl Into<String>, arity: Option<usize>, func: F) -> Self
    where
        F: Fn(&HelperContext<'_>, &[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity,
            func: Arc::new(func),
        }
    }

    /// Function name (for lookup and error messages).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Required argument count; `None` accepts any number.
    #[must_use]
    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    /// Invoke the helper after checking the argument count.
    ///
    /// This is the only way to run the function, so a fixed-arity helper
    /// always sees exactly `arity` arguments.
    ///
    /// # Errors
    ///
    /// Returns a `HelperFailed` error on an arity mismatch or when the
    /// helper itself reports an error.
    pub fn call(&self, ctx: &HelperContext<'_>, args: &[Value]) -> Result<Value, EvalError> {
        if let Some(arity) = self.arity {
            if args.len() != arity {
                return Err(EvalError::new(
                    EvalErrorKind::HelperFailed,
                    format!(
                        "`{}` expects {} argument{}, got {}",
                        self.name,
                        arity,
                        if arity == 1 { "" } else { "s" },
                        args.len()
                    ),
                ));
            }
        }

        (self.func)(ctx, args).map_err(|message| {
            EvalError::new(
                EvalErrorKind::HelperFailed,
                format!("`{}`: {}", self.name, message),
            )
        })
    }
}

/// The set of helpers available to an evaluation.
///
/// # Example
///
/// ```
/// use nel::{evaluate, Helpers, Value, Variables};
///
/// let mut helpers = Helpers::new();
/// helpers.register_fn("double", Some(1), |_, args| match args.first() {
///     Some(Value::Number(n)) => Ok(Value::Number(*n + *n)),
///     _ => Err("expected a number".to_string()),
/// });
///
/// let result = evaluate("double(2) == 4", &Variables::new(), &helpers).unwrap();
/// assert_eq!(result, Value::Bool(true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Helpers {
    helpers: HashMap<String, Helper>,
}

impl Helpers {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the standard helpers.
    pub fn with_prelude() -> Self {
        let mut helpers = Self::new();
        helpers.load_prelude();
        helpers
    }

    /// Add a helper, replacing and returning any helper with the same name.
    pub fn register(&mut self, helper: Helper) -> Option<Helper> {
        self.helpers.insert(helper.name.clone(), helper)
    }

    /// Add a helper from a closure.
    pub fn register_fn<F>(
        &mut self,
        name: impl Into<String>,
        arity: Option<usize>,
        func: F,
    ) -> Option<Helper>
    where
        F: Fn(&HelperContext<'_>, &[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.register(Helper::new(name, arity, func))
    }

    /// Look up a helper by name.
    pub fn get(&self, name: &str) -> Option<&Helper> {
        self.helpers.get(name)
    }

    /// Whether a helper with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.helpers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.helpers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered helpers.
    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    /// Whether no helpers are registered.
    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }
}
