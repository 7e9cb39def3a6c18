//! Error types for NEL tokenizing, parsing and evaluation

use std::fmt;

use thiserror::Error;

use crate::value::{Number, Value};

/// Malformed expression text, reported by the tokenizer or the parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Syntax error at position {position}: {message}")]
pub struct SyntaxError {
    /// Human-readable description of what was expected or found
    pub message: String,

    /// Byte offset into the source where the problem was detected
    pub position: usize,
}

impl SyntaxError {
    /// Create a syntax error at a source offset.
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

/// The category of an evaluation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvalErrorKind {
    /// An identifier path could not be resolved to a value
    UnknownVariable,

    /// A call named a helper that is not registered
    UnknownHelper,

    /// An operator received operands of the wrong kind
    TypeMismatch,

    /// `/` or `%` with a zero right operand
    DivisionByZero,

    /// A helper rejected its arguments or reported an error
    HelperFailed,

    /// The expression nests deeper than the configured limit
    DepthExceeded,
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EvalErrorKind::UnknownVariable => "Unknown variable",
            EvalErrorKind::UnknownHelper => "Unknown helper",
            EvalErrorKind::TypeMismatch => "Type mismatch",
            EvalErrorKind::DivisionByZero => "Division by zero",
            EvalErrorKind::HelperFailed => "Helper failed",
            EvalErrorKind::DepthExceeded => "Depth exceeded",
        };
        f.write_str(name)
    }
}

/// A failure while evaluating a well-formed expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct EvalError {
    /// What went wrong
    pub kind: EvalErrorKind,

    /// Details suitable for showing to whoever wrote the rule
    pub message: String,
}

impl EvalError {
    /// Create an evaluation error.
    pub fn new(kind: EvalErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// A dotted path that does not resolve to a value.
    pub fn unknown_variable(path: &str) -> Self {
        Self::new(
            EvalErrorKind::UnknownVariable,
            format!("`{}` is not defined", path),
        )
    }

    /// A helper name missing from the registry.
    pub fn unknown_helper(name: &str) -> Self {
        Self::new(
            EvalErrorKind::UnknownHelper,
            format!("no helper named `{}` is registered", name),
        )
    }

    /// A binary operator applied to operands of the wrong kinds.
    pub fn invalid_binary_operands(op: &str, left: &Value, right: &Value) -> Self {
        Self::new(
            EvalErrorKind::TypeMismatch,
            format!(
                "cannot apply `{}` to {} and {}",
                op,
                type_name(left),
                type_name(right)
            ),
        )
    }

    /// A unary operator applied to an operand of the wrong kind.
    pub fn invalid_unary_operand(op: &str, operand: &Value) -> Self {
        Self::new(
            EvalErrorKind::TypeMismatch,
            format!("cannot apply `{}` to {}", op, type_name(operand)),
        )
    }

    /// A zero right operand for `/` or `%`.
    pub fn division_by_zero(op: &str) -> Self {
        Self::new(
            EvalErrorKind::DivisionByZero,
            format!("right operand of `{}` is zero", op),
        )
    }
}

/// Any error produced by the NEL pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NelError {
    /// The expression could not be tokenized or parsed
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The expression parsed but failed to evaluate
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl NelError {
    /// The evaluation error kind, if this is an evaluation error.
    pub fn eval_kind(&self) -> Option<EvalErrorKind> {
        match self {
            NelError::Eval(e) => Some(e.kind),
            NelError::Syntax(_) => None,
        }
    }

    /// Whether this is a syntax error.
    pub fn is_syntax(&self) -> bool {
        matches!(self, NelError::Syntax(_))
    }
}

/// Result type alias for NEL operations
pub type Result<T> = std::result::Result<T, NelError>;

/// Get the kind name of a value for error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(Number::Int(_)) => "int",
        Value::Number(Number::Float(_)) => "float",
        Value::String(_) => "string",
    }
}
