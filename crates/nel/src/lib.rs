//! # NEL
//!
//! A small, safe expression language for declarative rules.
//!
//! NEL lets operators write boolean and arithmetic rules such as audit
//! conditions or eligibility checks, and evaluates them against a read-only
//! snapshot of domain data. Expressions can read variables and call helpers
//! registered by the host, but can never assign, loop, or run host code of
//! their own choosing.
//!
//! ## Architecture
//!
//! ```text
//! Source → [Tokenizer] → tokens → [Parser] → AST → [Evaluator] → Value
//! ```
//!
//! - **Tokenizer**: turns expression text into a token stream
//! - **Parser**: precedence-climbing recursive descent into an immutable AST
//! - **Evaluator**: tree-walks the AST against variables and helpers
//! - **Engine**: facade over the pipeline with an optional AST cache
//!
//! ## Example
//!
//! ```
//! use nel::{evaluate, Helpers, Value, Variables};
//!
//! let mut nation = Variables::new();
//! nation.insert("score", 1250.5);
//!
//! let mut variables = Variables::new();
//! variables.insert("nation", nation);
//!
//! let result = evaluate("nation.score > 500", &variables, &Helpers::new()).unwrap();
//! assert_eq!(result, Value::Bool(true));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod context;
pub mod engine;
pub mod environment;
pub mod error;
pub mod eval;
pub mod expression;
pub mod helpers;
pub mod parser;
pub mod profile;
pub mod tokenizer;
pub mod value;
pub mod variables;

// Re-export main types
pub use ast::{
    BinaryNode, BinaryOp, CallNode, IdentifierNode, LiteralNode, Node, UnaryNode, UnaryOp,
};
pub use context::EvalContext;
pub use engine::{evaluate, Engine, DEFAULT_CACHE_CAPACITY};
pub use environment::Environment;
pub use error::{EvalError, EvalErrorKind, NelError, Result, SyntaxError};
pub use eval::{eval_node, Evaluate};
pub use expression::Expression;
pub use helpers::{Helper, HelperContext, HelperFnPtr, Helpers};
pub use parser::{parse, parse_str, parse_with_limits, ParserLimits};
pub use profile::Profile;
pub use tokenizer::{tokenize, Token, TokenType};
pub use value::{Number, Value};
pub use variables::{Variable, Variables};

/// NEL version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
