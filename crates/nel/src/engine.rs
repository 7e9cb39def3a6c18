//! The evaluation facade
//!
//! [`Engine`] runs the whole pipeline (tokenize, parse, evaluate) and keeps
//! an optional cache of parsed trees keyed by source text, so a rule that is
//! checked for many profiles is only parsed once.
//!
//! The cache holds at most [`DEFAULT_CACHE_CAPACITY`] trees unless told
//! otherwise. When it is full, an arbitrary entry is evicted to make room.
//! A host that edits rules should hand the old text to [`Engine::replace`]
//! or [`Engine::invalidate`] so stale trees do not take up that room.

use std::sync::Arc;

use dashmap::DashMap;

use crate::ast::Node;
use crate::error::{EvalError, Result, SyntaxError};
use crate::eval::eval_node;
use crate::parser::{parse_with_limits, ParserLimits};
use crate::profile::Profile;
use crate::tokenizer::tokenize;
use crate::{EvalContext, Helpers, Value, Variables};

const LOG_TARGET: &str = "nel::engine";

/// Number of parsed trees an engine caches by default.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Parses and evaluates expressions.
///
/// An engine is `Send + Sync`; share one behind an `Arc` and evaluate from
/// as many threads as needed. The cache is the only state it holds, and a
/// cached tree is never mutated.
///
/// # Example
///
/// ```
/// use nel::{Engine, Helpers, Value, Variables};
///
/// let engine = Engine::new();
/// let mut vars = Variables::new();
/// vars.insert_path("nation.score", 1250.5);
///
/// let helpers = Helpers::new();
/// let result = engine.evaluate("nation.score > 500", &vars, &helpers).unwrap();
/// assert_eq!(result, Value::Bool(true));
/// assert_eq!(engine.cache_len(), 1);
/// ```
#[derive(Debug)]
pub struct Engine {
    cache: Option<DashMap<String, Arc<Node>>>,
    capacity: usize,
    ctx: EvalContext,
    limits: ParserLimits,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine with default limits and caching enabled.
    pub fn new() -> Self {
        Self {
            cache: Some(DashMap::new()),
            capacity: DEFAULT_CACHE_CAPACITY,
            ctx: EvalContext::default(),
            limits: ParserLimits::default(),
        }
    }

    /// Use a custom evaluation context.
    pub fn with_context(mut self, ctx: EvalContext) -> Self {
        self.ctx = ctx;
        self
    }

    /// Use custom parser limits.
    pub fn with_parser_limits(mut self, limits: ParserLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Enable or disable the parse cache.
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache = enabled.then(DashMap::new);
        self
    }

    /// Bound the parse cache to `capacity` trees. Zero caches nothing.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// The evaluation context in use.
    pub fn context(&self) -> &EvalContext {
        &self.ctx
    }

    // ═══════════════════════════════════════════════════════════════════
    // Pipeline
    // ═══════════════════════════════════════════════════════════════════

    /// Parse `source`, reusing a cached tree when there is one.
    ///
    /// Syntax errors are not cached.
    pub fn parse(&self, source: &str) -> std::result::Result<Arc<Node>, SyntaxError> {
        if let Some(cache) = &self.cache {
            if let Some(ast) = cache.get(source) {
                log::debug!(target: LOG_TARGET, "cache hit for `{}`", source);
                return Ok(Arc::clone(ast.value()));
            }
        }

        let tokens = tokenize(source)?;
        log::debug!(target: LOG_TARGET, "tokenized `{}` into {} tokens", source, tokens.len());
        let ast = Arc::new(parse_with_limits(tokens, self.limits)?);

        if let Some(cache) = &self.cache {
            self.store(cache, source, &ast);
        }

        Ok(ast)
    }

    fn store(&self, cache: &DashMap<String, Arc<Node>>, source: &str, ast: &Arc<Node>) {
        if self.capacity == 0 {
            return;
        }

        while cache.len() >= self.capacity {
            // The iterator holds a shard lock; it must be gone before `remove`.
            let victim = cache.iter().next().map(|entry| entry.key().clone());
            let Some(victim) = victim else { break };
            log::debug!(target: LOG_TARGET, "cache full, evicting `{}`", victim);
            cache.remove(&victim);
        }

        log::debug!(target: LOG_TARGET, "caching parse of `{}`", source);
        cache.insert(source.to_string(), Arc::clone(ast));
    }

    /// Parse and evaluate `source`.
    ///
    /// # Errors
    ///
    /// Returns [`NelError::Syntax`](crate::NelError::Syntax) if the source
    /// does not parse and [`NelError::Eval`](crate::NelError::Eval) if
    /// evaluation fails.
    pub fn evaluate(
        &self,
        source: &str,
        variables: &Variables,
        helpers: &Helpers,
    ) -> Result<Value> {
        let ast = self.parse(source)?;
        Ok(self.evaluate_node(&ast, variables, helpers)?)
    }

    /// Evaluate an already parsed tree.
    pub fn evaluate_node(
        &self,
        ast: &Node,
        variables: &Variables,
        helpers: &Helpers,
    ) -> std::result::Result<Value, EvalError> {
        eval_node(ast, variables, helpers, &self.ctx)
    }

    /// Evaluate `source` against a snapshot taken from `profile`.
    pub fn evaluate_profile<P: Profile + ?Sized>(
        &self,
        source: &str,
        profile: &P,
        helpers: &Helpers,
    ) -> Result<Value> {
        let variables = profile.variables();
        self.evaluate(source, &variables, helpers)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Cache Management
    // ═══════════════════════════════════════════════════════════════════

    /// Drop the cached tree for `source`. Returns whether one was cached.
    ///
    /// Call this when a rule's text stops being used, for example after it
    /// was edited. Otherwise its tree stays cached until evicted.
    pub fn invalidate(&self, source: &str) -> bool {
        self.cache
            .as_ref()
            .is_some_and(|cache| cache.remove(source).is_some())
    }

    /// Swap an edited rule: drop the tree for `old` and parse `new`.
    ///
    /// The old tree is dropped even when `new` fails to parse.
    ///
    /// # Errors
    ///
    /// Returns the [`SyntaxError`] of `new`.
    pub fn replace(&self, old: &str, new: &str) -> std::result::Result<Arc<Node>, SyntaxError> {
        if self.invalidate(old) {
            log::debug!(target: LOG_TARGET, "replacing `{}` with `{}`", old, new);
        }
        self.parse(new)
    }

    /// Drop every cached tree.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    /// Number of cached trees.
    pub fn cache_len(&self) -> usize {
        self.cache.as_ref().map_or(0, DashMap::len)
    }
}

/// Parse and evaluate `source` once, without caching.
///
/// # Example
///
/// ```
/// use nel::{evaluate, Helpers, Value, Variables};
///
/// let result = evaluate("2 + 3 * 4", &Variables::new(), &Helpers::new()).unwrap();
/// assert_eq!(result, Value::int(14));
/// ```
pub fn evaluate(source: &str, variables: &Variables, helpers: &Helpers) -> Result<Value> {
    Engine::new().with_cache(false).evaluate(source, variables, helpers)
}
