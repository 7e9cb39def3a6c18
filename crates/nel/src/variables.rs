//! Variable trees that expressions read from
//!
//! A [`Variables`] tree maps names to either a scalar [`Value`] or a nested
//! tree. The identifier `nation.military.soldiers` walks `nation`, then
//! `military`, and must land on a value at `soldiers`.

use indexmap::IndexMap;

use crate::value::{Number, Value};

/// An entry in a variable tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Variable {
    /// A scalar value an identifier can resolve to
    Value(Value),

    /// A nested group of variables
    Map(Variables),
}

impl Variable {
    /// The scalar value, if this entry is not a group.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Variable::Value(v) => Some(v),
            Variable::Map(_) => None,
        }
    }

    /// The nested group, if this entry is one.
    pub fn as_map(&self) -> Option<&Variables> {
        match self {
            Variable::Map(m) => Some(m),
            Variable::Value(_) => None,
        }
    }
}

/// A read-only snapshot of named data, usually built by a
/// [`Profile`](crate::Profile).
///
/// Keys keep their insertion order so listings are stable.
///
/// # Example
///
/// ```
/// use nel::{Value, Variables};
///
/// let mut vars = Variables::new();
/// vars.insert_path("nation.score", 1250.5);
/// vars.insert_path("nation.military.soldiers", 15000);
///
/// let soldiers = vars.lookup(&["nation", "military", "soldiers"]);
/// assert_eq!(soldiers.and_then(|v| v.as_value()), Some(&Value::int(15000)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    entries: IndexMap<String, Variable>,
}

impl Variables {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value or nested group under `key`, returning the previous entry.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Variable>,
    ) -> Option<Variable> {
        self.entries.insert(key.into(), value.into())
    }

    /// Insert a value at a dotted path, creating intermediate groups.
    ///
    /// An intermediate segment that currently holds a scalar is replaced by
    /// a group, since a path cannot run through a value.
    pub fn insert_path(&mut self, path: &str, value: impl Into<Value>) {
        let mut segments: Vec<&str> = path.split('.').collect();
        let last = segments.pop().unwrap_or_default();

        let mut current = self;
        for segment in segments {
            let entry = current
                .entries
                .entry(segment.to_string())
                .or_insert_with(|| Variable::Map(Variables::new()));
            if !matches!(entry, Variable::Map(_)) {
                *entry = Variable::Map(Variables::new());
            }
            current = match entry {
                Variable::Map(map) => map,
                Variable::Value(_) => unreachable!("entry was just made a map"),
            };
        }

        current
            .entries
            .insert(last.to_string(), Variable::Value(value.into()));
    }

    /// Get the entry directly under `key`.
    pub fn get(&self, key: &str) -> Option<&Variable> {
        self.entries.get(key)
    }

    /// Walk `segments` from the root. Every segment but the last must name
    /// a group; the last entry is returned whatever it is.
    pub fn lookup<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Variable> {
        let (last, init) = segments.split_last()?;

        let mut current = self;
        for segment in init {
            current = current.get(segment.as_ref())?.as_map()?;
        }
        current.get(last.as_ref())
    }

    /// Number of entries directly under the root.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries directly under the root.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Every dotted path that resolves to a value, with that value.
    pub fn paths(&self) -> Vec<(String, &Value)> {
        let mut out = Vec::new();
        self.collect_paths("", &mut out);
        out
    }

    fn collect_paths<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a Value)>) {
        for (key, entry) in &self.entries {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };
            match entry {
                Variable::Value(value) => out.push((path, value)),
                Variable::Map(map) => map.collect_paths(&path, out),
            }
        }
    }
}

impl<K: Into<String>, V: Into<Variable>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// From Implementations
// ═══════════════════════════════════════════════════════════════════════

impl From<Variables> for Variable {
    fn from(map: Variables) -> Self {
        Variable::Map(map)
    }
}

impl From<Value> for Variable {
    fn from(value: Value) -> Self {
        Variable::Value(value)
    }
}

macro_rules! variable_from_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Variable {
                fn from(v: $t) -> Self {
                    Variable::Value(Value::from(v))
                }
            }
        )*
    };
}

variable_from_scalar!(bool, i32, i64, u32, u64, f64, Number, String, &str);
