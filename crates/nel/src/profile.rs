//! The boundary between domain entities and expressions

use crate::variables::Variables;

/// Projects a domain entity into the variable tree expressions read.
///
/// Implementations decide which fields are exposed and under which paths.
/// The snapshot is taken once per evaluation; nothing an expression does
/// can reach back into the entity.
///
/// # Example
///
/// ```
/// use nel::{Engine, Helpers, Profile, Value, Variables};
///
/// struct Nation {
///     name: String,
///     soldiers: i64,
/// }
///
/// impl Profile for Nation {
///     fn variables(&self) -> Variables {
///         let mut vars = Variables::new();
///         vars.insert_path("nation.name", self.name.as_str());
///         vars.insert_path("nation.military.soldiers", self.soldiers);
///         vars
///     }
/// }
///
/// let avalon = Nation { name: "Avalon".into(), soldiers: 15000 };
/// let result = Engine::new()
///     .evaluate_profile("nation.military.soldiers > 10000", &avalon, &Helpers::new())
///     .unwrap();
/// assert_eq!(result, Value::Bool(true));
/// ```
pub trait Profile {
    /// Build the variable tree for this entity.
    fn variables(&self) -> Variables;
}

impl Profile for Variables {
    fn variables(&self) -> Variables {
        self.clone()
    }
}
