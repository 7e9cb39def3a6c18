//! Building the variable tree from JSON files and `--var` flags

use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use nel::{Value, Variables};
use serde_json::{Map, Value as Json};

const LOG_TARGET: &str = "nel::vars";

/// Load variables from an optional JSON file, then apply `PATH=VALUE`
/// assignments on top.
pub fn load(file: Option<&Path>, assignments: &[String]) -> Result<Variables> {
    let mut vars = match file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("could not read variables from `{}`", path.display()))?;
            let json: Json = serde_json::from_str(&text)
                .with_context(|| format!("`{}` is not valid JSON", path.display()))?;
            from_json(&json)?
        }
        None => Variables::new(),
    };

    for assignment in assignments {
        let (path, raw) = parse_assignment(assignment)?;
        vars.insert_path(path, parse_scalar(raw));
    }

    log::debug!(target: LOG_TARGET, "loaded {} variable paths", vars.paths().len());
    Ok(vars)
}

/// Convert a JSON document whose top level is an object.
pub fn from_json(json: &Json) -> Result<Variables> {
    match json {
        Json::Object(map) => object_to_variables(map, ""),
        other => bail!("variables must be a JSON object, found {}", json_kind(other)),
    }
}

fn object_to_variables(map: &Map<String, Json>, prefix: &str) -> Result<Variables> {
    let mut vars = Variables::new();
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Json::Object(inner) => {
                vars.insert(key.as_str(), object_to_variables(inner, &path)?);
            }
            scalar => {
                vars.insert(key.as_str(), scalar_to_value(scalar, &path)?);
            }
        }
    }
    Ok(vars)
}

fn scalar_to_value(json: &Json, path: &str) -> Result<Value> {
    Ok(match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::int(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                let f = n
                    .as_f64()
                    .ok_or_else(|| anyhow!("number at `{}` is out of range", path))?;
                Value::float(f)
            }
        }
        Json::String(s) => Value::string(s.as_str()),
        Json::Array(_) => bail!("arrays are not supported (at `{}`)", path),
        Json::Object(_) => bail!("expected a scalar at `{}`", path),
    })
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

fn parse_assignment(assignment: &str) -> Result<(&str, &str)> {
    let (path, raw) = assignment
        .split_once('=')
        .ok_or_else(|| anyhow!("expected PATH=VALUE, got `{}`", assignment))?;
    let path = path.trim();

    let valid = !path.is_empty()
        && path.split('.').all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        });
    if !valid {
        bail!("`{}` is not a valid variable path", path);
    }

    Ok((path, raw))
}

/// `true`, `false` and `null` are keywords, numbers keep their kind, and
/// anything else is taken as a string.
fn parse_scalar(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => raw
            .parse::<i64>()
            .map(Value::int)
            .or_else(|_| raw.parse::<f64>().map(Value::float))
            .unwrap_or_else(|_| Value::string(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nel::Variable;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn value_at<'a>(vars: &'a Variables, path: &str) -> Option<&'a Value> {
        let segments: Vec<&str> = path.split('.').collect();
        vars.lookup(&segments).and_then(Variable::as_value)
    }

    #[test]
    fn test_nested_objects() {
        let vars = from_json(&json!({
            "nation": {
                "name": "Avalon",
                "score": 1250.5,
                "military": { "soldiers": 15000 },
                "leader": null,
                "at_war": false
            }
        }))
        .unwrap();

        assert_eq!(value_at(&vars, "nation.name"), Some(&Value::string("Avalon")));
        assert_eq!(value_at(&vars, "nation.score"), Some(&Value::float(1250.5)));
        assert!(value_at(&vars, "nation.military.soldiers").is_some_and(Value::is_integer));
        assert_eq!(value_at(&vars, "nation.leader"), Some(&Value::Null));
        assert_eq!(value_at(&vars, "nation.at_war"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_arrays_rejected_with_path() {
        let err = from_json(&json!({ "nation": { "cities": [1, 2] } })).unwrap_err();
        assert_eq!(err.to_string(), "arrays are not supported (at `nation.cities`)");
    }

    #[test]
    fn test_top_level_must_be_object() {
        let err = from_json(&json!([1])).unwrap_err();
        assert_eq!(err.to_string(), "variables must be a JSON object, found an array");
    }

    #[test]
    fn test_parse_scalar() {
        assert_eq!(parse_scalar("true"), Value::Bool(true));
        assert_eq!(parse_scalar("null"), Value::Null);
        assert!(parse_scalar("42").is_integer());
        assert!(parse_scalar("4.5").is_float());
        assert_eq!(parse_scalar("Avalon"), Value::string("Avalon"));
        assert_eq!(parse_scalar(""), Value::string(""));
    }

    #[test]
    fn test_assignments_override_file_values() {
        let assignments = ["a.b=1".to_string(), "a.c=x".to_string(), "a.b=2".to_string()];
        let vars = load(None, &assignments).unwrap();
        assert_eq!(value_at(&vars, "a.b"), Some(&Value::int(2)));
        assert_eq!(value_at(&vars, "a.c"), Some(&Value::string("x")));
    }

    #[test]
    fn test_bad_assignments() {
        assert!(load(None, &["novalue".to_string()]).is_err());
        assert!(load(None, &["=1".to_string()]).is_err());
        assert!(load(None, &["a..b=1".to_string()]).is_err());
        assert!(load(None, &["1a=1".to_string()]).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load(Some(Path::new("/nonexistent/vars.json")), &[]).unwrap_err();
        assert!(err.to_string().contains("could not read variables"));
    }
}
