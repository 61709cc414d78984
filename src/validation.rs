//! Shape checks for values read from inventory files.
//!
//! The resolver only needs a handful of checks: host documents must be
//! mappings or lists, `groups`/`extra_groups` must be lists, and variable
//! files must be mappings. Failures always report the familiar kind of the
//! offending value (`string`, `list`, ...) together with the file it came
//! from.

use serde_yaml::{Mapping, Sequence, Value as YamlValue};
use std::path::Path;

use crate::error::{Error, Result};

/// Return the familiar kind name of a YAML value.
///
/// Tags are looked through, so `!vault "..."` reports `string`.
pub fn kind_name(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "boolean",
        YamlValue::Number(n) if n.is_f64() => "float",
        YamlValue::Number(_) => "integer",
        YamlValue::String(_) => "string",
        YamlValue::Sequence(_) => "list",
        YamlValue::Mapping(_) => "mapping",
        YamlValue::Tagged(tagged) => kind_name(&tagged.value),
    }
}

/// Build a type-mismatch error for `value`.
pub fn type_mismatch(
    description: &str,
    expected: &'static str,
    value: &YamlValue,
    path: &Path,
) -> Error {
    Error::TypeMismatch {
        description: description.to_string(),
        expected,
        actual: kind_name(value),
        path: path.to_path_buf(),
    }
}

fn untag(value: YamlValue) -> YamlValue {
    match value {
        YamlValue::Tagged(tagged) => {
            let inner = *tagged;
            untag(inner.value)
        }
        other => other,
    }
}

/// Require a list.
pub fn expect_list(description: &str, value: YamlValue, path: &Path) -> Result<Sequence> {
    match untag(value) {
        YamlValue::Sequence(seq) => Ok(seq),
        other => Err(type_mismatch(description, "list", &other, path)),
    }
}

/// Require a mapping. `null` counts as an empty mapping.
pub fn expect_mapping(description: &str, value: YamlValue, path: &Path) -> Result<Mapping> {
    match untag(value) {
        YamlValue::Mapping(map) => Ok(map),
        YamlValue::Null => Ok(Mapping::new()),
        other => Err(type_mismatch(description, "mapping", &other, path)),
    }
}

/// Render a scalar as a plain string: strings as-is, numbers and booleans
/// via their YAML spelling. Returns `None` for null and collections.
pub fn scalar_to_string(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Tagged(tagged) => scalar_to_string(&tagged.value),
        YamlValue::Null | YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
    }
}

/// Require a scalar usable as a name (host, group or variable name).
pub fn expect_name(description: &str, value: &YamlValue, path: &Path) -> Result<String> {
    scalar_to_string(value).ok_or_else(|| type_mismatch(description, "string", value, path))
}
