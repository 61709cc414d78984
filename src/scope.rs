//! Variable scopes.
//!
//! A [`VariableScope`] maps variable names to YAML values. Scopes are layered
//! by copying: each directory takes a [`branch`](VariableScope::branch) of
//! the scope it inherited before its own `vars.*` files are merged in, so
//! additions in one subtree never leak into a sibling subtree.

use serde_yaml::{Mapping, Value as YamlValue};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;
use crate::validation::expect_name;

/// Name-to-value mapping with last-write-wins updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableScope {
    vars: BTreeMap<String, YamlValue>,
}

impl VariableScope {
    /// Create an empty scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scope from a parsed YAML mapping.
    ///
    /// Keys must be scalars; numbers and booleans are stringified. Later keys
    /// in the mapping override earlier ones.
    pub fn from_mapping(mapping: Mapping, path: &Path) -> Result<Self> {
        let mut scope = Self::new();
        for (key, value) in mapping {
            let name = expect_name("variable name", &key, path)?;
            scope.vars.insert(name, value);
        }
        Ok(scope)
    }

    /// Take an independent copy for a child directory or a single host.
    pub fn branch(&self) -> Self {
        self.clone()
    }

    /// Overlay `other` on top of this scope; its values win.
    pub fn update(&mut self, other: &VariableScope) {
        for (name, value) in &other.vars {
            self.vars.insert(name.clone(), value.clone());
        }
    }

    /// Set a single variable, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: YamlValue) {
        self.vars.insert(name.into(), value);
    }

    /// Remove a variable and return its value.
    pub fn take(&mut self, name: &str) -> Option<YamlValue> {
        self.vars.remove(name)
    }

    /// Look up a variable
    pub fn get(&self, name: &str) -> Option<&YamlValue> {
        self.vars.get(name)
    }

    /// Check whether a variable is set
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Number of variables in scope
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Check whether the scope is empty
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &YamlValue)> {
        self.vars.iter()
    }
}

impl IntoIterator for VariableScope {
    type Item = (String, YamlValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, YamlValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.into_iter()
    }
}

impl FromIterator<(String, YamlValue)> for VariableScope {
    fn from_iter<I: IntoIterator<Item = (String, YamlValue)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}
