//! Group registry.
//!
//! [`GroupRegistry`] wraps an [`InventorySink`] with the "ensure" operations
//! the resolver uses, and owns [`safe_group_name`], the sanitizer applied to
//! every synthetic group name (tree-level and level groups).

use log::trace;
use regex::Regex;
use serde_yaml::Value as YamlValue;
use std::sync::LazyLock;

use crate::error::Result;
use crate::inventory::{Entity, InventorySink};
use crate::scope::VariableScope;

static UNSAFE_GROUP_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("group name pattern is valid"));

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
///
/// # Examples
///
/// ```
/// use yaml_folder::registry::safe_group_name;
///
/// assert_eq!(safe_group_name("dc1.rack-2"), "dc1_rack_2");
/// ```
pub fn safe_group_name(name: &str) -> String {
    UNSAFE_GROUP_CHARS.replace_all(name, "_").into_owned()
}

/// Idempotent group/host operations over a borrowed inventory sink.
pub struct GroupRegistry<'a> {
    sink: &'a mut dyn InventorySink,
}

impl<'a> GroupRegistry<'a> {
    /// Wrap a sink
    pub fn new(sink: &'a mut dyn InventorySink) -> Self {
        Self { sink }
    }

    /// Create `group` unless it already exists.
    pub fn ensure_group(&mut self, group: &str) -> Result<()> {
        if !self.sink.has_group(group) {
            trace!("Adding group {}", group);
            self.sink.add_group(group)?;
        }
        Ok(())
    }

    /// Create `host` unless it already exists.
    pub fn ensure_host(&mut self, host: &str) -> Result<()> {
        if !self.sink.has_host(host) {
            trace!("Adding host {}", host);
            self.sink.add_host(host)?;
        }
        Ok(())
    }

    /// Make `host` a member of `group`, creating either if needed.
    pub fn assign(&mut self, host: &str, group: &str) -> Result<()> {
        self.ensure_host(host)?;
        self.ensure_group(group)?;
        self.sink.add_host_to_group(host, group)
    }

    /// Set a variable on a host or group; later calls overwrite.
    pub fn set_variable(&mut self, entity: Entity<'_>, key: &str, value: YamlValue) -> Result<()> {
        self.sink.set_variable(entity, key, value)
    }

    /// Write every variable of `vars` onto `entity`.
    pub fn set_variables(&mut self, entity: Entity<'_>, vars: VariableScope) -> Result<()> {
        for (key, value) in vars {
            self.sink.set_variable(entity, &key, value)?;
        }
        Ok(())
    }

    /// Check whether a group exists
    pub fn has_group(&self, group: &str) -> bool {
        self.sink.has_group(group)
    }

    /// Variables set directly on a group
    pub fn group_vars(&self, group: &str) -> Option<&VariableScope> {
        self.sink.group_vars(group)
    }
}
