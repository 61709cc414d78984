//! # Inventory Store
//!
//! The resolver never owns inventory state. It talks to an [`InventorySink`],
//! a small mutation interface with add-group, add-host, add-host-to-group and
//! set-variable operations plus the two lookups the tree-level group search
//! needs. [`Inventory`] is the in-memory implementation used by the CLI and
//! the tests; embedding applications can supply their own sink.
//!
//! All additions are idempotent: adding a group or host that already exists
//! leaves its variables and memberships untouched.

use serde_yaml::Value as YamlValue;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::scope::VariableScope;

/// The target of a `set_variable` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity<'a> {
    /// A host by name
    Host(&'a str),
    /// A group by name
    Group(&'a str),
}

/// Trait for the inventory being populated - allows custom stores and mocks
pub trait InventorySink {
    /// Create a group if it does not exist.
    fn add_group(&mut self, name: &str) -> Result<()>;

    /// Create a host if it does not exist.
    fn add_host(&mut self, name: &str) -> Result<()>;

    /// Make `host` a member of `group`. Both must already exist.
    fn add_host_to_group(&mut self, host: &str, group: &str) -> Result<()>;

    /// Set a variable on a host or group, overwriting any previous value.
    fn set_variable(&mut self, entity: Entity<'_>, key: &str, value: YamlValue) -> Result<()>;

    /// Variables set directly on a group, or `None` if the group is unknown.
    fn group_vars(&self, name: &str) -> Option<&VariableScope>;

    /// Names of all known groups.
    fn group_names(&self) -> Vec<&str>;

    /// Check whether a group exists.
    fn has_group(&self, name: &str) -> bool {
        self.group_vars(name).is_some()
    }

    /// Check whether a host exists.
    fn has_host(&self, name: &str) -> bool;
}

/// A group: member hosts plus directly-set variables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    /// Names of member hosts
    pub hosts: BTreeSet<String>,
    /// Variables set on the group
    pub vars: VariableScope,
}

/// A host: its variables and the groups it belongs to
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Host {
    /// Variables set on the host
    pub vars: VariableScope,
    /// Names of groups the host is a member of
    pub groups: BTreeSet<String>,
}

/// In-memory inventory
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    groups: BTreeMap<String, Group>,
    hosts: BTreeMap<String, Host>,
}

impl Inventory {
    /// Create a new empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a group by name
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// Get a host by name
    pub fn host(&self, name: &str) -> Option<&Host> {
        self.hosts.get(name)
    }

    /// Iterate over all groups in name order
    pub fn groups(&self) -> impl Iterator<Item = (&String, &Group)> {
        self.groups.iter()
    }

    /// Iterate over all hosts in name order
    pub fn hosts(&self) -> impl Iterator<Item = (&String, &Host)> {
        self.hosts.iter()
    }

    /// Number of groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of hosts
    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    /// Check whether nothing has been added
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.hosts.is_empty()
    }
}

impl InventorySink for Inventory {
    fn add_group(&mut self, name: &str) -> Result<()> {
        self.groups.entry(name.to_string()).or_default();
        Ok(())
    }

    fn add_host(&mut self, name: &str) -> Result<()> {
        self.hosts.entry(name.to_string()).or_default();
        Ok(())
    }

    fn add_host_to_group(&mut self, host: &str, group: &str) -> Result<()> {
        let host_entry = self.hosts.get_mut(host).ok_or_else(|| Error::UnknownEntity {
            kind: "host",
            name: host.to_string(),
        })?;
        let group_entry = self.groups.get_mut(group).ok_or_else(|| Error::UnknownEntity {
            kind: "group",
            name: group.to_string(),
        })?;
        host_entry.groups.insert(group.to_string());
        group_entry.hosts.insert(host.to_string());
        Ok(())
    }

    fn set_variable(&mut self, entity: Entity<'_>, key: &str, value: YamlValue) -> Result<()> {
        let vars = match entity {
            Entity::Host(name) => self.hosts.get_mut(name).map(|h| &mut h.vars).ok_or_else(|| {
                Error::UnknownEntity {
                    kind: "host",
                    name: name.to_string(),
                }
            })?,
            Entity::Group(name) => self.groups.get_mut(name).map(|g| &mut g.vars).ok_or_else(|| {
                Error::UnknownEntity {
                    kind: "group",
                    name: name.to_string(),
                }
            })?,
        };
        vars.insert(key, value);
        Ok(())
    }

    fn group_vars(&self, name: &str) -> Option<&VariableScope> {
        self.groups.get(name).map(|g| &g.vars)
    }

    fn group_names(&self) -> Vec<&str> {
        self.groups.keys().map(String::as_str).collect()
    }

    fn has_host(&self, name: &str) -> bool {
        self.hosts.contains_key(name)
    }
}
