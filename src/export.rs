//! JSON export of a resolved inventory
//!
//! Two shapes are produced from an [`Inventory`]:
//!
//! - **Ansible**: the dynamic inventory `--list` shape. Every group is a
//!   top-level key with `hosts` and (when set) `vars`, `all.children` lists
//!   the groups, and host variables live under `_meta.hostvars` so callers
//!   never need a `--host` round trip per host.
//! - **Canonical**: `{ groups: { name: { hosts, vars } }, hosts: { name:
//!   { vars } } }` with sorted host lists. This is the shape fixture
//!   comparisons use.
//!
//! Variable values are converted from YAML explicitly. Tags are dropped and
//! mapping keys must be scalars; anything JSON cannot carry is reported as
//! [`Error::Serialization`].

use serde_json::{Map, Value as JsonValue};
use serde_yaml::Value as YamlValue;

use crate::error::{Error, Result};
use crate::inventory::Inventory;
use crate::scope::VariableScope;
use crate::validation::scalar_to_string;

/// Group holding hosts that belong to no other group
pub const UNGROUPED: &str = "ungrouped";

/// Implicit group every host belongs to
pub const ALL: &str = "all";

/// Convert a YAML value into JSON.
pub fn yaml_to_json(value: &YamlValue) -> Result<JsonValue> {
    Ok(match value {
        YamlValue::Null => JsonValue::Null,
        YamlValue::Bool(b) => JsonValue::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                JsonValue::from(i)
            } else if let Some(u) = n.as_u64() {
                JsonValue::from(u)
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                serde_json::Number::from_f64(f)
                    .map(JsonValue::Number)
                    .ok_or_else(|| Error::Serialization {
                        message: format!("{} has no JSON representation", n),
                    })?
            }
        }
        YamlValue::String(s) => JsonValue::String(s.clone()),
        YamlValue::Sequence(items) => {
            JsonValue::Array(items.iter().map(yaml_to_json).collect::<Result<_>>()?)
        }
        YamlValue::Mapping(mapping) => {
            let mut object = Map::new();
            for (key, value) in mapping {
                let key = scalar_to_string(key).ok_or_else(|| Error::Serialization {
                    message: "mapping keys must be scalars to be written as JSON".to_string(),
                })?;
                object.insert(key, yaml_to_json(value)?);
            }
            JsonValue::Object(object)
        }
        YamlValue::Tagged(tagged) => yaml_to_json(&tagged.value)?,
    })
}

fn vars_object(vars: &VariableScope) -> Result<Map<String, JsonValue>> {
    vars.iter()
        .map(|(key, value)| -> Result<(String, JsonValue)> {
            Ok((key.clone(), yaml_to_json(value)?))
        })
        .collect()
}

fn host_list<'a>(hosts: impl Iterator<Item = &'a String>) -> JsonValue {
    JsonValue::Array(hosts.cloned().map(JsonValue::String).collect())
}

/// The canonical `{groups, hosts}` shape.
pub fn canonical(inventory: &Inventory) -> Result<JsonValue> {
    let mut groups = Map::new();
    for (name, group) in inventory.groups() {
        let mut entry = Map::new();
        entry.insert("hosts".to_string(), host_list(group.hosts.iter()));
        entry.insert("vars".to_string(), JsonValue::Object(vars_object(&group.vars)?));
        groups.insert(name.clone(), JsonValue::Object(entry));
    }

    let mut hosts = Map::new();
    for (name, host) in inventory.hosts() {
        let mut entry = Map::new();
        entry.insert("vars".to_string(), JsonValue::Object(vars_object(&host.vars)?));
        hosts.insert(name.clone(), JsonValue::Object(entry));
    }

    let mut root = Map::new();
    root.insert("groups".to_string(), JsonValue::Object(groups));
    root.insert("hosts".to_string(), JsonValue::Object(hosts));
    Ok(JsonValue::Object(root))
}

/// The Ansible dynamic inventory `--list` shape.
pub fn ansible_list(inventory: &Inventory) -> Result<JsonValue> {
    let mut root = Map::new();
    let mut children: Vec<String> = Vec::new();

    for (name, group) in inventory.groups() {
        let mut entry = Map::new();
        entry.insert("hosts".to_string(), host_list(group.hosts.iter()));
        if !group.vars.is_empty() {
            entry.insert("vars".to_string(), JsonValue::Object(vars_object(&group.vars)?));
        }
        root.insert(name.clone(), JsonValue::Object(entry));
        if name != ALL {
            children.push(name.clone());
        }
    }

    let ungrouped: Vec<&String> = inventory
        .hosts()
        .filter(|(_, host)| host.groups.is_empty())
        .map(|(name, _)| name)
        .collect();
    if !ungrouped.is_empty() && !root.contains_key(UNGROUPED) {
        let mut entry = Map::new();
        entry.insert("hosts".to_string(), host_list(ungrouped.into_iter()));
        root.insert(UNGROUPED.to_string(), JsonValue::Object(entry));
        children.push(UNGROUPED.to_string());
        children.sort();
    }

    // A tree may define an "all" group of its own; keep its hosts and vars.
    let all = root
        .entry(ALL)
        .or_insert_with(|| JsonValue::Object(Map::new()));
    if let JsonValue::Object(all) = all {
        all.insert(
            "children".to_string(),
            JsonValue::Array(children.into_iter().map(JsonValue::String).collect()),
        );
    }

    let mut hostvars = Map::new();
    for (name, host) in inventory.hosts() {
        hostvars.insert(name.clone(), JsonValue::Object(vars_object(&host.vars)?));
    }
    let mut meta = Map::new();
    meta.insert("hostvars".to_string(), JsonValue::Object(hostvars));
    root.insert("_meta".to_string(), JsonValue::Object(meta));

    Ok(JsonValue::Object(root))
}

/// Variables of one host, as answered to `--host NAME`.
pub fn host_vars(inventory: &Inventory, name: &str) -> Result<JsonValue> {
    let host = inventory.host(name).ok_or_else(|| Error::HostNotFound {
        name: name.to_string(),
    })?;
    Ok(JsonValue::Object(vars_object(&host.vars)?))
}
