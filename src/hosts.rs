//! # Host Resolution
//!
//! A `main.*` file declares the hosts of its directory. Two authoring styles
//! are accepted and normalized by [`normalize_hosts`] into a list of
//! [`HostEntry`] values right after parsing:
//!
//! ```yaml
//! # mapping style
//! web1:
//!   ansible_host: 10.0.0.1
//! web2:          # no variables
//!
//! # list style
//! - web1:
//!     ansible_host: 10.0.0.1
//! - web2
//! ```
//!
//! [`resolve_hosts`] then registers each entry: it builds the host name from
//! the prefix chain, merges the directory scope with the host's own
//! variables, turns `groups`/`extra_groups` into memberships and attaches the
//! host to the matching tree-level groups.
//!
//! With `enable_all_host_names`, each host's connection address
//! (`ansible_host`, else the host name) joins the `allhostnames` group.
//! Membership is added like Ansible's `add_host`: an address that is not
//! itself a host name becomes a separate host with no variables, so it is
//! listed in `_meta.hostvars` as `{}` and counted by `validate`.

use log::{debug, warn};
use serde_yaml::Value as YamlValue;
use std::path::Path;

use crate::config::Options;
use crate::defaults::{ALL_HOST_NAMES_GROUP, ANSIBLE_HOST_VAR, EXTRA_GROUPS_VAR, GROUPS_VAR};
use crate::document::Document;
use crate::error::Result;
use crate::inventory::Entity;
use crate::prefix::PrefixChain;
use crate::registry::GroupRegistry;
use crate::scope::VariableScope;
use crate::tree_groups::find_for_host;
use crate::validation::{expect_list, expect_mapping, expect_name, scalar_to_string, type_mismatch};

/// One host declaration from a `main.*` file
#[derive(Debug, Clone, PartialEq)]
pub struct HostEntry {
    /// Name as written in the file, before prefixing
    pub name: String,
    /// Inline variables
    pub vars: VariableScope,
}

impl HostEntry {
    fn parse(name: &YamlValue, vars: YamlValue, path: &Path) -> Result<Self> {
        let name = expect_name("host name", name, path)?;
        let mapping = expect_mapping(&format!("variables of host '{}'", name), vars, path)?;
        Ok(Self {
            vars: VariableScope::from_mapping(mapping, path)?,
            name,
        })
    }
}

/// Normalize a parsed `main.*` document into host entries.
///
/// An empty document yields no hosts. Any shape other than a mapping or a
/// list is an error naming the actual kind.
pub fn normalize_hosts(document: Document, path: &Path) -> Result<Vec<HostEntry>> {
    match document {
        Document::Mapping(mapping) => mapping
            .into_iter()
            .map(|(name, vars)| HostEntry::parse(&name, vars, path))
            .collect(),
        Document::Sequence(items) => items
            .into_iter()
            .map(|item| normalize_list_item(item, path))
            .collect(),
        Document::Scalar(YamlValue::Null) => {
            warn!("{} declares no hosts", path.display());
            Ok(Vec::new())
        }
        Document::Scalar(value) => Err(type_mismatch(
            "host document",
            "mapping or list",
            &value,
            path,
        )),
    }
}

fn normalize_list_item(item: YamlValue, path: &Path) -> Result<HostEntry> {
    match Document::from_value(item) {
        Document::Mapping(mapping) if mapping.len() == 1 => {
            let (name, vars) = mapping
                .into_iter()
                .next()
                .unwrap_or((YamlValue::Null, YamlValue::Null));
            HostEntry::parse(&name, vars, path)
        }
        Document::Scalar(name) if !name.is_null() => HostEntry::parse(&name, YamlValue::Null, path),
        other => Err(type_mismatch(
            "host list entry",
            "single-key mapping or host name",
            &other.into_value(),
            path,
        )),
    }
}

/// Everything host resolution needs to know about the current directory
#[derive(Debug)]
pub struct HostContext<'c> {
    /// Prefix chain of the directory holding the `main.*` file
    pub chain: &'c PrefixChain,
    /// The directory's fully merged variable scope
    pub scope: &'c VariableScope,
    /// Level groups every host of this directory joins
    pub additional_groups: &'c [String],
    /// Raw name of the directory holding the `main.*` file
    pub folder_name: &'c str,
    /// The `main.*` file, for error messages
    pub source: &'c Path,
    /// Feature switches
    pub options: &'c Options,
}

/// Read a membership list variable. `null` and missing mean "not set".
fn take_group_list(
    vars: &mut VariableScope,
    key: &str,
    path: &Path,
) -> Result<Option<Vec<String>>> {
    let value = match vars.take(key) {
        None | Some(YamlValue::Null) => return Ok(None),
        Some(value) => value,
    };
    expect_list(key, value, path)?
        .iter()
        .map(|group| expect_name(&format!("entry of {}", key), group, path))
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Register every entry of a `main.*` file. Returns the created host names.
pub fn resolve_hosts(
    registry: &mut GroupRegistry<'_>,
    entries: Vec<HostEntry>,
    ctx: &HostContext<'_>,
) -> Result<Vec<String>> {
    let prefix = ctx.chain.naming_prefix(ctx.options.exclude_last_group_in_name);
    let mut resolved = Vec::with_capacity(entries.len());

    for entry in entries {
        let host_name = format!("{}{}", prefix, entry.name);
        debug!("Resolving host {} from {}", host_name, ctx.source.display());
        registry.ensure_host(&host_name)?;

        let mut effective = ctx.scope.branch();
        effective.update(&entry.vars);

        let mut groups = take_group_list(&mut effective, GROUPS_VAR, ctx.source)?
            .filter(|groups| !groups.is_empty())
            .unwrap_or_else(|| vec![ctx.folder_name.to_string()]);
        groups.extend(take_group_list(&mut effective, EXTRA_GROUPS_VAR, ctx.source)?.unwrap_or_default());
        groups.extend(ctx.additional_groups.iter().cloned());

        let address = ctx
            .options
            .enable_all_host_names
            .then(|| {
                effective
                    .get(ANSIBLE_HOST_VAR)
                    .and_then(scalar_to_string)
                    .unwrap_or_else(|| host_name.clone())
            });

        registry.set_variables(Entity::Host(&host_name), effective)?;

        for group in &groups {
            registry.assign(&host_name, group)?;
            if let Some(shadow) = find_for_host(registry, ctx.chain, group, ctx.options.tree_group_search) {
                registry.assign(&host_name, &shadow)?;
            }
        }

        if let Some(address) = address {
            registry.assign(&address, ALL_HOST_NAMES_GROUP)?;
        }

        resolved.push(host_name);
    }

    Ok(resolved)
}
