//! # Tree-Level Groups
//!
//! A group's variables can be redefined at any depth of the inventory tree
//! by placing a `<group>.yml` file in a directory. Each definition lives in a
//! *tree-level group* scoped to that directory's prefix:
//!
//! ```text
//! __yaml_folder__<prefix><group>    (hyphens -> underscores, then sanitized)
//! ```
//!
//! A definition starts from the variables of the nearest strict ancestor that
//! also defined the group and overrides them with its own file. Hosts are then
//! attached to the nearest tree-level group of each group they join, which is
//! how they pick up the variables that apply to their subtree.
//!
//! Lookups that find nothing are the normal "no inheritance" case and return
//! `None`.

use log::debug;

use crate::config::TreeGroupSearch;
use crate::defaults::TREE_GROUP_PREFIX;
use crate::error::Result;
use crate::inventory::Entity;
use crate::prefix::PrefixChain;
use crate::registry::{safe_group_name, GroupRegistry};
use crate::scope::VariableScope;

/// Name of the tree-level group for `group` at the level with `prefix_entry`.
///
/// # Examples
///
/// ```
/// use yaml_folder::tree_groups::shadow_name;
///
/// assert_eq!(shadow_name("dc-1-", "web"), "__yaml_folder__dc_1_web");
/// ```
pub fn shadow_name(prefix_entry: &str, group: &str) -> String {
    let raw = format!("{}{}{}", TREE_GROUP_PREFIX, prefix_entry, group).replace('-', "_");
    safe_group_name(&raw)
}

/// Whether `name` is a tree-level group name.
pub fn is_shadow_name(name: &str) -> bool {
    name.starts_with(TREE_GROUP_PREFIX)
}

fn first_existing<'p>(
    registry: &GroupRegistry<'_>,
    mut prefixes: impl Iterator<Item = &'p str>,
    group: &str,
) -> Option<String> {
    prefixes
        .find_map(|prefix| Some(shadow_name(prefix, group)).filter(|name| registry.has_group(name)))
}

/// Find the tree-level group of `group` defined by the nearest strict
/// ancestor of the current directory.
pub fn find_nearest_ancestor_shadow(
    registry: &GroupRegistry<'_>,
    chain: &PrefixChain,
    group: &str,
) -> Option<String> {
    first_existing(registry, chain.ancestors(), group)
}

/// Find the tree-level group a host in the current directory should join for
/// `group`.
pub fn find_for_host(
    registry: &GroupRegistry<'_>,
    chain: &PrefixChain,
    group: &str,
    search: TreeGroupSearch,
) -> Option<String> {
    match search {
        TreeGroupSearch::Inclusive => {
            first_existing(registry, std::iter::once(chain.current()).chain(chain.ancestors()), group)
        }
        TreeGroupSearch::Ancestors => find_nearest_ancestor_shadow(registry, chain, group),
    }
}

/// Record a group-vars file found in the current directory.
///
/// Ensures the flat group and the current level's tree-level group exist,
/// then writes the nearest ancestor definition overridden by `local_vars`
/// onto the tree-level group. Returns the tree-level group name.
pub fn define_at_current_level(
    registry: &mut GroupRegistry<'_>,
    chain: &PrefixChain,
    group: &str,
    local_vars: &VariableScope,
) -> Result<String> {
    let shadow = shadow_name(chain.current(), group);
    debug!("Group {} has tree-level group {}", group, shadow);

    let mut effective = find_nearest_ancestor_shadow(registry, chain, group)
        .and_then(|ancestor| {
            debug!("{} inherits from {}", shadow, ancestor);
            registry.group_vars(&ancestor).cloned()
        })
        .unwrap_or_default();
    // Another file at this level (web.yml next to web.yaml) may have defined it already
    if let Some(existing) = registry.group_vars(&shadow) {
        effective.update(existing);
    }
    effective.update(local_vars);

    registry.ensure_group(group)?;
    registry.ensure_group(&shadow)?;
    registry.set_variables(Entity::Group(&shadow), effective)?;
    Ok(shadow)
}
