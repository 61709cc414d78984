//! # yaml-folder
//!
//! This library resolves a directory tree of YAML fragments into a flat
//! host/group inventory. It is used by the `yaml-folder` command-line tool,
//! which speaks the Ansible dynamic-inventory protocol, but the resolver
//! writes into any [`inventory::InventorySink`] and can be embedded
//! elsewhere.
//!
//! ## Quick Example
//!
//! ```no_run
//! use std::path::Path;
//! use yaml_folder::config::Options;
//! use yaml_folder::resolver::resolve_inventory;
//!
//! let inventory = resolve_inventory(Path::new("inventory"), Options::default()).unwrap();
//! for (name, host) in inventory.hosts() {
//!     println!("{} is in {:?}", name, host.groups);
//! }
//! ```
//!
//! ## Core Concepts
//!
//! - **Variable scope (`scope`)**: variables accumulated from `vars.*` files
//!   on the way down the tree. Each directory works on its own branch, so
//!   siblings never see each other's variables.
//! - **Prefix chain (`prefix`)**: one name fragment per directory level,
//!   used for host names and tree-level group names.
//! - **Tree-level groups (`tree_groups`)**: per-subtree copies of a group
//!   that let `<group>.yml` files redefine group variables with inheritance
//!   from the nearest ancestor.
//! - **Inventory sink (`inventory`)**: the idempotent add/assign/set API the
//!   resolver writes into, with [`inventory::Inventory`] as the in-memory
//!   implementation.
//! - **Configuration (`config`)**: feature switches layered from the marker
//!   file and `YAML_FOLDER_*` environment variables.
//!
//! ## Execution Flow
//!
//! [`resolver::load_inventory`] locates the inventory root, builds the
//! options and walks the tree depth-first. In every directory it:
//!
//! 1.  Merges `vars.*` into a branch of the inherited scope.
//! 2.  Defines tree-level groups from group-vars files.
//! 3.  Ensures level groups when enabled.
//! 4.  Resolves the hosts of `main.*`.
//! 5.  Recurses into subdirectories.
//!
//! The result is exported as JSON by the `export` module.

pub mod config;
pub mod defaults;
pub mod document;
pub mod error;
pub mod export;
pub mod hosts;
pub mod inventory;
pub mod output;
pub mod prefix;
pub mod registry;
pub mod resolver;
pub mod scope;
pub mod suggestions;
pub mod tree_groups;
pub mod validation;

#[cfg(test)]
mod naming_proptest;
