//! # CLI Command Implementations
//!
//! Each subcommand of `yaml-folder` lives in its own file with an `Args`
//! struct derived using `clap` and an `execute` function that calls into the
//! `yaml_folder` library.
//!
//! The inventory flags are shared by every command that resolves an
//! inventory, so they live here in [`InventoryArgs`] and are flattened into
//! the top-level CLI as global arguments.

pub mod completions;
pub mod graph;
pub mod host;
pub mod list;
pub mod validate;

use anyhow::{Context, Result};
use clap::Args;
use log::debug;
use std::path::PathBuf;

use yaml_folder::config::{InventoryLocation, Options, TreeGroupSearch};
use yaml_folder::defaults::{default_inventory_path, ENV_INVENTORY};
use yaml_folder::error::Error;
use yaml_folder::inventory::Inventory;
use yaml_folder::resolver::resolve_inventory;
use yaml_folder::suggestions;

/// Where the inventory is and how to resolve it
#[derive(Args, Debug, Clone, Default)]
pub struct InventoryArgs {
    /// Inventory directory, or the yaml_folder.yml marker file inside it.
    ///
    /// Defaults to the current directory.
    #[arg(short, long, global = true, value_name = "PATH", env = ENV_INVENTORY)]
    pub inventory: Option<PathBuf>,

    /// Name hosts after their parent directory's prefix
    #[arg(long, global = true)]
    pub exclude_last_group_in_name: bool,

    /// Maintain the allhostnames group of connection addresses
    #[arg(long, global = true)]
    pub all_host_names: bool,

    /// Add one group per directory level
    #[arg(long, global = true)]
    pub level_groups: bool,

    /// Tree-level groups hosts may join: inclusive or ancestors
    #[arg(long, global = true, value_name = "MODE")]
    pub tree_group_search: Option<TreeGroupSearch>,
}

impl InventoryArgs {
    /// The inventory path given on the command line or the default.
    pub fn path(&self) -> PathBuf {
        self.inventory
            .clone()
            .unwrap_or_else(default_inventory_path)
    }

    /// Overlay command-line switches on options built from the inventory.
    pub fn apply(&self, mut options: Options) -> Options {
        options.exclude_last_group_in_name |= self.exclude_last_group_in_name;
        options.enable_all_host_names |= self.all_host_names;
        options.enable_level_groups |= self.level_groups;
        if let Some(search) = self.tree_group_search {
            options.tree_group_search = search;
        }
        options
    }

    /// Locate, configure and resolve the inventory.
    pub fn load(&self) -> Result<Inventory> {
        let path = self.path();
        let location = InventoryLocation::from_path(&path).map_err(|e| match e {
            Error::InvalidInventoryPath { message, .. } => {
                suggestions::inventory_not_found(&path, &message)
            }
            other => other.into(),
        })?;
        let options = self.apply(Options::for_location(&location)?);
        debug!("Resolving {} with {:?}", location.root.display(), options);

        resolve_inventory(&location.root, options)
            .with_context(|| format!("Failed to resolve inventory at {}", path.display()))
    }
}
