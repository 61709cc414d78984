//! # List Command Implementation
//!
//! Implements `list` and the top-level `--list` flag: resolve the inventory
//! and print it as JSON on stdout.
//!
//! ## Formats
//!
//! - **ansible** (default): the dynamic inventory shape, with every group as
//!   a top-level key and host variables under `_meta.hostvars`.
//! - **canonical**: `{groups, hosts}` with sorted host lists, the shape used
//!   by the test fixtures.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde_json::Value as JsonValue;

use super::InventoryArgs;
use yaml_folder::export;
use yaml_folder::inventory::Inventory;

/// JSON shape to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ListFormat {
    /// Ansible dynamic inventory
    #[default]
    Ansible,
    /// Flat groups and hosts
    Canonical,
}

/// Print the resolved inventory
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Output shape
    #[arg(long, value_enum, default_value_t = ListFormat::Ansible)]
    pub format: ListFormat,

    /// Indent the JSON
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the `list` command.
pub fn execute(args: ListArgs, inventory: &InventoryArgs) -> Result<()> {
    let resolved = inventory.load()?;
    println!("{}", render(&args, &resolved)?);
    Ok(())
}

/// Render an inventory in the requested format.
pub fn render(args: &ListArgs, inventory: &Inventory) -> Result<String> {
    let value = match args.format {
        ListFormat::Ansible => export::ansible_list(inventory)?,
        ListFormat::Canonical => export::canonical(inventory)?,
    };
    to_json_string(&value, args.pretty)
}

pub(crate) fn to_json_string(value: &JsonValue, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}
