//! # Validate Command Implementation
//!
//! Implements `validate`: resolve the inventory exactly as `list` would, but
//! print a human-readable summary instead of JSON. Any resolution error
//! (shape mismatch, bad option value, unreadable file) fails the command.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;

use super::InventoryArgs;
use yaml_folder::inventory::Inventory;
use yaml_folder::output::{ColorChoice, OutputConfig, Status};
use yaml_folder::tree_groups::is_shadow_name;

/// Resolve the inventory and report problems
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Fail when the inventory resolves to no hosts
    #[arg(long)]
    pub strict: bool,
}

/// Counts reported by `validate`
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    hosts: usize,
    groups: usize,
    tree_groups: usize,
}

impl Summary {
    fn of(inventory: &Inventory) -> Self {
        let tree_groups = inventory
            .groups()
            .filter(|(name, _)| is_shadow_name(name))
            .count();
        Self {
            hosts: inventory.host_count(),
            groups: inventory.group_count() - tree_groups,
            tree_groups,
        }
    }
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs, inventory: &InventoryArgs, color: ColorChoice) -> Result<()> {
    let out = OutputConfig::new(color);
    println!(
        "{} Validating inventory: {}",
        out.marker(Status::Scan),
        inventory.path().display()
    );

    let resolved = match inventory.load() {
        Ok(resolved) => resolved,
        Err(e) => {
            println!("{} Inventory resolution failed", out.marker(Status::Error));
            return Err(e);
        }
    };
    println!("{} Inventory resolved successfully", out.marker(Status::Ok));

    let summary = Summary::of(&resolved);
    println!("\n{} Inventory Summary:", out.marker(Status::Summary));
    println!("   Hosts: {}", summary.hosts);
    println!("   Groups: {}", summary.groups);
    println!("   Tree-level groups: {}", summary.tree_groups);

    if summary.hosts == 0 {
        println!("\n{} No hosts were declared", out.marker(Status::Warn));
        if args.strict {
            anyhow::bail!("Validation failed: no hosts found (--strict)");
        }
    }

    println!("\n{} Inventory is valid", out.marker(Status::Ok));
    Ok(())
}
