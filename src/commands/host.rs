//! # Host Command Implementation
//!
//! Implements `host NAME` and the top-level `--host NAME` flag: print one
//! host's variables as a JSON object. Unknown hosts are an error with a
//! did-you-mean hint.

use anyhow::Result;
use clap::Args;

use super::list::to_json_string;
use super::InventoryArgs;
use yaml_folder::error::Error;
use yaml_folder::export;
use yaml_folder::inventory::Inventory;
use yaml_folder::suggestions;

/// Print the variables of one host
#[derive(Args, Debug)]
pub struct HostArgs {
    /// Full host name, including its directory prefix
    pub name: String,

    /// Indent the JSON
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the `host` command.
pub fn execute(args: HostArgs, inventory: &InventoryArgs) -> Result<()> {
    let resolved = inventory.load()?;
    println!("{}", render(&args, &resolved)?);
    Ok(())
}

/// Render one host's variables.
pub fn render(args: &HostArgs, inventory: &Inventory) -> Result<String> {
    match export::host_vars(inventory, &args.name) {
        Ok(value) => to_json_string(&value, args.pretty),
        Err(Error::HostNotFound { name }) => {
            let known: Vec<&str> = inventory.hosts().map(|(name, _)| name.as_str()).collect();
            Err(suggestions::host_not_found(&name, &known))
        }
        Err(e) => Err(e.into()),
    }
}
