//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use crate::commands::InventoryArgs;
use yaml_folder::output::ColorChoice;

/// yaml-folder - Resolve a directory tree of YAML files into an inventory
#[derive(Parser, Debug)]
#[command(name = "yaml-folder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    inventory: InventoryArgs,

    /// Print the whole inventory as dynamic inventory JSON
    #[arg(long, conflicts_with = "host")]
    list: bool,

    /// Print the variables of one host as JSON
    #[arg(long, value_name = "NAME")]
    host: Option<String>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Set log level (off, error, warn, info, debug, trace); RUST_LOG wins when set
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "warn",
        value_parser = ["off", "error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve the inventory and print it as JSON
    List(commands::list::ListArgs),

    /// Print the variables of one host as JSON
    Host(commands::host::HostArgs),

    /// Show groups and their hosts as a tree
    Graph(commands::graph::GraphArgs),

    /// Resolve the inventory and report problems without printing it
    Validate(commands::validate::ValidateArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Some(Commands::List(args)) => commands::list::execute(args, &self.inventory),
            Some(Commands::Host(args)) => commands::host::execute(args, &self.inventory),
            Some(Commands::Graph(args)) => {
                commands::graph::execute(args, &self.inventory, self.color)
            }
            Some(Commands::Validate(args)) => {
                commands::validate::execute(args, &self.inventory, self.color)
            }
            Some(Commands::Completions(args)) => commands::completions::execute(args),
            None => match (self.list, self.host) {
                (true, _) => commands::list::execute(
                    commands::list::ListArgs::default(),
                    &self.inventory,
                ),
                (false, Some(name)) => commands::host::execute(
                    commands::host::HostArgs { name, pretty: false },
                    &self.inventory,
                ),
                (false, None) => Err(yaml_folder::suggestions::no_command()),
            },
        }
    }
}

/// Log to stderr so stdout stays valid JSON.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when running under a test harness
    let _ = env_logger::Builder::from_env(env)
        .target(env_logger::Target::Stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_protocol_flags_parse_without_subcommand() {
        let cli = Cli::try_parse_from(["yaml-folder", "--list", "-i", "inv"]).unwrap();
        assert!(cli.list);
        assert!(cli.command.is_none());
        assert_eq!(cli.inventory.inventory.as_deref(), Some(std::path::Path::new("inv")));

        let cli = Cli::try_parse_from(["yaml-folder", "--host", "web1"]).unwrap();
        assert_eq!(cli.host.as_deref(), Some("web1"));
    }

    #[test]
    fn test_list_and_host_conflict() {
        assert!(Cli::try_parse_from(["yaml-folder", "--list", "--host", "web1"]).is_err());
    }

    #[test]
    fn test_inventory_flags_are_global() {
        let cli = Cli::try_parse_from([
            "yaml-folder",
            "list",
            "--inventory",
            "inv",
            "--level-groups",
            "--tree-group-search",
            "ancestors",
        ])
        .unwrap();
        assert!(cli.inventory.level_groups);
        assert_eq!(
            cli.inventory.tree_group_search,
            Some(yaml_folder::config::TreeGroupSearch::Ancestors)
        );
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(Cli::try_parse_from(["yaml-folder", "--log-level", "loud", "--list"]).is_err());
    }
}
