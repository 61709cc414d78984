//! # yaml-folder CLI
//!
//! This is the binary entry point for the `yaml-folder` command-line tool.
//!
//! It parses arguments with `clap`, runs the selected command and lets
//! `anyhow` report errors (with their hints and causes) on stderr. The
//! resolver itself lives in the `yaml_folder` library crate.
//!
//! Invoked as `yaml-folder --list` or `yaml-folder --host NAME`, the binary
//! follows the Ansible dynamic inventory script protocol.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
