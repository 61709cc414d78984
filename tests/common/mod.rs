//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_file("inventory/main.yml", "web1:\n");
//!     fixture.command().arg("--list").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::trees;
    pub use super::TestFixture;
}

/// Environment variables the binary reads; cleared for every command.
pub const ENV_VARS: [&str; 5] = [
    "YAML_FOLDER_INVENTORY",
    "YAML_FOLDER_EXCLUDE_LAST_GROUP_IN_NAME",
    "YAML_FOLDER_ENABLE_ALL_HOST_NAMES",
    "YAML_FOLDER_ENABLE_LEVEL_GROUPS",
    "YAML_FOLDER_TREE_GROUP_SEARCH",
];

/// Inventory trees shared across tests, as `(relative path, content)` pairs
/// under `inventory/`.
#[allow(dead_code)]
pub mod trees {
    /// Two datacenters with a shared `web` group redefined in one of them.
    pub const DATACENTERS: &[(&str, &str)] = &[
        ("inventory/yaml_folder.yml", "plugin: yaml_folder\n"),
        ("inventory/vars.yml", "env: prod\nntp: pool.ntp.org\n"),
        ("inventory/web.yml", "http_port: 80\n"),
        ("inventory/dc1/vars.yml", "region: eu\n"),
        ("inventory/dc1/web.yml", "http_port: 8080\n"),
        (
            "inventory/dc1/main.yml",
            "web1:\n  ansible_host: 10.0.1.1\n  groups: [web]\nweb2:\n  groups: [web]\n  extra_groups: [canary]\n",
        ),
        ("inventory/dc2/main.yml", "- web1:\n    groups: [web]\n- db1\n"),
    ];

    /// A single host at the root of the inventory.
    pub const SINGLE_HOST: &[(&str, &str)] = &[("inventory/main.yml", "bastion:\n  port: 22\n")];
}

/// A temporary directory holding an inventory tree.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Add every file of a tree.
    #[allow(dead_code)]
    pub fn with_tree(self, files: &[(&str, &str)]) -> Self {
        files
            .iter()
            .fold(self, |fixture, (path, content)| fixture.with_file(path, content))
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the `inventory/` directory inside the fixture.
    pub fn inventory_path(&self) -> PathBuf {
        self.temp_dir.path().join("inventory")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command running in the fixture directory with a clean
    /// `YAML_FOLDER_*` and `RUST_LOG` environment.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("yaml-folder");
        cmd.current_dir(self.path());
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Create a command pointed at the fixture's `inventory/` directory.
    #[allow(dead_code)]
    pub fn inventory_command(&self) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg("--inventory").arg(self.inventory_path());
        cmd
    }

    /// Run `list --format canonical` and parse the output.
    #[allow(dead_code)]
    pub fn canonical(&self, extra_args: &[&str]) -> serde_json::Value {
        let output = self
            .inventory_command()
            .args(["list", "--format", "canonical"])
            .args(extra_args)
            .output()
            .expect("Failed to execute command");
        assert!(
            output.status.success(),
            "list failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("list output should be JSON")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_with_tree() {
        let fixture = TestFixture::new().with_tree(trees::SINGLE_HOST);
        assert!(fixture.inventory_path().join("main.yml").exists());
    }

    #[test]
    fn test_trees_are_valid_yaml() {
        for (path, content) in trees::DATACENTERS.iter().chain(trees::SINGLE_HOST) {
            serde_yaml::from_str::<serde_yaml::Value>(content)
                .unwrap_or_else(|e| panic!("{} should be valid YAML: {}", path, e));
        }
    }
}
