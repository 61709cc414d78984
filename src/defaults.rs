//! Default values and reserved names for yaml-folder.
//!
//! This module centralizes file names, environment variable names and
//! reserved group names used across the library and the CLI, so the two
//! never disagree.

use std::path::PathBuf;

/// Stem of the marker file that identifies an inventory root
pub const MARKER_STEM: &str = "yaml_folder";

/// File names accepted as the inventory marker
pub const MARKER_FILE_NAMES: [&str; 2] = ["yaml_folder.yml", "yaml_folder.yaml"];

/// Stem of files merged into the directory's variable scope
pub const VARS_STEM: &str = "vars";

/// Stem of files declaring hosts
pub const MAIN_STEM: &str = "main";

/// Host variable overriding the default group membership
pub const GROUPS_VAR: &str = "groups";

/// Host variable adding group memberships
pub const EXTRA_GROUPS_VAR: &str = "extra_groups";

/// Host variable holding the connection address
pub const ANSIBLE_HOST_VAR: &str = "ansible_host";

/// Group collecting every host by connection address
pub const ALL_HOST_NAMES_GROUP: &str = "allhostnames";

/// Name prefix of tree-level (shadow) groups
pub const TREE_GROUP_PREFIX: &str = "__yaml_folder__";

/// Environment variable holding the inventory path
pub const ENV_INVENTORY: &str = "YAML_FOLDER_INVENTORY";

/// Environment variable for `exclude_last_group_in_name`
pub const ENV_EXCLUDE_LAST_GROUP_IN_NAME: &str = "YAML_FOLDER_EXCLUDE_LAST_GROUP_IN_NAME";

/// Environment variable for `enable_all_host_names`
pub const ENV_ENABLE_ALL_HOST_NAMES: &str = "YAML_FOLDER_ENABLE_ALL_HOST_NAMES";

/// Environment variable for `enable_level_groups`
pub const ENV_ENABLE_LEVEL_GROUPS: &str = "YAML_FOLDER_ENABLE_LEVEL_GROUPS";

/// Environment variable for `tree_group_search`
pub const ENV_TREE_GROUP_SEARCH: &str = "YAML_FOLDER_TREE_GROUP_SEARCH";

/// Returns the default inventory location: the current directory.
///
/// This can be overridden by the `--inventory` CLI flag or the
/// `YAML_FOLDER_INVENTORY` environment variable.
pub fn default_inventory_path() -> PathBuf {
    PathBuf::from(".")
}
