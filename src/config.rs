//! # Resolver Configuration
//!
//! This module defines [`Options`], the feature switches that change how an
//! inventory tree is resolved, and [`InventoryLocation`], which turns a
//! user-supplied path into an inventory root plus an optional marker file.
//!
//! ## Layering
//!
//! Options are assembled in layers, each overriding the previous one:
//!
//! 1.  **Defaults**: every feature off, inclusive tree-group search.
//! 2.  **Marker file**: keys in `yaml_folder.yml` at the inventory root.
//!     Unknown keys (such as `plugin`) are ignored.
//! 3.  **Environment**: `YAML_FOLDER_*` variables.
//! 4.  **CLI flags**: applied by the binary on top of the result.
//!
//! Boolean options only accept boolean values. In the marker file that means
//! a YAML `true`/`false`; in the environment the usual spellings
//! (`true/false`, `yes/no`, `on/off`, `1/0`) are accepted. Anything else is a
//! configuration error raised before traversal starts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::defaults::{
    ENV_ENABLE_ALL_HOST_NAMES, ENV_ENABLE_LEVEL_GROUPS, ENV_EXCLUDE_LAST_GROUP_IN_NAME,
    ENV_TREE_GROUP_SEARCH, MARKER_FILE_NAMES,
};
use crate::document::load_document;
use crate::error::{Error, Result};

/// Which tree-level groups a host may join during host resolution.
///
/// Group-vars inheritance always looks at strict ancestors only. For host
/// membership the current directory's own tree-level group can be included
/// (so a group-vars file and a `main.*` file in the same directory compose)
/// or skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeGroupSearch {
    /// Search the current level first, then ancestors
    #[default]
    Inclusive,
    /// Search strict ancestors only
    Ancestors,
}

impl TreeGroupSearch {
    fn parse(value: &str, origin: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "inclusive" => Ok(TreeGroupSearch::Inclusive),
            "ancestors" => Ok(TreeGroupSearch::Ancestors),
            _ => Err(Error::ConfigOption {
                key: "tree_group_search".to_string(),
                value: value.to_string(),
                expected: "'inclusive' or 'ancestors'",
                origin: origin.to_string(),
            }),
        }
    }
}

impl FromStr for TreeGroupSearch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TreeGroupSearch::parse(s, "argument")
    }
}

impl fmt::Display for TreeGroupSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeGroupSearch::Inclusive => write!(f, "inclusive"),
            TreeGroupSearch::Ancestors => write!(f, "ancestors"),
        }
    }
}

/// Feature switches for a resolution run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Build host names from the parent directory's prefix
    pub exclude_last_group_in_name: bool,
    /// Maintain the `allhostnames` group
    pub enable_all_host_names: bool,
    /// Maintain one group per directory level
    pub enable_level_groups: bool,
    /// Tree-level group lookup used for host membership
    pub tree_group_search: TreeGroupSearch,
}

/// Option keys recognized in the marker file
#[derive(Debug, Default, Deserialize)]
struct MarkerConfig {
    #[serde(default)]
    exclude_last_group_in_name: Option<bool>,
    #[serde(default)]
    enable_all_host_names: Option<bool>,
    #[serde(default)]
    enable_level_groups: Option<bool>,
    #[serde(default)]
    tree_group_search: Option<TreeGroupSearch>,
}

impl Options {
    /// Build options for an inventory: defaults, then marker file, then
    /// environment.
    pub fn for_location(location: &InventoryLocation) -> Result<Self> {
        let options = match &location.marker {
            Some(marker) => Options::default().apply_marker(marker)?,
            None => Options::default(),
        };
        options.apply_env()
    }

    /// Overlay options read from a marker file.
    pub fn apply_marker(mut self, path: &Path) -> Result<Self> {
        let document = load_document(path)?;
        if document.is_null() {
            return Ok(self);
        }

        let config: MarkerConfig =
            serde_yaml::from_value(document.into_value()).map_err(|e| Error::ConfigParse {
                message: format!("{}: {}", path.display(), e),
                hint: Some(
                    "Boolean options take true or false; tree_group_search takes inclusive or ancestors"
                        .to_string(),
                ),
            })?;

        if let Some(value) = config.exclude_last_group_in_name {
            self.exclude_last_group_in_name = value;
        }
        if let Some(value) = config.enable_all_host_names {
            self.enable_all_host_names = value;
        }
        if let Some(value) = config.enable_level_groups {
            self.enable_level_groups = value;
        }
        if let Some(value) = config.tree_group_search {
            self.tree_group_search = value;
        }
        Ok(self)
    }

    /// Overlay options from the process environment.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Overlay options from an environment lookup function.
    ///
    /// Variables that are unset or empty leave the option unchanged.
    pub fn apply_env_with<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(value) = get(ENV_EXCLUDE_LAST_GROUP_IN_NAME) {
            self.exclude_last_group_in_name =
                parse_bool("exclude_last_group_in_name", &value, ENV_EXCLUDE_LAST_GROUP_IN_NAME)?;
        }
        if let Some(value) = get(ENV_ENABLE_ALL_HOST_NAMES) {
            self.enable_all_host_names =
                parse_bool("enable_all_host_names", &value, ENV_ENABLE_ALL_HOST_NAMES)?;
        }
        if let Some(value) = get(ENV_ENABLE_LEVEL_GROUPS) {
            self.enable_level_groups =
                parse_bool("enable_level_groups", &value, ENV_ENABLE_LEVEL_GROUPS)?;
        }
        if let Some(value) = get(ENV_TREE_GROUP_SEARCH) {
            self.tree_group_search = TreeGroupSearch::parse(&value, ENV_TREE_GROUP_SEARCH)?;
        }
        Ok(self)
    }
}

/// Parse a boolean option value.
pub fn parse_bool(key: &str, value: &str, origin: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(Error::ConfigOption {
            key: key.to_string(),
            value: value.to_string(),
            expected: "a boolean",
            origin: origin.to_string(),
        }),
    }
}

/// Whether `file_name` is one of the marker file names.
pub fn is_marker_file_name(file_name: &str) -> bool {
    MARKER_FILE_NAMES.contains(&file_name)
}

/// Where an inventory lives on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryLocation {
    /// The directory whose tree is resolved
    pub root: PathBuf,
    /// The marker file at the root, if present
    pub marker: Option<PathBuf>,
}

impl InventoryLocation {
    /// Interpret a user-supplied inventory path.
    ///
    /// A directory is used as the root and its marker file is picked up when
    /// present. A file must be a marker file; its parent directory becomes
    /// the root.
    pub fn from_path(path: &Path) -> Result<Self> {
        if path.is_dir() {
            return Ok(Self {
                root: path.to_path_buf(),
                marker: find_marker(path),
            });
        }

        if !path.exists() {
            return Err(Error::InvalidInventoryPath {
                path: path.to_path_buf(),
                message: "path does not exist".to_string(),
            });
        }

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        if !is_marker_file_name(file_name) {
            return Err(Error::InvalidInventoryPath {
                path: path.to_path_buf(),
                message: format!(
                    "expected a directory or a marker file named {}",
                    MARKER_FILE_NAMES.join(" or ")
                ),
            });
        }

        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Self {
            root,
            marker: Some(path.to_path_buf()),
        })
    }
}

fn find_marker(dir: &Path) -> Option<PathBuf> {
    MARKER_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_are_all_off() {
        let options = Options::default();
        assert!(!options.exclude_last_group_in_name);
        assert!(!options.enable_all_host_names);
        assert!(!options.enable_level_groups);
        assert_eq!(options.tree_group_search, TreeGroupSearch::Inclusive);
    }

    #[test]
    fn test_marker_file_sets_options_and_ignores_unknown_keys() {
        let temp = TempDir::new().unwrap();
        let marker = temp.path().join("yaml_folder.yml");
        std::fs::write(
            &marker,
            "plugin: yaml_folder\nenable_level_groups: true\ntree_group_search: ancestors\n",
        )
        .unwrap();

        let options = Options::default().apply_marker(&marker).unwrap();
        assert!(options.enable_level_groups);
        assert!(!options.enable_all_host_names);
        assert_eq!(options.tree_group_search, TreeGroupSearch::Ancestors);
    }

    #[test]
    fn test_marker_file_rejects_non_boolean() {
        let temp = TempDir::new().unwrap();
        let marker = temp.path().join("yaml_folder.yml");
        std::fs::write(&marker, "enable_level_groups: sometimes\n").unwrap();

        let err = Options::default().apply_marker(&marker).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().contains("hint:"));
    }

    #[test]
    fn test_empty_marker_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let marker = temp.path().join("yaml_folder.yml");
        std::fs::write(&marker, "").unwrap();

        let options = Options::default().apply_marker(&marker).unwrap();
        assert_eq!(options, Options::default());
    }

    #[test]
    fn test_env_overrides() {
        let options = Options::default()
            .apply_env_with(env(&[
                (ENV_EXCLUDE_LAST_GROUP_IN_NAME, "yes"),
                (ENV_ENABLE_ALL_HOST_NAMES, "1"),
                (ENV_ENABLE_LEVEL_GROUPS, "off"),
                (ENV_TREE_GROUP_SEARCH, "Ancestors"),
            ]))
            .unwrap();
        assert!(options.exclude_last_group_in_name);
        assert!(options.enable_all_host_names);
        assert!(!options.enable_level_groups);
        assert_eq!(options.tree_group_search, TreeGroupSearch::Ancestors);
    }

    #[test]
    fn test_env_empty_value_is_unset() {
        let options = Options {
            enable_level_groups: true,
            ..Options::default()
        }
        .apply_env_with(env(&[(ENV_ENABLE_LEVEL_GROUPS, "")]))
        .unwrap();
        assert!(options.enable_level_groups);
    }

    #[test]
    fn test_env_rejects_non_boolean() {
        let err = Options::default()
            .apply_env_with(env(&[(ENV_ENABLE_ALL_HOST_NAMES, "maybe")]))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("enable_all_host_names"));
        assert!(message.contains(ENV_ENABLE_ALL_HOST_NAMES));
    }

    #[test]
    fn test_tree_group_search_from_str() {
        assert_eq!(
            "inclusive".parse::<TreeGroupSearch>().unwrap(),
            TreeGroupSearch::Inclusive
        );
        assert!("nearest".parse::<TreeGroupSearch>().is_err());
        assert_eq!(TreeGroupSearch::Ancestors.to_string(), "ancestors");
    }

    #[test]
    fn test_location_from_directory_finds_marker() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("yaml_folder.yaml"), "").unwrap();

        let location = InventoryLocation::from_path(temp.path()).unwrap();
        assert_eq!(location.root, temp.path());
        assert_eq!(location.marker, Some(temp.path().join("yaml_folder.yaml")));
    }

    #[test]
    fn test_location_from_marker_file() {
        let temp = TempDir::new().unwrap();
        let marker = temp.path().join("yaml_folder.yml");
        std::fs::write(&marker, "").unwrap();

        let location = InventoryLocation::from_path(&marker).unwrap();
        assert_eq!(location.root, temp.path());
        assert_eq!(location.marker, Some(marker));
    }

    #[test]
    fn test_location_rejects_other_files() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("hosts.yml");
        std::fs::write(&file, "").unwrap();

        let err = InventoryLocation::from_path(&file).unwrap_err();
        assert!(matches!(err, Error::InvalidInventoryPath { .. }));

        let err = InventoryLocation::from_path(&temp.path().join("missing")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
