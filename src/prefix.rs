//! Path prefix chains.
//!
//! A [`PrefixChain`] holds one entry per directory level from the inventory
//! root down to the current directory. The root entry is empty and every
//! other entry is its parent's entry followed by `<dirname>-`:
//!
//! ```text
//! inventory/            ""
//! inventory/dc1/        "dc1-"
//! inventory/dc1/rack1/  "dc1-rack1-"
//! ```
//!
//! Chains are values. Descending into a subdirectory produces a new chain
//! through [`PrefixChain::child`]; the parent's chain is never modified, so
//! an error part way through one subtree cannot affect its siblings.

use crate::registry::safe_group_name;

/// Separator appended after each directory name
pub const PREFIX_SEPARATOR: char = '-';

/// Per-level name prefixes from the inventory root to the current directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixChain {
    entries: Vec<String>,
}

impl PrefixChain {
    /// The chain of the inventory root: a single empty entry
    pub fn root() -> Self {
        Self {
            entries: vec![String::new()],
        }
    }

    /// The chain of subdirectory `dir_name` of the current directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use yaml_folder::prefix::PrefixChain;
    ///
    /// let chain = PrefixChain::root().child("dc1").child("rack1");
    /// assert_eq!(chain.current(), "dc1-rack1-");
    /// assert_eq!(chain.depth(), 2);
    /// ```
    pub fn child(&self, dir_name: &str) -> Self {
        let mut entries = self.entries.clone();
        entries.push(format!("{}{}{}", self.current(), dir_name, PREFIX_SEPARATOR));
        Self { entries }
    }

    /// The current directory's entry
    pub fn current(&self) -> &str {
        self.entries.last().map(String::as_str).unwrap_or_default()
    }

    /// The parent directory's entry, or `None` at the root
    pub fn parent(&self) -> Option<&str> {
        self.entries
            .len()
            .checked_sub(2)
            .and_then(|idx| self.entries.get(idx))
            .map(String::as_str)
    }

    /// Number of directory levels below the inventory root
    pub fn depth(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    /// All entries, root first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Entries of strict ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .rev()
            .skip(1)
            .map(String::as_str)
    }

    /// The prefix used when building host names.
    ///
    /// With `exclude_last` set the current directory's own segment is left
    /// out, so hosts take the parent's prefix. The root has no parent and
    /// keeps its empty prefix.
    pub fn naming_prefix(&self, exclude_last: bool) -> &str {
        if exclude_last {
            self.parent().unwrap_or_default()
        } else {
            self.current()
        }
    }

    /// Names of the level groups for this directory: one per non-root entry,
    /// trailing separator stripped and hyphens turned into underscores.
    ///
    /// ```
    /// use yaml_folder::prefix::PrefixChain;
    ///
    /// let chain = PrefixChain::root().child("dc1").child("rack-1");
    /// assert_eq!(chain.level_group_names(), vec!["dc1", "dc1_rack_1"]);
    /// ```
    pub fn level_group_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let trimmed = entry.strip_suffix(PREFIX_SEPARATOR).unwrap_or(entry.as_str());
                safe_group_name(&trimmed.replace(PREFIX_SEPARATOR, "_"))
            })
            .collect()
    }
}

impl Default for PrefixChain {
    fn default() -> Self {
        Self::root()
    }
}
