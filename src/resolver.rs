//! # Directory Resolution
//!
//! This is the recursive walk that turns an inventory tree into inventory
//! sink calls. Each directory is handled in a fixed order:
//!
//! 1.  **Branch** the inherited variable scope.
//! 2.  **Dispatch** files by name: `vars.*` files merge into the scope,
//!     `main.*` is parsed and held back, the marker file is skipped, other
//!     YAML files define group variables at this level (tree-level groups),
//!     everything else is ignored. Dot-prefixed files and directories
//!     (`.git`, `.github`, editor swap files) are skipped with a warning.
//! 3.  **Level groups** are ensured for every entry of the prefix chain when
//!     enabled.
//! 4.  **Hosts** from the held-back `main.*` are resolved with the fully
//!     merged scope.
//! 5.  **Recurse** into subdirectories with a fresh branch of the scope and
//!     an extended prefix chain.
//!
//! Any error aborts the whole walk; a partially resolved inventory is never
//! returned.

use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{is_marker_file_name, InventoryLocation, Options};
use crate::defaults::{MAIN_STEM, VARS_STEM};
use crate::document::{is_yaml_file_name, load_document, Document};
use crate::error::{Error, Result};
use crate::hosts::{normalize_hosts, resolve_hosts, HostContext};
use crate::inventory::{Inventory, InventorySink};
use crate::prefix::PrefixChain;
use crate::registry::GroupRegistry;
use crate::scope::VariableScope;
use crate::tree_groups::define_at_current_level;
use crate::validation::expect_mapping;

/// How a directory entry is handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileKind {
    /// The inventory marker file
    Marker,
    /// Variables for the directory scope (`vars.*`)
    Vars,
    /// Host declarations (`main.*`)
    Main,
    /// Group variables; the stem is the group name
    GroupVars(String),
    /// Dot-prefixed name; never read
    Hidden,
    /// Not a YAML file
    Ignored,
}

/// Classify a file by name.
///
/// # Examples
///
/// ```
/// use yaml_folder::resolver::{classify, FileKind};
///
/// assert_eq!(classify("vars.yml"), FileKind::Vars);
/// assert_eq!(classify("web.yaml"), FileKind::GroupVars("web".to_string()));
/// assert_eq!(classify("notes.txt"), FileKind::Ignored);
/// ```
pub fn classify(file_name: &str) -> FileKind {
    if file_name.starts_with('.') {
        return FileKind::Hidden;
    }
    if !is_yaml_file_name(file_name) {
        return FileKind::Ignored;
    }
    if is_marker_file_name(file_name) {
        return FileKind::Marker;
    }
    if file_name.starts_with(&format!("{}.", VARS_STEM)) {
        return FileKind::Vars;
    }
    if file_name.starts_with(&format!("{}.", MAIN_STEM)) {
        return FileKind::Main;
    }
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name);
    FileKind::GroupVars(stem.to_string())
}

/// A `main.*` document held back until the rest of the directory is done
struct PendingHosts {
    document: Document,
    path: PathBuf,
}

/// Walks an inventory tree and feeds the result into an inventory sink
pub struct DirectoryResolver<'a> {
    registry: GroupRegistry<'a>,
    options: Options,
}

impl<'a> DirectoryResolver<'a> {
    /// Create a resolver writing into `sink`
    pub fn new(sink: &'a mut dyn InventorySink, options: Options) -> Self {
        Self {
            registry: GroupRegistry::new(sink),
            options,
        }
    }

    /// Resolve the tree rooted at `root`.
    ///
    /// The root is canonicalized first so that a `main.*` file at the root
    /// (given as `.`, for example) still has a folder name for its default
    /// group.
    pub fn resolve_root(&mut self, root: &Path) -> Result<()> {
        let root = root.canonicalize().map_err(|e| Error::io(root, e))?;
        info!("YAML inventory: {}", root.display());
        self.resolve(&root, &VariableScope::new(), &PrefixChain::root())
    }

    /// Resolve one directory and, recursively, everything below it.
    pub fn resolve(
        &mut self,
        dir: &Path,
        inherited: &VariableScope,
        chain: &PrefixChain,
    ) -> Result<()> {
        debug!("Entering {} (prefix '{}')", dir.display(), chain.current());
        let mut scope = inherited.branch();
        let mut subdirs = Vec::new();
        let mut pending: Option<PendingHosts> = None;

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().into_owned();

            if entry.file_type().is_dir() {
                if file_name.starts_with('.') {
                    warn!("Skipping hidden directory {}", entry.path().display());
                } else {
                    subdirs.push((file_name, entry.into_path()));
                }
                continue;
            }

            let path = entry.path();
            match classify(&file_name) {
                FileKind::Marker => {}
                FileKind::Hidden => warn!("Skipping hidden file {}", path.display()),
                FileKind::Ignored => debug!("Skipping {}", path.display()),
                FileKind::Vars => {
                    debug!("Parsing variables {}", path.display());
                    scope.update(&load_scope(path, "directory variables")?);
                }
                FileKind::Main => {
                    debug!("Parsing hosts {}", path.display());
                    if let Some(previous) = &pending {
                        warn!(
                            "{} has more than one host file; {} replaces {}",
                            dir.display(),
                            file_name,
                            previous.path.display()
                        );
                    }
                    pending = Some(PendingHosts {
                        document: load_document(path)?,
                        path: path.to_path_buf(),
                    });
                }
                FileKind::GroupVars(group) => {
                    debug!("Parsing group variables {}", path.display());
                    let vars = load_scope(path, &format!("variables of group '{}'", group))?;
                    define_at_current_level(&mut self.registry, chain, &group, &vars)?;
                }
            }
        }

        let additional_groups = if self.options.enable_level_groups {
            let names = chain.level_group_names();
            for name in &names {
                self.registry.ensure_group(name)?;
            }
            names
        } else {
            Vec::new()
        };

        if let Some(pending) = pending {
            let entries = normalize_hosts(pending.document, &pending.path)?;
            let folder_name = folder_name(dir);
            let ctx = HostContext {
                chain,
                scope: &scope,
                additional_groups: &additional_groups,
                folder_name: &folder_name,
                source: &pending.path,
                options: &self.options,
            };
            resolve_hosts(&mut self.registry, entries, &ctx)?;
        }

        for (name, path) in subdirs {
            self.resolve(&path, &scope, &chain.child(&name))?;
        }
        Ok(())
    }
}

fn load_scope(path: &Path, description: &str) -> Result<VariableScope> {
    let mapping = expect_mapping(description, load_document(path)?.into_value(), path)?;
    VariableScope::from_mapping(mapping, path)
}

fn folder_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Resolve the inventory rooted at `root` into `sink`.
pub fn resolve_into(root: &Path, options: Options, sink: &mut dyn InventorySink) -> Result<()> {
    DirectoryResolver::new(sink, options).resolve_root(root)
}

/// Resolve the inventory rooted at `root` into a fresh [`Inventory`].
pub fn resolve_inventory(root: &Path, options: Options) -> Result<Inventory> {
    let mut inventory = Inventory::new();
    resolve_into(root, options, &mut inventory)?;
    Ok(inventory)
}

/// Locate, configure and resolve an inventory from a user-supplied path.
///
/// Options come from the marker file and the environment; see
/// [`Options::for_location`].
pub fn load_inventory(path: &Path) -> Result<Inventory> {
    let location = InventoryLocation::from_path(path)?;
    let options = Options::for_location(&location)?;
    resolve_inventory(&location.root, options)
}
