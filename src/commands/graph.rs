//! # Graph Command Implementation
//!
//! Implements `graph`, which prints the groups of the resolved inventory and
//! their member hosts as a tree:
//!
//! ```text
//! all
//! ├─ dc1
//! │  ├─ dc1-web1
//! │  └─ dc1-web2
//! └─ ungrouped
//!    └─ bastion
//! ```
//!
//! Tree-level groups are bookkeeping for variable inheritance and are hidden
//! unless `--show-tree-groups` is given. With `--vars`, group and host
//! variables are shown as `name = value` leaves.

use anyhow::Result;
use clap::Args;
use ptree::{print_tree, TreeItem};
use std::borrow::Cow;

use super::InventoryArgs;
use yaml_folder::export::{yaml_to_json, UNGROUPED};
use yaml_folder::inventory::Inventory;
use yaml_folder::output::{ColorChoice, OutputConfig, Status};
use yaml_folder::scope::VariableScope;
use yaml_folder::tree_groups::is_shadow_name;

/// Show groups and their hosts as a tree
#[derive(Args, Debug, Default)]
pub struct GraphArgs {
    /// Show group and host variables
    #[arg(long)]
    pub vars: bool,

    /// Include tree-level (__yaml_folder__*) groups
    #[arg(long)]
    pub show_tree_groups: bool,
}

/// Execute the `graph` command.
pub fn execute(args: GraphArgs, inventory: &InventoryArgs, color: ColorChoice) -> Result<()> {
    let out = OutputConfig::new(color);
    let resolved = inventory.load()?;
    println!(
        "{} Inventory graph for: {}",
        out.marker(Status::Tree),
        inventory.path().display()
    );

    let tree = build_tree(&args, &resolved)?;
    print_tree(&tree).map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;
    Ok(())
}

/// Build the group/host tree for an inventory.
fn build_tree(args: &GraphArgs, inventory: &Inventory) -> Result<TreeNode> {
    let mut children = Vec::new();

    for (name, group) in inventory.groups() {
        if is_shadow_name(name) && !args.show_tree_groups {
            continue;
        }
        let mut node = TreeNode::leaf(name.clone());
        if args.vars {
            node.children.extend(var_leaves(&group.vars)?);
        }
        for host in &group.hosts {
            node.children.push(host_node(args, inventory, host)?);
        }
        children.push(node);
    }

    let ungrouped: Vec<&String> = inventory
        .hosts()
        .filter(|(_, host)| host.groups.is_empty())
        .map(|(name, _)| name)
        .collect();
    if !ungrouped.is_empty() {
        let mut node = TreeNode::leaf(UNGROUPED.to_string());
        for host in ungrouped {
            node.children.push(host_node(args, inventory, host)?);
        }
        children.push(node);
    }

    Ok(TreeNode {
        label: "all".to_string(),
        children,
    })
}

fn host_node(args: &GraphArgs, inventory: &Inventory, name: &str) -> Result<TreeNode> {
    let mut node = TreeNode::leaf(name.to_string());
    if args.vars {
        if let Some(host) = inventory.host(name) {
            node.children = var_leaves(&host.vars)?;
        }
    }
    Ok(node)
}

fn var_leaves(vars: &VariableScope) -> Result<Vec<TreeNode>> {
    vars.iter()
        .map(|(key, value)| -> Result<TreeNode> {
            Ok(TreeNode::leaf(format!(
                "{} = {}",
                key,
                serde_json::to_string(&yaml_to_json(value)?)?
            )))
        })
        .collect()
}

/// Tree node structure for ptree visualization
#[derive(Clone, Debug)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(label: String) -> Self {
        Self {
            label,
            children: Vec::new(),
        }
    }
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Borrowed(&self.children)
    }
}
