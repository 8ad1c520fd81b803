//! Folder-tree assembly.
//!
//! Turns a flat list of nodes into a forest keyed by `parent_id`, with every
//! sibling list sorted by name.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::order::compare_names;
use super::policy::TreeMode;
use super::types::{Node, NodeTree};
use crate::{CatalogError, Result};

/// Build a sorted forest from a flat node list.
///
/// Nodes with `parent_id == None` become roots. A node whose parent is not in
/// the list (dangling reference), or that cannot be reached from any root
/// (parent cycle), is dropped in [`TreeMode::Lenient`] and reported as
/// `InvalidStructure` in [`TreeMode::Strict`].
pub fn build_tree(nodes: Vec<Node>, mode: TreeMode) -> Result<Vec<NodeTree>> {
    let ids: HashSet<String> = nodes.iter().map(|n| n.id.clone()).collect();

    let mut roots = Vec::new();
    let mut children_of: HashMap<String, Vec<Node>> = HashMap::new();
    let mut dangling = Vec::new();

    for node in nodes {
        match node.parent_id.clone() {
            None => roots.push(node),
            Some(parent_id) if ids.contains(&parent_id) => {
                children_of.entry(parent_id).or_default().push(node);
            }
            Some(_) => dangling.push(node.id),
        }
    }

    let mut forest: Vec<NodeTree> = roots
        .into_iter()
        .map(|root| attach(root, &mut children_of))
        .collect();
    sort_level(&mut forest);

    // Whatever was never claimed hangs off a cycle.
    let mut unreachable: Vec<String> = children_of
        .into_values()
        .flatten()
        .map(|n| n.id)
        .collect();
    unreachable.sort();

    if dangling.is_empty() && unreachable.is_empty() {
        return Ok(forest);
    }

    match mode {
        TreeMode::Lenient => {
            debug!(
                dangling = dangling.len(),
                unreachable = unreachable.len(),
                "Dropped nodes that could not be placed in the tree"
            );
            Ok(forest)
        }
        TreeMode::Strict => {
            warn!(
                dangling = ?dangling,
                unreachable = ?unreachable,
                "Folder tree has nodes that cannot be placed"
            );
            let mut problems = Vec::new();
            if !dangling.is_empty() {
                problems.push(format!("dangling parent reference: {}", dangling.join(", ")));
            }
            if !unreachable.is_empty() {
                problems.push(format!("unreachable from any root: {}", unreachable.join(", ")));
            }
            Err(CatalogError::InvalidStructure(problems.join("; ")))
        }
    }
}

/// Take `node`'s children out of the pending map and build its subtree.
fn attach(node: Node, children_of: &mut HashMap<String, Vec<Node>>) -> NodeTree {
    let pending = children_of.remove(&node.id).unwrap_or_default();

    let mut children: Vec<NodeTree> = pending
        .into_iter()
        .map(|child| attach(child, children_of))
        .collect();
    sort_level(&mut children);

    NodeTree { node, children }
}

fn sort_level(level: &mut [NodeTree]) {
    level.sort_by(|a, b| compare_names(&a.node.name, &b.node.name));
}
