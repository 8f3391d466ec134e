//! Form graph lookup and dependency traversal
//!
//! Edges point from a dependent form to its prerequisites. Prerequisite ids
//! that do not resolve to a node are skipped silently.

use crate::document::GraphDocument;
use prefill_core::FormNode;
use std::collections::{HashMap, HashSet};

/// Indexed view over the forms of a blueprint graph
#[derive(Debug, Clone, Default)]
pub struct FormGraph {
    /// All nodes in document order
    nodes: Vec<FormNode>,

    /// Node id -> position in `nodes` (first occurrence wins)
    index: HashMap<String, usize>,
}

impl FormGraph {
    /// Build a graph from a list of nodes
    pub fn new(nodes: Vec<FormNode>) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        for (position, node) in nodes.iter().enumerate() {
            index.entry(node.id.clone()).or_insert(position);
        }

        Self { nodes, index }
    }

    /// Build a graph from a parsed graph document
    pub fn from_document(document: GraphDocument) -> Self {
        Self::new(document.nodes)
    }

    /// All forms in document order
    pub fn forms(&self) -> &[FormNode] {
        &self.nodes
    }

    /// Number of forms in the graph
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no forms
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a form by id
    pub fn find_node(&self, id: &str) -> Option<&FormNode> {
        self.index.get(id).map(|&position| &self.nodes[position])
    }

    /// Forms listed directly in the node's prerequisites, in declaration order
    pub fn direct_dependencies_of(&self, node: &FormNode) -> Vec<&FormNode> {
        collect_direct(node, |id| self.find_node(id))
    }

    /// Every form reachable through prerequisite edges, depth-first pre-order
    pub fn transitive_dependencies_of(&self, node: &FormNode) -> Vec<&FormNode> {
        let mut visited = HashSet::new();
        self.transitive_dependencies_with_visited(node, &mut visited)
    }

    /// Transitive closure that skips ids already in `visited` and records
    /// every id it reaches there
    pub fn transitive_dependencies_with_visited(
        &self,
        node: &FormNode,
        visited: &mut HashSet<String>,
    ) -> Vec<&FormNode> {
        collect_transitive(node, |id| self.find_node(id), visited)
    }
}

impl From<GraphDocument> for FormGraph {
    fn from(document: GraphDocument) -> Self {
        Self::from_document(document)
    }
}

/// Find the first node with the given id
pub fn find_node<'a>(nodes: &'a [FormNode], id: &str) -> Option<&'a FormNode> {
    nodes.iter().find(|node| node.id == id)
}

/// Direct dependencies of `node` among `nodes`
pub fn direct_dependencies_of<'a>(node: &FormNode, nodes: &'a [FormNode]) -> Vec<&'a FormNode> {
    collect_direct(node, |id| find_node(nodes, id))
}

/// Transitive dependencies of `node` among `nodes`
pub fn transitive_dependencies_of<'a>(node: &FormNode, nodes: &'a [FormNode]) -> Vec<&'a FormNode> {
    let mut visited = HashSet::new();
    collect_transitive(node, |id| find_node(nodes, id), &mut visited)
}

fn collect_direct<'a, F>(node: &FormNode, lookup: F) -> Vec<&'a FormNode>
where
    F: Fn(&str) -> Option<&'a FormNode>,
{
    node.prerequisites()
        .iter()
        .filter_map(|id| {
            let dep = lookup(id.as_str());
            if dep.is_none() {
                tracing::trace!(form = %node.id, prerequisite = %id, "skipping unresolved prerequisite");
            }
            dep
        })
        .collect()
}

/// Depth-first pre-order closure over prerequisite edges.
///
/// Each stack frame is the remaining prerequisite ids of one node, so the
/// visiting order is the same as the recursive formulation without its depth
/// limit. An id is marked visited before it is resolved; an unresolved id is
/// therefore never looked up twice.
fn collect_transitive<'a, F>(
    node: &FormNode,
    lookup: F,
    visited: &mut HashSet<String>,
) -> Vec<&'a FormNode>
where
    F: Fn(&str) -> Option<&'a FormNode>,
{
    let mut result = Vec::new();
    let mut stack = vec![node.prerequisites().iter()];

    while let Some(frame) = stack.last_mut() {
        let Some(id) = frame.next() else {
            stack.pop();
            continue;
        };

        if !visited.insert(id.clone()) {
            continue;
        }

        match lookup(id.as_str()) {
            Some(dep) => {
                result.push(dep);
                stack.push(dep.prerequisites().iter());
            }
            None => {
                tracing::trace!(form = %node.id, prerequisite = %id, "skipping unresolved prerequisite");
            }
        }
    }

    result
}
