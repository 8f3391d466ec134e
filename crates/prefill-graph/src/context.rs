//! Dependency context handed to data source providers
//!
//! Built once per resolution call from the graph accessor and transitive
//! resolver output, then discarded.

use crate::graph::FormGraph;
use prefill_core::FormNode;
use std::collections::HashSet;

/// Dependencies of one form, borrowed from its graph
#[derive(Debug, Clone)]
pub struct DependencyContext<'a> {
    /// Form whose fields are being prefilled
    pub current_form: &'a FormNode,

    /// Every form in the graph
    pub all_forms: &'a [FormNode],

    /// Forms listed in the current form's prerequisites
    pub direct_dependencies: Vec<&'a FormNode>,

    /// Forms reachable through prerequisite chains, excluding the direct ones
    pub transitive_dependencies: Vec<&'a FormNode>,
}

impl<'a> DependencyContext<'a> {
    /// Build the context for the form with the given id
    pub fn for_form(graph: &'a FormGraph, form_id: &str) -> Result<Self, ContextError> {
        let node = graph
            .find_node(form_id)
            .ok_or_else(|| ContextError::UnknownForm(form_id.to_string()))?;

        Ok(Self::for_node(graph, node))
    }

    /// Build the context for a node
    pub fn for_node(graph: &'a FormGraph, node: &'a FormNode) -> Self {
        let direct_dependencies = graph.direct_dependencies_of(node);

        // The current form only shows up in its own closure on a cyclic graph
        let transitive_dependencies = {
            let direct_ids: HashSet<&str> =
                direct_dependencies.iter().map(|n| n.id.as_str()).collect();

            graph
                .transitive_dependencies_of(node)
                .into_iter()
                .filter(|dep| !direct_ids.contains(dep.id.as_str()) && dep.id != node.id)
                .collect()
        };

        Self {
            current_form: node,
            all_forms: graph.forms(),
            direct_dependencies,
            transitive_dependencies,
        }
    }
}

/// Context construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("Form '{0}' not found in graph")]
    UnknownForm(String),
}
