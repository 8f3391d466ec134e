//! Property tests for dependency traversal on random acyclic graphs

use prefill_core::FormNode;
use prefill_graph::{DependencyContext, FormGraph};
use proptest::prelude::*;
use proptest::sample::Index;
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Random DAG: node `i` may only depend on nodes `0..i`, plus the odd
/// reference to a form that does not exist.
fn arb_dag() -> impl Strategy<Value = Vec<FormNode>> {
    prop::collection::vec(
        (prop::collection::vec(any::<Index>(), 0..4), any::<bool>()),
        1..40,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (picks, dangling))| {
                let mut prerequisites: Vec<String> = if i == 0 {
                    Vec::new()
                } else {
                    picks.iter().map(|pick| format!("f{}", pick.index(i))).collect()
                };
                if dangling {
                    prerequisites.push(format!("ghost{}", i));
                }
                FormNode::new(format!("f{}", i)).with_prerequisites(prerequisites)
            })
            .collect()
    })
}

/// Reference reachability by breadth-first search
fn reachable(graph: &FormGraph, start: &FormNode) -> BTreeSet<String> {
    let mut seen = BTreeSet::new();
    let mut queue: VecDeque<&FormNode> = VecDeque::from([start]);

    while let Some(node) = queue.pop_front() {
        for id in node.prerequisites() {
            if let Some(dep) = graph.find_node(id) {
                if seen.insert(dep.id.clone()) {
                    queue.push_back(dep);
                }
            }
        }
    }

    seen
}

proptest! {
    /// The transitive set is exactly the reachable set, with no duplicates
    #[test]
    fn transitive_equals_reachable(nodes in arb_dag()) {
        let graph = FormGraph::new(nodes);

        for node in graph.forms() {
            let deps = graph.transitive_dependencies_of(node);
            let ids: Vec<&str> = deps.iter().map(|n| n.id.as_str()).collect();
            let unique: HashSet<&str> = ids.iter().copied().collect();

            prop_assert_eq!(ids.len(), unique.len());
            prop_assert!(!unique.contains(node.id.as_str()));

            let as_set: BTreeSet<String> = ids.iter().map(|id| id.to_string()).collect();
            prop_assert_eq!(as_set, reachable(&graph, node));
        }
    }

    /// Direct dependencies keep declaration order and drop dangling ids
    #[test]
    fn direct_dependencies_follow_declaration_order(nodes in arb_dag()) {
        let graph = FormGraph::new(nodes);

        for node in graph.forms() {
            let expected: Vec<&str> = node
                .prerequisites()
                .iter()
                .map(String::as_str)
                .filter(|id| !id.starts_with("ghost"))
                .collect();
            let actual: Vec<&str> = graph
                .direct_dependencies_of(node)
                .iter()
                .map(|n| n.id.as_str())
                .collect();

            prop_assert_eq!(actual, expected);
        }
    }

    /// Context partitions the closure into direct and transitive parts
    #[test]
    fn context_partitions_closure(nodes in arb_dag()) {
        let graph = FormGraph::new(nodes);

        for node in graph.forms() {
            let ctx = DependencyContext::for_node(&graph, node);
            let direct: BTreeSet<String> = ctx.direct_dependencies.iter().map(|n| n.id.clone()).collect();
            let transitive: BTreeSet<String> = ctx.transitive_dependencies.iter().map(|n| n.id.clone()).collect();

            prop_assert!(direct.is_disjoint(&transitive));

            let union: BTreeSet<String> = direct.union(&transitive).cloned().collect();
            prop_assert_eq!(union, reachable(&graph, node));
        }
    }
}
