// src/graph/combine.rs
//! Set-union of per-unit graphs into one combined graph.

use super::{Graph, GraphNode, NodeId, Relation};
use std::collections::BTreeSet;

/// Two units presented the same id with different attributes. Under the
/// positional identity scheme this signals an identity bug somewhere
/// upstream, so it is surfaced to the caller instead of being resolved
/// silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdConflict {
    pub id: NodeId,
    pub kept: String,
    pub discarded: String,
}

#[derive(Debug, Default)]
pub struct Combined {
    pub graph: Graph,
    pub conflicts: Vec<IdConflict>,
}

/// Merges graphs by node id. Total: never rejects input, empty input gives
/// an empty graph. Later graphs win on attribute conflicts (last-write-wins,
/// recorded in `conflicts`). Duplicate edges collapse to one; `order` values
/// are carried through untouched and stay unit-local.
#[must_use]
pub fn combine<I>(graphs: I) -> Combined
where
    I: IntoIterator<Item = Graph>,
{
    let mut out = Combined::default();
    let mut edge_keys: BTreeSet<(NodeId, NodeId, Relation)> = BTreeSet::new();

    for graph in graphs {
        for (id, node) in graph.nodes {
            merge_node(&mut out, id, node);
        }
        for edge in graph.edges {
            if edge_keys.insert((edge.from.clone(), edge.to.clone(), edge.relation)) {
                out.graph.edges.push(edge);
            }
        }
    }
    out
}

fn merge_node(out: &mut Combined, id: NodeId, node: GraphNode) {
    if let Some(existing) = out.graph.nodes.get(&id) {
        let same = existing.label == node.label
            && existing.kind == node.kind
            && existing.location == node.location;
        if !same {
            out.conflicts.push(IdConflict {
                id: id.clone(),
                kept: describe(&node),
                discarded: describe(existing),
            });
        }
    }
    out.graph.nodes.insert(id, node);
}

fn describe(node: &GraphNode) -> String {
    format!("{} '{}' at {}", node.kind, node.label, node.location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphNode;

    fn single(id: &str, label: &str) -> Graph {
        let mut g = Graph::new();
        let node = GraphNode {
            id: NodeId(id.to_string()),
            label: label.to_string(),
            kind: "declaration".to_string(),
            location: "a.c:1".to_string(),
            order: 0,
        };
        g.nodes.insert(node.id.clone(), node);
        g
    }

    #[test]
    fn test_empty_input_yields_empty_graph() {
        let out = combine(Vec::new());
        assert!(out.graph.is_empty());
        assert!(out.conflicts.is_empty());
    }

    #[test]
    fn test_distinct_ids_union() {
        let out = combine(vec![single("a", "x"), single("b", "y")]);
        assert_eq!(out.graph.node_count(), 2);
        assert_eq!(out.graph.edge_count(), 0);
    }

    #[test]
    fn test_same_id_last_write_wins_and_is_reported() {
        let out = combine(vec![single("a", "first"), single("a", "second")]);
        assert_eq!(out.graph.node_count(), 1);
        assert_eq!(out.graph.nodes[&NodeId("a".into())].label, "second");
        assert_eq!(out.conflicts.len(), 1);
    }

    #[test]
    fn test_identical_nodes_merge_silently() {
        let out = combine(vec![single("a", "x"), single("a", "x")]);
        assert_eq!(out.graph.node_count(), 1);
        assert!(out.conflicts.is_empty());
    }
}
