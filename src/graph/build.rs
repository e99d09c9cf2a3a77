// src/graph/build.rs
//! AST → graph transformation.
//!
//! One pre-order pass over the syntax tree produces a `structural` edge per
//! parent/child pair and `sequence` edges chaining consecutive siblings, so
//! later passes can follow "what happens next" without descending into
//! substructure. Traversal uses a heap work stack; input depth never touches
//! the call stack.

use super::{Graph, GraphEdge, GraphNode, NodeId, Relation, UNKNOWN_LOCATION};
use crate::parse::SyntaxNode;
use std::collections::HashMap;

/// Positional identity: `kind@file:line#n`.
///
/// Distinct nodes that merely share a kind and spelling (two locals both
/// named `i`) stay distinct, while re-parses of the same unchanged unit
/// reproduce the same ids. The symbol-level `kind+spelling` key is
/// deliberately not offered; mixing the two policies in one graph would
/// break the combiner's merge guarantee.
#[derive(Default)]
struct IdAllocator {
    seen: HashMap<(String, String), usize>,
}

impl IdAllocator {
    fn assign(&mut self, node: &SyntaxNode) -> NodeId {
        let key = (node.kind.clone(), location_of(node));
        let n = self.seen.entry(key).or_insert(0);
        let id = NodeId(format!("{}@{}#{}", node.kind, location_of(node), n));
        *n += 1;
        id
    }
}

fn location_of(node: &SyntaxNode) -> String {
    match &node.location {
        Some(loc) => format!("{}:{}", loc.file.display(), loc.line),
        None => UNKNOWN_LOCATION.to_string(),
    }
}

/// Builds the graph for one translation unit.
///
/// Every syntax node is visited exactly once; `order` numbers the pre-order
/// traversal starting at 0 for the root. Missing locations become the
/// `"unknown"` sentinel, never a failure.
#[must_use]
pub fn build(root: &SyntaxNode) -> Graph {
    let mut graph = Graph::new();
    let mut ids = IdAllocator::default();
    let mut order = 0usize;

    let root_id = ids.assign(root);
    let mut stack: Vec<(&SyntaxNode, NodeId)> = vec![(root, root_id)];

    while let Some((node, id)) = stack.pop() {
        let prev = graph.nodes.insert(
            id.clone(),
            GraphNode {
                id: id.clone(),
                label: node.label().to_string(),
                kind: node.kind.clone(),
                location: location_of(node),
                order,
            },
        );
        debug_assert!(prev.is_none(), "id allocator produced a duplicate");
        order += 1;

        let child_ids: Vec<NodeId> = node.children.iter().map(|c| ids.assign(c)).collect();

        for (child, child_id) in node.children.iter().zip(&child_ids) {
            graph.edges.push(GraphEdge {
                from: id.clone(),
                to: child_id.clone(),
                relation: Relation::Structural,
                location: location_of(child),
            });
        }
        // Siblings chain left to right; a single child needs no chain.
        for (i, pair) in child_ids.windows(2).enumerate() {
            graph.edges.push(GraphEdge {
                from: pair[0].clone(),
                to: pair[1].clone(),
                relation: Relation::Sequence,
                location: location_of(&node.children[i + 1]),
            });
        }

        // Reverse push keeps pop order equal to pre-order.
        for (child, child_id) in node.children.iter().zip(child_ids).rev() {
            stack.push((child, child_id));
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{SourceLocation, SyntaxNode};
    use std::path::PathBuf;

    fn leaf(kind: &str, spelling: &str, line: usize) -> SyntaxNode {
        SyntaxNode {
            kind: kind.to_string(),
            spelling: spelling.to_string(),
            location: Some(SourceLocation {
                file: PathBuf::from("t.c"),
                line,
            }),
            children: Vec::new(),
        }
    }

    #[test]
    fn test_two_locals_named_i_stay_distinct() {
        let mut root = leaf("translation_unit", "", 1);
        root.children.push(leaf("declaration", "i", 2));
        root.children.push(leaf("declaration", "i", 3));
        let g = build(&root);
        assert_eq!(g.node_count(), 3);
    }

    #[test]
    fn test_same_line_same_kind_disambiguated() {
        let mut root = leaf("call_expression", "", 1);
        root.children.push(leaf("identifier", "f", 1));
        root.children.push(leaf("identifier", "f", 1));
        let g = build(&root);
        assert_eq!(g.node_count(), 3);
        assert!(g.nodes.contains_key(&NodeId("identifier@t.c:1#0".into())));
        assert!(g.nodes.contains_key(&NodeId("identifier@t.c:1#1".into())));
    }

    #[test]
    fn test_missing_location_is_sentinel_not_error() {
        let root = SyntaxNode {
            kind: "translation_unit".to_string(),
            spelling: String::new(),
            location: None,
            children: Vec::new(),
        };
        let g = build(&root);
        let node = g.nodes.values().next().unwrap();
        assert_eq!(node.location, UNKNOWN_LOCATION);
    }

    #[test]
    fn test_ids_stable_across_rebuilds() {
        let mut root = leaf("translation_unit", "", 1);
        root.children.push(leaf("function_definition", "main", 2));
        let a = build(&root);
        let b = build(&root);
        assert_eq!(a, b);
    }
}
