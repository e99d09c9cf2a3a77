// src/graph/relabel.rs
//! Dense integer relabeling for the embedding stage.
//!
//! Walk sampling and the trainer's vector tables are indexed by small
//! integers, so the string-keyed graph is mapped onto a `petgraph` `DiGraph`
//! whose node indices run 0..N-1, with the original node attributes carried
//! as weights and a reverse table for reporting.

use super::{Graph, GraphNode, NodeId, Relation};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

pub struct Relabeled {
    pub graph: DiGraph<GraphNode, Relation>,
    /// Reverse map: `ids[i]` is the original id of integer node `i`.
    pub ids: Vec<NodeId>,
}

impl Relabeled {
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn meta(&self, index: usize) -> &GraphNode {
        &self.graph[NodeIndex::new(index)]
    }
}

/// Total bijection onto 0..N-1 in id order: no node dropped, no integer
/// reused, every edge preserved with its relation tag.
#[must_use]
pub fn relabel(graph: &Graph) -> Relabeled {
    let mut out = DiGraph::with_capacity(graph.node_count(), graph.edge_count());
    let mut index_of: HashMap<&NodeId, NodeIndex> = HashMap::with_capacity(graph.node_count());
    let mut ids = Vec::with_capacity(graph.node_count());

    // BTreeMap iteration order makes the integer assignment deterministic.
    for (id, node) in &graph.nodes {
        let ix = out.add_node(node.clone());
        index_of.insert(id, ix);
        ids.push(id.clone());
    }
    for edge in &graph.edges {
        // Edges referencing unknown ids cannot occur in graphs produced by
        // build/combine; skip rather than panic on hand-made input.
        if let (Some(&a), Some(&b)) = (index_of.get(&edge.from), index_of.get(&edge.to)) {
            out.add_edge(a, b, edge.relation);
        }
    }

    Relabeled { graph: out, ids }
}
