// src/graph/mod.rs
//! Directed graph representation of one or more syntax trees.

pub mod build;
pub mod combine;
pub mod connectivity;
pub mod relabel;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Location sentinel for nodes with no associated source file.
pub const UNKNOWN_LOCATION: &str = "unknown";

/// Stable node identifier. Under the positional scheme the rendered form is
/// `kind@file:line#n`, where `n` disambiguates multiple nodes of one kind on
/// one line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    /// Display string: spelling, falling back to the kind name.
    pub label: String,
    pub kind: String,
    /// `file:line`, or [`UNKNOWN_LOCATION`].
    pub location: String,
    /// Position in the pre-order traversal of the unit that produced the
    /// node. Only comparable within that unit.
    pub order: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// Parent contains child in the AST.
    Structural,
    /// Left-to-right order between consecutive siblings.
    Sequence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub relation: Relation,
    /// Location of the target node, for provenance.
    pub location: String,
}

/// A combined or per-unit syntax graph. Node order is deterministic
/// (BTreeMap keyed by id) so serialization and relabeling are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: BTreeMap<NodeId, GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edges of one relation kind, mostly for tests and reporting.
    pub fn edges_with(&self, relation: Relation) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |e| e.relation == relation)
    }
}
