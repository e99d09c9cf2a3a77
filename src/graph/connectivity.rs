// src/graph/connectivity.rs
//! Advisory connectivity check run before embedding.

use super::relabel::Relabeled;
use petgraph::algo::connected_components;

/// True when every node can reach every other node ignoring edge direction.
///
/// A disconnected graph is not an error; random walks simply never cross
/// components, so embeddings from different components are not comparable.
/// Callers warn and proceed. The empty graph counts as connected.
#[must_use]
pub fn is_weakly_connected(relabeled: &Relabeled) -> bool {
    connected_components(&relabeled.graph) <= 1
}
