// src/embed/mod.rs
//! Random-walk representation learning over a relabeled graph.

pub mod model;
pub mod walks;

use crate::graph::relabel::Relabeled;
use crate::graph::{NodeId, Relation};
use std::collections::BTreeMap;

/// Knobs for one embedding run. The work an invocation performs is bounded
/// by `walks_per_node * walk_length * epochs * (negative + 1)` per node, so
/// callers can budget compute up front. Defaults mirror the upstream
/// invocation this tool replaces (dimensions=4, walk_length=10,
/// num_walks=100, workers=4).
#[derive(Debug, Clone)]
pub struct EmbedConfig {
    pub dimensions: usize,
    pub walk_length: usize,
    pub walks_per_node: usize,
    pub window: usize,
    pub epochs: usize,
    pub negative: usize,
    pub learning_rate: f32,
    pub workers: usize,
    /// Fixes walk sampling and model initialization. `None` draws a fresh
    /// seed per run; results are then only distributionally stable.
    pub seed: Option<u64>,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            dimensions: 4,
            walk_length: 10,
            walks_per_node: 100,
            window: 5,
            epochs: 2,
            negative: 5,
            learning_rate: 0.025,
            workers: 4,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeEmbedding {
    pub from: NodeId,
    pub to: NodeId,
    pub relation: Relation,
    pub vector: Vec<f32>,
}

#[derive(Debug, Default)]
pub struct Embedding {
    pub dimensions: usize,
    /// One vector per node that appeared in at least one walk.
    pub nodes: BTreeMap<NodeId, Vec<f32>>,
    pub edges: Vec<EdgeEmbedding>,
    /// Nodes that never appeared in any generated walk. Flagged rather than
    /// silently embedded; non-empty only when walk generation is disabled
    /// (zero walks per node or zero length).
    pub unreached: Vec<NodeId>,
    /// Corpus size, for compute-budget visibility.
    pub walk_count: usize,
    pub token_count: usize,
}

/// Embeds every node of the relabeled graph, then derives each edge's
/// vector as the element-wise mean of its endpoints. An empty graph yields
/// an empty embedding, never an error; a single isolated node degrades to
/// one (near-initialization) vector.
#[must_use]
pub fn embed(relabeled: &Relabeled, cfg: &EmbedConfig) -> Embedding {
    let n = relabeled.node_count();
    if n == 0 {
        return Embedding {
            dimensions: cfg.dimensions,
            ..Embedding::default()
        };
    }

    let walks = walks::generate_walks(
        &relabeled.graph,
        cfg.walks_per_node,
        cfg.walk_length,
        cfg.seed,
    );

    let mut appeared = vec![false; n];
    let mut token_count = 0usize;
    for walk in &walks {
        token_count += walk.len();
        for &tok in walk {
            appeared[tok as usize] = true;
        }
    }

    let train_cfg = model::TrainConfig {
        dimensions: cfg.dimensions,
        window: cfg.window,
        epochs: cfg.epochs,
        negative: cfg.negative,
        learning_rate: cfg.learning_rate,
        workers: cfg.workers,
        seed: cfg.seed.unwrap_or_else(rand::random),
    };
    let rows = model::train(&walks, n, &train_cfg);

    let mut nodes = BTreeMap::new();
    let mut unreached = Vec::new();
    for (i, id) in relabeled.ids.iter().enumerate() {
        if appeared[i] {
            nodes.insert(id.clone(), rows[i].clone());
        } else {
            unreached.push(id.clone());
        }
    }

    let edges = edge_embeddings(relabeled, &appeared, &rows);

    Embedding {
        dimensions: cfg.dimensions,
        nodes,
        edges,
        unreached,
        walk_count: walks.len(),
        token_count,
    }
}

fn edge_embeddings(relabeled: &Relabeled, appeared: &[bool], rows: &[Vec<f32>]) -> Vec<EdgeEmbedding> {
    use petgraph::visit::EdgeRef;

    let mut out = Vec::with_capacity(relabeled.graph.edge_count());
    for edge in relabeled.graph.edge_references() {
        let (a, b) = (edge.source().index(), edge.target().index());
        if !appeared[a] || !appeared[b] {
            continue;
        }
        let vector = rows[a]
            .iter()
            .zip(&rows[b])
            .map(|(x, y)| (x + y) / 2.0)
            .collect();
        out.push(EdgeEmbedding {
            from: relabeled.ids[a].clone(),
            to: relabeled.ids[b].clone(),
            relation: *edge.weight(),
            vector,
        });
    }
    out
}
