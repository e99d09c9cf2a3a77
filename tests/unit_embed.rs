// tests/unit_embed.rs
//! Embedding engine properties. Walk sampling is stochastic, so these
//! assertions are structural (dimensions, coverage, exact midpoint
//! derivation, seeded reproducibility), never exact-vector comparisons
//! against fixed values.

use std::path::PathBuf;
use syngraph::embed::{embed, EmbedConfig};
use syngraph::graph::build::build;
use syngraph::graph::relabel::relabel;
use syngraph::graph::Graph;
use syngraph::parse::{SourceLocation, SyntaxNode};

fn tree(width: usize) -> syngraph::graph::Graph {
    let children = (0..width)
        .map(|i| SyntaxNode {
            kind: "declaration".to_string(),
            spelling: format!("v{i}"),
            location: Some(SourceLocation {
                file: PathBuf::from("a.c"),
                line: i + 2,
            }),
            children: Vec::new(),
        })
        .collect();
    let root = SyntaxNode {
        kind: "translation_unit".to_string(),
        spelling: String::new(),
        location: Some(SourceLocation {
            file: PathBuf::from("a.c"),
            line: 1,
        }),
        children,
    };
    build(&root)
}

fn quick_cfg() -> EmbedConfig {
    EmbedConfig {
        walks_per_node: 10,
        walk_length: 5,
        epochs: 1,
        workers: 2,
        seed: Some(42),
        ..EmbedConfig::default()
    }
}

#[test]
fn test_empty_graph_embeds_to_empty_mapping() {
    let out = embed(&relabel(&Graph::new()), &quick_cfg());
    assert!(out.nodes.is_empty());
    assert!(out.edges.is_empty());
    assert!(out.unreached.is_empty());
}

#[test]
fn test_single_isolated_node_gets_one_vector_of_requested_dimension() {
    let g = tree(0); // just the root, no edges
    let cfg = EmbedConfig {
        dimensions: 7,
        ..quick_cfg()
    };
    let out = embed(&relabel(&g), &cfg);
    assert_eq!(out.nodes.len(), 1);
    assert_eq!(out.nodes.values().next().unwrap().len(), 7);
    assert!(out.edges.is_empty());
    assert!(out.unreached.is_empty());
}

#[test]
fn test_every_node_covered_and_dimensioned() {
    let g = tree(6);
    let out = embed(&relabel(&g), &quick_cfg());
    assert_eq!(out.nodes.len(), g.node_count());
    assert!(out.nodes.values().all(|v| v.len() == 4));
    assert!(out.unreached.is_empty());
}

#[test]
fn test_edge_embedding_is_exact_midpoint_of_endpoints() {
    let g = tree(4);
    let out = embed(&relabel(&g), &quick_cfg());
    assert!(!out.edges.is_empty());
    for edge in &out.edges {
        let a = &out.nodes[&edge.from];
        let b = &out.nodes[&edge.to];
        for d in 0..edge.vector.len() {
            assert_eq!(edge.vector[d], (a[d] + b[d]) / 2.0);
        }
    }
}

#[test]
fn test_one_edge_embedding_per_graph_edge() {
    let g = tree(4);
    let out = embed(&relabel(&g), &quick_cfg());
    assert_eq!(out.edges.len(), g.edge_count());
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let g = tree(5);
    let r = relabel(&g);
    let a = embed(&r, &quick_cfg());
    let b = embed(&r, &quick_cfg());
    assert_eq!(a.nodes, b.nodes);
    assert_eq!(a.edges, b.edges);
}

#[test]
fn test_disabled_walks_flag_every_node_as_unreached() {
    let g = tree(3);
    let cfg = EmbedConfig {
        walks_per_node: 0,
        ..quick_cfg()
    };
    let out = embed(&relabel(&g), &cfg);
    assert!(out.nodes.is_empty());
    assert_eq!(out.unreached.len(), g.node_count());
}

#[test]
fn test_walk_budget_is_bounded_by_config() {
    let g = tree(4);
    let cfg = quick_cfg();
    let out = embed(&relabel(&g), &cfg);
    assert_eq!(out.walk_count, g.node_count() * cfg.walks_per_node);
    assert!(out.token_count <= out.walk_count * cfg.walk_length);
}
