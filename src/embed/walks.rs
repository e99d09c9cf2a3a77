// src/embed/walks.rs
//! Random-walk corpus generation.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Generates `walks_per_node` walks starting from every node, each at most
/// `walk_length` nodes long. Steps choose uniformly among outgoing edges,
/// treating relation tags alike; a node with no successors ends its walk
/// early. Walks from distinct (node, repeat) pairs are independent, so
/// generation is parallel across nodes; each walk derives its own rng from
/// the base seed, which makes a seeded run reproducible regardless of how
/// rayon schedules the work.
#[must_use]
pub fn generate_walks<N, E>(
    graph: &DiGraph<N, E>,
    walks_per_node: usize,
    walk_length: usize,
    seed: Option<u64>,
) -> Vec<Vec<u32>>
where
    N: Sync,
    E: Sync,
{
    if walks_per_node == 0 || walk_length == 0 || graph.node_count() == 0 {
        return Vec::new();
    }

    let successors: Vec<Vec<u32>> = (0..graph.node_count())
        .map(|i| {
            graph
                .neighbors_directed(NodeIndex::new(i), Direction::Outgoing)
                .map(|n| n.index() as u32)
                .collect()
        })
        .collect();

    let base = seed.unwrap_or_else(rand::random);

    (0..graph.node_count() as u32)
        .into_par_iter()
        .flat_map_iter(|start| {
            let successors = &successors;
            (0..walks_per_node).map(move |repeat| {
                let mut rng =
                    StdRng::seed_from_u64(mix(base, u64::from(start), repeat as u64));
                walk_from(start, walk_length, successors, &mut rng)
            })
        })
        .collect()
}

fn walk_from(start: u32, length: usize, successors: &[Vec<u32>], rng: &mut StdRng) -> Vec<u32> {
    let mut walk = Vec::with_capacity(length);
    let mut current = start;
    walk.push(current);
    while walk.len() < length {
        let next = &successors[current as usize];
        if next.is_empty() {
            break;
        }
        current = next[rng.gen_range(0..next.len())];
        walk.push(current);
    }
    walk
}

// splitmix64 finalizer over (base, node, repeat); decorrelates per-walk
// streams that share one user-facing seed.
fn mix(base: u64, node: u64, repeat: u64) -> u64 {
    let mut z = base
        .wrapping_add(node.wrapping_mul(0x9e37_79b9_7f4a_7c15))
        .wrapping_add(repeat.wrapping_mul(0xbf58_476d_1ce4_e5b9));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
