// src/bin/synvec.rs
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use syngraph::embed::{embed, EmbedConfig};
use syngraph::graph::connectivity::is_weakly_connected;
use syngraph::graph::relabel::relabel;
use syngraph::store;

#[derive(Parser)]
#[command(name = "synvec", version, about = "Embed a stored AST graph via random walks")]
struct Cli {
    /// Graph artifact produced by `syngraph` (the .json file)
    #[arg(value_name = "ARTIFACT")]
    artifact: PathBuf,

    /// Embedding vector length
    #[arg(long, default_value_t = 4)]
    dimensions: usize,

    /// Maximum nodes per random walk
    #[arg(long, default_value_t = 10)]
    walk_length: usize,

    /// Walks started from every node
    #[arg(long, default_value_t = 100)]
    walks_per_node: usize,

    /// Skip-gram context window
    #[arg(long, default_value_t = 5)]
    window: usize,

    /// Training passes over the walk corpus
    #[arg(long, default_value_t = 2)]
    epochs: usize,

    /// Worker shards for walk training
    #[arg(long, default_value_t = 4)]
    workers: usize,

    /// Fix the random seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let graph = store::load(&cli.artifact)?;
    println!(
        "Loaded graph: {} nodes, {} edges.",
        graph.node_count(),
        graph.edge_count()
    );

    let relabeled = relabel(&graph);
    if !is_weakly_connected(&relabeled) {
        eprintln!(
            "{} graph is not fully connected; embeddings from different \
             components are not comparable",
            "warning:".yellow().bold()
        );
    }

    let cfg = EmbedConfig {
        dimensions: cli.dimensions,
        walk_length: cli.walk_length,
        walks_per_node: cli.walks_per_node,
        window: cli.window,
        epochs: cli.epochs,
        workers: cli.workers,
        seed: cli.seed,
        ..EmbedConfig::default()
    };
    let embedding = embed(&relabeled, &cfg);

    for (id, vector) in &embedding.nodes {
        let meta = &graph.nodes[id];
        println!(
            "Node {} embedding: {} location: {}",
            id,
            fmt_vector(vector),
            meta.location
        );
    }
    for edge in &embedding.edges {
        println!(
            "Edge {} -> {} embedding: {}",
            edge.from,
            edge.to,
            fmt_vector(&edge.vector)
        );
    }
    for id in &embedding.unreached {
        eprintln!(
            "{} node {} never appeared in a walk; no embedding",
            "warning:".yellow().bold(),
            id
        );
    }
    println!(
        "Embedded {} node(s), {} edge(s) from {} walk(s) / {} token(s).",
        embedding.nodes.len(),
        embedding.edges.len(),
        embedding.walk_count,
        embedding.token_count
    );
    Ok(())
}

fn fmt_vector(v: &[f32]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}
