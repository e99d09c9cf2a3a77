// src/bin/syngraph.rs
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;

use syngraph::graph::build::build;
use syngraph::graph::combine::combine;
use syngraph::graph::Graph;
use syngraph::lang::Lang;
use syngraph::parse::{self, ParserConfig};
use syngraph::store;

#[derive(Parser)]
#[command(name = "syngraph", version, about = "Build a combined AST graph from source files")]
struct Cli {
    /// Source files to parse
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Proceed despite parser diagnostics (they are still printed)
    #[arg(long)]
    ignore_diagnostics: bool,

    /// Print an indented AST dump for each file
    #[arg(long)]
    dump_ast: bool,

    /// Directory for the graph artifacts, created if absent
    #[arg(long, default_value = "graphs", value_name = "DIR")]
    out_dir: PathBuf,

    /// Force a source language instead of detecting by extension
    #[arg(long, value_enum)]
    lang: Option<Lang>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = ParserConfig { language: cli.lang };

    // Abort-all policy: the first unit with a missing file or unresolved
    // diagnostics stops the run before anything is written.
    let mut graphs = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        graphs.push(process_file(path, &config, &cli)?);
    }

    let combined = combine(graphs);
    for conflict in &combined.conflicts {
        eprintln!(
            "{} id '{}' merged conflicting attributes: kept {}, discarded {}",
            "warning:".yellow().bold(),
            conflict.id,
            conflict.kept,
            conflict.discarded
        );
    }

    report(&combined.graph, cli.files.len());

    let name = artifact_name(&cli.files);
    let written = store::save(&combined.graph, &name, &cli.out_dir)?;
    for path in written {
        println!("Saved {}", path.display());
    }
    Ok(())
}

fn process_file(path: &Path, config: &ParserConfig, cli: &Cli) -> Result<Graph> {
    let outcome = parse::parse_file(path, config)?;

    if !outcome.diagnostics.is_empty() {
        eprintln!(
            "{} syntax problems in '{}':",
            "warning:".yellow().bold(),
            path.display()
        );
        for diag in &outcome.diagnostics {
            eprintln!("  {diag}");
        }
        if !cli.ignore_diagnostics {
            bail!(
                "unresolved diagnostics in '{}' (use --ignore-diagnostics to proceed)",
                path.display()
            );
        }
    }

    if cli.dump_ast {
        print!("{}", parse::dump(&outcome.root));
    }

    Ok(build(&outcome.root))
}

fn report(graph: &Graph, file_count: usize) {
    for node in graph.nodes.values() {
        println!("Node: {} Location: {}", node.id, node.location);
    }
    println!(
        "Generated graph with {file_count} file(s): {} nodes, {} edges.",
        graph.node_count(),
        graph.edge_count()
    );
}

fn artifact_name(files: &[PathBuf]) -> String {
    let stems: Vec<&str> = files
        .iter()
        .filter_map(|p| p.file_stem().and_then(|s| s.to_str()))
        .collect();
    match stems.as_slice() {
        [only] => (*only).to_string(),
        many => format!("combined_{}", many.join("+")),
    }
}
