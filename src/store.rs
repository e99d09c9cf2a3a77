// src/store.rs
//! Store/Renderer collaborator.
//!
//! Persists a finished graph under an output directory (created if absent)
//! as two artifacts: a JSON file that round-trips the full data model for
//! the embedding stage, and a Graphviz DOT render for visualization. The
//! embedding stage is owed nothing about the DOT side.

use crate::error::{Result, SynGraphError};
use crate::graph::{Graph, Relation};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes `<name>.json` and `<name>.dot` under `out_dir`.
///
/// # Errors
///
/// Fails only on I/O problems; serialization of a well-formed graph cannot
/// fail.
pub fn save(graph: &Graph, name: &str, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).map_err(|source| SynGraphError::Io {
        source,
        path: out_dir.to_path_buf(),
    })?;

    let json_path = out_dir.join(format!("{name}.json"));
    let json = serde_json::to_string_pretty(graph).map_err(|source| SynGraphError::Artifact {
        source,
        path: json_path.clone(),
    })?;
    fs::write(&json_path, json).map_err(|source| SynGraphError::Io {
        source,
        path: json_path.clone(),
    })?;

    let dot_path = out_dir.join(format!("{name}.dot"));
    fs::write(&dot_path, render_dot(graph)).map_err(|source| SynGraphError::Io {
        source,
        path: dot_path.clone(),
    })?;

    Ok(vec![json_path, dot_path])
}

/// Loads a previously saved JSON graph artifact.
///
/// # Errors
///
/// Returns `InputNotFound` for a missing path and `Artifact` for a file
/// that does not deserialize as a graph.
pub fn load(path: &Path) -> Result<Graph> {
    if !path.is_file() {
        return Err(SynGraphError::InputNotFound(path.to_path_buf()));
    }
    let data = fs::read_to_string(path).map_err(|source| SynGraphError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    serde_json::from_str(&data).map_err(|source| SynGraphError::Artifact {
        source,
        path: path.to_path_buf(),
    })
}

/// Graphviz rendering: structural edges solid, sequence edges dashed.
#[must_use]
pub fn render_dot(graph: &Graph) -> String {
    let mut out = String::from("digraph ast {\n  rankdir=TB;\n  node [shape=box, fontsize=10];\n");
    for node in graph.nodes.values() {
        let _ = writeln!(
            out,
            "  \"{}\" [label=\"{}\\n{}\"];",
            escape(node.id.as_str()),
            escape(&node.label),
            escape(&node.location)
        );
    }
    for edge in &graph.edges {
        let style = match edge.relation {
            Relation::Structural => "solid",
            Relation::Sequence => "dashed",
        };
        let _ = writeln!(
            out,
            "  \"{}\" -> \"{}\" [style={style}];",
            escape(edge.from.as_str()),
            escape(edge.to.as_str())
        );
    }
    out.push_str("}\n");
    out
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
