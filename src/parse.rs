// src/parse.rs
//! Parser collaborator: turns source files into owned `SyntaxNode` trees.
//!
//! The rest of the crate never touches tree-sitter; everything downstream of
//! `parse_file` works on `SyntaxNode` alone, so a different front end can be
//! swapped in behind this module.

use crate::error::{Result, SynGraphError};
use crate::lang::Lang;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser};

/// Where a syntax node came from. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub line: usize,
}

/// One node of a parsed syntax tree, detached from the parser that made it.
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    /// Syntactic category, e.g. `function_definition`.
    pub kind: String,
    /// Human name of the declared/referenced entity; empty when the node
    /// has no natural name.
    pub spelling: String,
    /// Missing for synthetic nodes; downstream code renders the sentinel
    /// `"unknown"` in that case.
    pub location: Option<SourceLocation>,
    pub children: Vec<SyntaxNode>,
}

// Children are dropped iteratively; Vec's recursive drop glue would blow the
// call stack on pathologically nested input.
impl Drop for SyntaxNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl SyntaxNode {
    /// Display label: spelling, falling back to the kind name.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.spelling.is_empty() {
            &self.kind
        } else {
            &self.spelling
        }
    }
}

/// Explicit parser configuration, passed at startup. No hidden globals.
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// Force a language instead of detecting from the file extension.
    pub language: Option<Lang>,
}

#[derive(Debug)]
pub struct ParseOutcome {
    pub root: SyntaxNode,
    /// Syntax problems reported by the parser, formatted `file:line: message`.
    pub diagnostics: Vec<String>,
}

/// Parses one source file into a `SyntaxNode` tree.
///
/// # Errors
///
/// Returns `InputNotFound` for a missing file, `LanguageUnknown` when the
/// extension is not recognized and no override is set, and
/// `ParserDiagnostics` when the grammar cannot be loaded at all. Syntax
/// errors inside an otherwise parseable file are NOT errors here; they are
/// returned as diagnostics for the caller's policy to resolve.
pub fn parse_file(path: &Path, config: &ParserConfig) -> Result<ParseOutcome> {
    if !path.is_file() {
        return Err(SynGraphError::InputNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|source| SynGraphError::Io {
        source,
        path: path.to_path_buf(),
    })?;

    let lang = match config.language {
        Some(lang) => lang,
        None => path
            .extension()
            .and_then(|s| s.to_str())
            .and_then(Lang::from_ext)
            .ok_or_else(|| SynGraphError::LanguageUnknown(path.to_path_buf()))?,
    };

    parse_source(&content, lang, path)
}

/// Parses in-memory source. Used by `parse_file` and directly by tests.
///
/// # Errors
///
/// Returns `ParserDiagnostics` only when the grammar itself cannot be
/// loaded or the parse aborts outright.
pub fn parse_source(content: &str, lang: Lang, path: &Path) -> Result<ParseOutcome> {
    let grammar = lang.grammar();
    let mut parser = Parser::new();
    parser
        .set_language(&grammar)
        .map_err(|e| SynGraphError::ParserDiagnostics {
            path: path.to_path_buf(),
            diagnostics: vec![format!("cannot load {} grammar: {e}", lang.name())],
        })?;

    let Some(tree) = parser.parse(content, None) else {
        return Err(SynGraphError::ParserDiagnostics {
            path: path.to_path_buf(),
            diagnostics: vec!["parse aborted".to_string()],
        });
    };

    let mut diagnostics = Vec::new();
    let root = convert(tree.root_node(), content, path, &mut diagnostics);
    Ok(ParseOutcome { root, diagnostics })
}

// Builds the owned tree without recursing: one frame per open node, children
// appended as their subtrees complete.
fn convert(root: Node, source: &str, file: &Path, diagnostics: &mut Vec<String>) -> SyntaxNode {
    struct Frame<'a> {
        node: Node<'a>,
        built: SyntaxNode,
        next_child: usize,
    }

    let mut stack = vec![Frame {
        built: make_node(root, source, file, diagnostics),
        next_child: 0,
        node: root,
    }];

    loop {
        let top = stack.len() - 1;
        let frame = &mut stack[top];
        if let Some(child) = frame.node.named_child(frame.next_child) {
            frame.next_child += 1;
            stack.push(Frame {
                built: make_node(child, source, file, diagnostics),
                next_child: 0,
                node: child,
            });
        } else {
            let done = match stack.pop() {
                Some(f) => f.built,
                None => unreachable!("stack holds at least the root"),
            };
            match stack.last_mut() {
                Some(parent) => parent.built.children.push(done),
                None => return done,
            }
        }
    }
}

fn make_node(node: Node, source: &str, file: &Path, diagnostics: &mut Vec<String>) -> SyntaxNode {
    let line = node.start_position().row + 1;
    if node.is_error() {
        diagnostics.push(format!("{}:{line}: syntax error", file.display()));
    } else if node.is_missing() {
        diagnostics.push(format!(
            "{}:{line}: missing '{}'",
            file.display(),
            node.kind()
        ));
    }

    SyntaxNode {
        kind: node.kind().to_string(),
        spelling: spelling_of(node, source),
        location: Some(SourceLocation {
            file: file.to_path_buf(),
            line,
        }),
        children: Vec::new(),
    }
}

// Named declarations expose a `name` field; bare identifier nodes are their
// own spelling. Everything else stays anonymous.
fn spelling_of(node: Node, source: &str) -> String {
    if let Some(name) = node.child_by_field_name("name") {
        if let Ok(text) = name.utf8_text(source.as_bytes()) {
            return text.to_string();
        }
    }
    if node.kind().ends_with("identifier") && node.named_child_count() == 0 {
        if let Ok(text) = node.utf8_text(source.as_bytes()) {
            return text.to_string();
        }
    }
    String::new()
}

/// Renders an indented textual AST for the `--dump-ast` flag.
#[must_use]
pub fn dump(root: &SyntaxNode) -> String {
    let mut out = String::new();
    let mut stack = vec![(root, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        let loc = match &node.location {
            Some(l) => format!("{}:{}", l.file.display(), l.line),
            None => "unknown".to_string(),
        };
        let _ = writeln!(
            out,
            "{:indent$}{} '{}' <{}>",
            "",
            node.kind,
            node.spelling,
            loc,
            indent = depth * 2
        );
        for child in node.children.iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_rust_function_has_spelling() {
        let out = parse_source("fn main() {}", Lang::Rust, Path::new("a.rs")).unwrap();
        assert!(out.diagnostics.is_empty());
        let func = &out.root.children[0];
        assert_eq!(func.kind, "function_item");
        assert_eq!(func.spelling, "main");
        assert_eq!(func.label(), "main");
    }

    #[test]
    fn test_broken_source_yields_diagnostics() {
        let out = parse_source("fn main( {", Lang::Rust, Path::new("a.rs")).unwrap();
        assert!(!out.diagnostics.is_empty());
    }

    #[test]
    fn test_locations_are_one_based() {
        let out = parse_source("\nfn f() {}", Lang::Rust, Path::new("a.rs")).unwrap();
        let func = &out.root.children[0];
        assert_eq!(func.location.as_ref().unwrap().line, 2);
    }

    #[test]
    fn test_dump_mentions_every_node() {
        let out = parse_source("fn f() { let x = 1; }", Lang::Rust, Path::new("a.rs")).unwrap();
        let text = dump(&out.root);
        assert!(text.contains("function_item 'f'"));
        assert!(text.contains("a.rs:1"));
    }
}
