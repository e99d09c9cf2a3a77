// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynGraphError {
    #[error("I/O error: {source} (path: {})", .path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("file '{}' not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("cannot determine source language for '{}'", .0.display())]
    LanguageUnknown(PathBuf),

    #[error("syntax errors in '{}':\n{}", .path.display(), .diagnostics.join("\n"))]
    ParserDiagnostics {
        path: PathBuf,
        diagnostics: Vec<String>,
    },

    #[error("node identity collision on id '{0}'")]
    IdentityCollision(String),

    #[error("bad graph artifact '{}': {source}", .path.display())]
    Artifact {
        source: serde_json::Error,
        path: PathBuf,
    },
}

pub type Result<T> = std::result::Result<T, SynGraphError>;

// Allow `?` on std::io::Error by converting to SynGraphError::Io with unknown path.
impl From<std::io::Error> for SynGraphError {
    fn from(source: std::io::Error) -> Self {
        SynGraphError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}
