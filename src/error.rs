//! Error types for igata.

use thiserror::Error;

/// Errors surfaced by parsing, analysis and formatting.
#[derive(Error, Debug)]
pub enum Error {
    /// The source contains no class or module declaration to analyze.
    #[error("no class or module declaration found")]
    NoDeclaration,
    #[error("failed to parse source: {0}")]
    Parse(String),
    #[error("unknown formatter {0:?} (available: {1})")]
    UnknownFormatter(String, String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Config(#[from] serde_yaml::Error),
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
