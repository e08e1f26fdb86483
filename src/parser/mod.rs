//! Source front ends that lower concrete parse trees into [`crate::syntax::Node`].
//!
//! This module provides:
//! - `Parser` trait: abstract interface for language front ends
//! - `RubyParser`: tree-sitter implementation for Ruby

use crate::error::Result;
use crate::syntax::Node;

#[cfg(feature = "tree-sitter")]
pub mod ruby;

#[cfg(feature = "tree-sitter")]
pub use ruby::RubyParser;

/// Parser trait for turning source text into the analyzable syntax tree.
pub trait Parser: Send + Sync {
    /// Parse source code into a `Node::Statements` root.
    ///
    /// Recoverable syntax errors still produce a tree; only a front end that
    /// yields no tree at all is an error.
    fn parse(&self, source: &str) -> Result<Node>;

    /// Return the language this parser handles (e.g., "ruby").
    fn language(&self) -> &str;
}

/// Parse Ruby source with the default front end.
#[cfg(feature = "tree-sitter")]
pub fn parse(source: &str) -> Result<Node> {
    RubyParser::new().parse(source)
}

/// Without tree-sitter there is no built-in front end.
#[cfg(not(feature = "tree-sitter"))]
pub fn parse(_source: &str) -> Result<Node> {
    Err(crate::error::Error::Parse(
        "built without the tree-sitter feature".to_string(),
    ))
}
