//! Igata - test skeleton generator for Ruby classes.
//!
//! Igata reads a single class or module definition and derives structured
//! facts about it: its fully-qualified constant path (simple, compact,
//! nested or mixed), its directly-declared methods, and per method the
//! `if`/`unless`/`case` branches and comparison expressions it contains.
//! Those facts are rendered into a Minitest or RSpec skeleton, or JSON.
//!
//! # Architecture
//!
//! - `syntax`: closed syntax tree model the analyzers consume
//! - `parser`: tree-sitter front end lowering Ruby source into `syntax`
//! - `analysis`: constant path, method, branch and comparison extraction
//! - `report`: output formatters
//! - `config`: YAML configuration
//! - `cli`: command-line interface
//!
//! # Example
//!
//! ```no_run
//! let igata = igata::Igata::new("class User\n  def greeting; end\nend\n")?;
//! print!("{}", igata.generate("rspec")?);
//! # Ok::<(), igata::Error>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod report;
pub mod syntax;

pub use analysis::{
    analyze, enumerate_methods, find_target, reconstruct_expression, resolve_constant_path,
    Analysis, BranchInfo, BranchKind, ComparisonInfo, ComparisonOperator, ConstantPath,
    MethodInfo,
};
pub use config::Config;
pub use error::{Error, Result};
pub use parser::Parser;
pub use report::{formatter_for, Formatter, RenderContext};
pub use syntax::Node;

/// A parsed source file ready for analysis and rendering.
pub struct Igata {
    root: Node,
}

impl Igata {
    /// Parse Ruby source with the default front end.
    pub fn new(source: &str) -> Result<Self> {
        Ok(Self {
            root: parser::parse(source)?,
        })
    }

    /// Extract the constant path and method records.
    pub fn analysis(&self) -> Result<Analysis> {
        analyze(&self.root)
    }

    /// Render an annotated skeleton with the named formatter.
    pub fn generate(&self, formatter: &str) -> Result<String> {
        self.generate_with(formatter, true)
    }

    /// Render a skeleton, choosing whether stubs carry branch/comparison comments.
    pub fn generate_with(&self, formatter: &str, annotate: bool) -> Result<String> {
        let formatter = formatter_for(formatter)?;
        let analysis = self.analysis()?;
        formatter.generate(&RenderContext::new(&analysis).annotate(annotate))
    }
}
