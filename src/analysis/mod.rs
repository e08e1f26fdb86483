//! Structural extraction engine.
//!
//! Given a syntax tree for one class/module source file, this module derives:
//! - the constant path of the target declaration (`constant_path`)
//! - its directly-declared methods (`methods`)
//! - per method, branches (`branches`) and comparisons (`comparisons`)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌──────────────┐
//! │ syntax::Node│────▶│ constant_path    │────▶│ ConstantPath │
//! └─────────────┘     │ (root + target)  │     └──────────────┘
//!                     └────────┬─────────┘
//!                              │ target
//!                              ▼
//!                     ┌──────────────────┐     ┌──────────────┐
//!                     │ methods          │────▶│ MethodInfo[] │
//!                     │  ├─ branches     │     └──────────────┘
//!                     │  └─ comparisons  │
//!                     └──────────────────┘
//! ```
//!
//! Every function here is pure: the tree is only read, and each call returns
//! freshly built records.

mod branches;
mod comparisons;
mod constant_path;
mod expression;
mod facts;
mod methods;

pub use branches::analyze_branches;
pub use comparisons::analyze_comparisons;
pub use constant_path::{find_target, resolve_constant_path};
pub use expression::reconstruct_expression;
pub use facts::{
    Analysis, BranchInfo, BranchKind, ComparisonInfo, ComparisonOperator, ConstantPath,
    MethodInfo,
};
pub use methods::enumerate_methods;

use crate::error::Result;
use crate::syntax::Node;

/// Run the full extraction over a parsed source file.
pub fn analyze(root: &Node) -> Result<Analysis> {
    let constant = resolve_constant_path(root)?;
    let target = find_target(root)?;
    Ok(Analysis {
        constant,
        methods: enumerate_methods(target),
    })
}
