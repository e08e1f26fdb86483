//! Resolve the fully-qualified name of the analyzed class/module.
//!
//! Four shapes are distinguished:
//!
//! ```text
//! class User                      -> User                (simple)
//! class User::Profile             -> User::Profile       (compact)
//! class User; class Profile       -> User::Profile       (nested)
//! class App::User; class Profile  -> App::User::Profile  (mixed)
//! ```
//!
//! Nested paths follow the first class/module declared in each body, and each
//! level contributes its own head, which may itself be compact.

use tracing::debug;

use super::facts::ConstantPath;
use crate::error::{Error, Result};
use crate::syntax::{Declaration, Node};

const SEPARATOR: &str = "::";

/// Resolve the constant path of the first class/module in `root`.
pub fn resolve_constant_path(root: &Node) -> Result<ConstantPath> {
    let decl = root_declaration(root)
        .and_then(Node::as_declaration)
        .ok_or(Error::NoDeclaration)?;

    let compact = decl.name.is_scoped();
    let head = decl.name.to_string();
    let nested_path = build_nested_path(decl);
    let nested = nested_path.is_some();

    let path = match nested_path {
        Some(inner) => format!("{}{}{}", head, SEPARATOR, inner),
        None => head,
    };

    debug!(path = %path, nested, compact, "resolved constant path");
    Ok(ConstantPath {
        path,
        nested,
        compact,
    })
}

/// The class/module whose methods should be enumerated: the deepest
/// declaration along the first-nested chain, or the root itself.
pub fn find_target(root: &Node) -> Result<&Node> {
    let mut current = root_declaration(root).ok_or(Error::NoDeclaration)?;
    while let Some(child) = current.as_declaration().and_then(Declaration::first_nested) {
        current = child;
    }
    Ok(current)
}

/// The root class/module: `root` itself, or the first declaration among the
/// top-level statements.
fn root_declaration(root: &Node) -> Option<&Node> {
    match root {
        Node::Class(_) | Node::Module(_) => Some(root),
        Node::Statements(statements) => statements.iter().find(|n| n.is_declaration()),
        _ => None,
    }
}

/// Path of the declarations nested under `parent`, or `None` when its body
/// declares no class/module directly.
fn build_nested_path(parent: &Declaration) -> Option<String> {
    let child = parent.first_nested()?.as_declaration()?;
    let child_path = child.name.to_string();
    match build_nested_path(child) {
        Some(deeper) => Some(format!("{}{}{}", child_path, SEPARATOR, deeper)),
        None => Some(child_path),
    }
}
