//! Render a syntax subtree back into a short display expression.
//!
//! This is not an unparser: it covers identifiers, literals, operator and
//! method calls, and falls back to the lower-cased kind name for anything
//! else. Used for branch conditions and comparison operands.

use crate::syntax::Node;

/// Reconstruct a short textual form of `node`.
///
/// Total over every node kind; recursion is bounded by tree depth.
pub fn reconstruct_expression(node: &Node) -> String {
    match node {
        Node::LocalVariable(name) | Node::InstanceVariable(name) => name.clone(),
        Node::Integer(value) => value.to_string(),
        Node::Str(text) => format!("\"{}\"", text),
        Node::Symbol(name) => format!(":{}", name),
        Node::OperatorCall {
            receiver,
            operator,
            argument,
        } => {
            let right = argument
                .as_deref()
                .map(reconstruct_expression)
                .unwrap_or_default();
            format!("{} {} {}", reconstruct_expression(receiver), operator, right)
        }
        Node::Logical {
            operator,
            left,
            right,
        } => format!(
            "{} {} {}",
            reconstruct_expression(left),
            operator,
            reconstruct_expression(right)
        ),
        Node::Call {
            receiver: Some(receiver),
            name,
            ..
        } => format!("{}.{}", reconstruct_expression(receiver), name),
        Node::Call { name, .. } => name.clone(),
        Node::Constant(name) | Node::Raw(name) => name.clone(),
        other => other.kind_name().to_lowercase(),
    }
}

/// Reconstruct an optional subtree; absent nodes render as an empty string.
pub(crate) fn reconstruct_optional(node: Option<&Node>) -> String {
    node.map(reconstruct_expression).unwrap_or_default()
}
