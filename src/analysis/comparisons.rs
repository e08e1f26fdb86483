//! Comparison extraction: `>=`, `<=`, `>`, `<`, `==` and `!=` in a method body.
//!
//! Logical operators and conditionals are transparent, so comparisons in
//! branch guards and branch bodies are found alike.

use super::expression::{reconstruct_expression, reconstruct_optional};
use super::facts::{ComparisonInfo, ComparisonOperator};
use crate::syntax::{MethodDef, Node};

/// Collect the comparisons of a method body in pre-order, left operand first.
pub fn analyze_comparisons(method: &MethodDef) -> Vec<ComparisonInfo> {
    collect_all(&method.body)
}

fn collect_all<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Vec<ComparisonInfo> {
    nodes.into_iter().flat_map(collect).collect()
}

fn collect(node: &Node) -> Vec<ComparisonInfo> {
    match node {
        Node::OperatorCall {
            receiver,
            operator,
            argument,
        } => match ComparisonOperator::from_symbol(operator) {
            Some(op) => vec![ComparisonInfo::new(
                op,
                reconstruct_expression(receiver),
                reconstruct_optional(argument.as_deref()),
            )],
            None => Vec::new(),
        },
        Node::Logical { left, right, .. } => collect_all([left.as_ref(), right.as_ref()]),
        Node::If(branch) => collect_all(
            std::iter::once(branch.condition.as_ref())
                .chain(branch.then_body.as_deref())
                .chain(branch.elsif.as_deref())
                .chain(branch.else_body.as_deref()),
        ),
        Node::Unless(branch) => collect_all(
            std::iter::once(branch.condition.as_ref())
                .chain(branch.body.as_deref())
                .chain(branch.else_body.as_deref()),
        ),
        Node::Case(case) => collect_all(
            case.subject
                .as_deref()
                .into_iter()
                .chain(case.whens.iter().filter_map(|w| w.body.as_deref()))
                .chain(case.else_body.as_deref()),
        ),
        Node::Statements(body) | Node::Scope { body, .. } => collect_all(body),
        _ => Vec::new(),
    }
}
