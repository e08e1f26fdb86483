//! Branch extraction: `if`, `unless` and `case` constructs in a method body.

use super::expression::{reconstruct_expression, reconstruct_optional};
use super::facts::{BranchInfo, BranchKind};
use crate::syntax::{MethodDef, Node};

/// Collect the branches of a method body in pre-order.
pub fn analyze_branches(method: &MethodDef) -> Vec<BranchInfo> {
    collect_all(&method.body)
}

fn collect_all<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Vec<BranchInfo> {
    nodes.into_iter().flat_map(collect).collect()
}

fn collect_optional(node: Option<&Node>) -> Vec<BranchInfo> {
    node.map(collect).unwrap_or_default()
}

fn collect(node: &Node) -> Vec<BranchInfo> {
    match node {
        Node::If(branch) => {
            let mut found = vec![BranchInfo {
                kind: BranchKind::If,
                condition: reconstruct_expression(&branch.condition),
            }];
            found.extend(collect_optional(branch.then_body.as_deref()));
            found.extend(collect_optional(branch.elsif.as_deref()));
            found.extend(collect_optional(branch.else_body.as_deref()));
            found
        }
        Node::Unless(branch) => {
            let mut found = vec![BranchInfo {
                kind: BranchKind::Unless,
                condition: reconstruct_expression(&branch.condition),
            }];
            found.extend(collect_optional(branch.body.as_deref()));
            found.extend(collect_optional(branch.else_body.as_deref()));
            found
        }
        Node::Case(case) => {
            let mut found = vec![BranchInfo {
                kind: BranchKind::Case,
                condition: reconstruct_optional(case.subject.as_deref()),
            }];
            let bodies = case
                .whens
                .iter()
                .filter_map(|w| w.body.as_deref())
                .chain(case.else_body.as_deref());
            found.extend(collect_all(bodies));
            found
        }
        Node::Statements(body) | Node::Scope { body, .. } => collect_all(body),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{CaseNode, IfNode, UnlessNode, WhenClause};

    fn local(name: &str) -> Node {
        Node::LocalVariable(name.to_string())
    }

    fn op(left: Node, operator: &str, right: Node) -> Node {
        Node::OperatorCall {
            receiver: Box::new(left),
            operator: operator.to_string(),
            argument: Some(Box::new(right)),
        }
    }

    fn body(nodes: Vec<Node>) -> Option<Box<Node>> {
        Some(Box::new(Node::Statements(nodes)))
    }

    fn if_node(condition: Node, then_body: Vec<Node>, else_body: Option<Vec<Node>>) -> Node {
        Node::If(IfNode {
            condition: Box::new(condition),
            then_body: body(then_body),
            elsif: None,
            else_body: else_body.and_then(body),
        })
    }

    fn method(body: Vec<Node>) -> MethodDef {
        MethodDef {
            name: "check".to_string(),
            body,
        }
    }

    fn kinds(branches: &[BranchInfo]) -> Vec<BranchKind> {
        branches.iter().map(|b| b.kind).collect()
    }

    #[test]
    fn test_no_branches() {
        let result = analyze_branches(&method(vec![Node::Str("Hello".to_string())]));
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_method() {
        assert!(analyze_branches(&method(vec![])).is_empty());
    }

    #[test]
    fn test_single_if_else() {
        let tree = if_node(
            op(local("value"), ">", Node::Integer(0)),
            vec![Node::Str("positive".to_string())],
            Some(vec![Node::Str("non-positive".to_string())]),
        );
        let result = analyze_branches(&method(vec![tree]));
        assert_eq!(
            result,
            vec![BranchInfo {
                kind: BranchKind::If,
                condition: "value > 0".to_string(),
            }]
        );
    }

    #[test]
    fn test_unless_with_method_call_condition() {
        let tree = Node::Unless(UnlessNode {
            condition: Box::new(Node::Call {
                receiver: Some(Box::new(local("user"))),
                name: "valid?".to_string(),
                arguments: vec![],
            }),
            body: body(vec![]),
            else_body: None,
        });
        let result = analyze_branches(&method(vec![tree]));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, BranchKind::Unless);
        assert_eq!(result[0].condition, "user.valid?");
    }

    #[test]
    fn test_case_emits_single_record() {
        let tree = Node::Case(CaseNode {
            subject: Some(Box::new(Node::InstanceVariable("@role".to_string()))),
            whens: vec![
                WhenClause {
                    patterns: vec![Node::Str("admin".to_string())],
                    body: body(vec![Node::Str("Administrator".to_string())]),
                },
                WhenClause {
                    patterns: vec![Node::Str("moderator".to_string())],
                    body: body(vec![Node::Str("Moderator".to_string())]),
                },
            ],
            else_body: body(vec![Node::Str("User".to_string())]),
        });
        let result = analyze_branches(&method(vec![tree]));
        assert_eq!(
            result,
            vec![BranchInfo {
                kind: BranchKind::Case,
                condition: "@role".to_string(),
            }]
        );
    }

    #[test]
    fn test_case_without_subject_has_empty_condition() {
        let tree = Node::Case(CaseNode {
            subject: None,
            whens: vec![],
            else_body: None,
        });
        let result = analyze_branches(&method(vec![tree]));
        assert_eq!(result[0].condition, "");
    }

    #[test]
    fn test_branches_inside_when_bodies() {
        let inner = if_node(local("premium"), vec![], None);
        let tree = Node::Case(CaseNode {
            subject: Some(Box::new(local("code"))),
            whens: vec![WhenClause {
                patterns: vec![Node::Integer(200)],
                body: body(vec![inner]),
            }],
            else_body: None,
        });
        let result = analyze_branches(&method(vec![tree]));
        assert_eq!(kinds(&result), vec![BranchKind::Case, BranchKind::If]);
        assert_eq!(result[1].condition, "premium");
    }

    #[test]
    fn test_multiple_branches_in_document_order() {
        let first = if_node(op(local("age"), ">=", Node::Integer(18)), vec![], None);
        let second = Node::Unless(UnlessNode {
            condition: Box::new(op(local("role"), "==", Node::Symbol("guest".to_string()))),
            body: body(vec![]),
            else_body: None,
        });
        let result = analyze_branches(&method(vec![first, second]));
        assert_eq!(kinds(&result), vec![BranchKind::If, BranchKind::Unless]);
        assert_eq!(result[1].condition, "role == :guest");
    }

    #[test]
    fn test_nested_branches_are_pre_order() {
        let inner = if_node(local("premium"), vec![], Some(vec![]));
        let outer = if_node(op(local("age"), ">=", Node::Integer(18)), vec![inner], None);
        let result = analyze_branches(&method(vec![outer]));
        assert_eq!(
            result
                .iter()
                .map(|b| b.condition.as_str())
                .collect::<Vec<_>>(),
            vec!["age >= 18", "premium"]
        );
    }

    #[test]
    fn test_elsif_chain_is_traversed_before_else() {
        let elsif = Node::If(IfNode {
            condition: Box::new(op(local("score"), ">", Node::Integer(50))),
            then_body: None,
            elsif: None,
            else_body: None,
        });
        let tree = Node::If(IfNode {
            condition: Box::new(op(local("score"), ">", Node::Integer(80))),
            then_body: None,
            elsif: Some(Box::new(elsif)),
            else_body: body(vec![if_node(local("retry"), vec![], None)]),
        });
        let result = analyze_branches(&method(vec![tree]));
        assert_eq!(
            result
                .iter()
                .map(|b| b.condition.as_str())
                .collect::<Vec<_>>(),
            vec!["score > 80", "score > 50", "retry"]
        );
    }

    #[test]
    fn test_scope_is_transparent_and_calls_are_leaves() {
        let in_loop = Node::Scope {
            kind: "While".to_string(),
            body: vec![if_node(local("done"), vec![], None)],
        };
        let in_block = Node::Call {
            receiver: Some(Box::new(local("items"))),
            name: "each".to_string(),
            arguments: vec![if_node(local("skipped"), vec![], None)],
        };
        let result = analyze_branches(&method(vec![in_loop, in_block]));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].condition, "done");
    }

    #[test]
    fn test_exotic_condition_uses_fallback_text() {
        let tree = if_node(
            Node::Other {
                kind: "Unary".to_string(),
            },
            vec![],
            None,
        );
        let result = analyze_branches(&method(vec![tree]));
        assert_eq!(result[0].condition, "unary");
    }
}
