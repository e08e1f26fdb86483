//! Ruby front end using tree-sitter.
//!
//! The concrete tree-sitter tree is walked once and lowered into the closed
//! [`Node`] model. Constructs the analyzers do not care about become
//! [`Node::Other`] leaves, and statement containers (`begin`, `while`, ...)
//! become [`Node::Scope`] so their contents are still reachable.

use tracing::warn;
use tree_sitter::{Language, Node as TsNode, Parser as TsParser};

use super::Parser;
use crate::error::{Error, Result};
use crate::syntax::{
    CaseNode, ConstantRef, Declaration, IfNode, LogicalOperator, MethodDef, Node, UnlessNode,
    WhenClause,
};

pub struct RubyParser {
    language: Language,
}

impl RubyParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_ruby::LANGUAGE.into(),
        }
    }

    fn create_parser(&self) -> Result<TsParser> {
        let mut parser = TsParser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| Error::Parse(e.to_string()))?;
        Ok(parser)
    }
}

impl Default for RubyParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for RubyParser {
    fn parse(&self, source: &str) -> Result<Node> {
        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| Error::Parse("tree-sitter returned no tree".to_string()))?;

        let root = tree.root_node();
        if root.has_error() {
            warn!("source contains syntax errors, analyzing the recovered tree");
        }

        let lowering = Lowering {
            source: source.as_bytes(),
        };
        Ok(Node::Statements(lowering.lower_children(root)))
    }

    fn language(&self) -> &str {
        "ruby"
    }
}

/// Named children, skipping comments.
fn named_children<'t>(node: TsNode<'t>) -> Vec<TsNode<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// `if_modifier` -> `IfModifier`
fn camel_case(kind: &str) -> String {
    kind.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let lower = part.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Parse a Ruby integer literal (`1_000`, `0x1F`, `0b101`, `0o17`, `017`).
fn parse_integer(text: &str) -> Option<i128> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    let (negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
    };

    let lower = digits.to_ascii_lowercase();
    let (radix, body) = if let Some(rest) = lower.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (2, rest)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (8, rest)
    } else if let Some(rest) = lower.strip_prefix("0d") {
        (10, rest)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..])
    } else {
        (10, lower.as_str())
    };

    let value = i128::from_str_radix(body, radix).ok()?;
    Some(if negative { -value } else { value })
}

/// Re-escape the contents of a single-quoted literal for double quotes.
///
/// Only `\\` and `\'` are escapes inside single quotes; any other backslash
/// is literal and has to be doubled.
fn requote_single(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        let value = match c {
            '\\' if matches!(chars.peek(), Some('\\') | Some('\'')) => chars.next().unwrap_or(c),
            _ => c,
        };
        match value {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '#' if matches!(chars.peek(), Some('{') | Some('@') | Some('$')) => out.push_str("\\#"),
            _ => out.push(value),
        }
    }
    out
}

/// Escape the bare `"` in the contents of a `%Q(...)` or `%(...)` literal.
fn escape_bare_quotes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}

struct Lowering<'s> {
    source: &'s [u8],
}

impl<'s> Lowering<'s> {
    fn text(&self, node: TsNode) -> &'s str {
        node.utf8_text(self.source).unwrap_or("")
    }

    fn lower_children(&self, node: TsNode) -> Vec<Node> {
        named_children(node)
            .into_iter()
            .map(|child| self.lower(child))
            .collect()
    }

    fn lower_field(&self, node: TsNode, field: &str) -> Option<Box<Node>> {
        node.child_by_field_name(field)
            .map(|child| Box::new(self.lower(child)))
    }

    fn lower_required(&self, node: TsNode, field: &str) -> Box<Node> {
        self.lower_field(node, field).unwrap_or_else(|| {
            Box::new(Node::Other {
                kind: "Missing".to_string(),
            })
        })
    }

    fn other(&self, node: TsNode) -> Node {
        Node::Other {
            kind: camel_case(node.kind()),
        }
    }

    fn lower(&self, node: TsNode) -> Node {
        match node.kind() {
            "program" | "body_statement" | "then" | "else" | "do" => {
                Node::Statements(self.lower_children(node))
            }
            "parenthesized_statements" => {
                let mut inner = self.lower_children(node);
                if inner.len() == 1 {
                    inner.remove(0)
                } else {
                    Node::Statements(inner)
                }
            }
            "class" => self
                .declaration(node, &["name", "superclass"])
                .map(Node::Class)
                .unwrap_or_else(|| self.other(node)),
            "module" => self
                .declaration(node, &["name"])
                .map(Node::Module)
                .unwrap_or_else(|| self.other(node)),
            "method" => self.method(node),
            "if" | "elsif" => self.if_node(node),
            "unless" => Node::Unless(UnlessNode {
                condition: self.lower_required(node, "condition"),
                body: self.lower_field(node, "consequence"),
                else_body: self.lower_field(node, "alternative"),
            }),
            "if_modifier" => Node::If(IfNode {
                condition: self.lower_required(node, "condition"),
                then_body: self.lower_field(node, "body"),
                elsif: None,
                else_body: None,
            }),
            "unless_modifier" => Node::Unless(UnlessNode {
                condition: self.lower_required(node, "condition"),
                body: self.lower_field(node, "body"),
                else_body: None,
            }),
            "conditional" => Node::If(IfNode {
                condition: self.lower_required(node, "condition"),
                then_body: self.lower_field(node, "consequence"),
                elsif: None,
                else_body: self.lower_field(node, "alternative"),
            }),
            "case" => self.case_node(node),
            "binary" => self.binary(node),
            "unary" => self.unary(node),
            "call" => self.call(node),
            "identifier" => Node::LocalVariable(self.text(node).to_string()),
            "instance_variable" => Node::InstanceVariable(self.text(node).to_string()),
            "constant" | "scope_resolution" => Node::Constant(self.text(node).to_string()),
            "integer" => {
                let text = self.text(node);
                parse_integer(text)
                    .map(Node::Integer)
                    .unwrap_or_else(|| Node::Raw(text.to_string()))
            }
            "float" | "rational" | "complex" | "nil" | "true" | "false" | "self"
            | "class_variable" | "global_variable" => Node::Raw(self.text(node).to_string()),
            "string" => Node::Str(self.string_literal(node)),
            "simple_symbol" => Node::Symbol(self.text(node).trim_start_matches(':').to_string()),
            "delimited_symbol" => Node::Symbol(self.delimited_content(node)),
            "begin" | "while" | "until" | "for" | "rescue" | "ensure" | "while_modifier"
            | "until_modifier" | "rescue_modifier" => Node::Scope {
                kind: camel_case(node.kind()),
                body: self.lower_children(node),
            },
            _ => self.other(node),
        }
    }

    fn declaration(&self, node: TsNode, head_fields: &[&str]) -> Option<Declaration> {
        let name = self.constant_ref(node.child_by_field_name("name")?);
        Some(Declaration {
            name,
            body: self.body(node, head_fields),
        })
    }

    /// Body statements of a class/module/method.
    ///
    /// Grammars that expose a `body` field wrap statements in `body_statement`;
    /// older ones list them as direct children after the head fields.
    fn body(&self, node: TsNode, head_fields: &[&str]) -> Option<Vec<Node>> {
        if let Some(body) = node.child_by_field_name("body") {
            return Some(match body.kind() {
                "body_statement" => self.lower_children(body),
                _ => vec![self.lower(body)],
            });
        }

        let head_ids: Vec<usize> = head_fields
            .iter()
            .filter_map(|field| node.child_by_field_name(field))
            .map(|child| child.id())
            .collect();
        let statements: Vec<Node> = named_children(node)
            .into_iter()
            .filter(|child| !head_ids.contains(&child.id()))
            .map(|child| self.lower(child))
            .collect();

        if statements.is_empty() {
            None
        } else {
            Some(statements)
        }
    }

    fn constant_ref(&self, node: TsNode) -> ConstantRef {
        if node.kind() != "scope_resolution" {
            return ConstantRef::Bare(self.text(node).to_string());
        }

        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(n).to_string())
            .unwrap_or_default();
        match node.child_by_field_name("scope") {
            Some(scope) => ConstantRef::Scoped {
                scope: Box::new(self.constant_ref(scope)),
                name,
            },
            None => ConstantRef::TopLevel(name),
        }
    }

    fn method(&self, node: TsNode) -> Node {
        let Some(name) = node.child_by_field_name("name") else {
            return self.other(node);
        };
        Node::Def(MethodDef {
            name: self.text(name).to_string(),
            body: self
                .body(node, &["name", "parameters"])
                .unwrap_or_default(),
        })
    }

    fn if_node(&self, node: TsNode) -> Node {
        let alternative = node.child_by_field_name("alternative");
        let (elsif, else_body) = match alternative {
            Some(alt) if alt.kind() == "elsif" => (Some(Box::new(self.lower(alt))), None),
            Some(alt) => (None, Some(Box::new(self.lower(alt)))),
            None => (None, None),
        };
        Node::If(IfNode {
            condition: self.lower_required(node, "condition"),
            then_body: self.lower_field(node, "consequence"),
            elsif,
            else_body,
        })
    }

    fn case_node(&self, node: TsNode) -> Node {
        let children = named_children(node);
        let whens = children
            .iter()
            .filter(|child| child.kind() == "when")
            .map(|when| self.when_clause(*when))
            .collect();
        let else_body = children
            .iter()
            .find(|child| child.kind() == "else")
            .map(|e| Box::new(self.lower(*e)));

        Node::Case(CaseNode {
            subject: self.lower_field(node, "value"),
            whens,
            else_body,
        })
    }

    fn when_clause(&self, node: TsNode) -> WhenClause {
        let body = node.child_by_field_name("body");
        let patterns = named_children(node)
            .into_iter()
            .filter(|child| Some(child.id()) != body.map(|b| b.id()))
            .map(|child| match (child.kind(), named_children(child).first()) {
                ("pattern", Some(inner)) => self.lower(*inner),
                _ => self.lower(child),
            })
            .collect();
        WhenClause {
            patterns,
            body: body.map(|b| Box::new(self.lower(b))),
        }
    }

    fn binary(&self, node: TsNode) -> Node {
        let operator = node
            .child_by_field_name("operator")
            .map(|op| self.text(op))
            .unwrap_or("");
        let left = self.lower_required(node, "left");
        let right = self.lower_required(node, "right");

        let logical = match operator {
            "&&" | "and" => Some(LogicalOperator::And),
            "||" | "or" => Some(LogicalOperator::Or),
            _ => None,
        };
        match logical {
            Some(operator) => Node::Logical {
                operator,
                left,
                right,
            },
            None => Node::OperatorCall {
                receiver: left,
                operator: operator.to_string(),
                argument: Some(right),
            },
        }
    }

    fn unary(&self, node: TsNode) -> Node {
        let operator = node.child_by_field_name("operator").map(|op| self.text(op));
        let operand = node.child_by_field_name("operand");
        if let (Some("-"), Some(operand)) = (operator, operand) {
            if operand.kind() == "integer" {
                if let Some(value) = parse_integer(self.text(operand)) {
                    return Node::Integer(-value);
                }
            }
        }
        self.other(node)
    }

    fn call(&self, node: TsNode) -> Node {
        let name = node
            .child_by_field_name("method")
            .map(|m| self.text(m).to_string())
            .unwrap_or_else(|| "call".to_string());
        let arguments = node
            .child_by_field_name("arguments")
            .map(|args| self.lower_children(args))
            .unwrap_or_default();
        Node::Call {
            receiver: self.lower_field(node, "receiver"),
            name,
            arguments,
        }
    }

    /// String contents in double-quoted form, whatever the source delimiters.
    fn string_literal(&self, node: TsNode) -> String {
        let raw = self.delimited_content(node);
        let text = self.text(node);
        if text.starts_with('"') {
            raw
        } else if text.starts_with('\'') || text.starts_with("%q") {
            requote_single(&raw)
        } else {
            escape_bare_quotes(&raw)
        }
    }

    /// Source text between the delimiters of a string or quoted symbol.
    fn delimited_content(&self, node: TsNode) -> String {
        let parts = named_children(node);
        match (parts.first(), parts.last()) {
            (Some(first), Some(last)) => {
                let bytes = &self.source[first.start_byte()..last.end_byte()];
                String::from_utf8_lossy(bytes).into_owned()
            }
            _ => String::new(),
        }
    }
}
