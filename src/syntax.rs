//! Syntax tree model consumed by the extraction engine.
//!
//! The tree is a closed set of node kinds: everything the analyzers need to
//! recognize (declarations, method definitions, conditionals, operators,
//! simple expressions) has its own variant, and everything else collapses
//! into [`Node::Scope`] (containers worth descending into) or [`Node::Other`]
//! (leaves). Front ends such as [`crate::parser::RubyParser`] lower their
//! concrete trees into this shape, so the analyzers never see parser types.

use std::fmt;

/// A node of a parsed class/module source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A sequence of statements (program, method body, branch body).
    Statements(Vec<Node>),
    /// `class Name ... end`
    Class(Declaration),
    /// `module Name ... end`
    Module(Declaration),
    /// `def name ... end` (instance methods only).
    Def(MethodDef),
    /// `if`, `x if cond` and the ternary operator.
    If(IfNode),
    /// `unless` and `x unless cond`.
    Unless(UnlessNode),
    /// `case subject when ... end`
    Case(CaseNode),
    /// `a && b`, `a and b`, `a || b`, `a or b`
    Logical {
        operator: LogicalOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// Binary operator application such as `age >= 18` or `a + b`.
    OperatorCall {
        receiver: Box<Node>,
        operator: String,
        argument: Option<Box<Node>>,
    },
    /// Method call, with or without an explicit receiver.
    Call {
        receiver: Option<Box<Node>>,
        name: String,
        arguments: Vec<Node>,
    },
    LocalVariable(String),
    /// Instance variable reference; the name keeps its `@` sigil.
    InstanceVariable(String),
    /// Constant reference, possibly scoped (`Foo::Bar`).
    Constant(String),
    Integer(i128),
    /// String literal contents, without delimiters, escaped for a
    /// double-quoted literal.
    Str(String),
    /// Symbol literal name, without the leading `:`.
    Symbol(String),
    /// Primitive value rendered verbatim (floats, `nil`, `true`, `self`, ...).
    Raw(String),
    /// Any other construct whose children are statements (`begin`, `while`, ...).
    Scope { kind: String, body: Vec<Node> },
    /// Unsupported construct. `kind` is a CamelCase kind name.
    Other { kind: String },
}

impl Node {
    /// Whether this node declares a class or module.
    pub fn is_declaration(&self) -> bool {
        matches!(self, Node::Class(_) | Node::Module(_))
    }

    /// The class/module declaration carried by this node, if any.
    pub fn as_declaration(&self) -> Option<&Declaration> {
        match self {
            Node::Class(decl) | Node::Module(decl) => Some(decl),
            _ => None,
        }
    }

    /// CamelCase name of the node's kind.
    pub fn kind_name(&self) -> &str {
        match self {
            Node::Statements(_) => "Statements",
            Node::Class(_) => "Class",
            Node::Module(_) => "Module",
            Node::Def(_) => "Def",
            Node::If(_) => "If",
            Node::Unless(_) => "Unless",
            Node::Case(_) => "Case",
            Node::Logical { .. } => "Logical",
            Node::OperatorCall { .. } => "OperatorCall",
            Node::Call { .. } => "Call",
            Node::LocalVariable(_) => "LocalVariable",
            Node::InstanceVariable(_) => "InstanceVariable",
            Node::Constant(_) => "Constant",
            Node::Integer(_) => "Integer",
            Node::Str(_) => "Str",
            Node::Symbol(_) => "Symbol",
            Node::Raw(_) => "Raw",
            Node::Scope { kind, .. } | Node::Other { kind } => kind,
        }
    }
}

/// A class or module declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Declared name as written in the head (`Foo`, `Foo::Bar`).
    pub name: ConstantRef,
    /// Body statements. `None` when the declaration has no body at all.
    pub body: Option<Vec<Node>>,
}

impl Declaration {
    /// Body statements, empty when the declaration has no body.
    pub fn statements(&self) -> &[Node] {
        self.body.as_deref().unwrap_or(&[])
    }

    /// First class/module declared directly in the body.
    pub fn first_nested(&self) -> Option<&Node> {
        self.statements().iter().find(|n| n.is_declaration())
    }
}

/// The name chain in a declaration head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstantRef {
    /// `Foo`
    Bare(String),
    /// `Scope::Foo`
    Scoped { scope: Box<ConstantRef>, name: String },
    /// `::Foo`
    TopLevel(String),
}

impl ConstantRef {
    /// Convenience constructor for a `A::B::C` chain.
    pub fn from_segments<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut iter = segments.into_iter();
        let mut current = ConstantRef::Bare(iter.next()?.into());
        for segment in iter {
            current = ConstantRef::Scoped {
                scope: Box::new(current),
                name: segment.into(),
            };
        }
        Some(current)
    }

    /// Whether the head is already qualified (`A::B`).
    pub fn is_scoped(&self) -> bool {
        matches!(self, ConstantRef::Scoped { .. })
    }
}

impl fmt::Display for ConstantRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantRef::Bare(name) | ConstantRef::TopLevel(name) => write!(f, "{}", name),
            ConstantRef::Scoped { scope, name } => write!(f, "{}::{}", scope, name),
        }
    }
}

/// An instance method definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    pub name: String,
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfNode {
    pub condition: Box<Node>,
    pub then_body: Option<Box<Node>>,
    /// Chained `elsif` clause, itself an [`Node::If`].
    pub elsif: Option<Box<Node>>,
    pub else_body: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlessNode {
    pub condition: Box<Node>,
    pub body: Option<Box<Node>>,
    pub else_body: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseNode {
    /// The value being switched on. `case` without a subject has none.
    pub subject: Option<Box<Node>>,
    pub whens: Vec<WhenClause>,
    pub else_body: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhenClause {
    pub patterns: Vec<Node>,
    pub body: Option<Box<Node>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "&&",
            LogicalOperator::Or => "||",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
