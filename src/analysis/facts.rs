//! Records produced by the extraction engine.

use std::fmt;

use serde::Serialize;

/// Fully-qualified name of the analyzed class/module and its namespace shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantPath {
    /// `::`-joined path, e.g. "User::Profile".
    pub path: String,
    /// A class/module is declared directly inside the root's body.
    pub nested: bool,
    /// The root's head is itself qualified (`class User::Profile`).
    pub compact: bool,
}

/// A directly-declared method and what was found inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodInfo {
    pub name: String,
    pub branches: Vec<BranchInfo>,
    pub comparisons: Vec<ComparisonInfo>,
}

impl MethodInfo {
    /// A method with no branches or comparisons.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            branches: Vec::new(),
            comparisons: Vec::new(),
        }
    }
}

/// Kind of branching construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchKind {
    If,
    Unless,
    Case,
}

impl BranchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BranchKind::If => "if",
            BranchKind::Unless => "unless",
            BranchKind::Case => "case",
        }
    }
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One conditional construct and its reconstructed guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchInfo {
    #[serde(rename = "type")]
    pub kind: BranchKind,
    pub condition: String,
}

/// The comparison operators the analyzer reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComparisonOperator {
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
}

impl ComparisonOperator {
    /// Map an operator symbol to a comparison. Any other operator is not one.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            ">=" => Some(Self::GreaterOrEqual),
            "<=" => Some(Self::LessOrEqual),
            ">" => Some(Self::Greater),
            "<" => Some(Self::Less),
            "==" => Some(Self::Equal),
            "!=" => Some(Self::NotEqual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::Less => "<",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One binary comparison and its operand text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonInfo {
    pub operator: ComparisonOperator,
    pub left: String,
    pub right: String,
    /// "<left> <operator> <right>"
    pub context: String,
}

impl ComparisonInfo {
    pub fn new(operator: ComparisonOperator, left: String, right: String) -> Self {
        let context = format!("{} {} {}", left, operator, right);
        Self {
            operator,
            left,
            right,
            context,
        }
    }
}

/// Everything extracted from one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub constant: ConstantPath,
    pub methods: Vec<MethodInfo>,
}
