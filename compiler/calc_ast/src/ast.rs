//! Expression tree produced by the parser.
//!
//! The tree is strictly binary: operator nodes own a left and a right child,
//! function nodes own a single argument in `left`, and literals and
//! variables are leaves. Node categories form a closed set so evaluators can
//! match on them exhaustively.

use std::fmt;

use calc_lexer::{Token, TokenKind};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Numeric literal formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LiteralKind {
    /// Decimal integer, `42`
    Int,
    /// Decimal fraction, `4.2`
    Dec,
    /// Binary with `0b` prefix
    Bin,
    /// Hexadecimal with `0x` prefix
    Hex,
    /// `base^exponent`
    Exp,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operator {
    Add,
    Sub,
    Mult,
    Div,
    Mod,
    Or,
    Xor,
    And,
}

impl Operator {
    /// Binding strength; only `*` and `/` bind tighter than the rest.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Mult | Operator::Div => 1,
            Operator::Add
            | Operator::Sub
            | Operator::Mod
            | Operator::Or
            | Operator::Xor
            | Operator::And => 0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mult => "*",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::Or => "|",
            Operator::Xor => "^",
            Operator::And => "&",
        }
    }

    /// The operator a token denotes, if it is an operator token
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Operator::Add),
            TokenKind::Minus => Some(Operator::Sub),
            TokenKind::Mult => Some(Operator::Mult),
            TokenKind::Div => Some(Operator::Div),
            TokenKind::Mod => Some(Operator::Mod),
            TokenKind::Or => Some(Operator::Or),
            TokenKind::Xor => Some(Operator::Xor),
            TokenKind::And => Some(Operator::And),
            _ => None,
        }
    }
}

/// Built-in single-argument functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Function {
    Sqrt,
    Sin,
    Cos,
    Tan,
}

impl Function {
    pub fn name(&self) -> &'static str {
        match self {
            Function::Sqrt => "sqrt",
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
        }
    }

    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Sqrt => Some(Function::Sqrt),
            TokenKind::Sin => Some(Function::Sin),
            TokenKind::Cos => Some(Function::Cos),
            TokenKind::Tan => Some(Function::Tan),
            _ => None,
        }
    }
}

/// What a malformed node was meant to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InvalidKind {
    Number,
    Variable,
    Operator,
    Function,
}

/// The category of an AST node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeKind {
    Literal(LiteralKind),
    Variable,
    Operator(Operator),
    Function(Function),
    Invalid(InvalidKind),
    /// Placeholder carrying no meaning
    Error,
}

/// A node of the expression tree, owned exclusively by its parent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    pub kind: NodeKind,
    /// Source text for literals and variables, the symbol or name otherwise
    pub text: String,
    pub left: Option<Box<Node>>,
    pub right: Option<Box<Node>>,
}

impl Node {
    fn leaf(kind: NodeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            left: None,
            right: None,
        }
    }

    pub fn literal(kind: LiteralKind, text: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Literal(kind), text)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Variable, name)
    }

    /// An operator node with possibly missing children
    pub fn operator(op: Operator, left: Option<Node>, right: Option<Node>) -> Self {
        Self {
            kind: NodeKind::Operator(op),
            text: op.symbol().to_string(),
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    /// An operator node with both children present
    pub fn binary(op: Operator, left: Node, right: Node) -> Self {
        Self::operator(op, Some(left), Some(right))
    }

    /// A function node; the argument lives in `left`
    pub fn function(function: Function, argument: Option<Node>) -> Self {
        Self {
            kind: NodeKind::Function(function),
            text: function.name().to_string(),
            left: argument.map(Box::new),
            right: None,
        }
    }

    pub fn invalid(kind: InvalidKind, text: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Invalid(kind), text)
    }

    /// Leaf node for a literal or variable token
    pub fn from_token(token: &Token) -> Option<Self> {
        let kind = match token.kind {
            TokenKind::Int => NodeKind::Literal(LiteralKind::Int),
            TokenKind::Dec => NodeKind::Literal(LiteralKind::Dec),
            TokenKind::Bin => NodeKind::Literal(LiteralKind::Bin),
            TokenKind::Hex => NodeKind::Literal(LiteralKind::Hex),
            TokenKind::Exp => NodeKind::Literal(LiteralKind::Exp),
            TokenKind::Var => NodeKind::Variable,
            _ => return None,
        };
        Some(Self::leaf(kind, token.text.clone()))
    }

    pub fn is_operator(&self) -> bool {
        matches!(self.kind, NodeKind::Operator(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self.kind, NodeKind::Function(_))
    }

    /// Precedence of an operator node
    pub fn precedence(&self) -> Option<u8> {
        match self.kind {
            NodeKind::Operator(op) => Some(op.precedence()),
            _ => None,
        }
    }

    /// Whether any variable occurs in this subtree
    pub fn has_variables(&self) -> bool {
        self.kind == NodeKind::Variable
            || self.left.as_deref().is_some_and(Node::has_variables)
            || self.right.as_deref().is_some_and(Node::has_variables)
    }

    /// Number of nodes in this subtree
    pub fn size(&self) -> usize {
        1 + self.left.as_deref().map_or(0, Node::size) + self.right.as_deref().map_or(0, Node::size)
    }
}

fn fmt_child(child: &Option<Box<Node>>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match child {
        Some(node) => write!(f, "{node}"),
        None => f.write_str("?"),
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Operator(op) => {
                f.write_str("(")?;
                fmt_child(&self.left, f)?;
                write!(f, " {} ", op.symbol())?;
                fmt_child(&self.right, f)?;
                f.write_str(")")
            }
            NodeKind::Function(function) => {
                write!(f, "{}(", function.name())?;
                fmt_child(&self.left, f)?;
                f.write_str(")")
            }
            NodeKind::Invalid(_) | NodeKind::Error => write!(f, "<invalid {}>", self.text),
            NodeKind::Literal(_) | NodeKind::Variable => f.write_str(&self.text),
        }
    }
}
