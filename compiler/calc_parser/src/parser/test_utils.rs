//! Test utilities for the parser

// This module is only used for testing purposes
#![allow(dead_code)]

use calc_ast::{Function, LiteralKind, Node, Operator};
use calc_lexer::{Token, TokenKind};

pub use calc_lexer::tokenize;

/// Creates a token with a zero-width span for testing
pub fn create_token(kind: TokenKind, text: &str) -> Token {
    Token::new(kind, text, 0, 0)
}

/// Integer literal node
pub fn int(text: &str) -> Node {
    Node::literal(LiteralKind::Int, text)
}

/// Variable node
pub fn var(name: &str) -> Node {
    Node::variable(name)
}

/// Operator node with both children
pub fn bin(op: Operator, left: Node, right: Node) -> Node {
    Node::binary(op, left, right)
}

/// Function node with an argument
pub fn call(function: Function, argument: Node) -> Node {
    Node::function(function, Some(argument))
}
