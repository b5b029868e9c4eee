//! Abstract Syntax Tree (AST) for the calc expression language.
//!
//! This crate defines the expression tree built by the parser, the folded
//! tree produced by the optimizer, literal conversions shared by both
//! evaluation paths, and a visitor for traversing trees.

pub mod ast;
pub mod conversions;
pub mod optimized;
pub mod visit;

// Re-export commonly used types
pub use ast::{Function, InvalidKind, LiteralKind, Node, NodeKind, Operator};
pub use conversions::{convert_literal, ConversionError};
pub use optimized::OptimizedNode;
pub use visit::{Visitable, Visitor};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A result type for AST serialization.
#[cfg(feature = "serde")]
pub type Result<T> = std::result::Result<T, serde_json::Error>;

/// Serializes an AST node to a JSON string.
///
/// # Example
///
/// ```
/// use calc_ast::{to_json, LiteralKind, Node};
///
/// let json = to_json(&Node::literal(LiteralKind::Int, "42")).unwrap();
/// assert!(json.contains(r#""text": "42""#));
/// ```
#[cfg(feature = "serde")]
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
}

/// Deserializes an AST node from a JSON string.
#[cfg(feature = "serde")]
pub fn from_json<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T> {
    serde_json::from_str(json)
}
