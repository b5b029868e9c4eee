//! Tree shape after constant folding.
//!
//! Variable-free subtrees collapse into [`OptimizedNode::Resolved`]. Any
//! subtree that references a variable keeps the shape of the parsed tree,
//! with its constant parts already folded.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ast::{Function, Operator};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OptimizedNode {
    /// A precomputed value; carries no children
    Resolved(f64),
    /// A variable reference, keeping the name it had in the source
    Variable { name: String },
    Operator {
        op: Operator,
        left: Box<OptimizedNode>,
        right: Box<OptimizedNode>,
    },
    Function {
        function: Function,
        argument: Box<OptimizedNode>,
    },
}

impl OptimizedNode {
    /// True when the subtree contains no variable references
    pub fn is_optimized(&self) -> bool {
        matches!(self, OptimizedNode::Resolved(_))
    }

    /// The precomputed value of a resolved node
    pub fn value(&self) -> Option<f64> {
        match self {
            OptimizedNode::Resolved(value) => Some(*value),
            _ => None,
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        OptimizedNode::Variable { name: name.into() }
    }

    pub fn operator(op: Operator, left: OptimizedNode, right: OptimizedNode) -> Self {
        OptimizedNode::Operator {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn function(function: Function, argument: OptimizedNode) -> Self {
        OptimizedNode::Function {
            function,
            argument: Box::new(argument),
        }
    }
}

impl fmt::Display for OptimizedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizedNode::Resolved(value) => write!(f, "{value}"),
            OptimizedNode::Variable { name } => f.write_str(name),
            OptimizedNode::Operator { op, left, right } => {
                write!(f, "({left} {} {right})", op.symbol())
            }
            OptimizedNode::Function { function, argument } => {
                write!(f, "{}({argument})", function.name())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_flag() {
        let folded = OptimizedNode::Resolved(3.0);
        assert!(folded.is_optimized());
        assert_eq!(folded.value(), Some(3.0));

        let partial = OptimizedNode::operator(Operator::Add, folded, OptimizedNode::variable("a"));
        assert!(!partial.is_optimized());
        assert_eq!(partial.value(), None);
        assert_eq!(partial.to_string(), "(3 + a)");
    }
}
