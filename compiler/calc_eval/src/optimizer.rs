//! Constant folding.
//!
//! A post-order walk turning every variable-free subtree into a single
//! resolved value. Subtrees referencing variables keep their shape with
//! their constant parts folded. Any error aborts the whole optimization.

use calc_ast::{convert_literal, Function, LiteralKind, Node, Operator, OptimizedNode};
use calc_ast::{Visitable, Visitor};
use log::debug;

use crate::ops::{apply_function, apply_operator};
use crate::EvalError;

#[derive(Debug, Default)]
pub struct Optimizer {
    folded: usize,
}

impl Optimizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn optimize(&mut self, node: &Node) -> Result<OptimizedNode, EvalError> {
        node.accept(self)
    }

    /// Number of operator and function nodes folded so far
    pub fn folded(&self) -> usize {
        self.folded
    }
}

impl Visitor for Optimizer {
    type Output = OptimizedNode;
    type Error = EvalError;

    fn visit_literal(&mut self, node: &Node, kind: LiteralKind) -> Result<OptimizedNode, EvalError> {
        Ok(OptimizedNode::Resolved(convert_literal(kind, &node.text)?))
    }

    fn visit_variable(&mut self, node: &Node) -> Result<OptimizedNode, EvalError> {
        Ok(OptimizedNode::variable(node.text.clone()))
    }

    fn visit_operator(&mut self, node: &Node, op: Operator) -> Result<OptimizedNode, EvalError> {
        let left = node.left.as_deref().ok_or(EvalError::MissingLeftChild)?;
        let right = node.right.as_deref().ok_or(EvalError::MissingRightChild)?;
        let left = left.accept(self)?;
        let right = right.accept(self)?;

        match (left.value(), right.value()) {
            (Some(l), Some(r)) => {
                let value = apply_operator(op, l, r)?;
                debug!("folded {node} to {value}");
                self.folded += 1;
                Ok(OptimizedNode::Resolved(value))
            }
            _ => Ok(OptimizedNode::operator(op, left, right)),
        }
    }

    fn visit_function(&mut self, node: &Node, function: Function) -> Result<OptimizedNode, EvalError> {
        let argument = node.left.as_deref().ok_or(EvalError::MissingLeftChild)?;
        let argument = argument.accept(self)?;

        match argument.value() {
            Some(value) => {
                let value = apply_function(function, value);
                debug!("folded {node} to {value}");
                self.folded += 1;
                Ok(OptimizedNode::Resolved(value))
            }
            None => Ok(OptimizedNode::function(function, argument)),
        }
    }

    fn visit_invalid(&mut self, node: &Node) -> Result<OptimizedNode, EvalError> {
        Err(EvalError::InvalidNodeType(node.text.clone()))
    }
}

/// Fold an optional tree. An absent tree stays absent.
pub fn optimize(tree: Option<&Node>) -> Result<Option<OptimizedNode>, EvalError> {
    tree.map(|node| Optimizer::new().optimize(node)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Bindings;
    use crate::evaluator::Evaluate;
    use calc_ast::ConversionError;
    use pretty_assertions::assert_eq;

    fn int(text: &str) -> Node {
        Node::literal(LiteralKind::Int, text)
    }

    #[test]
    fn test_constant_tree_folds_to_one_value() {
        let tree = Node::binary(
            Operator::Add,
            int("1"),
            Node::binary(Operator::Mult, int("2"), Node::function(Function::Sqrt, Some(int("9")))),
        );
        let mut optimizer = Optimizer::new();
        let optimized = optimizer.optimize(&tree).unwrap();
        assert_eq!(optimized, OptimizedNode::Resolved(7.0));
        assert_eq!(optimizer.folded(), 3);
        assert_eq!(tree.evaluate(&Bindings::new()), Ok(7.0));
    }

    #[test]
    fn test_variable_keeps_shape() {
        let tree = Node::binary(Operator::Add, int("1"), Node::variable("a"));
        assert_eq!(
            optimize(Some(&tree)),
            Ok(Some(OptimizedNode::operator(
                Operator::Add,
                OptimizedNode::Resolved(1.0),
                OptimizedNode::variable("a"),
            )))
        );

        let tree = Node::binary(
            Operator::Mult,
            Node::function(Function::Cos, Some(Node::variable("x"))),
            Node::binary(Operator::Sub, int("5"), int("3")),
        );
        let optimized = optimize(Some(&tree)).unwrap().unwrap();
        assert_eq!(optimized.to_string(), "(cos(x) * 2)");
        assert!(!optimized.is_optimized());
    }

    #[test]
    fn test_errors_abort() {
        let tree = Node::binary(Operator::Add, Node::variable("a"), Node::binary(Operator::Div, int("1"), int("0")));
        assert_eq!(optimize(Some(&tree)), Err(EvalError::DivisionByZero));

        let tree = Node::binary(Operator::Add, Node::variable("a"), Node::literal(LiteralKind::Bin, "0b"));
        assert_eq!(
            optimize(Some(&tree)),
            Err(EvalError::Conversion(ConversionError::InvalidBinary("0b".to_string())))
        );
    }

    #[test]
    fn test_missing_children_detected_first() {
        // the right side would fail conversion, but the missing child is found first
        let tree = Node::operator(Operator::Sub, None, Some(Node::literal(LiteralKind::Hex, "0x")));
        assert_eq!(optimize(Some(&tree)), Err(EvalError::MissingLeftChild));
        let tree = Node::operator(Operator::Sub, Some(int("1")), None);
        assert_eq!(optimize(Some(&tree)), Err(EvalError::MissingRightChild));
    }

    #[test]
    fn test_absent_tree() {
        assert_eq!(optimize(None), Ok(None));
    }
}
