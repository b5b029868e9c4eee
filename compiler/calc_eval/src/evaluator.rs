//! Tree-walking evaluation against a set of bindings.
//!
//! Evaluation is read-only over the tree, so one parsed tree can be
//! evaluated repeatedly with different bindings. The left operand is
//! always evaluated before the right one and the first error aborts the
//! walk.

use calc_ast::{convert_literal, Function, LiteralKind, Node, Operator, OptimizedNode};
use calc_ast::{Visitable, Visitor};
use log::trace;

use crate::env::Bindings;
use crate::ops::{apply_function, apply_operator};
use crate::EvalError;

/// Evaluates a [`Node`] tree as a [`Visitor`]
pub struct Evaluator<'a> {
    bindings: &'a Bindings,
}

impl<'a> Evaluator<'a> {
    pub fn new(bindings: &'a Bindings) -> Self {
        Self { bindings }
    }

    pub fn evaluate(&mut self, node: &Node) -> Result<f64, EvalError> {
        node.accept(self)
    }

    fn lookup(&self, name: &str) -> Result<f64, EvalError> {
        self.bindings
            .get(name)
            .ok_or_else(|| EvalError::VariableNotDefined(name.to_string()))
    }
}

impl Visitor for Evaluator<'_> {
    type Output = f64;
    type Error = EvalError;

    fn visit_literal(&mut self, node: &Node, kind: LiteralKind) -> Result<f64, EvalError> {
        Ok(convert_literal(kind, &node.text)?)
    }

    fn visit_variable(&mut self, node: &Node) -> Result<f64, EvalError> {
        self.lookup(&node.text)
    }

    fn visit_operator(&mut self, node: &Node, op: Operator) -> Result<f64, EvalError> {
        let left = node.left.as_deref().ok_or(EvalError::MissingLeftChild)?;
        let right = node.right.as_deref().ok_or(EvalError::MissingRightChild)?;
        let left = left.accept(self)?;
        let right = right.accept(self)?;
        trace!("{left} {} {right}", op.symbol());
        apply_operator(op, left, right)
    }

    fn visit_function(&mut self, node: &Node, function: Function) -> Result<f64, EvalError> {
        let argument = node.left.as_deref().ok_or(EvalError::MissingLeftChild)?;
        let argument = argument.accept(self)?;
        Ok(apply_function(function, argument))
    }

    fn visit_invalid(&mut self, node: &Node) -> Result<f64, EvalError> {
        Err(EvalError::InvalidNodeType(node.text.clone()))
    }
}

/// Trees that can be evaluated against bindings
pub trait Evaluate {
    fn evaluate(&self, bindings: &Bindings) -> Result<f64, EvalError>;
}

impl Evaluate for Node {
    fn evaluate(&self, bindings: &Bindings) -> Result<f64, EvalError> {
        Evaluator::new(bindings).evaluate(self)
    }
}

impl Evaluate for OptimizedNode {
    fn evaluate(&self, bindings: &Bindings) -> Result<f64, EvalError> {
        match self {
            OptimizedNode::Resolved(value) => Ok(*value),
            OptimizedNode::Variable { name } => bindings
                .get(name)
                .ok_or_else(|| EvalError::VariableNotDefined(name.clone())),
            OptimizedNode::Operator { op, left, right } => {
                let left = left.evaluate(bindings)?;
                let right = right.evaluate(bindings)?;
                apply_operator(*op, left, right)
            }
            OptimizedNode::Function { function, argument } => {
                Ok(apply_function(*function, argument.evaluate(bindings)?))
            }
        }
    }
}

/// Evaluate an optional tree; an absent tree evaluates to `0`.
pub fn evaluate<T: Evaluate + ?Sized>(tree: Option<&T>, bindings: &Bindings) -> Result<f64, EvalError> {
    match tree {
        Some(tree) => tree.evaluate(bindings),
        None => Ok(0.0),
    }
}
