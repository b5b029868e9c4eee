//! Visitor pattern for walking the expression tree.
//!
//! A [`Visitor`] gets one method per node category; [`Visitable::accept`]
//! performs the dispatch on the node kind, so implementors never match on
//! [`NodeKind`] themselves.

use crate::ast::{Function, LiteralKind, Node, NodeKind, Operator};

/// A visitor over [`Node`] trees.
///
/// Visitors decide themselves whether and in which order to descend into
/// children, which lets evaluators stop at the first error.
pub trait Visitor {
    /// The output type of the visitor.
    type Output;
    /// The error type of the visitor.
    type Error;

    fn visit_literal(&mut self, node: &Node, kind: LiteralKind) -> Result<Self::Output, Self::Error>;

    fn visit_variable(&mut self, node: &Node) -> Result<Self::Output, Self::Error>;

    fn visit_operator(&mut self, node: &Node, op: Operator) -> Result<Self::Output, Self::Error>;

    fn visit_function(
        &mut self,
        node: &Node,
        function: Function,
    ) -> Result<Self::Output, Self::Error>;

    /// Nodes the parser could not classify, including [`NodeKind::Error`]
    fn visit_invalid(&mut self, node: &Node) -> Result<Self::Output, Self::Error>;
}

/// A trait for types that can be visited by a `Visitor`.
pub trait Visitable {
    /// Accepts a visitor and calls the appropriate visit method.
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<V::Output, V::Error>;
}

impl Visitable for Node {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<V::Output, V::Error> {
        match self.kind {
            NodeKind::Literal(kind) => visitor.visit_literal(self, kind),
            NodeKind::Variable => visitor.visit_variable(self),
            NodeKind::Operator(op) => visitor.visit_operator(self, op),
            NodeKind::Function(function) => visitor.visit_function(self, function),
            NodeKind::Invalid(_) | NodeKind::Error => visitor.visit_invalid(self),
        }
    }
}

/// A visitor that collects the names of all variables, left to right.
#[derive(Debug, Default)]
pub struct VariableCollector {
    /// The collected names, duplicates included.
    pub names: Vec<String>,
}

impl VariableCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    fn visit_children(&mut self, node: &Node) {
        for child in [&node.left, &node.right].into_iter().flatten() {
            // collecting never fails
            let _ = child.accept(self);
        }
    }
}

impl Visitor for VariableCollector {
    type Output = ();
    type Error = std::convert::Infallible;

    fn visit_literal(&mut self, _node: &Node, _kind: LiteralKind) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_variable(&mut self, node: &Node) -> Result<(), Self::Error> {
        self.names.push(node.text.clone());
        Ok(())
    }

    fn visit_operator(&mut self, node: &Node, _op: Operator) -> Result<(), Self::Error> {
        self.visit_children(node);
        Ok(())
    }

    fn visit_function(&mut self, node: &Node, _function: Function) -> Result<(), Self::Error> {
        self.visit_children(node);
        Ok(())
    }

    fn visit_invalid(&mut self, _node: &Node) -> Result<(), Self::Error> {
        Ok(())
    }
}
