//! Incremental tree construction for one bracket level.
//!
//! Operands and operators arrive strictly alternating. The builder keeps the
//! current top of the tree and remembers where on its right spine the next
//! operand belongs. An operator binding tighter than the top is rotated into
//! the top's right child; anything else becomes the new top, which gives
//! left associativity within a precedence tier.

use calc_ast::{Node, Operator};

/// The operator slot waiting for its right operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// `top.right`
    Top,
    /// `top.right.right`, after a rotation
    TopRight,
}

#[derive(Debug, Default)]
pub(crate) struct TreeBuilder {
    top: Option<Node>,
    open: Option<Slot>,
    /// A parenthesized group at the top is atomic and never rotated into
    top_is_group: bool,
    /// Height of the whole tree; a leaf has height 1
    height: usize,
    /// Height of `top.left` while the top is an operator
    left_height: usize,
    /// Height of `top.right`, counting a pending slot as empty
    right_height: usize,
    /// Height of `top.right.left` after a rotation
    inner_left_height: usize,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// Whether the next token should start an operand
    pub(crate) fn expects_operand(&self) -> bool {
        self.top.is_none() || self.open.is_some()
    }

    /// Height of the tree built so far
    pub(crate) fn height(&self) -> usize {
        self.height
    }

    /// Attach a complete operand of the given height. `group` marks
    /// bracketed sub-expressions.
    ///
    /// Callers check [`expects_operand`](Self::expects_operand) first.
    pub(crate) fn push_operand(&mut self, operand: Node, height: usize, group: bool) {
        let Some(top) = self.top.as_mut() else {
            self.top = Some(operand);
            self.top_is_group = group;
            self.height = height;
            return;
        };

        match self.open.take() {
            Some(Slot::Top) => {
                top.right = Some(Box::new(operand));
                self.right_height = height;
            }
            Some(Slot::TopRight) => {
                if let Some(inner) = top.right.as_deref_mut() {
                    inner.right = Some(Box::new(operand));
                }
                self.right_height = 1 + self.inner_left_height.max(height);
            }
            None => return,
        }
        self.height = 1 + self.left_height.max(self.right_height);
    }

    /// Insert a binary operator after a complete operand.
    pub(crate) fn push_operator(&mut self, op: Operator) {
        let Some(mut top) = self.top.take() else {
            return;
        };

        let rotate = !self.top_is_group && top.precedence().is_some_and(|p| p < op.precedence());
        if rotate {
            let mut node = Node::operator(op, None, None);
            node.left = top.right.take();
            top.right = Some(Box::new(node));
            self.top = Some(top);
            self.open = Some(Slot::TopRight);
            self.inner_left_height = self.right_height;
            self.right_height = 1 + self.inner_left_height;
        } else {
            self.top = Some(Node::operator(op, Some(top), None));
            self.open = Some(Slot::Top);
            self.top_is_group = false;
            self.left_height = self.height;
            self.right_height = 0;
        }
        self.height = 1 + self.left_height.max(self.right_height);
    }

    /// The tree built so far; an operator may still lack its right child.
    pub(crate) fn finish(self) -> Option<Node> {
        self.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_ast::LiteralKind;
    use pretty_assertions::assert_eq;

    fn int(text: &str) -> Node {
        Node::literal(LiteralKind::Int, text)
    }

    fn build(items: &[Result<&str, Operator>]) -> Node {
        builder_for(items).finish().unwrap()
    }

    fn builder_for(items: &[Result<&str, Operator>]) -> TreeBuilder {
        let mut builder = TreeBuilder::new();
        for item in items {
            match item {
                Ok(text) => {
                    assert!(builder.expects_operand());
                    builder.push_operand(int(text), 1, false);
                }
                Err(op) => {
                    assert!(!builder.expects_operand());
                    builder.push_operator(*op);
                }
            }
        }
        builder
    }

    #[test]
    fn test_rotation_for_tighter_operator() {
        let tree = build(&[Ok("1"), Err(Operator::Add), Ok("2"), Err(Operator::Mult), Ok("3")]);
        assert_eq!(
            tree,
            Node::binary(
                Operator::Add,
                int("1"),
                Node::binary(Operator::Mult, int("2"), int("3"))
            )
        );
    }

    #[test]
    fn test_new_top_for_equal_precedence() {
        let tree = build(&[Ok("1"), Err(Operator::Sub), Ok("2"), Err(Operator::Sub), Ok("3")]);
        assert_eq!(
            tree,
            Node::binary(
                Operator::Sub,
                Node::binary(Operator::Sub, int("1"), int("2")),
                int("3")
            )
        );
    }

    #[test]
    fn test_chained_tight_operators_stay_left_associative() {
        // 1 + 2 * 3 / 4 - 5
        let tree = build(&[
            Ok("1"),
            Err(Operator::Add),
            Ok("2"),
            Err(Operator::Mult),
            Ok("3"),
            Err(Operator::Div),
            Ok("4"),
            Err(Operator::Sub),
            Ok("5"),
        ]);
        assert_eq!(tree.to_string(), "((1 + ((2 * 3) / 4)) - 5)");
    }

    #[test]
    fn test_group_is_not_rotated_into() {
        let mut builder = TreeBuilder::new();
        builder.push_operand(Node::binary(Operator::Add, int("1"), int("2")), 2, true);
        builder.push_operator(Operator::Mult);
        builder.push_operand(int("3"), 1, false);
        assert_eq!(builder.finish().unwrap().to_string(), "((1 + 2) * 3)");
    }

    #[test]
    fn test_trailing_operator_leaves_open_slot() {
        let mut builder = TreeBuilder::new();
        builder.push_operand(int("1"), 1, false);
        builder.push_operator(Operator::Add);
        assert!(builder.expects_operand());
        assert_eq!(
            builder.finish(),
            Some(Node::operator(Operator::Add, Some(int("1")), None))
        );
    }

    fn height(node: &Node) -> usize {
        let children = [&node.left, &node.right];
        1 + children
            .into_iter()
            .flatten()
            .map(|child| height(child))
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn test_height_tracks_built_tree() {
        use Operator::*;
        let shapes: [&[Result<&str, Operator>]; 5] = [
            &[Ok("1")],
            &[Ok("1"), Err(Add), Ok("2")],
            &[Ok("1"), Err(Sub), Ok("2"), Err(Sub), Ok("3"), Err(Sub), Ok("4")],
            &[Ok("1"), Err(Add), Ok("2"), Err(Mult), Ok("3"), Err(Div), Ok("4")],
            &[Ok("1"), Err(Mult), Ok("2"), Err(Add), Ok("3"), Err(Mult), Ok("4"), Err(Sub), Ok("5")],
        ];
        for items in shapes {
            let builder = builder_for(items);
            let reported = builder.height();
            let tree = builder.finish().unwrap();
            assert_eq!(reported, height(&tree), "{tree}");
        }
    }

    #[test]
    fn test_height_counts_pending_slot() {
        let mut builder = TreeBuilder::new();
        builder.push_operand(int("1"), 1, false);
        builder.push_operator(Operator::Add);
        assert_eq!(builder.height(), 2);
        builder.push_operand(int("2"), 5, true);
        assert_eq!(builder.height(), 6);
    }
}
