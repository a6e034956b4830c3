use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use num_traits::ToPrimitive;

use crate::error::NanogradError;
use crate::op::Op;

/// Internal state of a graph node, shared by every handle that references the
/// node directly or holds it as an operand of a downstream node.
pub(crate) struct NodeData {
    /// Forward-computed value. Immutable after construction.
    pub(crate) scalar: f64,
    /// Gradient accumulator, d(output)/d(this node). Contributions from every
    /// consumer are summed, never overwritten; it is only meaningful after a
    /// backward pass that reached this node, and it is never reset by the
    /// engine itself.
    pub(crate) grad: f64,
    /// The operation that produced this node, holding the operand handles.
    pub(crate) op: Op,
}

/// A single tracked scalar in the computation graph.
///
/// `Node` is a cheap-to-clone handle over shared state; cloning never copies
/// the underlying node or creates a new graph entry. A node is either a leaf
/// wrapping a constant, or the result of an operation on one or two existing
/// nodes. The operand relation is acyclic by construction: operations only
/// ever add edges from a freshly created node to already-existing ones.
///
/// Equality and ordering compare `scalar` values only and do not touch the
/// graph; traversal identity is the underlying allocation.
#[derive(Clone)]
pub struct Node {
    pub(crate) data: Rc<RefCell<NodeData>>,
}

impl Node {
    /// Creates a leaf node wrapping a constant.
    pub fn new(scalar: f64) -> Self {
        Self::with_op(scalar, Op::Leaf)
    }

    pub(crate) fn with_op(scalar: f64, op: Op) -> Self {
        Node {
            data: Rc::new(RefCell::new(NodeData {
                scalar,
                grad: 0.0,
                op,
            })),
        }
    }

    /// Explicit literal promotion: wraps any plain numeric value in a fresh
    /// leaf node. Fails fast when the value cannot be represented as a finite
    /// `f64` rather than silently producing a malformed node.
    pub fn constant<T: ToPrimitive>(value: T) -> Result<Self, NanogradError> {
        match value.to_f64() {
            Some(v) if v.is_finite() => Ok(Node::new(v)),
            _ => Err(NanogradError::UnsupportedOperand {
                operation: "constant".to_string(),
            }),
        }
    }

    /// The forward value of this node.
    pub fn scalar(&self) -> f64 {
        self.data.borrow().scalar
    }

    /// The accumulated gradient of this node.
    pub fn grad(&self) -> f64 {
        self.data.borrow().grad
    }

    /// Resets the gradient to zero. Gradients accumulate across backward
    /// passes, so callers reset them between optimization steps.
    pub fn zero_grad(&self) {
        self.data.borrow_mut().grad = 0.0;
    }

    pub(crate) fn accumulate_grad(&self, delta: f64) {
        self.data.borrow_mut().grad += delta;
    }

    /// `true` for nodes created directly from a constant.
    pub fn is_leaf(&self) -> bool {
        matches!(self.data.borrow().op, Op::Leaf)
    }

    /// Symbol of the operation that produced this node, for diagnostics only.
    /// Empty for leaves.
    pub fn op_symbol(&self) -> String {
        self.data.borrow().op.to_string()
    }

    /// Direct predecessors of this node in the forward graph.
    pub fn operands(&self) -> Vec<Node> {
        self.data.borrow().op.operands().cloned().collect()
    }

    /// Runs reverse-mode differentiation from this node: seeds its gradient
    /// to 1 and accumulates d(self)/d(ancestor) into every ancestor's `grad`.
    ///
    /// Forward values never change; only gradients are mutated. Gradients are
    /// not reset first, so repeated passes accumulate unless the caller calls
    /// [`Node::zero_grad`] in between.
    pub fn backward(&self) {
        crate::autograd::backward(self);
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::new(value)
    }
}

impl From<f32> for Node {
    fn from(value: f32) -> Self {
        Node::new(f64::from(value))
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::new(f64::from(value))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::new(value as f64)
    }
}

impl From<u32> for Node {
    fn from(value: u32) -> Self {
        Node::new(f64::from(value))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data.borrow();
        write!(f, "Node(scalar={}, gradient={})", data.scalar, data.grad)
    }
}

// Manual Debug: printing operands would walk the whole ancestor graph.
impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data.borrow();
        f.debug_struct("Node")
            .field("scalar", &data.scalar)
            .field("grad", &data.grad)
            .field("op", &data.op.to_string())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_construction() {
        let node = Node::new(3.5);
        assert_eq!(node.scalar(), 3.5);
        assert_eq!(node.grad(), 0.0);
        assert!(node.is_leaf());
        assert!(node.operands().is_empty());
        assert_eq!(node.op_symbol(), "");
    }

    #[test]
    fn test_constant_promotion() {
        assert_eq!(Node::constant(3_i32).unwrap().scalar(), 3.0);
        assert_eq!(Node::constant(2.5_f32).unwrap().scalar(), 2.5);
        assert_eq!(Node::constant(7_u64).unwrap().scalar(), 7.0);
    }

    #[test]
    fn test_constant_rejects_non_finite() {
        let result = Node::constant(f64::NAN);
        assert_eq!(
            result.err().unwrap(),
            NanogradError::UnsupportedOperand {
                operation: "constant".to_string()
            }
        );
        assert!(Node::constant(f64::INFINITY).is_err());
    }

    #[test]
    fn test_from_literals() {
        assert_eq!(Node::from(2.0_f64).scalar(), 2.0);
        assert_eq!(Node::from(-1_i32).scalar(), -1.0);
        assert_eq!(Node::from(4_u32).scalar(), 4.0);
    }

    #[test]
    fn test_clone_shares_state() {
        let node = Node::new(1.0);
        let alias = node.clone();
        alias.accumulate_grad(2.5);
        assert_eq!(node.grad(), 2.5);
    }

    #[test]
    fn test_zero_grad() {
        let node = Node::new(1.0);
        node.accumulate_grad(4.0);
        node.zero_grad();
        assert_eq!(node.grad(), 0.0);
    }

    #[test]
    fn test_display_matches_repr() {
        let node = Node::new(2.0);
        assert_eq!(format!("{node}"), "Node(scalar=2, gradient=0)");
    }
}
