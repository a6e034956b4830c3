use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::node::{Node, NodeData};

/// Stable identity of a node for graph traversal. `Node` handles are cheap
/// clones of the same allocation, so the allocation address is the node.
pub(crate) type NodeId = *const RefCell<NodeData>;

impl Node {
    pub(crate) fn id(&self) -> NodeId {
        Rc::as_ptr(&self.data)
    }
}

/// Builds a post-order over the operand relation: every node appears strictly
/// after all of its operands, so walking the result in reverse processes each
/// node before anything it was derived from.
///
/// The traversal is iterative with an explicit stack, so arbitrarily deep
/// expression chains cannot overflow the call stack, and a visited set keyed
/// by [`NodeId`] guarantees each node is emitted once even under diamond
/// sharing. A cyclic operand relation cannot arise through the documented
/// operators; if one is constructed through misuse the resulting order is
/// meaningless (precondition violation, not a handled error).
pub(crate) fn topological_sort(root: &Node) -> Vec<Node> {
    let mut order = Vec::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    // Each node is pushed twice: once to expand its operands, and once more,
    // underneath them, to be emitted after they all have been.
    let mut stack: Vec<(Node, bool)> = vec![(root.clone(), false)];

    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            order.push(node);
        } else if visited.insert(node.id()) {
            stack.push((node.clone(), true));
            for operand in node.operands() {
                if !visited.contains(&operand.id()) {
                    stack.push((operand, false));
                }
            }
        }
    }
    order
}
