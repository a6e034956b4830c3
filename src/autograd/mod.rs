//! The backward scheduler: orders the ancestor graph of a root node and runs
//! one gradient-contribution step per node, root first.

use log::debug;

use crate::node::Node;
use crate::op::Op;

pub mod grad_check;
mod graph;

/// Reverse-mode pass from `root`: seeds `root.grad = 1` (d(root)/d(root)),
/// then walks the reverse topological order and dispatches each node's
/// backward rule exactly once.
///
/// The ordering guarantees a node's own gradient is fully accumulated before
/// its rule runs; rules only ever add to their operands' gradients and never
/// read them, so correctness does not depend on any particular order among
/// siblings.
pub(crate) fn backward(root: &Node) {
    let order = graph::topological_sort(root);
    debug!("backward pass over {} nodes", order.len());

    root.data.borrow_mut().grad = 1.0;
    for node in order.iter().rev() {
        step(node);
    }
}

/// Adds one node's gradient contribution to each of its operands. The local
/// derivative per operator matches the recording contract in `ops`.
fn step(node: &Node) {
    // Operands are distinct allocations from `node` (the graph is acyclic),
    // so holding this borrow while mutating their gradients is fine.
    let data = node.data.borrow();
    let (grad, output) = (data.grad, data.scalar);
    match &data.op {
        Op::Leaf => {}
        Op::Add(a, b) => {
            // d(a + b)/da = d(a + b)/db = 1
            a.accumulate_grad(grad);
            b.accumulate_grad(grad);
        }
        Op::Mul(a, b) => {
            // Cross-derivatives: each operand is scaled by the other's value.
            let (a_scalar, b_scalar) = (a.scalar(), b.scalar());
            a.accumulate_grad(b_scalar * grad);
            b.accumulate_grad(a_scalar * grad);
        }
        Op::Pow(a, p) => {
            // d(a^p)/da = p * a^(p-1)
            let p = *p;
            let base = a.scalar();
            a.accumulate_grad(p * base.powf(p - 1.0) * grad);
        }
        Op::Relu(a) => {
            // Gradient passes through where the unit was active. At exactly
            // zero the output is zero and the gate stays closed.
            if output > 0.0 {
                a.accumulate_grad(grad);
            }
        }
        Op::Sigmoid(a) => {
            // d(sigmoid)/da = out * (1 - out), in terms of the computed
            // output so the exponential is not recomputed.
            a.accumulate_grad(output * (1.0 - output) * grad);
        }
    }
}
