use std::fmt;

use crate::node::Node;

/// The operation that produced a node, together with handles to its operands.
///
/// Recording the operator as a tagged variant instead of a per-node closure
/// keeps every backward rule in a single exhaustively checked dispatch (see
/// `autograd`) and avoids one heap allocation per recorded operation. The
/// operand handles stored here are what keeps ancestors alive for the
/// backward pass.
pub(crate) enum Op {
    /// A node created directly from a constant. No backward rule.
    Leaf,
    /// Addition binary op.
    Add(Node, Node),
    /// Multiplication binary op.
    Mul(Node, Node),
    /// Exponentiation by a plain numeric constant. The exponent is never a
    /// tracked node.
    Pow(Node, f64),
    /// ReLU unary op.
    Relu(Node),
    /// Sigmoid unary op.
    Sigmoid(Node),
}

impl Op {
    /// Direct operands of this operation, at most two, without allocating.
    pub(crate) fn operands(&self) -> impl Iterator<Item = &Node> + '_ {
        let pair = match self {
            Op::Leaf => [None, None],
            Op::Add(a, b) | Op::Mul(a, b) => [Some(a), Some(b)],
            Op::Pow(a, _) | Op::Relu(a) | Op::Sigmoid(a) => [Some(a), None],
        };
        pair.into_iter().flatten()
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Leaf => Ok(()),
            Op::Add(..) => f.write_str("+"),
            Op::Mul(..) => f.write_str("*"),
            Op::Pow(_, exponent) => write!(f, "**{exponent}"),
            Op::Relu(_) => f.write_str("ReLU"),
            Op::Sigmoid(_) => f.write_str("Sigmoid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_counts() {
        let a = Node::new(1.0);
        let b = Node::new(2.0);
        assert_eq!(Op::Leaf.operands().count(), 0);
        assert_eq!(Op::Add(a.clone(), b.clone()).operands().count(), 2);
        assert_eq!(Op::Pow(a.clone(), 2.0).operands().count(), 1);
        assert_eq!(Op::Relu(a.clone()).operands().count(), 1);
        assert_eq!(Op::Sigmoid(b).operands().count(), 1);
    }

    #[test]
    fn test_display_symbols() {
        let a = Node::new(1.0);
        assert_eq!(Op::Add(a.clone(), a.clone()).to_string(), "+");
        assert_eq!(Op::Mul(a.clone(), a.clone()).to_string(), "*");
        assert_eq!(Op::Pow(a.clone(), 3.0).to_string(), "**3");
        assert_eq!(Op::Relu(a).to_string(), "ReLU");
    }
}
