use crate::error::NanogradError;
use crate::node::Node;
use crate::op::Op;

/// Rectified Linear Unit: `max(0, x)`, recorded in the graph.
///
/// Backward rule: the upstream gradient passes through unchanged where the
/// unit was active and is blocked where it was clipped. At exactly zero the
/// output is zero, so the gradient is blocked (subgradient choice 0, not 1).
pub fn relu_op(a: &Node) -> Node {
    let scalar = a.scalar();
    let output = if scalar < 0.0 { 0.0 } else { scalar };
    Node::with_op(output, Op::Relu(a.clone()))
}

/// Logistic sigmoid: `1 / (1 + exp(-x))`, recorded in the graph.
///
/// Backward rule uses the closed-form derivative expressed in terms of the
/// already-computed output, `out * (1 - out)`, so the exponential is never
/// recomputed.
pub fn sigmoid_op(a: &Node) -> Node {
    let output = 1.0 / (1.0 + (-a.scalar()).exp());
    Node::with_op(output, Op::Sigmoid(a.clone()))
}

/// Softmax score of `node` against the scores in `others`:
/// `exp(node) / Σ exp(x) for x in others`.
///
/// This is a pure scalar convenience. It returns a plain number, not a
/// tracked node, so it contributes no backward rule and never participates in
/// gradient propagation. An empty `others` fails fast instead of dividing by
/// zero.
pub fn softmax_score(node: &Node, others: &[Node]) -> Result<f64, NanogradError> {
    if others.is_empty() {
        return Err(NanogradError::EmptySoftmax);
    }
    let denominator: f64 = others.iter().map(|x| x.scalar().exp()).sum();
    Ok(node.scalar().exp() / denominator)
}

impl Node {
    /// Applies ReLU to this node. See [`relu_op`].
    pub fn relu(&self) -> Node {
        relu_op(self)
    }

    /// Applies the logistic sigmoid to this node. See [`sigmoid_op`].
    pub fn sigmoid(&self) -> Node {
        sigmoid_op(self)
    }

    /// Softmax score of this node against `others`. See [`softmax_score`].
    pub fn softmax_score(&self, others: &[Node]) -> Result<f64, NanogradError> {
        softmax_score(self, others)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_relu_clipped() {
        let a = Node::new(-5.0);
        let r = a.relu();
        assert_eq!(r.scalar(), 0.0);
        assert_eq!(r.op_symbol(), "ReLU");

        r.backward();
        assert_eq!(a.grad(), 0.0);
    }

    #[test]
    fn test_relu_active() {
        let a = Node::new(5.0);
        let r = a.relu();
        assert_eq!(r.scalar(), 5.0);

        r.backward();
        assert_eq!(a.grad(), 1.0);
    }

    #[test]
    fn test_relu_blocks_at_zero() {
        let a = Node::new(0.0);
        let r = a.relu();
        assert_eq!(r.scalar(), 0.0);

        r.backward();
        assert_eq!(a.grad(), 0.0);
    }

    #[test]
    fn test_sigmoid_at_zero() {
        let a = Node::new(0.0);
        let r = a.sigmoid();
        assert_eq!(r.scalar(), 0.5);
        assert_eq!(r.op_symbol(), "Sigmoid");

        r.backward();
        // out * (1 - out) = 0.25
        assert_relative_eq!(a.grad(), 0.25);
    }

    #[test]
    fn test_sigmoid_value_and_derivative() {
        let a = Node::new(2.0);
        let r = a.sigmoid();
        let expected = 1.0 / (1.0 + (-2.0_f64).exp());
        assert_relative_eq!(r.scalar(), expected);

        r.backward();
        assert_relative_eq!(a.grad(), expected * (1.0 - expected));
    }

    #[test]
    fn test_sigmoid_chain_uses_upstream_gradient() {
        // f = 3 * sigmoid(a): the upstream factor must scale the derivative.
        let a = Node::new(0.0);
        let f = 3.0 * a.sigmoid();
        f.backward();
        assert_relative_eq!(a.grad(), 3.0 * 0.25);
    }

    #[test]
    fn test_softmax_score() {
        let scores: Vec<Node> = [1.0, 2.0, 3.0].iter().map(|&v| Node::new(v)).collect();
        let result = scores[1].softmax_score(&scores).unwrap();
        let expected = 2.0_f64.exp() / (1.0_f64.exp() + 2.0_f64.exp() + 3.0_f64.exp());
        assert_relative_eq!(result, expected);
    }

    #[test]
    fn test_softmax_scores_sum_to_one() {
        let scores: Vec<Node> = [0.5, -1.0, 2.0].iter().map(|&v| Node::new(v)).collect();
        let total: f64 = scores
            .iter()
            .map(|node| node.softmax_score(&scores).unwrap())
            .sum();
        assert_relative_eq!(total, 1.0);
    }

    #[test]
    fn test_softmax_empty_denominator() {
        let a = Node::new(1.0);
        assert_eq!(
            a.softmax_score(&[]).err().unwrap(),
            NanogradError::EmptySoftmax
        );
    }

    #[test]
    fn test_softmax_does_not_touch_graph() {
        let scores: Vec<Node> = [1.0, 2.0].iter().map(|&v| Node::new(v)).collect();
        let _ = scores[0].softmax_score(&scores).unwrap();
        for node in &scores {
            assert!(node.is_leaf());
            assert_eq!(node.grad(), 0.0);
        }
    }
}
