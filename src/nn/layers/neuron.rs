use std::fmt;

use crate::error::NanogradError;
use crate::nn::init;
use crate::nn::module::Module;
use crate::node::Node;

/// A single unit: one weight per input plus a bias, with an optional ReLU on
/// the weighted sum.
#[derive(Debug)]
pub struct Neuron {
    weights: Vec<Node>,
    bias: Node,
    nonlinear: bool,
}

impl Neuron {
    /// Creates a neuron over `n_inputs` inputs. Weights are initialized
    /// uniformly over `[-1, 1)`, the bias to zero.
    pub fn new(n_inputs: usize, nonlinear: bool) -> Self {
        let weights = (0..n_inputs).map(|_| init::uniform(-1.0, 1.0)).collect();
        Neuron {
            weights,
            bias: Node::new(0.0),
            nonlinear,
        }
    }

    /// Builds a neuron from existing parameter nodes, for deterministic
    /// setups and for restoring trained weights.
    pub fn from_parameters(weights: Vec<Node>, bias: Node, nonlinear: bool) -> Self {
        Neuron {
            weights,
            bias,
            nonlinear,
        }
    }

    /// Weighted sum of the inputs plus the bias, passed through ReLU when the
    /// neuron is non-linear.
    pub fn forward(&self, inputs: &[Node]) -> Result<Node, NanogradError> {
        if inputs.len() != self.weights.len() {
            return Err(NanogradError::InputArityMismatch {
                operation: "Neuron::forward".to_string(),
                expected: self.weights.len(),
                actual: inputs.len(),
            });
        }
        let mut activation = self.bias.clone();
        for (weight, input) in self.weights.iter().zip(inputs) {
            activation = &activation + &(weight * input);
        }
        Ok(if self.nonlinear {
            activation.relu()
        } else {
            activation
        })
    }

    pub fn n_inputs(&self) -> usize {
        self.weights.len()
    }

    pub fn is_nonlinear(&self) -> bool {
        self.nonlinear
    }
}

impl Module for Neuron {
    fn parameters(&self) -> Vec<Node> {
        let mut params = self.weights.clone();
        params.push(self.bias.clone());
        params
    }
}

impl fmt::Display for Neuron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.nonlinear { "ReLU" } else { "Linear" };
        write!(f, "{}Neuron({})", kind, self.weights.len())
    }
}
