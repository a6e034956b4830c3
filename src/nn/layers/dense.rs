use std::fmt;

use crate::error::NanogradError;
use crate::nn::layers::neuron::Neuron;
use crate::nn::module::Module;
use crate::node::Node;

/// A stack of neurons over the same inputs: one output node per neuron.
#[derive(Debug)]
pub struct Layer {
    neurons: Vec<Neuron>,
}

impl Layer {
    /// Creates a layer of `n_outputs` neurons over `n_inputs` inputs. The
    /// `nonlinear` flag selects whether each neuron applies ReLU.
    pub fn new(n_inputs: usize, n_outputs: usize, nonlinear: bool) -> Self {
        let neurons = (0..n_outputs)
            .map(|_| Neuron::new(n_inputs, nonlinear))
            .collect();
        Layer { neurons }
    }

    /// Builds a layer from existing neurons.
    pub fn from_neurons(neurons: Vec<Neuron>) -> Self {
        Layer { neurons }
    }

    /// Applies every neuron to the inputs.
    pub fn forward(&self, inputs: &[Node]) -> Result<Vec<Node>, NanogradError> {
        self.neurons
            .iter()
            .map(|neuron| neuron.forward(inputs))
            .collect()
    }

    pub fn n_outputs(&self) -> usize {
        self.neurons.len()
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }
}

impl Module for Layer {
    fn parameters(&self) -> Vec<Node> {
        self.neurons
            .iter()
            .flat_map(|neuron| neuron.parameters())
            .collect()
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Layer(")?;
        for (i, neuron) in self.neurons.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{neuron}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_forward_one_output_per_neuron() {
        let layer = Layer::new(2, 3, true);
        let inputs = vec![Node::new(0.5), Node::new(-0.5)];
        let outputs = layer.forward(&inputs).unwrap();
        assert_eq!(outputs.len(), 3);
    }

    #[test]
    fn test_parameters_count() {
        let layer = Layer::new(3, 4, true);
        // 4 neurons, each with 3 weights and a bias.
        assert_eq!(layer.parameters().len(), 16);
    }

    #[test]
    fn test_forward_deterministic() {
        let layer = Layer::from_neurons(vec![
            Neuron::from_parameters(vec![Node::new(1.0)], Node::new(0.0), false),
            Neuron::from_parameters(vec![Node::new(-2.0)], Node::new(1.0), false),
        ]);
        let outputs = layer.forward(&[Node::new(3.0)]).unwrap();
        assert_relative_eq!(outputs[0].scalar(), 3.0);
        assert_relative_eq!(outputs[1].scalar(), -5.0);
    }

    #[test]
    fn test_forward_arity_mismatch_propagates() {
        let layer = Layer::new(2, 1, false);
        assert!(matches!(
            layer.forward(&[Node::new(1.0)]),
            Err(NanogradError::InputArityMismatch { .. })
        ));
    }

    #[test]
    fn test_zero_grad_resets_neurons() {
        let layer = Layer::new(2, 2, false);
        let inputs = vec![Node::new(1.0), Node::new(2.0)];
        for output in layer.forward(&inputs).unwrap() {
            output.backward();
        }
        layer.zero_grad();
        for param in layer.parameters() {
            assert_eq!(param.grad(), 0.0);
        }
    }
}
