use std::fmt;

use crate::error::NanogradError;
use crate::nn::layers::Layer;
use crate::nn::module::Module;
use crate::node::Node;

/// Multilayer perceptron: a sequential container of dense layers.
///
/// Every layer except the last is non-linear (ReLU); the output layer is
/// linear so the network can produce unbounded values.
#[derive(Debug)]
pub struct Mlp {
    layers: Vec<Layer>,
}

impl Mlp {
    /// Creates an MLP over `n_inputs` inputs. `layer_sizes` lists the width
    /// of every hidden layer and the output layer, in order.
    pub fn new(n_inputs: usize, layer_sizes: &[usize]) -> Result<Self, NanogradError> {
        if layer_sizes.is_empty() {
            return Err(NanogradError::EmptyNetwork);
        }
        let dims: Vec<usize> = std::iter::once(n_inputs)
            .chain(layer_sizes.iter().copied())
            .collect();
        let last = layer_sizes.len() - 1;
        let layers = (0..layer_sizes.len())
            .map(|i| Layer::new(dims[i], dims[i + 1], i != last))
            .collect();
        Ok(Mlp { layers })
    }

    /// Threads the inputs through every layer in order.
    pub fn forward(&self, inputs: &[Node]) -> Result<Vec<Node>, NanogradError> {
        let mut activations = inputs.to_vec();
        for layer in &self.layers {
            activations = layer.forward(&activations)?;
        }
        Ok(activations)
    }

    /// Builds an MLP from existing layers.
    pub fn from_layers(layers: Vec<Layer>) -> Result<Self, NanogradError> {
        if layers.is_empty() {
            return Err(NanogradError::EmptyNetwork);
        }
        Ok(Mlp { layers })
    }

    pub fn n_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }
}

impl Module for Mlp {
    fn parameters(&self) -> Vec<Node> {
        self.layers
            .iter()
            .flat_map(|layer| layer.parameters())
            .collect()
    }
}

impl fmt::Display for Mlp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MLP(")?;
        for (i, layer) in self.layers.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{layer}")?;
        }
        write!(f, ")")
    }
}
