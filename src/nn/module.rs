use crate::node::Node;

/// The base trait for all neural network building blocks (neurons, layers,
/// containers).
///
/// A module's parameters are the leaf nodes adjusted during training:
/// weights and biases, including those of sub-modules. Handles are cheap
/// clones; the returned nodes are the live parameters, not copies of them.
pub trait Module {
    /// All learnable parameter nodes of the module.
    fn parameters(&self) -> Vec<Node>;

    /// Resets every parameter gradient to zero.
    ///
    /// Gradients accumulate across backward passes; the engine never resets
    /// them on its own, so this is called between optimization steps.
    fn zero_grad(&self) {
        for param in self.parameters() {
            param.zero_grad();
        }
    }
}
