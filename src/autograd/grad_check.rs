use approx::relative_eq;
use log::trace;
use thiserror::Error;

use crate::error::NanogradError;
use crate::node::Node;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}: analytical grad {analytical} != numerical grad {numerical} (difference {difference})")]
    GradientMismatch {
        input_index: usize,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },

    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(NanogradError),

    #[error("Numerical gradient is not finite for input {input_index}: f(x+eps)={loss_plus}, f(x-eps)={loss_minus}")]
    NonFiniteNumericalGrad {
        input_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
}

impl From<NanogradError> for GradCheckError {
    fn from(err: NanogradError) -> Self {
        GradCheckError::ForwardPassError(err)
    }
}

/// Checks analytical gradients against central finite differences.
///
/// `func` must rebuild its expression from the leaf nodes it is given; graph
/// construction is cheap for scalars, so each probe evaluates the function on
/// a fresh graph with one input nudged by `epsilon`. The analytical gradients
/// come from a single backward pass over the unperturbed inputs (their
/// gradients are reset first).
///
/// Inputs should sit away from non-differentiable points such as the ReLU
/// kink; there the two-sided difference reports the average of the one-sided
/// slopes and the check fails by design.
pub fn check_grad<F>(
    func: F,
    inputs: &[Node],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Node]) -> Result<Node, NanogradError>,
{
    for input in inputs {
        input.zero_grad();
    }
    let output = func(inputs)?;
    output.backward();

    for (index, input) in inputs.iter().enumerate() {
        let x = input.scalar();
        let probe = |shift: f64| -> Result<f64, GradCheckError> {
            let shifted: Vec<Node> = inputs
                .iter()
                .enumerate()
                .map(|(j, node)| {
                    if j == index {
                        Node::new(x + shift)
                    } else {
                        Node::new(node.scalar())
                    }
                })
                .collect();
            Ok(func(&shifted)?.scalar())
        };

        let loss_plus = probe(epsilon)?;
        let loss_minus = probe(-epsilon)?;
        let numerical = (loss_plus - loss_minus) / (2.0 * epsilon);
        if !numerical.is_finite() {
            return Err(GradCheckError::NonFiniteNumericalGrad {
                input_index: index,
                loss_plus,
                loss_minus,
            });
        }

        let analytical = input.grad();
        trace!("grad check input {index}: analytical={analytical} numerical={numerical}");
        if !relative_eq!(
            analytical,
            numerical,
            epsilon = tolerance,
            max_relative = tolerance
        ) {
            return Err(GradCheckError::GradientMismatch {
                input_index: index,
                analytical,
                numerical,
                difference: (analytical - numerical).abs(),
            });
        }
    }
    Ok(())
}
