use thiserror::Error;

/// Custom error type for the nanograd engine.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq + Clone for easier testing
pub enum NanogradError {
    #[error("Invalid exponent: expected a finite numeric constant, got {found}")]
    InvalidExponent { found: String },

    #[error("Unsupported operand for {operation}: value cannot be represented as a finite f64")]
    UnsupportedOperand { operation: String },

    #[error("Input arity mismatch for {operation}: expected {expected} inputs, got {actual}")]
    InputArityMismatch {
        operation: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid initializer parameter for {operation}: {reason}")]
    InvalidInitializer { operation: String, reason: String },

    #[error("Cannot build a network with no layers")]
    EmptyNetwork,

    #[error("Softmax requires at least one score in the denominator")]
    EmptySoftmax,
}
