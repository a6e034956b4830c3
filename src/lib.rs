//! Scalar reverse-mode automatic differentiation.
//!
//! Every arithmetic operation on a [`Node`] records itself in a computation
//! graph; calling [`Node::backward`] on an output walks that graph once in
//! reverse topological order and accumulates the gradient of the output with
//! respect to every ancestor into each ancestor's `grad` field.
//!
//! ```
//! use nanograd::Node;
//!
//! let x = Node::new(2.0);
//! let y = Node::new(-3.0);
//! let z = Node::new(10.0);
//!
//! let h = (&x * &y + &z).relu();
//! assert_eq!(h.scalar(), 4.0);
//!
//! h.backward();
//! assert_eq!(x.grad(), -3.0);
//! assert_eq!(y.grad(), 2.0);
//! assert_eq!(z.grad(), 1.0);
//! ```
//!
//! The engine is single-threaded by construction: `Node` is a shared handle
//! over interior-mutable state and is neither `Send` nor `Sync`. Callers must
//! not differentiate overlapping graphs concurrently.

pub mod autograd;
pub mod error;
pub mod model;
pub mod nn;
pub mod node;
pub mod ops;

mod op;

pub use error::NanogradError;
pub use node::Node;
