use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::ToPrimitive;

use crate::error::NanogradError;
use crate::node::Node;
use crate::op::Op;

// --- Recorded operations ---

/// Adds two nodes, recording the operation in the graph.
///
/// Backward rule: the upstream gradient flows to both operands unchanged.
pub fn add_op(a: &Node, b: &Node) -> Node {
    Node::with_op(a.scalar() + b.scalar(), Op::Add(a.clone(), b.clone()))
}

/// Multiplies two nodes, recording the operation in the graph.
///
/// Backward rule: each operand's contribution is the upstream gradient scaled
/// by the *other* operand's value (cross-derivatives of the product).
pub fn mul_op(a: &Node, b: &Node) -> Node {
    Node::with_op(a.scalar() * b.scalar(), Op::Mul(a.clone(), b.clone()))
}

/// Raises `base` to a constant exponent, recording the operation.
///
/// The exponent is a plain numeric constant, never a tracked node; a value
/// that cannot be represented as a finite `f64` fails with
/// [`NanogradError::InvalidExponent`].
pub fn pow_op<P>(base: &Node, exponent: P) -> Result<Node, NanogradError>
where
    P: ToPrimitive + Debug,
{
    let p = match exponent.to_f64() {
        Some(p) if p.is_finite() => p,
        _ => {
            return Err(NanogradError::InvalidExponent {
                found: format!("{exponent:?}"),
            })
        }
    };
    Ok(pow_raw(base, p))
}

// Private form for the derived operators, which only use finite constants.
pub(crate) fn pow_raw(base: &Node, p: f64) -> Node {
    Node::with_op(base.scalar().powf(p), Op::Pow(base.clone(), p))
}

// --- Derived operations ---
// All expressed through add / mul / pow, so they need no backward rule of
// their own. Diagnostics show the underlying operations.

/// Negation, as multiplication by -1.
pub fn neg_op(a: &Node) -> Node {
    mul_op(a, &Node::new(-1.0))
}

/// Subtraction, as `a + (-b)`.
pub fn sub_op(a: &Node, b: &Node) -> Node {
    add_op(a, &neg_op(b))
}

/// Division, as `a * b^-1`.
pub fn div_op(a: &Node, b: &Node) -> Node {
    mul_op(a, &pow_raw(b, -1.0))
}

impl Node {
    /// Raises this node to a constant exponent. See [`pow_op`].
    pub fn pow<P>(&self, exponent: P) -> Result<Node, NanogradError>
    where
        P: ToPrimitive + Debug,
    {
        pow_op(self, exponent)
    }
}

// --- Operator sugar ---
// Literal operands are promoted through the explicit `Node::from` conversion
// at the operator boundary; operands are always nodes internally.

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $func:path) => {
        impl $trait for &Node {
            type Output = Node;
            fn $method(self, rhs: &Node) -> Node {
                $func(self, rhs)
            }
        }

        impl $trait for Node {
            type Output = Node;
            fn $method(self, rhs: Node) -> Node {
                $func(&self, &rhs)
            }
        }

        impl $trait<&Node> for Node {
            type Output = Node;
            fn $method(self, rhs: &Node) -> Node {
                $func(&self, rhs)
            }
        }

        impl $trait<Node> for &Node {
            type Output = Node;
            fn $method(self, rhs: Node) -> Node {
                $func(self, &rhs)
            }
        }

        impl $trait<f64> for &Node {
            type Output = Node;
            fn $method(self, rhs: f64) -> Node {
                $func(self, &Node::from(rhs))
            }
        }

        impl $trait<f64> for Node {
            type Output = Node;
            fn $method(self, rhs: f64) -> Node {
                $func(&self, &Node::from(rhs))
            }
        }

        impl $trait<&Node> for f64 {
            type Output = Node;
            fn $method(self, rhs: &Node) -> Node {
                $func(&Node::from(self), rhs)
            }
        }

        impl $trait<Node> for f64 {
            type Output = Node;
            fn $method(self, rhs: Node) -> Node {
                $func(&Node::from(self), &rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, add_op);
impl_binary_op!(Sub, sub, sub_op);
impl_binary_op!(Mul, mul, mul_op);
impl_binary_op!(Div, div, div_op);

impl Neg for &Node {
    type Output = Node;
    fn neg(self) -> Node {
        neg_op(self)
    }
}

impl Neg for Node {
    type Output = Node;
    fn neg(self) -> Node {
        neg_op(&self)
    }
}

// --- Tests ---
