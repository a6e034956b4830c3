use rand::distributions::{Distribution, Uniform};
use rand_distr::Normal;

use crate::error::NanogradError;
use crate::node::Node;

/// Leaf node drawn uniformly from `[low, high)`.
///
/// # Panics
/// Panics if `low >= high`.
pub fn uniform(low: f64, high: f64) -> Node {
    let dist = Uniform::new(low, high);
    Node::new(dist.sample(&mut rand::thread_rng()))
}

/// Leaf node drawn from a normal distribution.
///
/// Fails if `std_dev` is negative or not finite.
pub fn normal(mean: f64, std_dev: f64) -> Result<Node, NanogradError> {
    let dist = Normal::new(mean, std_dev).map_err(|e| NanogradError::InvalidInitializer {
        operation: "normal".to_string(),
        reason: e.to_string(),
    })?;
    Ok(Node::new(dist.sample(&mut rand::thread_rng())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_in_range() {
        for _ in 0..100 {
            let node = uniform(-1.0, 1.0);
            assert!(node.scalar() >= -1.0 && node.scalar() < 1.0);
            assert!(node.is_leaf());
            assert_eq!(node.grad(), 0.0);
        }
    }

    #[test]
    fn test_normal_is_leaf() {
        let node = normal(0.0, 1.0).unwrap();
        assert!(node.is_leaf());
    }

    #[test]
    fn test_normal_rejects_negative_std_dev() {
        assert!(matches!(
            normal(0.0, -1.0),
            Err(NanogradError::InvalidInitializer { .. })
        ));
    }
}
