//! Comparisons between nodes look at `scalar` values only. They never join
//! the computation graph and produce no node, so traversal identity (which is
//! the underlying allocation, see `autograd::graph`) stays independent of
//! value equality.

use std::cmp::Ordering;

use crate::node::Node;

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.scalar() == other.scalar()
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.scalar().partial_cmp(&other.scalar())
    }
}
