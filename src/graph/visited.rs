//! Visited-set tracker scoped to a single traversal run.

use std::collections::HashSet;
use std::hash::Hash;

/// Set of node identifiers processed during one traversal.
///
/// Grows monotonically during a run and is cleared only by [`VisitedSet::reset`].
#[derive(Debug, Clone)]
pub struct VisitedSet<N> {
    nodes: HashSet<N>,
}

impl<N: Eq + Hash> VisitedSet<N> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            nodes: HashSet::new(),
        }
    }

    /// Forget every node. Called at the start of each search.
    pub fn reset(&mut self) {
        self.nodes.clear();
    }

    /// Mark a node as visited. Returns `true` on the first visit.
    pub fn mark(&mut self, node: N) -> bool {
        self.nodes.insert(node)
    }

    /// Whether the node was already visited in this run.
    pub fn contains(&self, node: &N) -> bool {
        self.nodes.contains(node)
    }

    /// Number of distinct nodes visited.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if nothing has been visited yet.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate visited nodes in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }
}

impl<N: Eq + Hash> Default for VisitedSet<N> {
    fn default() -> Self {
        Self::new()
    }
}
