//! Graph traversal algorithms (DFS and BFS) over a pluggable discovery strategy.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

use crate::types::{SearchError, SearchResult};

use super::VisitedSet;

/// How a strategy visits a node and reports its children.
///
/// The engine calls [`Discovery::visit_and_get_children`] exactly once per
/// distinct node in a run. The call performs the node's side effect (usually
/// appending to `order`) and returns children in the order they should be
/// explored.
pub trait Discovery {
    /// Node identifier. Must hash and compare stably for a whole run.
    type Node: Eq + Hash + Clone + Debug;
    /// Unit appended to the visit order.
    type Payload;

    /// Visit `node` and return its children.
    ///
    /// Strategies must provide this. The default fails with
    /// [`SearchError::NotOverridden`] on the first visit.
    fn visit_and_get_children(
        &mut self,
        node: &Self::Node,
        order: &mut Vec<Self::Payload>,
    ) -> SearchResult<Vec<Self::Node>> {
        let _ = (node, order);
        Err(SearchError::NotOverridden {
            strategy: std::any::type_name::<Self>(),
        })
    }

    /// Clear strategy-held side data. Called at the start of every search.
    fn reset(&mut self) {}
}

/// Search engine parameterized by a discovery strategy.
///
/// Holds the visited set and visit order of the most recent run. Both are
/// reset at the start of every search, so an instance can be reused but not
/// shared between concurrent searches.
pub struct GraphSearcher<D: Discovery> {
    strategy: D,
    visited: VisitedSet<D::Node>,
    order: Vec<D::Payload>,
}

impl<D: Discovery> GraphSearcher<D> {
    /// Create a searcher around a strategy.
    pub fn new(strategy: D) -> Self {
        Self {
            strategy,
            visited: VisitedSet::new(),
            order: Vec::new(),
        }
    }

    /// Depth-first, pre-order search from `start`.
    ///
    /// Children are explored in the order the strategy returns them, each
    /// subtree finished before the next sibling starts.
    pub fn dfs_search(&mut self, start: D::Node) -> SearchResult<()> {
        self.reset();

        // Children go on in reverse so the first child is popped first.
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if let Some(children) = self.visit(node)? {
                stack.extend(children.into_iter().rev());
            }
        }

        log::debug!(
            "dfs_search finished: {} nodes visited",
            self.visited.len()
        );
        Ok(())
    }

    /// Breadth-first search from `start`.
    ///
    /// Every returned child is enqueued, even if already seen; duplicates are
    /// skipped when popped.
    pub fn bfs_search(&mut self, start: D::Node) -> SearchResult<()> {
        self.reset();

        let mut queue: VecDeque<D::Node> = VecDeque::new();
        queue.push_back(start);
        while let Some(node) = queue.pop_front() {
            if let Some(children) = self.visit(node)? {
                queue.extend(children);
            }
        }

        log::debug!(
            "bfs_search finished: {} nodes visited",
            self.visited.len()
        );
        Ok(())
    }

    /// Process a node unless already visited. Returns its children on a first visit.
    fn visit(&mut self, node: D::Node) -> SearchResult<Option<Vec<D::Node>>> {
        if self.visited.contains(&node) {
            return Ok(None);
        }
        log::trace!("visiting {:?}", node);
        self.visited.mark(node.clone());
        let children = self
            .strategy
            .visit_and_get_children(&node, &mut self.order)?;
        Ok(Some(children))
    }

    fn reset(&mut self) {
        self.visited.reset();
        self.order.clear();
        self.strategy.reset();
    }

    /// Payloads recorded by the last run, in visit order.
    pub fn order(&self) -> &[D::Payload] {
        &self.order
    }

    /// Nodes processed by the last run.
    pub fn visited(&self) -> &VisitedSet<D::Node> {
        &self.visited
    }

    /// The discovery strategy.
    pub fn strategy(&self) -> &D {
        &self.strategy
    }

    /// The discovery strategy (mutable).
    pub fn strategy_mut(&mut self) -> &mut D {
        &mut self.strategy
    }

    /// Consume the searcher, returning the strategy and the last visit order.
    pub fn into_parts(self) -> (D, Vec<D::Payload>) {
        (self.strategy, self.order)
    }
}
