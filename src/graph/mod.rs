//! Traversal engine — DFS/BFS decoupled from neighbor discovery.

pub mod traversal;
pub mod visited;

pub use traversal::{Discovery, GraphSearcher};
pub use visited::VisitedSet;
