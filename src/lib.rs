//! graph-searcher — generic DFS/BFS graph search with pluggable neighbor discovery.
//!
//! The traversal engine knows nothing about where edges come from. A
//! discovery strategy supplies each node's children and side effect: an
//! adjacency matrix, a chain of linked text files, or live web pages whose
//! tables are collected along the way.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod graph;
pub mod html;
pub mod puzzle;
pub mod types;

// Re-export commonly used types at the crate root
pub use config::{resolve_config, SearchConfig};
pub use discovery::{
    AdjacencyMatrix, Browser, FileDiscovery, FileSearcher, HttpBrowser, MatrixDiscovery,
    MatrixSearcher, WebDiscovery, WebDriverSession, WebSearcher,
};
pub use graph::{Discovery, GraphSearcher, VisitedSet};
pub use puzzle::{password_from, reveal_secrets, Interactive, PuzzleConfig};
pub use types::{SearchError, SearchResult, Table};
