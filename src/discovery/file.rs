//! File strategy — one text file per node under a base directory.
//!
//! Line 1 of a node file is its display payload; line 2, if present, is a
//! comma-separated list of child filenames relative to the same base.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::graph::{Discovery, GraphSearcher};
use crate::types::SearchResult;

/// Default directory holding node files.
pub const DEFAULT_BASE_DIR: &str = "file_nodes";

/// Discovery over linked node files.
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    base: PathBuf,
}

impl FileDiscovery {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Directory node filenames are resolved against.
    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl Default for FileDiscovery {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_DIR)
    }
}

impl Discovery for FileDiscovery {
    type Node = String;
    type Payload = String;

    fn visit_and_get_children(
        &mut self,
        node: &String,
        order: &mut Vec<String>,
    ) -> SearchResult<Vec<String>> {
        let path = self.base.join(node);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("File not found: {}", path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut lines = content.trim().lines();
        order.push(lines.next().unwrap_or_default().to_string());

        Ok(lines
            .next()
            .map(|line| {
                line.split(',')
                    .map(str::trim)
                    .filter(|child| !child.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Graph searcher over linked node files.
pub type FileSearcher = GraphSearcher<FileDiscovery>;

impl FileSearcher {
    /// Create a searcher rooted at `base`.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        GraphSearcher::new(FileDiscovery::new(base))
    }

    /// All recorded payloads joined into one string, in visit order.
    pub fn concat_order(&self) -> String {
        self.order().concat()
    }
}
