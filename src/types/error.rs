//! Error types for the graph-searcher library.

use thiserror::Error;

/// All errors that can occur while searching a graph.
#[derive(Error, Debug)]
pub enum SearchError {
    /// A strategy was used without supplying its discovery operation.
    #[error("visit_and_get_children must be overridden by strategy {strategy}")]
    NotOverridden { strategy: &'static str },

    /// Node label not present in the adjacency matrix row index.
    #[error("Node {0:?} not found in adjacency matrix")]
    UnknownNode(String),

    /// Malformed adjacency matrix.
    #[error("Invalid adjacency matrix: {0}")]
    InvalidMatrix(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read or write error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Fetch or navigation failure.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Error payload returned by a WebDriver endpoint.
    #[error("WebDriver error ({error}): {message}")]
    WebDriver { error: String, message: String },

    /// URL that cannot be parsed or resolved.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Table lacks a required column.
    #[error("Column {0:?} not found in table")]
    MissingColumn(String),

    /// Configuration could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        SearchError::Http(e.to_string())
    }
}

/// Convenience result type for graph-searcher operations.
pub type SearchResult<T> = Result<T, SearchError>;
