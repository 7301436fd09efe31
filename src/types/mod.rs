//! Shared data types: errors and tabular side data.

pub mod error;
pub mod table;

pub use error::{SearchError, SearchResult};
pub use table::Table;
