//! Discovery strategies — how a node's children are found.

pub mod file;
pub mod http;
pub mod matrix;
pub mod web;
pub mod webdriver;

pub use file::{FileDiscovery, FileSearcher, DEFAULT_BASE_DIR};
pub use http::HttpBrowser;
pub use matrix::{AdjacencyMatrix, MatrixDiscovery, MatrixSearcher};
pub use web::{resolve_href, resolve_hrefs, Browser, WebDiscovery, WebSearcher};
pub use webdriver::WebDriverSession;
