//! Configuration loading from file and environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::discovery::DEFAULT_BASE_DIR;
use crate::puzzle::PuzzleConfig;
use crate::types::{SearchError, SearchResult};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "GSEARCH_CONFIG";

/// Environment variable overriding the WebDriver endpoint.
pub const WEBDRIVER_ENV: &str = "GSEARCH_WEBDRIVER";

/// Settings shared by the CLI commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Directory holding node files for the file strategy.
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
    /// WebDriver endpoint. Without one, web searches use plain HTTP fetches.
    #[serde(default)]
    pub webdriver_url: Option<String>,
    /// Browser requested from the WebDriver endpoint.
    #[serde(default = "default_browser_name")]
    pub browser_name: String,
    #[serde(default = "default_headless")]
    pub headless: bool,
    /// Per-request timeout in seconds.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub puzzle: PuzzleConfig,
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BASE_DIR)
}

fn default_browser_name() -> String {
    "chrome".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("gsearch/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            webdriver_url: None,
            browser_name: default_browser_name(),
            headless: default_headless(),
            http_timeout_secs: default_http_timeout_secs(),
            user_agent: default_user_agent(),
            puzzle: PuzzleConfig::default(),
        }
    }
}

impl SearchConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> SearchResult<SearchConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SearchError::Config(format!("failed to read {}: {}", path.display(), e))
    })?;

    toml::from_str(&content).map_err(|e| {
        SearchError::Config(format!("failed to parse {}: {}", path.display(), e))
    })
}

/// Resolve configuration using priority order:
/// 1. Explicit path (CLI arg)
/// 2. GSEARCH_CONFIG environment variable
/// 3. Built-in defaults
///
/// GSEARCH_WEBDRIVER, when set, replaces `webdriver_url` afterwards.
pub fn resolve_config(explicit: Option<&Path>) -> SearchResult<SearchConfig> {
    let mut config = match explicit {
        Some(path) => load_config(path)?,
        None => match std::env::var_os(CONFIG_ENV) {
            Some(path) => load_config(Path::new(&path))?,
            None => SearchConfig::default(),
        },
    };

    if let Ok(url) = std::env::var(WEBDRIVER_ENV) {
        if !url.is_empty() {
            config.webdriver_url = Some(url);
        }
    }
    Ok(config)
}
