//! CLI command implementations.

use std::path::Path;

use crate::config::SearchConfig;
use crate::discovery::{
    AdjacencyMatrix, Browser, FileSearcher, HttpBrowser, MatrixSearcher, WebDriverSession,
    WebSearcher,
};
use crate::puzzle::reveal_secrets;
use crate::types::{SearchError, SearchResult, Table};

/// Which traversal to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Dfs,
    Bfs,
}

impl SearchMode {
    pub fn name(&self) -> &'static str {
        match self {
            SearchMode::Dfs => "dfs",
            SearchMode::Bfs => "bfs",
        }
    }
}

/// Search an adjacency matrix loaded from CSV.
pub fn cmd_matrix(path: &Path, start: &str, mode: SearchMode, json: bool) -> SearchResult<()> {
    let matrix = AdjacencyMatrix::from_csv_path(path)?;
    let mut searcher = MatrixSearcher::from_matrix(matrix);
    match mode {
        SearchMode::Dfs => searcher.dfs_search(start.to_string())?,
        SearchMode::Bfs => searcher.bfs_search(start.to_string())?,
    }

    print_order(mode, searcher.order(), json);
    Ok(())
}

/// Search linked node files and print the assembled message.
pub fn cmd_files(base: &Path, start: &str, mode: SearchMode, json: bool) -> SearchResult<()> {
    let mut searcher = FileSearcher::with_base(base);
    match mode {
        SearchMode::Dfs => searcher.dfs_search(start.to_string())?,
        SearchMode::Bfs => searcher.bfs_search(start.to_string())?,
    }

    let message = searcher.concat_order();
    if json {
        println!(
            "{}",
            serde_json::json!({
                "mode": mode.name(),
                "order": searcher.order(),
                "message": message,
            })
        );
    } else {
        for payload in searcher.order() {
            println!("{}", payload);
        }
        println!("Message: {}", message);
    }
    Ok(())
}

/// Crawl from `start_url`, optionally saving the combined table as CSV.
pub fn cmd_web(
    config: &SearchConfig,
    start_url: &str,
    mode: SearchMode,
    table_out: Option<&Path>,
    json: bool,
) -> SearchResult<()> {
    match &config.webdriver_url {
        Some(endpoint) => {
            let session = WebDriverSession::connect(
                endpoint,
                &config.browser_name,
                config.headless,
                config.http_timeout(),
            )?;
            run_web(session, start_url, mode, table_out, json)
        }
        None => {
            let browser = HttpBrowser::new(config.http_timeout(), &config.user_agent)?;
            run_web(browser, start_url, mode, table_out, json)
        }
    }
}

fn run_web<B: Browser>(
    browser: B,
    start_url: &str,
    mode: SearchMode,
    table_out: Option<&Path>,
    json: bool,
) -> SearchResult<()> {
    let mut searcher = WebSearcher::with_browser(browser);
    match mode {
        SearchMode::Dfs => searcher.dfs_search(start_url.to_string())?,
        SearchMode::Bfs => searcher.bfs_search(start_url.to_string())?,
    }
    let table = searcher.table();

    if let Some(path) = table_out {
        table.write_csv(std::fs::File::create(path)?)?;
    }

    if json {
        println!(
            "{}",
            serde_json::json!({
                "mode": mode.name(),
                "order": searcher.order(),
                "table": table,
            })
        );
    } else {
        print_order(mode, searcher.order(), false);
        println!("Table rows: {}", table.len());
        if let Some(path) = table_out {
            println!("Table written to {}", path.display());
        }
    }
    Ok(())
}

/// Run the password-reveal flow against `url` with a travel log from CSV.
pub fn cmd_reveal(
    config: &SearchConfig,
    url: &str,
    travellog: &Path,
    json: bool,
) -> SearchResult<()> {
    let endpoint = config.webdriver_url.as_deref().ok_or_else(|| {
        SearchError::Config(
            "reveal needs a WebDriver endpoint (--webdriver or GSEARCH_WEBDRIVER)".to_string(),
        )
    })?;
    let table = Table::from_csv_path(travellog)?;
    let mut session = WebDriverSession::connect(
        endpoint,
        &config.browser_name,
        config.headless,
        config.http_timeout(),
    )?;

    let location = reveal_secrets(&mut session, url, &table, &config.puzzle)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "location": location,
                "image": config.puzzle.image_path.display().to_string(),
            })
        );
    } else {
        println!("Location: {}", location);
    }
    Ok(())
}

fn print_order(mode: SearchMode, order: &[String], json: bool) {
    if json {
        println!(
            "{}",
            serde_json::json!({ "mode": mode.name(), "order": order })
        );
    } else {
        println!("{} visited {} nodes:", mode.name().to_uppercase(), order.len());
        for (i, node) in order.iter().enumerate() {
            println!("  {:>3}. {}", i + 1, node);
        }
    }
}
