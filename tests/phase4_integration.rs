//! Phase 4 tests: puzzle flow, configuration, and end-to-end search into reveal.

use std::collections::HashMap;
use std::fs;

use graph_searcher::config::{load_config, SearchConfig};
use graph_searcher::discovery::{Browser, WebSearcher};
use graph_searcher::html;
use graph_searcher::puzzle::{password_from, reveal_secrets, Interactive, PuzzleConfig};
use graph_searcher::types::{SearchError, SearchResult, Table};

// ==================== Helper ====================

/// Scripted driver recording each interaction.
#[derive(Default)]
struct FakeDriver {
    pages: HashMap<String, String>,
    current: Option<String>,
    actions: Vec<String>,
    image_src: Option<String>,
    image_bytes: Option<Vec<u8>>,
    location: String,
}

impl Browser for FakeDriver {
    fn navigate(&mut self, url: &str) -> SearchResult<()> {
        self.actions.push(format!("get {}", url));
        self.current = Some(url.to_string());
        Ok(())
    }

    fn page_source(&mut self) -> SearchResult<String> {
        let url = self.current.clone().unwrap_or_default();
        Ok(self.pages.get(&url).cloned().unwrap_or_default())
    }

    fn anchor_hrefs(&mut self) -> SearchResult<Vec<String>> {
        let source = self.page_source()?;
        Ok(html::anchor_hrefs(&source))
    }
}

impl Interactive for FakeDriver {
    fn send_keys(&mut self, element_id: &str, text: &str) -> SearchResult<()> {
        self.actions.push(format!("type {} {}", element_id, text));
        Ok(())
    }

    fn click(&mut self, element_id: &str) -> SearchResult<()> {
        if element_id == "missing" {
            return Err(SearchError::WebDriver {
                error: "no such element".to_string(),
                message: element_id.to_string(),
            });
        }
        self.actions.push(format!("click {}", element_id));
        Ok(())
    }

    fn attribute_by_tag(&mut self, tag: &str, attribute: &str) -> SearchResult<Option<String>> {
        self.actions.push(format!("attr {} {}", tag, attribute));
        Ok(self.image_src.clone())
    }

    fn text_by_id(&mut self, element_id: &str) -> SearchResult<String> {
        self.actions.push(format!("text {}", element_id));
        Ok(self.location.clone())
    }

    fn download(&mut self, url: &str) -> SearchResult<Option<Vec<u8>>> {
        self.actions.push(format!("download {}", url));
        Ok(self.image_bytes.clone())
    }
}

fn travellog() -> Table {
    let mut table = Table::new(["clue", "city"]);
    table.push_row(["4", "Madison"]);
    table.push_row(["2", "Chicago"]);
    table.push_row(["7", "Denver"]);
    table
}

fn fast_config(dir: &tempfile::TempDir) -> PuzzleConfig {
    PuzzleConfig {
        submit_delay_secs: 0,
        reveal_delay_secs: 0,
        image_path: dir.path().join("Current_Location.jpg"),
        ..PuzzleConfig::default()
    }
}

// ==================== Puzzle Tests ====================

#[test]
fn test_password_from_clue_column() {
    assert_eq!(password_from(&travellog(), "clue").unwrap(), "427");
    match password_from(&travellog(), "hint").unwrap_err() {
        SearchError::MissingColumn(col) => assert_eq!(col, "hint"),
        e => panic!("Expected MissingColumn error, got {:?}", e),
    }
}

#[test]
fn test_reveal_secrets_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let config = fast_config(&dir);
    let mut driver = FakeDriver {
        image_src: Some("http://test.local/loc.jpg".to_string()),
        image_bytes: Some(vec![0xFF, 0xD8, 0xFF]),
        location: "Lake Mendota".to_string(),
        ..FakeDriver::default()
    };

    let location =
        reveal_secrets(&mut driver, "http://test.local/", &travellog(), &config).unwrap();

    assert_eq!(location, "Lake Mendota");
    assert_eq!(
        driver.actions,
        vec![
            "get http://test.local/",
            "type password-textbox 427",
            "click submit-button",
            "click view-location-button",
            "attr img src",
            "download http://test.local/loc.jpg",
            "text location",
        ]
    );
    assert_eq!(fs::read(&config.image_path).unwrap(), vec![0xFF, 0xD8, 0xFF]);
}

#[test]
fn test_reveal_secrets_failed_download_skips_image() {
    let dir = tempfile::tempdir().unwrap();
    let config = fast_config(&dir);
    let mut driver = FakeDriver {
        image_src: Some("http://test.local/loc.jpg".to_string()),
        image_bytes: None,
        location: "Somewhere".to_string(),
        ..FakeDriver::default()
    };

    let location =
        reveal_secrets(&mut driver, "http://test.local/", &travellog(), &config).unwrap();
    assert_eq!(location, "Somewhere");
    assert!(!config.image_path.exists());
}

#[test]
fn test_reveal_secrets_missing_column_does_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = PuzzleConfig {
        clue_column: "hint".to_string(),
        ..fast_config(&dir)
    };
    let mut driver = FakeDriver::default();

    let result = reveal_secrets(&mut driver, "http://test.local/", &travellog(), &config);
    assert!(matches!(result, Err(SearchError::MissingColumn(_))));
    assert!(driver.actions.is_empty());
}

#[test]
fn test_reveal_secrets_missing_element_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let config = PuzzleConfig {
        submit_button: "missing".to_string(),
        ..fast_config(&dir)
    };
    let mut driver = FakeDriver::default();

    let result = reveal_secrets(&mut driver, "http://test.local/", &travellog(), &config);
    assert!(matches!(result, Err(SearchError::WebDriver { .. })));
    assert_eq!(driver.actions.len(), 2);
}

// ==================== Config Tests ====================

#[test]
fn test_config_defaults() {
    let config = SearchConfig::default();
    assert_eq!(config.base_dir.to_str(), Some("file_nodes"));
    assert!(config.webdriver_url.is_none());
    assert_eq!(config.http_timeout().as_secs(), 30);
    assert_eq!(config.puzzle.password_field, "password-textbox");
    assert_eq!(config.puzzle.submit_delay_secs, 10);
    assert_eq!(config.puzzle.reveal_delay_secs, 5);
    assert_eq!(config.puzzle.image_path.to_str(), Some("Current_Location.jpg"));
}

#[test]
fn test_config_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gsearch.toml");
    fs::write(
        &path,
        r#"
base_dir = "nodes"
webdriver_url = "http://localhost:9515"

[puzzle]
submit_delay_secs = 1
location_field = "where"
"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.base_dir.to_str(), Some("nodes"));
    assert_eq!(config.webdriver_url.as_deref(), Some("http://localhost:9515"));
    assert_eq!(config.browser_name, "chrome");
    assert_eq!(config.puzzle.submit_delay_secs, 1);
    assert_eq!(config.puzzle.location_field, "where");
    assert_eq!(config.puzzle.clue_column, "clue");
}

#[test]
fn test_config_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(matches!(load_config(&missing), Err(SearchError::Config(_))));

    let bad = dir.path().join("bad.toml");
    fs::write(&bad, "http_timeout_secs = \"soon\"").unwrap();
    assert!(matches!(load_config(&bad), Err(SearchError::Config(_))));
}

// ==================== End-to-End ====================

#[test]
fn test_search_then_reveal_with_one_driver() {
    let dir = tempfile::tempdir().unwrap();
    let config = fast_config(&dir);
    let mut driver = FakeDriver {
        location: "Picnic Point".to_string(),
        ..FakeDriver::default()
    };
    driver.pages.insert(
        "http://test.local/1.html".to_string(),
        r#"<table><tr><th>clue</th></tr><tr><td>3</td></tr></table>
           <a href="http://test.local/2.html">2</a>"#
            .to_string(),
    );
    driver.pages.insert(
        "http://test.local/2.html".to_string(),
        r#"<table><tr><th>clue</th></tr><tr><td>9</td></tr></table>
           <a href="http://test.local/1.html">1</a>"#
            .to_string(),
    );

    let table = {
        let mut searcher = WebSearcher::with_browser(&mut driver);
        searcher
            .bfs_search("http://test.local/1.html".to_string())
            .unwrap();
        searcher.table()
    };
    assert_eq!(table.len(), 2);

    driver.actions.clear();
    let location =
        reveal_secrets(&mut driver, "http://test.local/", &table, &config).unwrap();
    assert_eq!(location, "Picnic Point");
    assert!(driver
        .actions
        .contains(&"type password-textbox 39".to_string()));
}
