//! Password-reveal flow driven by a table collected from a web search.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::discovery::Browser;
use crate::types::{SearchError, SearchResult, Table};

/// A browser that can also fill fields, click and read elements.
///
/// Elements are addressed by their `id` attribute unless noted.
pub trait Interactive: Browser {
    /// Type `text` into the element.
    fn send_keys(&mut self, element_id: &str, text: &str) -> SearchResult<()>;

    /// Click the element.
    fn click(&mut self, element_id: &str) -> SearchResult<()>;

    /// Attribute of the first element with tag `tag`, or `None` if unset.
    fn attribute_by_tag(&mut self, tag: &str, attribute: &str) -> SearchResult<Option<String>>;

    /// Visible text of the element.
    fn text_by_id(&mut self, element_id: &str) -> SearchResult<String>;

    /// Fetch a resource. `None` unless the server answered 200.
    fn download(&mut self, url: &str) -> SearchResult<Option<Vec<u8>>>;
}

impl<I: Interactive + ?Sized> Interactive for &mut I {
    fn send_keys(&mut self, element_id: &str, text: &str) -> SearchResult<()> {
        (**self).send_keys(element_id, text)
    }

    fn click(&mut self, element_id: &str) -> SearchResult<()> {
        (**self).click(element_id)
    }

    fn attribute_by_tag(&mut self, tag: &str, attribute: &str) -> SearchResult<Option<String>> {
        (**self).attribute_by_tag(tag, attribute)
    }

    fn text_by_id(&mut self, element_id: &str) -> SearchResult<String> {
        (**self).text_by_id(element_id)
    }

    fn download(&mut self, url: &str) -> SearchResult<Option<Vec<u8>>> {
        (**self).download(url)
    }
}

/// Element ids, timings and output path for [`reveal_secrets`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleConfig {
    #[serde(default = "default_password_field")]
    pub password_field: String,
    #[serde(default = "default_submit_button")]
    pub submit_button: String,
    #[serde(default = "default_view_location_button")]
    pub view_location_button: String,
    /// Tag name of the revealed image.
    #[serde(default = "default_image_tag")]
    pub image_tag: String,
    #[serde(default = "default_location_field")]
    pub location_field: String,
    /// Travel-log column whose values spell the password.
    #[serde(default = "default_clue_column")]
    pub clue_column: String,
    /// Wait after submitting the password.
    #[serde(default = "default_submit_delay_secs")]
    pub submit_delay_secs: u64,
    /// Wait after asking for the location.
    #[serde(default = "default_reveal_delay_secs")]
    pub reveal_delay_secs: u64,
    /// Where the revealed image is saved.
    #[serde(default = "default_image_path")]
    pub image_path: PathBuf,
}

fn default_password_field() -> String {
    "password-textbox".to_string()
}

fn default_submit_button() -> String {
    "submit-button".to_string()
}

fn default_view_location_button() -> String {
    "view-location-button".to_string()
}

fn default_image_tag() -> String {
    "img".to_string()
}

fn default_location_field() -> String {
    "location".to_string()
}

fn default_clue_column() -> String {
    "clue".to_string()
}

fn default_submit_delay_secs() -> u64 {
    10
}

fn default_reveal_delay_secs() -> u64 {
    5
}

fn default_image_path() -> PathBuf {
    PathBuf::from("Current_Location.jpg")
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            password_field: default_password_field(),
            submit_button: default_submit_button(),
            view_location_button: default_view_location_button(),
            image_tag: default_image_tag(),
            location_field: default_location_field(),
            clue_column: default_clue_column(),
            submit_delay_secs: default_submit_delay_secs(),
            reveal_delay_secs: default_reveal_delay_secs(),
            image_path: default_image_path(),
        }
    }
}

/// Concatenate a column's values in row order.
pub fn password_from(travellog: &Table, column: &str) -> SearchResult<String> {
    travellog
        .column(column)
        .map(|values| values.concat())
        .ok_or_else(|| SearchError::MissingColumn(column.to_string()))
}

/// Unlock the page at `url` with the travel log's clues and return the
/// revealed location text.
///
/// Steps: open `url`, type the password, submit, wait, click the view
/// button, wait, save the image, then read the location field. The image is
/// written only if its download succeeds.
pub fn reveal_secrets<D: Interactive + ?Sized>(
    driver: &mut D,
    url: &str,
    travellog: &Table,
    config: &PuzzleConfig,
) -> SearchResult<String> {
    let password = password_from(travellog, &config.clue_column)?;
    log::info!(
        "submitting {}-character password to {}",
        password.chars().count(),
        url
    );

    driver.navigate(url)?;
    driver.send_keys(&config.password_field, &password)?;
    driver.click(&config.submit_button)?;
    thread::sleep(Duration::from_secs(config.submit_delay_secs));

    driver.click(&config.view_location_button)?;
    thread::sleep(Duration::from_secs(config.reveal_delay_secs));

    match driver.attribute_by_tag(&config.image_tag, "src")? {
        Some(src) => match driver.download(&src)? {
            Some(bytes) => {
                std::fs::write(&config.image_path, &bytes)?;
                log::info!(
                    "saved {} bytes from {} to {}",
                    bytes.len(),
                    src,
                    config.image_path.display()
                );
            }
            None => log::warn!("image at {} was not downloaded", src),
        },
        None => log::warn!("<{}> has no src attribute", config.image_tag),
    }

    driver.text_by_id(&config.location_field)
}
