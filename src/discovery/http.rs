//! Static-fetch browser over `reqwest::blocking`.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;

use crate::html;
use crate::types::{SearchError, SearchResult};

use super::web::{resolve_hrefs, Browser};

/// Browser that fetches raw HTML without running scripts.
///
/// Anchor targets are resolved against the final (post-redirect) page URL.
#[derive(Debug)]
pub struct HttpBrowser {
    client: Client,
    current: Option<(Url, String)>,
}

impl HttpBrowser {
    /// Build a browser with a request timeout and user agent.
    pub fn new(timeout: Duration, user_agent: &str) -> SearchResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            current: None,
        })
    }

    /// URL of the current page after redirects.
    pub fn current_url(&self) -> Option<&Url> {
        self.current.as_ref().map(|(url, _)| url)
    }

    fn current_page(&self) -> SearchResult<&(Url, String)> {
        self.current
            .as_ref()
            .ok_or_else(|| SearchError::Http("no page loaded".to_string()))
    }
}

impl Browser for HttpBrowser {
    fn navigate(&mut self, url: &str) -> SearchResult<()> {
        let parsed =
            Url::parse(url).map_err(|e| SearchError::InvalidUrl(format!("{}: {}", url, e)))?;
        let resp = self.client.get(parsed).send()?.error_for_status()?;
        let final_url = resp.url().clone();
        let body = resp.text()?;
        log::debug!("fetched {} ({} bytes)", final_url, body.len());
        self.current = Some((final_url, body));
        Ok(())
    }

    fn page_source(&mut self) -> SearchResult<String> {
        Ok(self.current_page()?.1.clone())
    }

    fn anchor_hrefs(&mut self) -> SearchResult<Vec<String>> {
        let (base, body) = self.current_page()?;
        Ok(resolve_hrefs(base, html::anchor_hrefs(body)))
    }
}
