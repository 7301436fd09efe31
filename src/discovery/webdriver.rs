//! Minimal W3C WebDriver client for driving a real browser.
//!
//! Talks JSON to a driver endpoint such as chromedriver or geckodriver. A
//! session is opened by [`WebDriverSession::connect`] and deleted when the
//! value is dropped.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{Method, StatusCode, Url};
use serde_json::{json, Value};

use crate::puzzle::Interactive;
use crate::types::{SearchError, SearchResult};

use super::web::{resolve_hrefs, Browser};

/// Key under which W3C drivers return element references.
const ELEMENT_KEY: &str = "element-6066-11e4-a52f-4f56e9b5d6f9";

/// One live browser session.
#[derive(Debug)]
pub struct WebDriverSession {
    client: Client,
    fetcher: Client,
    endpoint: String,
    session_id: String,
}

impl WebDriverSession {
    /// Open a session on the driver at `endpoint`.
    pub fn connect(
        endpoint: &str,
        browser_name: &str,
        headless: bool,
        timeout: Duration,
    ) -> SearchResult<Self> {
        // The driver is a local service; page assets may need the system proxy.
        let client = Client::builder().timeout(timeout).no_proxy().build()?;
        let fetcher = Client::builder().timeout(timeout).build()?;
        let endpoint = endpoint.trim_end_matches('/').to_string();

        let mut always_match = json!({ "browserName": browser_name });
        if headless {
            let args = json!({ "args": ["--headless"] });
            match browser_name {
                "firefox" => always_match["moz:firefoxOptions"] = args,
                _ => always_match["goog:chromeOptions"] = args,
            }
        }
        let body = json!({ "capabilities": { "alwaysMatch": always_match } });

        let value = send(
            &client,
            Method::POST,
            &format!("{}/session", endpoint),
            Some(body),
        )?;
        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| SearchError::WebDriver {
                error: "session not created".to_string(),
                message: format!("no sessionId in response: {}", value),
            })?
            .to_string();

        log::info!("opened WebDriver session {} at {}", session_id, endpoint);
        Ok(Self {
            client,
            fetcher,
            endpoint,
            session_id,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn command(&self, method: Method, path: &str, body: Option<Value>) -> SearchResult<Value> {
        let url = format!("{}/session/{}{}", self.endpoint, self.session_id, path);
        send(&self.client, method, &url, body)
    }

    fn find_element(&self, using: &str, value: &str) -> SearchResult<String> {
        let found = self.command(
            Method::POST,
            "/element",
            Some(json!({ "using": using, "value": value })),
        )?;
        element_id(&found).ok_or_else(|| SearchError::WebDriver {
            error: "no such element".to_string(),
            message: format!("{} {:?}", using, value),
        })
    }

    fn find_elements(&self, using: &str, value: &str) -> SearchResult<Vec<String>> {
        let found = self.command(
            Method::POST,
            "/elements",
            Some(json!({ "using": using, "value": value })),
        )?;
        Ok(found
            .as_array()
            .map(|items| items.iter().filter_map(element_id).collect())
            .unwrap_or_default())
    }

    fn find_by_id(&self, element_id: &str) -> SearchResult<String> {
        self.find_element("css selector", &format!("[id=\"{}\"]", element_id))
    }

    /// Attribute as written in the markup, unlike the resolved `property`.
    fn attribute(&self, element: &str, name: &str) -> SearchResult<Option<String>> {
        let value = self.command(
            Method::GET,
            &format!("/element/{}/attribute/{}", element, name),
            None,
        )?;
        Ok(value.as_str().map(str::to_string))
    }

    fn current_url(&self) -> SearchResult<Url> {
        let value = self.command(Method::GET, "/url", None)?;
        let url = value.as_str().unwrap_or_default();
        Url::parse(url).map_err(|e| SearchError::InvalidUrl(format!("{}: {}", url, e)))
    }

    fn property(&self, element: &str, name: &str) -> SearchResult<Option<String>> {
        let value = self.command(
            Method::GET,
            &format!("/element/{}/property/{}", element, name),
            None,
        )?;
        Ok(value.as_str().map(str::to_string))
    }
}

impl Drop for WebDriverSession {
    fn drop(&mut self) {
        if let Err(e) = self.command(Method::DELETE, "", None) {
            log::warn!("failed to close WebDriver session {}: {}", self.session_id, e);
        }
    }
}

impl Browser for WebDriverSession {
    fn navigate(&mut self, url: &str) -> SearchResult<()> {
        self.command(Method::POST, "/url", Some(json!({ "url": url })))?;
        Ok(())
    }

    fn page_source(&mut self) -> SearchResult<String> {
        let value = self.command(Method::GET, "/source", None)?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    fn anchor_hrefs(&mut self) -> SearchResult<Vec<String>> {
        let base = self.current_url()?;
        let mut raw = Vec::new();
        for element in self.find_elements("tag name", "a")? {
            if let Some(href) = self.attribute(&element, "href")? {
                raw.push(href);
            }
        }
        Ok(resolve_hrefs(&base, raw))
    }
}

impl Interactive for WebDriverSession {
    fn send_keys(&mut self, element_id: &str, text: &str) -> SearchResult<()> {
        let element = self.find_by_id(element_id)?;
        self.command(
            Method::POST,
            &format!("/element/{}/value", element),
            Some(json!({ "text": text })),
        )?;
        Ok(())
    }

    fn click(&mut self, element_id: &str) -> SearchResult<()> {
        let element = self.find_by_id(element_id)?;
        self.command(
            Method::POST,
            &format!("/element/{}/click", element),
            Some(json!({})),
        )?;
        Ok(())
    }

    fn attribute_by_tag(&mut self, tag: &str, attribute: &str) -> SearchResult<Option<String>> {
        let element = self.find_element("tag name", tag)?;
        self.property(&element, attribute)
    }

    fn text_by_id(&mut self, element_id: &str) -> SearchResult<String> {
        let element = self.find_by_id(element_id)?;
        let value = self.command(Method::GET, &format!("/element/{}/text", element), None)?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    fn download(&mut self, url: &str) -> SearchResult<Option<Vec<u8>>> {
        let resp = self.fetcher.get(url).send()?;
        if resp.status() != StatusCode::OK {
            log::warn!("download of {} returned {}", url, resp.status());
            return Ok(None);
        }
        Ok(Some(resp.bytes()?.to_vec()))
    }
}

/// Issue one WebDriver request and unwrap the `value` member of the reply.
fn send(client: &Client, method: Method, url: &str, body: Option<Value>) -> SearchResult<Value> {
    let mut req = client.request(method, url);
    if let Some(body) = body {
        req = req.json(&body);
    }
    let resp = req.send()?;
    let status = resp.status();
    let mut payload: Value = resp.json()?;
    let value = payload
        .get_mut("value")
        .map(Value::take)
        .unwrap_or(Value::Null);

    if !status.is_success() {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        return Err(SearchError::WebDriver {
            error: field("error"),
            message: format!("{} ({})", field("message"), status),
        });
    }
    Ok(value)
}

fn element_id(value: &Value) -> Option<String> {
    value
        .get(ELEMENT_KEY)
        .or_else(|| value.get("ELEMENT"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
