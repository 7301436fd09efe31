//! Web strategy — hyperlinks of fetched pages, with per-page table capture.

use reqwest::Url;

use crate::graph::{Discovery, GraphSearcher};
use crate::html;
use crate::types::{SearchResult, Table};

/// A controllable page loader.
///
/// Implementations keep the most recently loaded page; `page_source` and
/// `anchor_hrefs` describe that page.
pub trait Browser {
    /// Load `url`, replacing the current page.
    fn navigate(&mut self, url: &str) -> SearchResult<()>;

    /// HTML of the current page.
    fn page_source(&mut self) -> SearchResult<String>;

    /// Absolute `href` targets of every anchor on the current page, in document order.
    fn anchor_hrefs(&mut self) -> SearchResult<Vec<String>>;
}

impl<B: Browser + ?Sized> Browser for &mut B {
    fn navigate(&mut self, url: &str) -> SearchResult<()> {
        (**self).navigate(url)
    }

    fn page_source(&mut self) -> SearchResult<String> {
        (**self).page_source()
    }

    fn anchor_hrefs(&mut self) -> SearchResult<Vec<String>> {
        (**self).anchor_hrefs()
    }
}

/// Resolve an anchor's raw `href` against the page it appeared on.
///
/// Returns `None` for same-page fragments and non-navigable schemes
/// (`javascript:`, `mailto:`, `tel:`), and for hrefs that do not parse.
pub fn resolve_href(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    let lower = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        return None;
    }
    base.join(href).ok().map(String::from)
}

/// Resolve every raw `href` of a page, dropping the ones that are not children.
///
/// Every [`Browser`] shipped here reports anchors through this, so the same
/// page yields the same children whichever browser loaded it.
pub fn resolve_hrefs<I>(base: &Url, hrefs: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    hrefs
        .into_iter()
        .filter_map(|href| resolve_href(base, href.as_ref()))
        .collect()
}

/// Discovery over live pages reached through a [`Browser`].
///
/// Each visit navigates once, records the URL, keeps the page's first table
/// (if any) and returns every anchor target.
pub struct WebDiscovery<B: Browser> {
    browser: B,
    tables: Vec<Table>,
}

impl<B: Browser> WebDiscovery<B> {
    pub fn new(browser: B) -> Self {
        Self {
            browser,
            tables: Vec::new(),
        }
    }

    /// Tables captured during the last run, in visit order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn browser_mut(&mut self) -> &mut B {
        &mut self.browser
    }

    pub fn into_browser(self) -> B {
        self.browser
    }
}

impl<B: Browser> Discovery for WebDiscovery<B> {
    type Node = String;
    type Payload = String;

    fn visit_and_get_children(
        &mut self,
        node: &String,
        order: &mut Vec<String>,
    ) -> SearchResult<Vec<String>> {
        self.browser.navigate(node)?;
        order.push(node.clone());

        let source = self.browser.page_source()?;
        match html::first_table(&source) {
            Some(table) => self.tables.push(table),
            None => log::debug!("no table on {}", node),
        }

        self.browser.anchor_hrefs()
    }

    fn reset(&mut self) {
        self.tables.clear();
    }
}

/// Graph searcher over live web pages.
pub type WebSearcher<B> = GraphSearcher<WebDiscovery<B>>;

impl<B: Browser> WebSearcher<B> {
    /// Create a searcher driving `browser`.
    pub fn with_browser(browser: B) -> Self {
        GraphSearcher::new(WebDiscovery::new(browser))
    }

    /// All captured tables stacked into one, in visit order.
    pub fn table(&self) -> Table {
        Table::concat(self.strategy().tables())
    }
}
