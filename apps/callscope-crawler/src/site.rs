//! In-memory site and the fetcher that crawls it.

use std::time::Duration;

use thiserror::Error;

/// URL prefix of every page on the simulated site.
pub const PAGE_PREFIX: &str = "https://site.test/p/";

/// URL prefix of links that always fail to load.
const BROKEN_PREFIX: &str = "https://site.test/broken/";

/// Every page whose number has this remainder modulo 7 links to a broken page.
const BROKEN_LINK_RESIDUE: u64 = 3;

/// Fetch failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// No page lives at this URL.
    #[error("Page not found: {0}")]
    NotFound(String),
}

/// A downloaded page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Where the page was loaded from.
    pub url: String,
    /// Raw HTML.
    pub body: String,
}

callscope_profiler::profiled_interface! {
    /// Downloads pages and extracts their links.
    pub trait PageFetcher {
        /// Download the page at `url`.
        #[profiled]
        fn fetch(&self, url: &str) -> Result<Page, FetchError>;
        /// Links found in `page`, in document order.
        #[profiled]
        fn parse(&self, page: &Page) -> Vec<String>;
        /// Short name for log output.
        fn name(&self) -> String;
    }
}

/// Fetcher serving a binary tree of pages with a fixed latency.
///
/// Page `n` links to pages `2n + 1` and `2n + 2`. Some pages also link to a
/// URL under `/broken/`, which fails with [`FetchError::NotFound`].
pub struct SimulatedFetcher {
    latency: Duration,
}

impl SimulatedFetcher {
    /// Create a fetcher that sleeps `latency` per download.
    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self { latency }
    }

    fn render(number: u64) -> String {
        let mut body = String::from("<html><body>");
        for child in [2 * number + 1, 2 * number + 2] {
            body.push_str(&format!("<a href=\"{PAGE_PREFIX}{child}\"></a>"));
        }
        if number % 7 == BROKEN_LINK_RESIDUE {
            body.push_str(&format!("<a href=\"{BROKEN_PREFIX}{number}\"></a>"));
        }
        body.push_str("</body></html>");
        body
    }
}

impl PageFetcher for SimulatedFetcher {
    fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }

        let number = url
            .strip_prefix(PAGE_PREFIX)
            .and_then(|n| n.parse::<u64>().ok())
            .ok_or_else(|| FetchError::NotFound(url.to_string()))?;

        Ok(Page {
            url: url.to_string(),
            body: Self::render(number),
        })
    }

    fn parse(&self, page: &Page) -> Vec<String> {
        page.body
            .split("href=\"")
            .skip(1)
            .filter_map(|rest| rest.split_once('"').map(|(link, _)| link.to_string()))
            .collect()
    }

    fn name(&self) -> String {
        "simulated".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> SimulatedFetcher {
        SimulatedFetcher::new(Duration::ZERO)
    }

    #[test]
    fn page_links_to_its_children() {
        let fetcher = fetcher();
        let page = fetcher.fetch("https://site.test/p/1").unwrap();

        assert_eq!(
            fetcher.parse(&page),
            vec!["https://site.test/p/3", "https://site.test/p/4"]
        );
    }

    #[test]
    fn some_pages_link_to_broken_urls() {
        let fetcher = fetcher();
        let page = fetcher.fetch("https://site.test/p/3").unwrap();

        assert_eq!(
            fetcher.parse(&page),
            vec![
                "https://site.test/p/7",
                "https://site.test/p/8",
                "https://site.test/broken/3",
            ]
        );
    }

    #[test]
    fn broken_and_foreign_urls_fail() {
        let fetcher = fetcher();

        assert_eq!(
            fetcher.fetch("https://site.test/broken/3"),
            Err(FetchError::NotFound("https://site.test/broken/3".to_string()))
        );
        assert!(fetcher.fetch("https://elsewhere.test/").is_err());
    }
}
