//! Article title lookup over plain HTTP.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;

use crate::domain::ports::PageTitleFetcher;

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("Invalid title pattern"));

/// Text of the first `<title>` element, whitespace-collapsed.
pub fn extract_title(html: &str) -> Option<String> {
    let raw = TITLE.captures(html)?.get(1)?.as_str();
    let title = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    (!title.is_empty()).then_some(title)
}

/// Fetches a page and reads its `<title>`.
#[derive(Debug, Clone)]
pub struct HttpPageTitleFetcher {
    http: Client,
}

impl HttpPageTitleFetcher {
    /// Fetcher giving up on a page after `timeout`.
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
        })
    }
}

#[async_trait]
impl PageTitleFetcher for HttpPageTitleFetcher {
    async fn fetch_title(&self, url: &str) -> Option<String> {
        let response = match self.http.get(url).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::debug!(url, status = response.status().as_u16(), "title fetch rejected");
                return None;
            }
            Err(err) => {
                tracing::debug!(url, error = %err, "title fetch failed");
                return None;
            }
        };
        let html = response.text().await.ok()?;
        extract_title(&html)
    }
}
