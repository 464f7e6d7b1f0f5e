//! Page title lookup port.

use async_trait::async_trait;

/// Best-effort lookup of an article's title.
#[async_trait]
pub trait PageTitleFetcher: Send + Sync {
    /// Title of the page at `url`, or `None` on any failure.
    async fn fetch_title(&self, url: &str) -> Option<String>;
}
