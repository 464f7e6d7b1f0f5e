//! URL helpers for shared links and deep links.

use regex::Regex;
use reqwest::Url;
use std::sync::LazyLock;

static EMBEDDED_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("Invalid embedded url pattern"));

/// First `http(s)://` URL inside free text.
///
/// Some feed apps put the shared link in the text field instead of the
/// weblink field, surrounded by prose.
pub fn extract_embedded_url(text: &str) -> Option<&str> {
    EMBEDDED_URL.find(text).map(|m| m.as_str())
}

fn parse_web_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

/// Canonical form of an article link: query string and fragment removed.
pub fn clean_url(raw: &str) -> Option<String> {
    let mut url = parse_web_url(raw)?;
    url.set_query(None);
    url.set_fragment(None);
    Some(url.into())
}

/// Host a link belongs to, used to key its source record.
pub fn base_host(raw: &str) -> Option<String> {
    let url = parse_web_url(raw)?;
    url.host_str().map(str::to_ascii_lowercase)
}

/// Recognizes `http(s)://{host}/facts/{id}` links that open a summary.
#[derive(Debug, Clone)]
pub struct DeepLinkMatcher {
    pattern: Regex,
}

impl DeepLinkMatcher {
    /// Matcher for summary links on `host`.
    pub fn new(host: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r"^https?://{}/facts/([a-z0-9]+)(?:[/?#].*)?$",
            regex::escape(host)
        ))?;
        Ok(Self { pattern })
    }

    /// Public uid of the linked summary, or `None` for any other URL.
    pub fn summary_uid<'a>(&self, url: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}
