//! Implementation of the `inspect link` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value;

use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{
    base_host, clean_url, extract_embedded_url, Config, DeepLinkMatcher, DesiredRoute,
};

/// Arguments for `inspect link`.
#[derive(Args, Debug)]
pub struct LinkArgs {
    /// URL, or text with a URL in it
    pub url: String,
}

/// How a URL would be handled.
#[derive(Debug, Serialize)]
pub struct LinkOutput {
    /// The URL as given.
    pub input: String,
    /// Route it opens as a deep link.
    pub deep_link_route: Option<DesiredRoute>,
    /// Link a share of it would ingest.
    pub shared_url: Option<String>,
    /// That link without query or fragment.
    pub clean_url: Option<String>,
    /// Host keying its source record.
    pub base_host: Option<String>,
}

impl CommandOutput for LinkOutput {
    fn to_human(&self) -> String {
        let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
        let route = self
            .deep_link_route
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string);
        TableFormatter::new().format_fields(&[
            ("Input", self.input.clone()),
            ("Deep link", route),
            ("Shared URL", show(&self.shared_url)),
            ("Clean URL", show(&self.clean_url)),
            ("Source host", show(&self.base_host)),
        ])
    }

    fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Describe how `input` would be handled as a deep link and as a shared link.
pub fn inspect_link(input: &str, matcher: &DeepLinkMatcher) -> LinkOutput {
    let deep_link_route = matcher.summary_uid(input).map(DesiredRoute::news_by_uid);
    let shared_url = if clean_url(input).is_some() {
        Some(input.trim().to_string())
    } else {
        extract_embedded_url(input).map(str::to_string)
    };
    let clean = shared_url.as_deref().and_then(clean_url);
    let host = clean.as_deref().and_then(base_host);

    LinkOutput {
        input: input.to_string(),
        deep_link_route,
        shared_url,
        clean_url: clean,
        base_host: host,
    }
}

/// Run `inspect link`.
pub fn execute(args: LinkArgs, config: &Config, json_mode: bool) -> Result<()> {
    let matcher = DeepLinkMatcher::new(&config.deep_link.host)
        .context("Invalid deep link host in configuration")?;
    output(&inspect_link(&args.url, &matcher), json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_link_and_share_views() {
        let matcher = DeepLinkMatcher::new("inspect.example").unwrap();
        let result = inspect_link("https://inspect.example/facts/abc123?ref=x", &matcher);
        assert_eq!(result.deep_link_route, Some(DesiredRoute::news_by_uid("abc123")));
        assert_eq!(result.clean_url.as_deref(), Some("https://inspect.example/facts/abc123"));
        assert_eq!(result.base_host.as_deref(), Some("inspect.example"));
    }

    #[test]
    fn test_embedded_url_in_text() {
        let matcher = DeepLinkMatcher::new("inspect.example").unwrap();
        let result = inspect_link("Read this https://News.example/a?b=1 now", &matcher);
        assert!(result.deep_link_route.is_none());
        assert_eq!(result.clean_url.as_deref(), Some("https://news.example/a"));
        assert_eq!(result.base_host.as_deref(), Some("news.example"));
    }
}
