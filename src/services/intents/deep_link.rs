//! Deep-link intent source.

use crate::domain::models::{DeepLinkMatcher, DesiredRoute};
use crate::services::loading_flag::LoadingFlag;
use crate::services::route_slot::RouteSlot;

/// Turns `/facts/{uid}` links into `NewsView` requests.
#[derive(Debug, Clone)]
pub struct DeepLinkSource {
    matcher: DeepLinkMatcher,
    routes: RouteSlot,
    loading: LoadingFlag,
}

impl DeepLinkSource {
    /// Source for summary links on `host`.
    pub fn new(host: &str, routes: RouteSlot) -> Result<Self, regex::Error> {
        Ok(Self {
            matcher: DeepLinkMatcher::new(host)?,
            routes,
            loading: LoadingFlag::new("deep_link", false),
        })
    }

    /// Raised from a matching link until the resolver navigates for it.
    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    /// Handle the URL the app was opened with.
    ///
    /// Returns the route generation when the link was recognized.
    pub fn open(&self, url: &str) -> Option<u64> {
        let Some(uid) = self.matcher.summary_uid(url) else {
            tracing::debug!(url, "ignoring unrecognized deep link");
            return None;
        };
        tracing::info!(uid, "deep link opened");
        self.loading.raise();
        Some(self.routes.request(DesiredRoute::news_by_uid(uid)))
    }
}
