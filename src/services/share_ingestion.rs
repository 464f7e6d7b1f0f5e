//! Share ingestion: turns OS share-sheet deliveries into summaries, snippets
//! and a `NewsView` route request.

use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::errors::IngestionError;
use crate::domain::models::{
    base_host, clean_url, DesiredRoute, NewSummary, ShareObject, SharePlan, Source, SummaryPatch,
};
use crate::domain::ports::{NewsApi, PageTitleFetcher, ShareInbox};

use super::route_slot::RouteSlot;

/// Holds the payload of the share currently being ingested.
///
/// The OS may deliver the same share twice. While the guard is held every
/// other delivery is dropped, and only the holder can release it.
#[derive(Debug, Clone)]
pub struct PendingShareGuard {
    inner: Arc<watch::Sender<Option<String>>>,
}

impl Default for PendingShareGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingShareGuard {
    /// An unheld guard.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { inner: Arc::new(tx) }
    }

    /// Take the guard for `payload`. Fails while any payload is held.
    pub fn claim(&self, payload: &str) -> bool {
        self.inner.send_if_modified(|held| {
            if held.is_some() {
                return false;
            }
            *held = Some(payload.to_string());
            true
        })
    }

    /// Release the guard if `payload` holds it.
    pub fn release(&self, payload: &str) -> bool {
        self.inner.send_if_modified(|held| {
            if held.as_deref() != Some(payload) {
                return false;
            }
            *held = None;
            true
        })
    }

    /// Payload currently holding the guard.
    pub fn held(&self) -> Option<String> {
        self.inner.borrow().clone()
    }
}

/// Id of the summary the user is currently annotating, if any.
#[derive(Debug, Clone)]
pub struct AnnotationContext {
    inner: Arc<watch::Sender<Option<i64>>>,
}

impl Default for AnnotationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationContext {
    /// A closed context.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { inner: Arc::new(tx) }
    }

    /// Start annotating `summary_id`; shared text becomes its snippets.
    pub fn open(&self, summary_id: i64) {
        tracing::debug!(summary_id, "annotation context opened");
        self.inner.send_replace(Some(summary_id));
    }

    /// Stop annotating.
    pub fn close(&self) {
        if self.inner.send_replace(None).is_some() {
            tracing::debug!("annotation context closed");
        }
    }

    /// Summary currently open for annotation.
    pub fn current(&self) -> Option<i64> {
        *self.inner.borrow()
    }
}

/// How a delivery ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestionOutcome {
    /// A record was created or updated and its route requested.
    Routed {
        /// Route requested for the record.
        route: DesiredRoute,
        /// Slot generation of that request.
        generation: u64,
    },
    /// An equal payload is already being ingested.
    Duplicate,
    /// A different share is still being ingested; this one was dropped.
    Busy,
    /// Nothing usable in the delivery.
    Ignored,
}

/// Turns share-sheet deliveries into API records and a route request.
pub struct ShareIngestionService {
    news: Arc<dyn NewsApi>,
    titles: Arc<dyn PageTitleFetcher>,
    inbox: Arc<dyn ShareInbox>,
    routes: RouteSlot,
    guard: PendingShareGuard,
    annotation: AnnotationContext,
}

impl ShareIngestionService {
    /// Build a pipeline with an unheld guard and a closed annotation context.
    pub fn new(
        news: Arc<dyn NewsApi>,
        titles: Arc<dyn PageTitleFetcher>,
        inbox: Arc<dyn ShareInbox>,
        routes: RouteSlot,
    ) -> Self {
        Self {
            news,
            titles,
            inbox,
            routes,
            guard: PendingShareGuard::new(),
            annotation: AnnotationContext::new(),
        }
    }

    /// Duplicate-delivery guard.
    pub fn guard(&self) -> &PendingShareGuard {
        &self.guard
    }

    /// Summary open for annotation, if any.
    pub fn annotation(&self) -> &AnnotationContext {
        &self.annotation
    }

    /// Ingest a share-sheet delivery. Only the first object is used.
    ///
    /// The received-files queue is drained however ingestion ends. On error no
    /// route is requested.
    pub async fn on_share_received(
        &self,
        shares: &[ShareObject],
    ) -> Result<IngestionOutcome, IngestionError> {
        if shares.len() > 1 {
            tracing::debug!(dropped = shares.len() - 1, "ignoring extra shared objects");
        }
        let outcome = match shares.first() {
            Some(share) => self.ingest(share).await,
            None => Ok(IngestionOutcome::Ignored),
        };
        self.inbox.clear_received_files();
        outcome
    }

    async fn ingest(&self, share: &ShareObject) -> Result<IngestionOutcome, IngestionError> {
        let plan = SharePlan::classify(share, self.annotation.current());
        let Some(payload) = plan.payload().map(str::to_owned) else {
            tracing::debug!("shared content has neither a link nor usable text");
            return Ok(IngestionOutcome::Ignored);
        };

        if !self.guard.claim(&payload) {
            if self.guard.held().as_deref() == Some(payload.as_str()) {
                tracing::info!("duplicate share delivery skipped");
                return Ok(IngestionOutcome::Duplicate);
            }
            tracing::info!("another share is still being ingested, delivery skipped");
            return Ok(IngestionOutcome::Busy);
        }

        let result = match plan {
            SharePlan::Snippet { summary_id, text } => self.add_snippet(summary_id, text).await,
            SharePlan::Link { url } => self.create_summary(&url).await,
            SharePlan::Ignore => Ok(None),
        };
        self.guard.release(&payload);

        let Some(route) = result? else {
            return Ok(IngestionOutcome::Ignored);
        };
        let generation = self.routes.request(route.clone());
        Ok(IngestionOutcome::Routed { route, generation })
    }

    async fn add_snippet(
        &self,
        summary_id: i64,
        text: String,
    ) -> Result<Option<DesiredRoute>, IngestionError> {
        tracing::info!(summary_id, "adding shared snippet");
        let updated = self
            .news
            .update_summary(summary_id, &SummaryPatch::snippet(text))
            .await
            .map_err(|source| IngestionError::AddSnippet { summary_id, source })?;
        self.annotation.close();
        Ok(Some(DesiredRoute::news_by_id(updated.id)))
    }

    /// Create a summary for `shared`. A link that does not parse as a web
    /// address is dropped without touching the API.
    async fn create_summary(&self, shared: &str) -> Result<Option<DesiredRoute>, IngestionError> {
        let Some((url, base_url)) = clean_url(shared)
            .and_then(|url| base_host(&url).map(|host| (url, host)))
        else {
            tracing::warn!(shared, "shared link is not a web address, ignoring it");
            return Ok(None);
        };

        tracing::info!(url = %url, base_url = %base_url, "creating summary for shared link");
        let (source, title) = tokio::join!(
            self.resolve_source(&base_url),
            self.titles.fetch_title(&url)
        );
        let source = source?;

        let summary = self
            .news
            .create_summary(&NewSummary {
                url: url.clone(),
                title,
                source_id: source.id,
            })
            .await
            .map_err(|source| IngestionError::CreateSummary { url, source })?;

        tracing::info!(summary_id = summary.id, "summary created from share");
        let summary = serde_json::to_value(&summary)?;
        Ok(Some(DesiredRoute::news_with_summary(summary)))
    }

    /// Look the source up by host and create it when missing.
    async fn resolve_source(&self, base_url: &str) -> Result<Source, IngestionError> {
        let wrap = |source| IngestionError::Source {
            base_url: base_url.to_string(),
            source,
        };
        if let Some(source) = self.news.get_source(base_url).await.map_err(wrap)? {
            return Ok(source);
        }
        tracing::info!(base_url, "source not found, creating it");
        self.news.create_source(base_url).await.map_err(wrap)
    }
}
