//! News API port.
//!
//! Sources and summaries as consumed by share ingestion. Implementations
//! return parsed JSON bodies and raise on any non-2xx response.

use async_trait::async_trait;

use crate::domain::errors::ApiResult;
use crate::domain::models::{NewSummary, Source, Summary, SummaryPatch};

/// Summary and source endpoints of the remote API.
#[async_trait]
pub trait NewsApi: Send + Sync {
    /// Look up the source record for a base host.
    ///
    /// # Returns
    /// - `Some(Source)` if the host is known
    /// - `None` if the server has no record for it
    async fn get_source(&self, base_url: &str) -> ApiResult<Option<Source>>;

    /// Register a new source for a base host.
    async fn create_source(&self, base_url: &str) -> ApiResult<Source>;

    /// Create a summary for an article link.
    async fn create_summary(&self, summary: &NewSummary) -> ApiResult<Summary>;

    /// Apply a partial update to an existing summary.
    async fn update_summary(&self, id: i64, patch: &SummaryPatch) -> ApiResult<Summary>;
}
