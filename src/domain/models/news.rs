//! Records exchanged with the news API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A publisher, keyed by the base host of its articles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Server id.
    pub id: i64,
    /// Host the source publishes under.
    #[serde(default)]
    pub base_url: String,
    /// Fields this client does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An article summary with its evidence snippets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Server id.
    pub id: i64,

    /// Public id used in `/facts/{uid}` links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// Article link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Article title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Publishing source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<i64>,

    /// Evidence snippets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub snippets: Vec<Value>,

    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Fields this client does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /summaries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSummary {
    /// Cleaned article link.
    pub url: String,
    /// Page title; `None` when the best-effort fetch failed
    pub title: Option<String>,
    /// Publishing source.
    pub source_id: i64,
}

/// Body of `PUT /summaries/{id}`; unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryPatch {
    /// Snippets to add.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippets: Option<Vec<String>>,

    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl SummaryPatch {
    /// Append a single evidence snippet.
    pub fn snippet(text: impl Into<String>) -> Self {
        Self {
            snippets: Some(vec![text.into()]),
            ..Default::default()
        }
    }
}
