//! Content handed to the app by the OS share sheet.

use serde::{Deserialize, Serialize};

use super::link::extract_embedded_url;

/// One shared item. Either field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareObject {
    /// Shared text.
    #[serde(default)]
    pub text: Option<String>,
    /// Shared link.
    #[serde(default)]
    pub weblink: Option<String>,
}

impl ShareObject {
    /// A text-only share.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            weblink: None,
        }
    }

    /// A link-only share.
    pub fn weblink(url: impl Into<String>) -> Self {
        Self {
            text: None,
            weblink: Some(url.into()),
        }
    }

    fn non_empty_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    fn non_empty_weblink(&self) -> Option<&str> {
        self.weblink.as_deref().filter(|w| !w.is_empty())
    }
}

/// What a single shared object should turn into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SharePlan {
    /// Append `text` as evidence to the summary open for annotation.
    Snippet {
        /// Summary open for annotation.
        summary_id: i64,
        /// Shared text.
        text: String,
    },
    /// Create a summary for a link, shared directly or embedded in text.
    Link {
        /// The shared link as received.
        url: String,
    },
    /// Nothing usable was shared.
    Ignore,
}

impl SharePlan {
    /// Decide how to ingest `share`, given the summary currently open for
    /// annotation.
    ///
    /// An open annotation context takes any text as a snippet. Otherwise a
    /// weblink wins over text, and text is only used when it embeds a URL.
    pub fn classify(share: &ShareObject, annotating: Option<i64>) -> Self {
        if let (Some(summary_id), Some(text)) = (annotating, share.non_empty_text()) {
            return Self::Snippet {
                summary_id,
                text: text.to_string(),
            };
        }
        if let Some(url) = share.non_empty_weblink() {
            return Self::Link {
                url: url.to_string(),
            };
        }
        if let Some(url) = share.non_empty_text().and_then(extract_embedded_url) {
            return Self::Link {
                url: url.to_string(),
            };
        }
        Self::Ignore
    }

    /// The payload string used for duplicate-delivery detection.
    pub fn payload(&self) -> Option<&str> {
        match self {
            Self::Snippet { text, .. } => Some(text),
            Self::Link { url } => Some(url),
            Self::Ignore => None,
        }
    }
}
