//! Domain errors for the Inspect client core.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised by the remote API contract.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the stored credentials (HTTP 401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Any other non-2xx response.
    #[error("Request to {endpoint} failed with {status}: {body}")]
    Status {
        /// Path that was requested.
        endpoint: String,
        /// Response status.
        status: StatusCode,
        /// Response body.
        body: String,
    },

    /// The request never got a response.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("Failed to decode response from {endpoint}: {reason}")]
    Decode {
        /// Path that was requested.
        endpoint: String,
        /// Decoder message.
        reason: String,
    },
}

impl ApiError {
    /// Build an error from a non-success status code and its response body.
    pub fn from_status(endpoint: impl Into<String>, status: StatusCode, body: String) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            return Self::Unauthorized(body);
        }
        Self::Status {
            endpoint: endpoint.into(),
            status,
            body,
        }
    }

    /// Whether the server rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// HTTP status carried by the error, if it came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
            Self::Status { status, .. } => Some(*status),
            Self::Network(err) => err.status(),
            Self::Decode { .. } => None,
        }
    }
}

/// Result of a remote API call.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors from persisted session storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored data is not valid JSON.
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result of a session storage operation.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors surfaced by the share ingestion pipeline.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Looking up or creating the source record failed.
    #[error("Failed to resolve source for {base_url}: {source}")]
    Source {
        /// Host of the shared link.
        base_url: String,
        /// Underlying API failure.
        #[source]
        source: ApiError,
    },

    /// Creating the summary failed.
    #[error("Failed to create summary for {url}: {source}")]
    CreateSummary {
        /// Cleaned shared link.
        url: String,
        /// Underlying API failure.
        #[source]
        source: ApiError,
    },

    /// Appending the snippet failed.
    #[error("Failed to add snippet to summary {summary_id}: {source}")]
    AddSnippet {
        /// Summary being annotated.
        summary_id: i64,
        /// Underlying API failure.
        #[source]
        source: ApiError,
    },

    /// The created summary could not be turned into route arguments.
    #[error("Failed to encode created summary: {0}")]
    Encode(#[from] serde_json::Error),
}

impl IngestionError {
    /// Underlying API error, when the failure came from a remote call.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Encode(_) => None,
            Self::Source { source, .. }
            | Self::CreateSummary { source, .. }
            | Self::AddSnippet { source, .. } => Some(source),
        }
    }
}

/// Local form validation failures. Blocked before any remote call is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Username left empty.
    #[error("Username is required.")]
    MissingUsername,

    /// Email left empty.
    #[error("Email is required.")]
    MissingEmail,

    /// Password left empty.
    #[error("Password is required.")]
    MissingPassword,

    /// Confirmation left empty.
    #[error("Confirm Password is required.")]
    MissingPasswordConfirmation,

    /// Password and confirmation differ.
    #[error("Please make sure your passwords match.")]
    PasswordMismatch,
}

/// Errors from account flows (login, registration).
#[derive(Debug, Error)]
pub enum AuthError {
    /// The form was rejected locally.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Registration refused with 403.
    #[error("Error logging in: email already exists")]
    EmailTaken,

    /// Any other remote failure.
    #[error("Error logging in: {0}")]
    Api(#[from] ApiError),

    /// The session could not be saved.
    #[error("Failed to persist session: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_maps_401_to_unauthorized() {
        let err = ApiError::from_status("/users", StatusCode::UNAUTHORIZED, "expired".to_string());
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn test_from_status_keeps_other_codes() {
        let err = ApiError::from_status("/summaries", StatusCode::BAD_GATEWAY, String::new());
        assert!(!err.is_unauthorized());
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
        assert!(err.to_string().contains("/summaries"));
    }

    #[test]
    fn test_validation_messages_match_form_alerts() {
        assert_eq!(ValidationError::MissingUsername.to_string(), "Username is required.");
        assert_eq!(
            ValidationError::PasswordMismatch.to_string(),
            "Please make sure your passwords match."
        );
    }
}
