//! Auth API port and the 401 hook the transport calls into.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::ApiResult;
use crate::domain::models::{Credentials, RegistrationRequest, SessionUser};

/// Account endpoints of the remote API.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a user carrying an access token.
    async fn login(&self, credentials: &Credentials) -> ApiResult<SessionUser>;

    /// Create an account; a 403 means the email is taken.
    async fn register(&self, request: &RegistrationRequest<'_>) -> ApiResult<SessionUser>;

    /// Invalidate the access token remotely.
    async fn logout(&self) -> ApiResult<()>;

    /// The user the current access token belongs to.
    async fn get_auth_user(&self) -> ApiResult<SessionUser>;

    /// Public profile of any user.
    async fn get_profile_information(&self, user_id: i64) -> ApiResult<Value>;

    /// Register the device's push token for the signed-in user.
    async fn update_expo_token(&self, expo_token: &str) -> ApiResult<()>;
}

/// Receives authentication failures observed by the transport.
///
/// The API client calls this before returning `ApiError::Unauthorized`, so
/// the session is dropped no matter which caller issued the request.
#[async_trait]
pub trait UnauthorizedHandler: Send + Sync {
    /// A request was rejected with 401.
    async fn on_unauthorized(&self);
}
