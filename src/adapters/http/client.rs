//! HTTP client for the Inspect REST API.
//!
//! Every request carries the persisted access token in the
//! `x-access-token` header. A 401 response first invokes the configured
//! [`UnauthorizedHandler`] and then surfaces as [`ApiError::Unauthorized`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::errors::{ApiError, ApiResult};
use crate::domain::models::{
    ApiConfig, Credentials, NewSummary, RegistrationRequest, SessionUser, Source, Summary,
    SummaryPatch, ACCESS_TOKEN_KEY,
};
use crate::domain::ports::{AuthApi, NewsApi, SessionStorage, UnauthorizedHandler};

const TOKEN_HEADER: &str = "x-access-token";

/// HTTP client for the Inspect REST API.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn SessionStorage>,
    on_unauthorized: Option<Arc<dyn UnauthorizedHandler>>,
}

impl ApiClient {
    /// Client for `config.base_url`, reading the access token from `tokens` on every request.
    pub fn new(config: &ApiConfig, tokens: Arc<dyn SessionStorage>) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
            on_unauthorized: None,
        })
    }

    /// Call `handler` whenever the server answers 401.
    pub fn with_unauthorized_handler(mut self, handler: Arc<dyn UnauthorizedHandler>) -> Self {
        self.on_unauthorized = Some(handler);
        self
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self
            .http
            .request(method, url)
            .header("Content-Type", "application/json");

        match self.tokens.get(ACCESS_TOKEN_KEY).await {
            Ok(Some(token)) => builder.header(TOKEN_HEADER, token),
            Ok(None) => builder,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read access token, sending request without it");
                builder
            }
        }
    }

    /// Send the request and turn any non-2xx status into an error.
    async fn send(&self, endpoint: &str, builder: RequestBuilder) -> ApiResult<Response> {
        tracing::debug!(endpoint, "api request");
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED {
            if let Some(handler) = &self.on_unauthorized {
                handler.on_unauthorized().await;
            }
        }
        tracing::warn!(endpoint, status = status.as_u16(), "api request failed");
        Err(ApiError::from_status(endpoint, status, body))
    }

    async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> ApiResult<T> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| ApiError::Decode {
            endpoint: endpoint.to_string(),
            reason: err.to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let builder = self.request(Method::GET, path).await;
        let response = self.send(path, builder).await?;
        Self::decode(path, response).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let builder = self.request(method, path).await.json(body);
        let response = self.send(path, builder).await?;
        Self::decode(path, response).await
    }
}

#[async_trait]
impl NewsApi for ApiClient {
    async fn get_source(&self, base_url: &str) -> ApiResult<Option<Source>> {
        let path = format!("/sources/{base_url}");
        let builder = self.request(Method::GET, &path).await;
        let response = match self.send(&path, builder).await {
            Ok(response) => response,
            Err(err) if err.status() == Some(StatusCode::NOT_FOUND) => return Ok(None),
            Err(err) => return Err(err),
        };
        // The server answers an unknown host with an empty body or `null`.
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&body).map_err(|err| ApiError::Decode {
            endpoint: path,
            reason: err.to_string(),
        })
    }

    async fn create_source(&self, base_url: &str) -> ApiResult<Source> {
        self.send_json(Method::POST, "/sources", &json!({ "base_url": base_url }))
            .await
    }

    async fn create_summary(&self, summary: &NewSummary) -> ApiResult<Summary> {
        self.send_json(Method::POST, "/summaries", summary).await
    }

    async fn update_summary(&self, id: i64, patch: &SummaryPatch) -> ApiResult<Summary> {
        self.send_json(Method::PUT, &format!("/summaries/{id}"), patch)
            .await
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> ApiResult<SessionUser> {
        self.send_json(Method::POST, "/login", credentials).await
    }

    async fn register(&self, request: &RegistrationRequest<'_>) -> ApiResult<SessionUser> {
        self.send_json(Method::POST, "/register", request).await
    }

    async fn logout(&self) -> ApiResult<()> {
        let builder = self.request(Method::POST, "/logout").await;
        self.send("/logout", builder).await?;
        Ok(())
    }

    async fn get_auth_user(&self) -> ApiResult<SessionUser> {
        self.get("/users").await
    }

    async fn get_profile_information(&self, user_id: i64) -> ApiResult<Value> {
        self.get(&format!("/users/{user_id}")).await
    }

    async fn update_expo_token(&self, expo_token: &str) -> ApiResult<()> {
        let builder = self
            .request(Method::PUT, "/notification")
            .await
            .json(&json!({ "expo_token": expo_token }));
        self.send("/notification", builder).await?;
        Ok(())
    }
}
