//! Common test utilities for integration tests
//!
//! Provides in-memory API fakes and a harness that wires a client runtime to
//! a simulated navigator.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

use inspect::adapters::{AlertLog, MemorySessionStorage, ShareQueue, SimulatedNavigator};
use inspect::application::{ClientRuntime, RuntimePorts};
use inspect::domain::errors::{ApiError, ApiResult};
use inspect::domain::models::{
    Config, Credentials, NewSummary, RegistrationRequest, Screen, SessionUser, Source, Summary,
    SummaryPatch,
};
use inspect::domain::ports::{AuthApi, NewsApi, PageTitleFetcher};
use inspect::services::{RouteSlot, SessionStore};

pub const DEEP_LINK_HOST: &str = "inspect.example";

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Wait for a condition to be true with timeout
///
/// Polls the predicate every 10ms until it returns true or timeout is reached.
pub async fn wait_for<F>(mut predicate: F, timeout_ms: u64) -> bool
where
    F: FnMut() -> bool,
{
    let start = std::time::Instant::now();
    let timeout = Duration::from_millis(timeout_ms);

    while start.elapsed() < timeout {
        if predicate() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    false
}

/// In-memory news and auth API. Every call yields once so concurrent
/// callers interleave the way they would on the network.
#[derive(Default)]
pub struct FakeApi {
    sources: Mutex<HashMap<String, Source>>,
    created: Mutex<Vec<NewSummary>>,
    patches: Mutex<Vec<(i64, SummaryPatch)>>,
    summary_delays: Mutex<HashMap<String, Duration>>,
    next_id: AtomicI64,
    pub fail_summaries: AtomicBool,
    pub source_lookups: AtomicUsize,
    pub token_uploads: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(100),
            ..Default::default()
        }
    }

    pub fn with_source(self, base_url: &str, id: i64) -> Self {
        self.sources
            .lock()
            .unwrap()
            .insert(base_url.to_string(), source(id, base_url));
        self
    }

    /// Hold `create_summary` for `url` for `delay` before answering.
    pub fn with_summary_delay(self, url: &str, delay: Duration) -> Self {
        self.summary_delays
            .lock()
            .unwrap()
            .insert(url.to_string(), delay);
        self
    }

    pub fn created(&self) -> Vec<NewSummary> {
        self.created.lock().unwrap().clone()
    }

    pub fn patches(&self) -> Vec<(i64, SummaryPatch)> {
        self.patches.lock().unwrap().clone()
    }

    pub fn source_ids(&self) -> Vec<i64> {
        self.sources.lock().unwrap().values().map(|s| s.id).collect()
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

fn source(id: i64, base_url: &str) -> Source {
    serde_json::from_value(json!({ "id": id, "base_url": base_url })).unwrap()
}

pub fn user(id: i64, token: Option<&str>) -> SessionUser {
    serde_json::from_value(json!({ "id": id, "username": "reader", "token": token })).unwrap()
}

#[async_trait]
impl NewsApi for FakeApi {
    async fn get_source(&self, base_url: &str) -> ApiResult<Option<Source>> {
        tokio::task::yield_now().await;
        self.source_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.sources.lock().unwrap().get(base_url).cloned())
    }

    async fn create_source(&self, base_url: &str) -> ApiResult<Source> {
        tokio::task::yield_now().await;
        let created = source(self.next_id(), base_url);
        self.sources
            .lock()
            .unwrap()
            .insert(base_url.to_string(), created.clone());
        Ok(created)
    }

    async fn create_summary(&self, summary: &NewSummary) -> ApiResult<Summary> {
        tokio::task::yield_now().await;
        let delay = self.summary_delays.lock().unwrap().get(&summary.url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_summaries.load(Ordering::SeqCst) {
            return Err(ApiError::from_status(
                "/summaries",
                StatusCode::INTERNAL_SERVER_ERROR,
                "database unavailable".to_string(),
            ));
        }
        self.created.lock().unwrap().push(summary.clone());
        Ok(serde_json::from_value(json!({
            "id": self.next_id(),
            "url": summary.url,
            "title": summary.title,
            "source_id": summary.source_id,
        }))
        .unwrap())
    }

    async fn update_summary(&self, id: i64, patch: &SummaryPatch) -> ApiResult<Summary> {
        tokio::task::yield_now().await;
        self.patches.lock().unwrap().push((id, patch.clone()));
        Ok(serde_json::from_value(json!({ "id": id, "snippets": patch.snippets })).unwrap())
    }
}

#[async_trait]
impl AuthApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<SessionUser> {
        tokio::task::yield_now().await;
        if credentials.password != "secret" {
            return Err(ApiError::from_status(
                "/login",
                StatusCode::BAD_REQUEST,
                "bad credentials".to_string(),
            ));
        }
        Ok(user(7, Some("fresh-token")))
    }

    async fn register(&self, request: &RegistrationRequest<'_>) -> ApiResult<SessionUser> {
        tokio::task::yield_now().await;
        if request.email == "taken@example.com" {
            return Err(ApiError::from_status(
                "/register",
                StatusCode::FORBIDDEN,
                String::new(),
            ));
        }
        Ok(user(8, Some("new-token")))
    }

    async fn logout(&self) -> ApiResult<()> {
        Ok(())
    }

    async fn get_auth_user(&self) -> ApiResult<SessionUser> {
        Ok(user(7, None))
    }

    async fn get_profile_information(&self, user_id: i64) -> ApiResult<Value> {
        Ok(json!({ "id": user_id }))
    }

    async fn update_expo_token(&self, _expo_token: &str) -> ApiResult<()> {
        self.token_uploads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Title fetcher returning a fixed answer after yielding.
pub struct FixedTitle(pub Option<String>);

#[async_trait]
impl PageTitleFetcher for FixedTitle {
    async fn fetch_title(&self, _url: &str) -> Option<String> {
        tokio::task::yield_now().await;
        self.0.clone()
    }
}

pub struct Harness {
    pub runtime: ClientRuntime,
    pub api: Arc<FakeApi>,
    pub navigator: Arc<SimulatedNavigator>,
    pub alerts: Arc<AlertLog>,
    pub inbox: Arc<ShareQueue>,
    pub storage: Arc<MemorySessionStorage>,
}

impl Harness {
    pub fn new(storage: MemorySessionStorage, api: FakeApi) -> Self {
        Self::with_title(storage, api, Some("A Headline".to_string()))
    }

    pub fn with_title(storage: MemorySessionStorage, api: FakeApi, title: Option<String>) -> Self {
        let mut config = Config::default();
        config.deep_link.host = DEEP_LINK_HOST.to_string();

        let storage = Arc::new(storage);
        let api = Arc::new(api);
        let navigator = Arc::new(SimulatedNavigator::new(true));
        let alerts = Arc::new(AlertLog::new());
        let inbox = Arc::new(ShareQueue::new());
        let routes = RouteSlot::new();
        let session = Arc::new(SessionStore::new(storage.clone(), routes.clone()));

        let ports = RuntimePorts {
            news: api.clone(),
            auth: api.clone(),
            titles: Arc::new(FixedTitle(title)),
            navigator: navigator.clone(),
            inbox: inbox.clone(),
            alerts: alerts.clone(),
        };
        let runtime = ClientRuntime::new(&config, routes, session, ports).unwrap();

        Self {
            runtime,
            api,
            navigator,
            alerts,
            inbox,
            storage,
        }
    }

    pub fn start(&self) {
        self.runtime.start();
        self.runtime.follow_navigation(self.navigator.subscribe());
    }

    pub fn mount(&self) {
        self.navigator
            .mount(inspect::DesiredRoute::new(Screen::Loading));
    }

    /// Wait until nothing is pending and the app has left `Loading`.
    pub async fn settle(&self) -> bool {
        let navigator = self.navigator.clone();
        let routes = self.runtime.routes().clone();
        wait_for(
            move || {
                let state = navigator.state();
                state.ready
                    && !routes.is_pending()
                    && state.current_path() != Some(Screen::Loading)
            },
            2_000,
        )
        .await
    }

    pub fn screens(&self) -> Vec<Screen> {
        self.navigator.history().iter().map(|r| r.path).collect()
    }
}
