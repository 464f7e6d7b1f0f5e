//! Wiring of the client runtime for command-line use.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::adapters::{
    AlertLog, ApiClient, FileSessionStorage, HttpPageTitleFetcher, ShareQueue, SimulatedNavigator,
};
use crate::application::{ClientRuntime, RuntimePorts};
use crate::domain::models::{Config, DesiredRoute, Screen};
use crate::domain::ports::SessionStorage;
use crate::services::{RouteSlot, SessionStore};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// A client runtime wired to real adapters and a simulated navigator.
pub struct AppContext {
    /// Effective configuration.
    pub config: Config,
    /// The client core.
    pub runtime: ClientRuntime,
    /// Remote API client.
    pub api: Arc<ApiClient>,
    /// Headless navigator.
    pub navigator: Arc<SimulatedNavigator>,
    /// Alerts shown so far.
    pub alerts: Arc<AlertLog>,
    /// Share-intent queue.
    pub inbox: Arc<ShareQueue>,
}

impl AppContext {
    /// Wire every component from `config`. Nothing runs until [`start`](Self::start).
    pub fn build(config: Config) -> Result<Self> {
        let storage: Arc<dyn SessionStorage> =
            Arc::new(FileSessionStorage::new(&config.storage.path));
        let routes = RouteSlot::new();
        let session = Arc::new(SessionStore::new(storage.clone(), routes.clone()));

        let api = Arc::new(
            ApiClient::new(&config.api, storage)
                .context("Failed to build API client")?
                .with_unauthorized_handler(session.clone()),
        );
        let titles = Arc::new(
            HttpPageTitleFetcher::new(Duration::from_secs(config.api.timeout_secs))
                .context("Failed to build page title client")?,
        );
        let navigator = Arc::new(SimulatedNavigator::new(true));
        let alerts = Arc::new(AlertLog::new());
        let inbox = Arc::new(ShareQueue::new());

        let ports = RuntimePorts {
            news: api.clone(),
            auth: api.clone(),
            titles,
            navigator: navigator.clone(),
            inbox: inbox.clone(),
            alerts: alerts.clone(),
        };
        let runtime = ClientRuntime::new(&config, routes, session, ports)
            .context("Failed to build client runtime")?;

        Ok(Self {
            config,
            runtime,
            api,
            navigator,
            alerts,
            inbox,
        })
    }

    /// Start background tasks. The navigator is not mounted yet.
    pub fn start(&self) {
        self.runtime.start();
        self.runtime.follow_navigation(self.navigator.subscribe());
    }

    /// Mount the navigation container on the bootstrap screen.
    pub fn mount(&self) {
        self.navigator.mount(DesiredRoute::new(Screen::Loading));
    }

    /// Wait until no route is pending and the app has left `Loading`.
    ///
    /// Returns `false` on timeout.
    pub async fn settle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            let state = self.navigator.state();
            let settled = state.ready
                && !self.runtime.routes().is_pending()
                && state.current_path() != Some(Screen::Loading);
            if settled {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}
