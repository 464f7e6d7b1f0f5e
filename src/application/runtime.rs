//! Client runtime: wires the intent sources, the session and the resolver
//! together and exposes the entry points the host calls into.

use std::sync::{Arc, Mutex};

use reqwest::StatusCode;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::errors::{ApiError, AuthError};
use crate::domain::models::{
    Config, Credentials, DesiredRoute, NavigationState, NotificationPayload, Registration,
    SessionUser, ShareObject,
};
use crate::domain::ports::{AlertPresenter, AuthApi, Navigator, NewsApi, PageTitleFetcher, ShareInbox};
use crate::services::{
    DeepLinkSource, DefaultRouter, IngestionOutcome, NavigationResolver, NotificationRouter,
    RouteRequest, RouteSlot, SessionStore, ShareIngestionService,
};

/// Errors building a [`ClientRuntime`].
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The configured deep-link host does not form a valid pattern.
    #[error("Invalid deep link host: {0}")]
    DeepLinkHost(#[from] regex::Error),
}

/// Host-provided collaborators.
#[derive(Clone)]
pub struct RuntimePorts {
    /// Summaries and sources.
    pub news: Arc<dyn NewsApi>,
    /// Accounts and push tokens.
    pub auth: Arc<dyn AuthApi>,
    /// Page titles for shared links.
    pub titles: Arc<dyn PageTitleFetcher>,
    /// Host navigation surface.
    pub navigator: Arc<dyn Navigator>,
    /// OS share-intent queue.
    pub inbox: Arc<dyn ShareInbox>,
    /// User-facing alerts.
    pub alerts: Arc<dyn AlertPresenter>,
}

/// The client core: intent sources, session, share ingestion and the resolver around one route slot.
pub struct ClientRuntime {
    routes: RouteSlot,
    session: Arc<SessionStore>,
    deep_links: DeepLinkSource,
    notifications: NotificationRouter,
    shares: Arc<ShareIngestionService>,
    navigator: Arc<dyn Navigator>,
    auth: Arc<dyn AuthApi>,
    alerts: Arc<dyn AlertPresenter>,
    navigation: watch::Sender<NavigationState>,
    shutdown: watch::Sender<bool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl ClientRuntime {
    /// Build a runtime around an existing slot and session store.
    ///
    /// The API client needs the session store as its 401 handler before the
    /// runtime exists, so both are created by the caller.
    pub fn new(
        config: &Config,
        routes: RouteSlot,
        session: Arc<SessionStore>,
        ports: RuntimePorts,
    ) -> Result<Self, RuntimeError> {
        let deep_links = DeepLinkSource::new(&config.deep_link.host, routes.clone())?;
        let shares = ShareIngestionService::new(ports.news, ports.titles, ports.inbox, routes.clone());
        let (navigation, _rx) = watch::channel(NavigationState::default());
        let (shutdown, _rx) = watch::channel(false);

        Ok(Self {
            notifications: NotificationRouter::new(routes.clone()),
            routes,
            session,
            deep_links,
            shares: Arc::new(shares),
            navigator: ports.navigator,
            auth: ports.auth,
            alerts: ports.alerts,
            navigation,
            shutdown,
            tasks: Mutex::new(Vec::new()),
        })
    }

    /// The desired-route slot.
    pub fn routes(&self) -> &RouteSlot {
        &self.routes
    }

    /// The session store.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// The share ingestion pipeline.
    pub fn shares(&self) -> &ShareIngestionService {
        &self.shares
    }

    /// The notification intent source.
    pub fn notifications(&self) -> &NotificationRouter {
        &self.notifications
    }

    /// Route waiting to be applied, if any.
    pub fn pending_route(&self) -> Option<RouteRequest> {
        self.routes.pending()
    }

    /// Spawn the resolver and default router, and begin restoring the
    /// session. Must be called from within a tokio runtime.
    pub fn start(&self) {
        let resolver = NavigationResolver::new(self.routes.clone(), self.navigator.clone())
            .with_deep_link_flag(self.deep_links.loading().clone());
        let router = DefaultRouter::new(
            self.routes.clone(),
            self.session.clone(),
            self.deep_links.loading().clone(),
        );
        let session = self.session.clone();

        let mut tasks = self.lock_tasks();
        tasks.push(tokio::spawn(
            resolver.run(self.navigation.subscribe(), self.shutdown.subscribe()),
        ));
        tasks.push(tokio::spawn(
            router.run(self.navigation.subscribe(), self.shutdown.subscribe()),
        ));
        tasks.push(tokio::spawn(async move {
            session.load().await;
        }));
        tracing::info!("client runtime started");
    }

    /// The host reports a new navigation state.
    pub fn navigation_changed(&self, state: NavigationState) {
        self.navigation.send_if_modified(|current| {
            if *current == state {
                return false;
            }
            *current = state;
            true
        });
    }

    /// Forward every state a host navigator publishes.
    pub fn follow_navigation(&self, mut host: watch::Receiver<NavigationState>) {
        let navigation = self.navigation.clone();
        let mut shutdown = self.shutdown.subscribe();
        let forward = async move {
            loop {
                let state = host.borrow_and_update().clone();
                navigation.send_if_modified(|current| {
                    let changed = *current != state;
                    *current = state;
                    changed
                });
                tokio::select! {
                    changed = host.changed() => if changed.is_err() { break },
                    _ = shutdown.changed() => break,
                }
            }
        };
        self.lock_tasks().push(tokio::spawn(forward));
    }

    /// The app was opened with `url`.
    pub fn open_url(&self, url: &str) -> Option<u64> {
        self.deep_links.open(url)
    }

    /// A notification arrived while the app was in the foreground.
    pub fn notification_received(&self, payload: NotificationPayload) {
        self.notifications.on_received(payload);
    }

    /// The user tapped a notification.
    pub fn notification_response(&self, payload: &NotificationPayload) -> Option<u64> {
        self.notifications.on_response(payload)
    }

    /// Ingest a share-sheet delivery in the background.
    ///
    /// Failures are shown as an alert; the handle yields `None` in that case.
    pub fn share_received(&self, items: Vec<ShareObject>) -> JoinHandle<Option<IngestionOutcome>> {
        let shares = self.shares.clone();
        let alerts = self.alerts.clone();
        tokio::spawn(async move { ingest(&shares, alerts.as_ref(), &items).await })
    }

    /// Ingest a share-sheet delivery and wait for the outcome.
    pub async fn ingest_share(&self, items: &[ShareObject]) -> Option<IngestionOutcome> {
        ingest(&self.shares, self.alerts.as_ref(), items).await
    }

    /// Shared text now becomes snippets of `summary_id`.
    pub fn open_annotation(&self, summary_id: i64) {
        self.shares.annotation().open(summary_id);
    }

    /// Leave annotation mode.
    pub fn close_annotation(&self) {
        self.shares.annotation().close();
    }

    /// Validate, sign in remotely, persist the session and request `Home`.
    ///
    /// Every failure is also shown as an alert.
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionUser, AuthError> {
        if let Err(err) = credentials.validate() {
            return Err(self.report(err.into()));
        }
        let user = match self.auth.login(credentials).await {
            Ok(user) => user,
            Err(err) => return Err(self.report(err.into())),
        };
        self.sign_in(user).await
    }

    /// Like [`login`](Self::login) for a new account. A 403 means the email is taken.
    pub async fn register(&self, form: &Registration) -> Result<SessionUser, AuthError> {
        let request = match form.validate() {
            Ok(request) => request,
            Err(err) => return Err(self.report(err.into())),
        };
        let user = match self.auth.register(&request).await {
            Ok(user) => user,
            Err(err) if err.status() == Some(StatusCode::FORBIDDEN) => {
                return Err(self.report(AuthError::EmailTaken));
            }
            Err(err) => return Err(self.report(err.into())),
        };
        self.sign_in(user).await
    }

    async fn sign_in(&self, user: SessionUser) -> Result<SessionUser, AuthError> {
        if let Some(token) = user.token.as_deref() {
            self.session.store_access_token(token).await?;
        }
        self.session.set_user(user.clone()).await?;
        tracing::info!(user_id = user.id, "signed in");
        self.routes.request(DesiredRoute::home());
        Ok(user)
    }

    /// Sign out remotely (best effort) and locally, then go to `Login`.
    pub async fn logout(&self) -> Result<(), AuthError> {
        if let Err(err) = self.auth.logout().await {
            if !matches!(err, ApiError::Unauthorized(_)) {
                tracing::warn!(error = %err, "remote logout failed");
            }
        }
        self.session.clear().await?;
        tracing::info!("signed out");
        self.routes.request(DesiredRoute::login());
        Ok(())
    }

    /// Upload the device push token once per user.
    pub async fn attach_push_token(&self, token: &str) -> bool {
        self.session.attach_push_token(token, self.auth.as_ref()).await
    }

    fn report(&self, err: AuthError) -> AuthError {
        self.alerts.alert(&err.to_string());
        err
    }

    fn lock_tasks(&self) -> std::sync::MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.tasks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Stop background tasks and drop any pending route.
    pub async fn shutdown(&self) {
        self.shutdown.send_replace(true);
        let tasks: Vec<_> = self.lock_tasks().drain(..).collect();
        for task in tasks {
            if let Err(err) = task.await {
                tracing::error!(error = %err, "runtime task failed");
            }
        }
        // The resolver clears the slot on its way out; cover a runtime that
        // was never started.
        self.routes.clear();
        tracing::info!("client runtime stopped");
    }
}

async fn ingest(
    shares: &ShareIngestionService,
    alerts: &dyn AlertPresenter,
    items: &[ShareObject],
) -> Option<IngestionOutcome> {
    match shares.on_share_received(items).await {
        Ok(outcome) => Some(outcome),
        Err(err) => {
            tracing::error!(error = %err, "share ingestion failed");
            alerts.alert(&err.to_string());
            None
        }
    }
}
