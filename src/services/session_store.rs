//! Session store: the signed-in user, persisted across launches.
//!
//! Navigation never changes as a direct result of `set_user`; the default
//! router reacts to the session instead. The one exception is
//! [`SessionStore::on_unauthorized`], the channel through which a failed
//! remote call forces the user back to `Login`.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::errors::StorageResult;
use crate::domain::models::{DesiredRoute, SessionUser, ACCESS_TOKEN_KEY, USER_KEY};
use crate::domain::ports::{AuthApi, SessionStorage, UnauthorizedHandler};

use super::loading_flag::LoadingFlag;
use super::route_slot::RouteSlot;

/// Signed-in user, loading state and persisted credentials.
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    routes: RouteSlot,
    user: watch::Sender<Option<SessionUser>>,
    loading: LoadingFlag,
}

impl SessionStore {
    /// A store with no user. It reports "loading" until the first
    /// [`load`](Self::load) settles.
    pub fn new(storage: Arc<dyn SessionStorage>, routes: RouteSlot) -> Self {
        let (user, _rx) = watch::channel(None);
        Self {
            storage,
            routes,
            user,
            loading: LoadingFlag::new("session", true),
        }
    }

    /// Current user.
    pub fn user(&self) -> Option<SessionUser> {
        self.user.borrow().clone()
    }

    /// Whether a user is set.
    pub fn is_signed_in(&self) -> bool {
        self.user.borrow().is_some()
    }

    /// Raised while the persisted session is being read.
    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    /// Receiver notified on every session change.
    pub fn subscribe(&self) -> watch::Receiver<Option<SessionUser>> {
        self.user.subscribe()
    }

    /// Restore the persisted session.
    ///
    /// Never fails: unreadable or corrupt state is treated as "no session".
    /// Calling it again while a user is set returns that user untouched.
    pub async fn load(&self) -> Option<SessionUser> {
        if let Some(user) = self.user() {
            self.loading.settle();
            return Some(user);
        }

        self.loading.raise();
        let restored = match self.storage.get(USER_KEY).await {
            Ok(Some(blob)) => match serde_json::from_str::<SessionUser>(&blob) {
                Ok(user) => Some(user),
                Err(err) => {
                    tracing::warn!(error = %err, "stored session is corrupt, starting signed out");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read stored session, starting signed out");
                None
            }
        };

        if let Some(user) = &restored {
            tracing::info!(user_id = user.id, "session restored");
            self.user.send_replace(Some(user.clone()));
        } else {
            tracing::info!("no stored session");
        }
        self.loading.settle();
        restored
    }

    /// Replace the current session and persist it.
    ///
    /// The in-memory session is updated even if persisting fails; the error
    /// is returned so the caller can report it.
    pub async fn set_user(&self, user: SessionUser) -> StorageResult<()> {
        let blob = serde_json::to_string(&user)?;
        tracing::info!(user_id = user.id, "session updated");
        self.user.send_replace(Some(user));
        self.storage.set(USER_KEY, &blob).await
    }

    /// Sign out locally: forget the user and the access token.
    pub async fn clear(&self) -> StorageResult<()> {
        self.user.send_replace(None);
        self.storage.remove(USER_KEY).await?;
        self.storage.remove(ACCESS_TOKEN_KEY).await
    }

    /// Persisted access token.
    pub async fn access_token(&self) -> StorageResult<Option<String>> {
        self.storage.get(ACCESS_TOKEN_KEY).await
    }

    /// Persist the access token.
    pub async fn store_access_token(&self, token: &str) -> StorageResult<()> {
        self.storage.set(ACCESS_TOKEN_KEY, token).await
    }

    /// Upload the device push token if the signed-in user has none yet.
    ///
    /// Returns whether the user record was updated.
    pub async fn attach_push_token(&self, token: &str, api: &dyn AuthApi) -> bool {
        let Some(user) = self.user().filter(|u| !u.has_push_token()) else {
            return false;
        };

        if let Err(err) = api.update_expo_token(token).await {
            tracing::warn!(error = %err, user_id = user.id, "failed to register push token");
            return false;
        }

        let updated = SessionUser {
            expo_token: Some(token.to_string()),
            ..user
        };
        if let Err(err) = self.set_user(updated).await {
            tracing::warn!(error = %err, "failed to persist push token");
        }
        true
    }
}

#[async_trait]
impl UnauthorizedHandler for SessionStore {
    /// Drop the stale access token and send the user to `Login`.
    async fn on_unauthorized(&self) {
        tracing::warn!("remote call rejected as unauthorized, redirecting to login");
        if let Err(err) = self.storage.remove(ACCESS_TOKEN_KEY).await {
            tracing::error!(error = %err, "failed to remove stored access token");
        }
        self.routes.request(DesiredRoute::login());
    }
}
