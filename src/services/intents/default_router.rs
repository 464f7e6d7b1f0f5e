//! Default post-auth router.
//!
//! Picks `Home` or `Login` once the app has settled on the bootstrap
//! `Loading` screen and nothing more specific is on its way.

use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::models::{DesiredRoute, NavigationState, Screen};
use crate::services::loading_flag::LoadingFlag;
use crate::services::route_slot::RouteSlot;
use crate::services::session_store::SessionStore;

/// Inputs the default destination depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootConditions {
    /// The navigation container is mounted.
    pub navigation_ready: bool,
    /// The live route is `Loading`.
    pub on_loading_screen: bool,
    /// The session is still being restored.
    pub session_loading: bool,
    /// A deep link has not been navigated to yet.
    pub deep_link_loading: bool,
    /// Another source already requested a route.
    pub route_pending: bool,
    /// A session exists.
    pub signed_in: bool,
}

impl BootConditions {
    /// Default destination, or `None` while any guard is still up.
    pub fn destination(&self) -> Option<DesiredRoute> {
        let settled = self.navigation_ready
            && self.on_loading_screen
            && !self.session_loading
            && !self.deep_link_loading
            && !self.route_pending;
        if !settled {
            return None;
        }
        Some(if self.signed_in {
            DesiredRoute::home()
        } else {
            DesiredRoute::login()
        })
    }
}

/// Sends the app from `Loading` to `Home` or `Login` once nothing else claims it.
pub struct DefaultRouter {
    routes: RouteSlot,
    session: Arc<SessionStore>,
    deep_link_loading: LoadingFlag,
}

impl DefaultRouter {
    /// Router watching `session` and the deep-link flag.
    pub fn new(routes: RouteSlot, session: Arc<SessionStore>, deep_link_loading: LoadingFlag) -> Self {
        Self {
            routes,
            session,
            deep_link_loading,
        }
    }

    /// Snapshot of everything the decision depends on.
    pub fn conditions(&self, state: &NavigationState) -> BootConditions {
        BootConditions {
            navigation_ready: state.ready,
            on_loading_screen: state.current_path() == Some(Screen::Loading),
            session_loading: self.session.loading().is_loading(),
            deep_link_loading: self.deep_link_loading.is_loading(),
            route_pending: self.routes.is_pending(),
            signed_in: self.session.is_signed_in(),
        }
    }

    /// Request the default destination if every guard has cleared.
    pub fn evaluate(&self, state: &NavigationState) -> Option<u64> {
        let conditions = self.conditions(state);
        let route = conditions.destination()?;
        tracing::info!(route = %route, "default route chosen");
        Some(self.routes.request(route))
    }

    /// Re-evaluate whenever navigation, the session or a loading flag changes.
    pub async fn run(
        self,
        mut navigation: watch::Receiver<NavigationState>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut session_loading = self.session.loading().subscribe();
        let mut deep_link_loading = self.deep_link_loading.subscribe();
        let mut user = self.session.subscribe();
        let mut routes = self.routes.watch();

        loop {
            let state = navigation.borrow_and_update().clone();
            self.evaluate(&state);

            tokio::select! {
                changed = navigation.changed() => if changed.is_err() { break },
                changed = session_loading.changed() => if changed.is_err() { break },
                changed = deep_link_loading.changed() => if changed.is_err() { break },
                changed = user.changed() => if changed.is_err() { break },
                changed = routes.changed() => if changed.is_err() { break },
                _ = shutdown.changed() => break,
            }
        }
        tracing::debug!("default router stopped");
    }
}
