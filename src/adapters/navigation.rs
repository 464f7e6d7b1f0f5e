//! In-process navigation surface.
//!
//! Stands in for a mobile navigation container: it is not ready until
//! mounted, records every navigate action, and reports its state on a watch
//! channel the resolver subscribes to.

use std::sync::Mutex;
use tokio::sync::watch;

use crate::domain::models::{DesiredRoute, NavigationState};
use crate::domain::ports::Navigator;

/// In-process navigator for headless runs and tests.
#[derive(Debug)]
pub struct SimulatedNavigator {
    state: watch::Sender<NavigationState>,
    actions: Mutex<Vec<DesiredRoute>>,
    shown: Mutex<Vec<DesiredRoute>>,
    auto_settle: bool,
}

impl SimulatedNavigator {
    /// With `auto_settle` every navigate action immediately becomes the live
    /// route; otherwise the caller settles it with [`show`](Self::show).
    pub fn new(auto_settle: bool) -> Self {
        let (state, _rx) = watch::channel(NavigationState::default());
        Self {
            state,
            actions: Mutex::new(Vec::new()),
            shown: Mutex::new(Vec::new()),
            auto_settle,
        }
    }

    /// Live navigation state, for `ClientRuntime::follow_navigation`.
    pub fn subscribe(&self) -> watch::Receiver<NavigationState> {
        self.state.subscribe()
    }

    /// Current navigation state.
    pub fn state(&self) -> NavigationState {
        self.state.borrow().clone()
    }

    /// Mount the container on its initial screen; navigation becomes ready.
    pub fn mount(&self, initial: DesiredRoute) {
        tracing::debug!(route = %initial, "navigation container mounted");
        self.record_shown(&initial);
        self.state.send_replace(NavigationState::ready_at(initial));
    }

    /// Make `route` the live route, as if the user or the container moved there.
    pub fn show(&self, route: DesiredRoute) {
        self.record_shown(&route);
        self.state.send_modify(|state| state.current = Some(route));
    }

    /// Navigate actions issued so far, in order.
    pub fn actions(&self) -> Vec<DesiredRoute> {
        lock(&self.actions).clone()
    }

    /// Every route that has been live, starting with the mounted one.
    pub fn history(&self) -> Vec<DesiredRoute> {
        lock(&self.shown).clone()
    }

    fn record_shown(&self, route: &DesiredRoute) {
        lock(&self.shown).push(route.clone());
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Navigator for SimulatedNavigator {
    fn navigate(&self, route: &DesiredRoute) {
        lock(&self.actions).push(route.clone());
        if self.auto_settle {
            self.show(route.clone());
        }
    }
}
