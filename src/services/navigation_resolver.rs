//! Navigation resolver: reconciles the desired route with the live route.
//!
//! The resolver is level-triggered. Every change of the pending request or of
//! the host's navigation state re-runs [`NavigationResolver::reconcile`]:
//!
//! - nothing pending, or navigation not ready: nothing happens
//! - live route equals the pending route: the slot is cleared
//! - otherwise: one navigate action is issued for this (assignment, state)
//!   pair; the next state change is evaluated afresh, so a user who
//!   navigates away before convergence is sent back once more
//!
//! Teardown clears the slot.

use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::models::{DesiredRoute, NavigationState};
use crate::domain::ports::Navigator;

use super::loading_flag::LoadingFlag;
use super::route_slot::{RouteRequest, RouteSlot};

/// Where the resolver stands relative to the desired route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverPhase {
    /// Nothing has been requested since the last teardown.
    Idle,
    /// A route is set and the live route does not show it yet.
    RoutePending,
    /// The last requested route was reached and consumed.
    Resolved,
}

/// Result of a single reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// No route pending.
    Idle,
    /// A route is pending but the navigation surface is not mounted yet.
    AwaitingReadiness,
    /// A navigate action was issued.
    Navigated(DesiredRoute),
    /// Already navigated for this assignment and state; waiting for the host.
    AwaitingConvergence,
    /// The live route matches; the pending route was consumed.
    Converged(DesiredRoute),
}

/// Applies the pending route to the host navigator.
pub struct NavigationResolver {
    slot: RouteSlot,
    navigator: Arc<dyn Navigator>,
    deep_link_loading: Option<LoadingFlag>,
    state: NavigationState,
    last_attempt: Option<(u64, NavigationState)>,
    resolved_generation: Option<u64>,
}

impl NavigationResolver {
    /// Resolver for `slot`, navigating through `navigator`.
    pub fn new(slot: RouteSlot, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            slot,
            navigator,
            deep_link_loading: None,
            state: NavigationState::default(),
            last_attempt: None,
            resolved_generation: None,
        }
    }

    /// Lower `flag` whenever a navigate action is issued.
    ///
    /// The deep-link source raises it before requesting its route; the
    /// default router stays quiet while it is up.
    pub fn with_deep_link_flag(mut self, flag: LoadingFlag) -> Self {
        self.deep_link_loading = Some(flag);
        self
    }

    /// Last navigation state observed.
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Where the resolver stands.
    pub fn phase(&self) -> ResolverPhase {
        if self.slot.is_pending() {
            ResolverPhase::RoutePending
        } else if self.resolved_generation.is_some() {
            ResolverPhase::Resolved
        } else {
            ResolverPhase::Idle
        }
    }

    /// Record a new navigation state from the host and reconcile.
    ///
    /// Reporting the same state twice is a no-op.
    pub fn observe(&mut self, state: NavigationState) -> Option<Reconciliation> {
        if state == self.state {
            return None;
        }
        tracing::debug!(
            ready = state.ready,
            current = ?state.current_path(),
            "navigation state changed"
        );
        self.state = state;
        Some(self.reconcile())
    }

    /// Compare the pending route with the live one and act on a mismatch.
    pub fn reconcile(&mut self) -> Reconciliation {
        let Some(RouteRequest { route, generation }) = self.slot.pending() else {
            return Reconciliation::Idle;
        };

        if !self.state.ready {
            tracing::debug!(route = %route, "route pending until navigation is ready");
            return Reconciliation::AwaitingReadiness;
        }

        if self.state.shows(&route) {
            if self.slot.clear_if(generation) {
                self.resolved_generation = Some(generation);
                tracing::info!(route = %route, generation, "route resolved");
            }
            return Reconciliation::Converged(route);
        }

        let attempt = (generation, self.state.clone());
        if self.last_attempt.as_ref() == Some(&attempt) {
            return Reconciliation::AwaitingConvergence;
        }

        tracing::info!(
            route = %route,
            generation,
            from = ?self.state.current_path(),
            "navigating"
        );
        self.last_attempt = Some(attempt);
        if let Some(flag) = &self.deep_link_loading {
            flag.settle();
        }
        self.navigator.navigate(&route);
        Reconciliation::Navigated(route)
    }

    /// Consume any pending route; called when the owning runtime unmounts.
    pub fn teardown(&mut self) {
        if let Some(dropped) = self.slot.clear() {
            tracing::info!(route = %dropped.route, "dropping pending route on teardown");
        }
        self.last_attempt = None;
        self.resolved_generation = None;
    }

    /// Reconcile on every slot or navigation change until `shutdown` fires
    /// or the host drops its navigation sender.
    pub async fn run(
        mut self,
        mut navigation: watch::Receiver<NavigationState>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut routes = self.slot.watch();
        let initial = navigation.borrow_and_update().clone();
        if self.observe(initial).is_none() {
            self.reconcile();
        }

        loop {
            tokio::select! {
                changed = routes.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.reconcile();
                }
                changed = navigation.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let state = navigation.borrow_and_update().clone();
                    self.observe(state);
                }
                _ = shutdown.changed() => break,
            }
        }

        self.teardown();
        tracing::debug!("navigation resolver stopped");
    }
}
