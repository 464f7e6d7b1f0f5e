//! Single-slot desired route channel.
//!
//! Every intent source holds a clone of the same [`RouteSlot`] and only ever
//! calls [`RouteSlot::request`]. A request overwrites whatever was pending;
//! nothing is queued. The navigation resolver subscribes to the slot and
//! clears it once the live route has converged.

use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::models::DesiredRoute;

/// A pending route together with the assignment that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    /// Requested route.
    pub route: DesiredRoute,
    /// Strictly increasing per slot; distinguishes repeated requests for the
    /// same route.
    pub generation: u64,
}

#[derive(Debug, Default)]
struct SlotContents {
    pending: Option<RouteRequest>,
    generation: u64,
}

/// Cloneable handle to the one desired-route slot.
#[derive(Debug, Clone)]
pub struct RouteSlot {
    inner: Arc<watch::Sender<SlotContents>>,
}

impl Default for RouteSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteSlot {
    /// An empty slot.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SlotContents::default());
        Self { inner: Arc::new(tx) }
    }

    /// Make `route` the desired route, replacing any pending one.
    ///
    /// Returns the generation of this assignment.
    pub fn request(&self, route: DesiredRoute) -> u64 {
        let mut assigned = 0;
        self.inner.send_modify(|slot| {
            slot.generation += 1;
            assigned = slot.generation;
            if let Some(previous) = &slot.pending {
                tracing::debug!(
                    replaced = %previous.route,
                    replaced_generation = previous.generation,
                    "overwriting unconsumed route"
                );
            }
            slot.pending = Some(RouteRequest {
                route: route.clone(),
                generation: assigned,
            });
        });
        tracing::info!(route = %route, generation = assigned, "route requested");
        assigned
    }

    /// Currently pending request, if any.
    pub fn pending(&self) -> Option<RouteRequest> {
        self.inner.borrow().pending.clone()
    }

    /// Whether a route is waiting.
    pub fn is_pending(&self) -> bool {
        self.inner.borrow().pending.is_some()
    }

    /// Generation of the most recent assignment (0 before the first request).
    pub fn generation(&self) -> u64 {
        self.inner.borrow().generation
    }

    /// Drop the pending route unconditionally.
    pub fn clear(&self) -> Option<RouteRequest> {
        let mut taken = None;
        self.inner.send_if_modified(|slot| {
            taken = slot.pending.take();
            taken.is_some()
        });
        taken
    }

    /// Drop the pending route only if it is still the assignment `generation`.
    ///
    /// A newer request that raced in stays pending.
    pub fn clear_if(&self, generation: u64) -> bool {
        self.inner.send_if_modified(|slot| {
            if slot
                .pending
                .as_ref()
                .is_some_and(|req| req.generation == generation)
            {
                slot.pending = None;
                true
            } else {
                false
            }
        })
    }

    /// Receiver that wakes on every request and every clear.
    pub fn watch(&self) -> RouteSlotWatch {
        RouteSlotWatch {
            rx: self.inner.subscribe(),
        }
    }
}

/// Change notifications for a [`RouteSlot`].
#[derive(Debug)]
pub struct RouteSlotWatch {
    rx: watch::Receiver<SlotContents>,
}

impl RouteSlotWatch {
    /// Wait for the next change and return the pending request after it.
    ///
    /// Fails once every [`RouteSlot`] clone has been dropped.
    pub async fn changed(&mut self) -> Result<Option<RouteRequest>, watch::error::RecvError> {
        self.rx.changed().await?;
        Ok(self.rx.borrow_and_update().pending.clone())
    }
}
