//! Observable boolean "still loading" flags used to gate the default router.

use std::sync::Arc;
use tokio::sync::watch;

/// Shared "still loading" flag; clones observe the same value.
#[derive(Debug, Clone)]
pub struct LoadingFlag {
    name: &'static str,
    inner: Arc<watch::Sender<bool>>,
}

impl LoadingFlag {
    /// Flag named `name` in logs.
    pub fn new(name: &'static str, initially_loading: bool) -> Self {
        let (tx, _rx) = watch::channel(initially_loading);
        Self {
            name,
            inner: Arc::new(tx),
        }
    }

    /// Mark as loading.
    pub fn raise(&self) {
        self.set(true);
    }

    /// Mark as done.
    pub fn settle(&self) {
        self.set(false);
    }

    fn set(&self, loading: bool) {
        let changed = self.inner.send_if_modified(|value| {
            let changed = *value != loading;
            *value = loading;
            changed
        });
        if changed {
            tracing::debug!(flag = self.name, loading, "loading flag changed");
        }
    }

    /// Current value.
    pub fn is_loading(&self) -> bool {
        *self.inner.borrow()
    }

    /// Receiver notified on every real change.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.subscribe()
    }
}
