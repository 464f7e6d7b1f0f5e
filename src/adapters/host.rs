//! Host surfaces for running without a device: alerts are logged and kept,
//! shared items sit in an in-memory queue.

use std::sync::Mutex;

use crate::domain::models::ShareObject;
use crate::domain::ports::{AlertPresenter, ShareInbox};

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Alert surface that records messages and logs them.
#[derive(Debug, Default)]
pub struct AlertLog {
    messages: Mutex<Vec<String>>,
}

impl AlertLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every alert shown so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        lock(&self.messages).clone()
    }
}

impl AlertPresenter for AlertLog {
    fn alert(&self, message: &str) {
        tracing::warn!(alert = message, "alert shown");
        lock(&self.messages).push(message.to_string());
    }
}

/// Items received from the share sheet, drained after each delivery.
#[derive(Debug, Default)]
pub struct ShareQueue {
    received: Mutex<Vec<ShareObject>>,
    drains: Mutex<usize>,
}

impl ShareQueue {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue items as the OS would and return the current batch.
    pub fn receive(&self, items: impl IntoIterator<Item = ShareObject>) -> Vec<ShareObject> {
        let mut received = lock(&self.received);
        received.extend(items);
        received.clone()
    }

    /// Items received but not yet cleared.
    pub fn pending(&self) -> Vec<ShareObject> {
        lock(&self.received).clone()
    }

    /// How many times the queue has been cleared.
    pub fn drain_count(&self) -> usize {
        *lock(&self.drains)
    }
}

impl ShareInbox for ShareQueue {
    fn clear_received_files(&self) {
        lock(&self.received).clear();
        *lock(&self.drains) += 1;
    }
}
