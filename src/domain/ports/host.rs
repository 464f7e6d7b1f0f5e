//! Host-provided surfaces that are neither navigation nor storage.

/// OS share-intent queue.
pub trait ShareInbox: Send + Sync {
    /// Drop everything the OS has delivered so far. Called after every
    /// delivery, whatever the ingestion outcome.
    fn clear_received_files(&self);
}

/// Dismissable user-facing alerts.
pub trait AlertPresenter: Send + Sync {
    fn alert(&self, message: &str);
}
