//! Session storage port (trait) for dependency injection.
//!
//! Key/value persistence for the serialized session blob and the access
//! token. Services depend on this trait, not concrete implementations.

use async_trait::async_trait;

use crate::domain::errors::StorageResult;

/// Persisted key/value session state.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Read a value; `None` when the key was never set or was removed.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> StorageResult<()>;
}
