//! File-backed session storage.
//!
//! All keys live in one JSON object on disk. Every write rewrites the file
//! through a temporary sibling and a rename, so a crash never leaves a
//! half-written store behind.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::errors::{StorageError, StorageResult};
use crate::domain::ports::SessionStorage;

/// Session storage persisted as a single JSON file.
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStorage {
    /// Storage backed by the file at `path`. Nothing is touched until the
    /// first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> StorageResult<BTreeMap<String, String>> {
        match fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Current entries for a read-modify-write, and whether the file on disk
    /// was unparseable. A corrupt file reads as empty and must be rewritten.
    async fn read_for_update(&self) -> StorageResult<(BTreeMap<String, String>, bool)> {
        match self.read_all().await {
            Ok(entries) => Ok((entries, false)),
            Err(StorageError::Serialization(err)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "session file is corrupt, overwriting it"
                );
                Ok((BTreeMap::new(), true))
            }
            Err(err) => Err(err),
        }
    }

    async fn write_all(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;
        let (mut entries, _) = self.read_for_update().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries).await
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;
        let (mut entries, corrupt) = self.read_for_update().await?;
        if entries.remove(key).is_some() || corrupt {
            self.write_all(&entries).await?;
        }
        Ok(())
    }
}
