//! Opaque key-value storage consumed by the configuration store.
//!
//! The host bot framework normally owns persistence; it only has to implement
//! [`Storage`](crate::storage::Storage). Two implementations ship with the crate:
//! an in-memory map and a directory of files.

use anyhow::Context;
use async_trait::async_trait;
use std::{
    collections::HashMap,
    fmt::Debug,
    path::PathBuf,
    sync::RwLock,
};

/// Persistent key-value store.
#[async_trait]
pub trait Storage: Debug + Send + Sync {
    /// Returns the value stored under `key`, or `None` if there is none.
    async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: Vec<u8>) -> anyhow::Result<()>;
}

/// Process-local storage backed by a hash map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| anyhow::anyhow!("memory storage lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> anyhow::Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow::anyhow!("memory storage lock poisoned"))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Storage keeping one file per key inside a directory.
///
/// Characters that are not safe in file names (anything outside
/// `[A-Za-z0-9_-]`) are replaced with `_`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        // Write to a sibling file first so readers never observe a partial record
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        Ok(())
    }
}
