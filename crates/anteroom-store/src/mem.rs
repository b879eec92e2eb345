#![forbid(unsafe_code)]

//! In-memory blob store for tests and ephemeral deployments.

use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use crate::{
    base::{BlobStore, sanitize_rel},
    error::{StoreError, StoreResult},
};

/// [`BlobStore`] over a `DashMap`. Nothing is persisted.
///
/// `local_path` is unsupported; `url` works the same as the disk store so the
/// file cache's name derivation behaves identically against both backends.
#[derive(Clone, Debug)]
pub struct MemStore {
    base_url: String,
    blobs: Arc<DashMap<String, Bytes>>,
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new("/media/")
    }
}

impl MemStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            blobs: Arc::new(DashMap::new()),
        }
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemStore {
    async fn save(&self, path: &str, content: Bytes) -> StoreResult<()> {
        let rel = sanitize_rel(path)?;
        self.blobs.insert(rel, content);
        Ok(())
    }

    async fn open(&self, path: &str) -> StoreResult<Bytes> {
        let rel = sanitize_rel(path)?;
        self.blobs
            .get(&rel)
            .map(|entry| entry.clone())
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }

    fn url(&self, path: &str) -> StoreResult<String> {
        let rel = sanitize_rel(path)?;
        Ok(format!("{}{}", self.base_url, rel))
    }

    fn local_path(&self, _path: &str) -> StoreResult<PathBuf> {
        Err(StoreError::Unsupported(
            "in-memory store has no filesystem paths",
        ))
    }

    async fn delete(&self, path: &str) -> StoreResult<()> {
        let rel = sanitize_rel(path)?;
        self.blobs.remove(&rel);
        Ok(())
    }

    async fn exists(&self, path: &str) -> StoreResult<bool> {
        let rel = sanitize_rel(path)?;
        Ok(self.blobs.contains_key(&rel))
    }
}
