//! Blob store decorator that counts operations per path.

use std::{path::PathBuf, sync::Arc};

use anteroom_store::{BlobStore, StoreResult};
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

/// Wraps a [`BlobStore`] and records how often each path was deleted, for
/// asserting exactly-once delete behavior.
#[derive(Clone)]
pub struct CountingStore<S> {
    inner: S,
    deletes: Arc<DashMap<String, usize>>,
}

impl<S> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            deletes: Arc::new(DashMap::new()),
        }
    }

    pub fn delete_count(&self, path: &str) -> usize {
        self.deletes.get(path).map(|c| *c).unwrap_or(0)
    }

    pub fn total_deletes(&self) -> usize {
        self.deletes.iter().map(|entry| *entry.value()).sum()
    }
}

#[async_trait]
impl<S: BlobStore> BlobStore for CountingStore<S> {
    async fn save(&self, path: &str, content: Bytes) -> StoreResult<()> {
        self.inner.save(path, content).await
    }

    async fn open(&self, path: &str) -> StoreResult<Bytes> {
        self.inner.open(path).await
    }

    fn url(&self, path: &str) -> StoreResult<String> {
        self.inner.url(path)
    }

    fn local_path(&self, path: &str) -> StoreResult<PathBuf> {
        self.inner.local_path(path)
    }

    async fn delete(&self, path: &str) -> StoreResult<()> {
        *self.deletes.entry(path.to_string()).or_insert(0) += 1;
        self.inner.delete(path).await
    }

    async fn exists(&self, path: &str) -> StoreResult<bool> {
        self.inner.exists(path).await
    }
}
