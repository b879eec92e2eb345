#![forbid(unsafe_code)]

//! Filesystem-backed blob store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;

use crate::{
    base::{BlobStore, sanitize_rel},
    error::{StoreError, StoreResult},
};

/// [`BlobStore`] over a root directory on the local filesystem.
///
/// Blobs map to `<root_dir>/<path>`; URLs map to `<base_url><path>`. Parent
/// directories are created on `save`.
#[derive(Clone, Debug)]
pub struct DiskStore {
    root_dir: PathBuf,
    base_url: String,
}

impl DiskStore {
    /// Create a store rooted at `root_dir`, serving blobs under `base_url`.
    ///
    /// `base_url` gets a trailing `/` appended if missing.
    pub fn new(root_dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            root_dir: root_dir.into(),
            base_url,
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn blob_path(&self, path: &str) -> StoreResult<PathBuf> {
        let rel = sanitize_rel(path)?;
        Ok(self.root_dir.join(rel))
    }
}

#[async_trait]
impl BlobStore for DiskStore {
    async fn save(&self, path: &str, content: Bytes) -> StoreResult<()> {
        let full = self.blob_path(path)?;
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full, &content).await?;
        Ok(())
    }

    async fn open(&self, path: &str) -> StoreResult<Bytes> {
        let full = self.blob_path(path)?;
        match tokio::fs::read(&full).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn url(&self, path: &str) -> StoreResult<String> {
        let rel = sanitize_rel(path)?;
        Ok(format!("{}{}", self.base_url, rel))
    }

    fn local_path(&self, path: &str) -> StoreResult<PathBuf> {
        self.blob_path(path)
    }

    async fn delete(&self, path: &str) -> StoreResult<()> {
        let full = self.blob_path(path)?;
        match tokio::fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, path: &str) -> StoreResult<bool> {
        let full = self.blob_path(path)?;
        Ok(tokio::fs::try_exists(&full).await?)
    }
}
