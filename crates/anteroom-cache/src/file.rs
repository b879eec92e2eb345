#![forbid(unsafe_code)]

//! File cache: unique-path storage of uploaded blobs and their loaded handles.

use std::path::PathBuf;

use anteroom_core::UploadedFile;
use anteroom_store::{BlobStore, StoreError};
use bytes::Bytes;
use uuid::Uuid;

use crate::{
    entry::FileRef,
    error::{CacheError, CacheResult},
};

/// File cache configuration.
#[derive(Clone, Debug)]
pub struct FileCacheOptions {
    /// Directory prefix inside the store for temporary uploads.
    pub tmp_dir: String,
    /// Public media URL prefix, stripped from a loaded file's URL to derive
    /// its display name.
    pub public_prefix: String,
}

impl Default for FileCacheOptions {
    fn default() -> Self {
        Self {
            tmp_dir: "anteroom/".to_string(),
            public_prefix: "/media/".to_string(),
        }
    }
}

/// A loaded file handle assembled from a [`FileRef`].
///
/// Transient: rebuilt on every cache read, never persisted itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedFile {
    /// Display name: the public URL with the configured media prefix
    /// stripped off.
    pub name: String,
    pub url: String,
    /// Filesystem path; `None` for stores with no filesystem presence.
    pub local_path: Option<PathBuf>,
    pub content: Bytes,
}

/// Stores uploaded files under unique temporary paths and materializes them
/// back into [`CachedFile`] handles.
///
/// Paths are `<tmp_dir><uuid4><.ext>`; only the extension of the client
/// filename survives into the storage path.
#[derive(Clone, Debug)]
pub struct FileCache<S> {
    store: S,
    opts: FileCacheOptions,
}

impl<S: BlobStore> FileCache<S> {
    pub fn new(store: S) -> Self {
        Self::with_options(store, FileCacheOptions::default())
    }

    pub fn with_options(store: S, opts: FileCacheOptions) -> Self {
        Self { store, opts }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn create_path(&self, file: &UploadedFile) -> String {
        let ext = file
            .extension()
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        format!("{}{}{}", self.opts.tmp_dir, Uuid::new_v4(), ext)
    }

    /// Store an uploaded file's bytes under a freshly generated unique path.
    pub async fn save(&self, file: &UploadedFile) -> CacheResult<FileRef> {
        let path = self.create_path(file);
        self.store.save(&path, file.content.clone()).await?;
        tracing::debug!(path = %path, name = %file.name, "cached uploaded file");
        Ok(FileRef::new(path))
    }

    /// Load the blob behind `file_ref` into a [`CachedFile`].
    ///
    /// Fails with [`CacheError::NotFound`] if the reference no longer exists
    /// in the store.
    pub async fn load(&self, file_ref: &FileRef) -> CacheResult<CachedFile> {
        let content = match self.store.open(file_ref.path()).await {
            Ok(content) => content,
            Err(StoreError::NotFound(path)) => return Err(CacheError::NotFound(path)),
            Err(e) => return Err(e.into()),
        };
        let url = self.store.url(file_ref.path())?;
        let local_path = match self.store.local_path(file_ref.path()) {
            Ok(path) => Some(path),
            Err(StoreError::Unsupported(_)) => None,
            Err(e) => return Err(e.into()),
        };
        let name = url
            .strip_prefix(&self.opts.public_prefix)
            .unwrap_or(&url)
            .to_string();
        Ok(CachedFile {
            name,
            url,
            local_path,
            content,
        })
    }

    /// Delete the blob behind `file_ref`.
    ///
    /// Idempotent, mirroring the store: deleting a missing reference is
    /// `Ok(())`.
    pub async fn delete(&self, file_ref: &FileRef) -> CacheResult<()> {
        self.store.delete(file_ref.path()).await?;
        tracing::debug!(path = %file_ref, "deleted cached file");
        Ok(())
    }
}
