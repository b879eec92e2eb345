#![forbid(unsafe_code)]

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{StoreError, StoreResult};

/// Explicit public contract for blob storage.
///
/// ## What this trait is about (normative)
///
/// A store holds opaque byte blobs addressed by relative path strings chosen
/// by higher layers. The store does not "invent" paths; it only enforces
/// safety (no absolute paths, no `..`, no empty segments).
///
/// ## What this trait is NOT about (normative)
///
/// This trait does not define path layout conventions, unique-name
/// generation, or file lifecycle policy. Those live in the file cache, which
/// owns which blobs exist and for how long.
#[async_trait]
pub trait BlobStore: Send + Sync + 'static {
    /// Write `content` under `path`, overwriting any existing blob.
    async fn save(&self, path: &str, content: Bytes) -> StoreResult<()>;

    /// Read the full content of the blob at `path`.
    ///
    /// Fails with [`StoreError::NotFound`] if no blob exists there.
    async fn open(&self, path: &str) -> StoreResult<Bytes>;

    /// Public URL for the blob at `path`.
    fn url(&self, path: &str) -> StoreResult<String>;

    /// Local filesystem path for the blob at `path`.
    ///
    /// Fails with [`StoreError::Unsupported`] for stores with no filesystem
    /// presence.
    fn local_path(&self, path: &str) -> StoreResult<PathBuf>;

    /// Delete the blob at `path`. Idempotent: a missing path is `Ok(())`.
    async fn delete(&self, path: &str) -> StoreResult<()>;

    /// Whether a blob exists at `path`.
    async fn exists(&self, path: &str) -> StoreResult<bool>;
}

/// Validate and normalize a relative blob path.
///
/// Backslashes are normalized to forward slashes before validation.
pub(crate) fn sanitize_rel(input: &str) -> StoreResult<String> {
    let s = input.replace('\\', "/");
    if s.is_empty() || s.starts_with('/') || s.split('/').any(|seg| seg.is_empty() || seg == "..") {
        return Err(StoreError::InvalidPath(input.to_string()));
    }
    Ok(s)
}
