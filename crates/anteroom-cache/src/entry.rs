#![forbid(unsafe_code)]

use anteroom_core::{FileMap, FormData};
use serde::{Deserialize, Serialize};

/// Durable pointer to a stored blob: the storage path produced by
/// [`FileCache::save`](crate::FileCache::save).
///
/// Distinct from the blob's transient loaded handle
/// ([`CachedFile`](crate::CachedFile)); only references are persisted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileRef(String);

impl FileRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One cached submission: field values plus file references.
///
/// Owned exclusively by the [`PostCache`](crate::PostCache) for its key;
/// serialized as JSON by key-value backends.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub fields: FormData,
    pub files: FileMap<FileRef>,
}
