#![forbid(unsafe_code)]

//! Post cache: the merge/clear lifecycle for one in-flight submission.

use std::time::Duration;

use anteroom_core::{FileMap, FormData, UploadedFile};
use anteroom_store::BlobStore;

use crate::{
    entry::{CacheEntry, FileRef},
    error::CacheResult,
    file::{CachedFile, FileCache},
    kv::{DEFAULT_TTL, KeyValueCache},
};

/// Suffix of the per-field client signal requesting removal of a previously
/// cached file without supplying a replacement.
const CLEAR_SUFFIX: &str = "-clear";

/// In-memory projection of one [`CacheEntry`], loaded eagerly at
/// construction and kept in sync by [`save`](PostCache::save) /
/// [`clear`](PostCache::clear).
///
/// ## Merge semantics (normative)
///
/// - New uploads for a field *replace* that field's cached references.
/// - A field with no new upload and a truthy `<field>-clear` flag gets its
///   cached references deleted (blobs included) and the field dropped.
/// - A field with no new upload and no clear flag keeps its references.
///
/// ## Races
///
/// Two concurrent saves under the same key are last-writer-wins. The save
/// path re-reads the persisted entry from the backend instead of trusting
/// the in-memory snapshot, so a writer merges against the latest persisted
/// file set rather than the one it loaded at construction.
pub struct PostCache<S, K> {
    key: String,
    file_cache: FileCache<S>,
    kv: K,
    ttl: Duration,
    fields: FormData,
    file_refs: FileMap<FileRef>,
    files: FileMap<CachedFile>,
}

impl<S: BlobStore, K: KeyValueCache> PostCache<S, K> {
    /// Load the entry for `key`, or start empty if the backend has none.
    ///
    /// Every persisted reference is materialized through
    /// [`FileCache::load`]; a missing blob fails the whole open.
    pub async fn open(key: impl Into<String>, file_cache: FileCache<S>, kv: K) -> CacheResult<Self> {
        Self::open_with_ttl(key, file_cache, kv, DEFAULT_TTL).await
    }

    pub async fn open_with_ttl(
        key: impl Into<String>,
        file_cache: FileCache<S>,
        kv: K,
        ttl: Duration,
    ) -> CacheResult<Self> {
        let key = key.into();
        let mut cache = Self {
            key,
            file_cache,
            kv,
            ttl,
            fields: FormData::new(),
            file_refs: FileMap::new(),
            files: FileMap::new(),
        };
        if let Some(entry) = cache.kv.get(&cache.key).await? {
            cache.files = cache.load_files(&entry.files).await?;
            cache.fields = entry.fields;
            cache.file_refs = entry.files;
        }
        Ok(cache)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Cached field values.
    pub fn fields(&self) -> &FormData {
        &self.fields
    }

    /// Cached files, materialized as loaded handles.
    pub fn files(&self) -> &FileMap<CachedFile> {
        &self.files
    }

    /// Merge one request's raw fields and uploads into the cached entry and
    /// persist the result.
    pub async fn save(
        &mut self,
        incoming_fields: &FormData,
        incoming_files: &FileMap<UploadedFile>,
    ) -> CacheResult<()> {
        let saved = self.save_files(incoming_files).await?;

        // Merge against the persisted entry, not the in-memory snapshot:
        // another request may have saved under this key since we loaded.
        let mut cached_files = self
            .kv
            .get(&self.key)
            .await?
            .map(|entry| entry.files)
            .unwrap_or_default();
        self.remove_cleared_files(incoming_fields, incoming_files, &mut cached_files)
            .await?;
        cached_files.overwrite_with(saved);

        let entry = CacheEntry {
            fields: incoming_fields.clone(),
            files: cached_files,
        };
        self.kv.set(&self.key, &entry, self.ttl).await?;
        tracing::debug!(
            key = %self.key,
            fields = entry.fields.len(),
            files = entry.files.len(),
            "saved post cache entry"
        );

        self.files = self.load_files(&entry.files).await?;
        self.fields = entry.fields;
        self.file_refs = entry.files;
        Ok(())
    }

    /// Delete every held file reference and the backing entry, resetting the
    /// in-memory state. Calling this on an already-empty entry is a no-op.
    pub async fn clear(&mut self) -> CacheResult<()> {
        for file_ref in self.file_refs.values() {
            self.file_cache.delete(file_ref).await?;
        }
        self.kv.delete(&self.key).await?;
        tracing::debug!(key = %self.key, "cleared post cache entry");

        self.fields = FormData::new();
        self.file_refs = FileMap::new();
        self.files = FileMap::new();
        Ok(())
    }

    async fn save_files(
        &self,
        incoming: &FileMap<UploadedFile>,
    ) -> CacheResult<FileMap<FileRef>> {
        let mut saved = FileMap::new();
        for (name, uploads) in incoming.iter() {
            let mut refs = Vec::with_capacity(uploads.len());
            for upload in uploads {
                refs.push(self.file_cache.save(upload).await?);
            }
            saved.set_all(name, refs);
        }
        Ok(saved)
    }

    /// Drop cached references for fields the client asked to clear.
    ///
    /// A field is cleared when it has no new upload in this request and its
    /// `<field>-clear` flag is truthy. The referenced blobs are deleted.
    async fn remove_cleared_files(
        &self,
        incoming_fields: &FormData,
        incoming_files: &FileMap<UploadedFile>,
        cached_files: &mut FileMap<FileRef>,
    ) -> CacheResult<()> {
        let names: Vec<String> = cached_files.keys().map(str::to_string).collect();
        for name in names {
            let flag = incoming_fields.get(&format!("{name}{CLEAR_SUFFIX}"));
            if incoming_files.contains_key(&name) || !is_truthy(flag) {
                continue;
            }
            if let Some(refs) = cached_files.remove(&name) {
                for file_ref in &refs {
                    self.file_cache.delete(file_ref).await?;
                }
                tracing::debug!(key = %self.key, field = %name, "cleared cached files for field");
            }
        }
        Ok(())
    }

    async fn load_files(&self, refs: &FileMap<FileRef>) -> CacheResult<FileMap<CachedFile>> {
        let mut loaded = FileMap::new();
        for (name, file_refs) in refs.iter() {
            let mut handles = Vec::with_capacity(file_refs.len());
            for file_ref in file_refs {
                handles.push(self.file_cache.load(file_ref).await?);
            }
            loaded.set_all(name, handles);
        }
        Ok(loaded)
    }
}

/// A clear flag is truthy when present, non-empty and not `"0"`/`"false"`
/// (case-insensitive).
fn is_truthy(value: Option<&str>) -> bool {
    match value {
        None | Some("") => false,
        Some(v) => !v.eq_ignore_ascii_case("false") && v != "0",
    }
}
