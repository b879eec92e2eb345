//! Shared fixtures for integration tests.

use anteroom_cache::{CachedFile, FileCache};
use anteroom_core::{FileMap, FormData, UploadedFile};
use anteroom_flow::{CompletionError, FieldErrors, FormValidator, OnDone};
use anteroom_store::MemStore;
use async_trait::async_trait;
use parking_lot::Mutex;

pub fn upload(name: &str, content: &'static [u8]) -> UploadedFile {
    UploadedFile::new(name, content)
}

pub fn mem_file_cache() -> FileCache<MemStore> {
    FileCache::new(MemStore::default())
}

pub fn fields(pairs: &[(&str, &str)]) -> FormData {
    pairs.iter().copied().collect()
}

/// Validator requiring a non-empty `title` field; files are optional.
pub struct RequireTitle;

#[async_trait]
impl FormValidator for RequireTitle {
    async fn validate(
        &self,
        fields: &FormData,
        _files: &FileMap<CachedFile>,
    ) -> Result<(), FieldErrors> {
        match fields.get("title") {
            Some(title) if !title.is_empty() => Ok(()),
            _ => {
                let mut errors = FieldErrors::new();
                errors.add("title", "This field is required.");
                Err(errors)
            }
        }
    }
}

/// Completion hook recording what it was invoked with.
#[derive(Default)]
pub struct RecordingDone {
    completed: Mutex<Vec<(FormData, Vec<String>)>>,
}

impl RecordingDone {
    pub fn completions(&self) -> Vec<(FormData, Vec<String>)> {
        self.completed.lock().clone()
    }
}

#[async_trait]
impl OnDone for RecordingDone {
    async fn complete(
        &self,
        fields: &FormData,
        files: &FileMap<CachedFile>,
    ) -> Result<(), CompletionError> {
        let names = files.values().map(|f| f.name.clone()).collect();
        self.completed.lock().push((fields.clone(), names));
        Ok(())
    }
}

/// Completion hook that always fails.
pub struct FailingDone;

#[async_trait]
impl OnDone for FailingDone {
    async fn complete(
        &self,
        _fields: &FormData,
        _files: &FileMap<CachedFile>,
    ) -> Result<(), CompletionError> {
        Err("model save failed".into())
    }
}
