#![forbid(unsafe_code)]

//! Validation and completion seams to the embedding application.

use anteroom_cache::CachedFile;
use anteroom_core::{FileMap, FormData};
use async_trait::async_trait;

/// Field-level validation errors, `field name → messages`.
///
/// This is data, not an error type: a failed validation re-renders the input
/// stage with these annotations and is never a flow fault.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(String, Vec<String>)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one message for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some((_, messages)) => messages.push(message.into()),
            None => self.entries.push((field, vec![message.into()])),
        }
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, messages)| messages.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(f, messages)| (f.as_str(), messages.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The form validation boundary.
///
/// Receives the post cache's *merged* fields and files — not the raw
/// request — so a confirm-stage submission sees the file uploaded at the
/// preview stage.
#[async_trait]
pub trait FormValidator: Send + Sync {
    async fn validate(
        &self,
        fields: &FormData,
        files: &FileMap<CachedFile>,
    ) -> Result<(), FieldErrors>;
}

/// Error type for completion hooks.
pub type CompletionError = Box<dyn std::error::Error + Send + Sync>;

/// Domain completion logic invoked once a submission reaches the confirm
/// stage with valid data — typically "persist a model instance".
///
/// Runs *before* the cache entry is cleared: a failing hook leaves the
/// submission intact for retry.
#[async_trait]
pub trait OnDone: Send + Sync {
    async fn complete(
        &self,
        fields: &FormData,
        files: &FileMap<CachedFile>,
    ) -> Result<(), CompletionError>;
}
