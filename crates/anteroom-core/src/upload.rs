#![forbid(unsafe_code)]

use bytes::Bytes;

/// One uploaded file as handed over by the host web framework.
///
/// Carries the full payload in memory; streaming uploads are out of scope for
/// the preview cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-supplied filename. Untrusted; only its extension is ever used
    /// when deriving storage paths.
    pub name: String,
    pub content_type: Option<String>,
    pub content: Bytes,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            content: content.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Extension of the client filename, without the leading dot.
    pub fn extension(&self) -> Option<&str> {
        std::path::Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
    }
}
