#![forbid(unsafe_code)]

use anteroom_core::{FileMap, FormData, UploadedFile};

/// HTTP method of the incoming request. PUT is handled identically to POST.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    pub fn submits_data(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

/// One HTTP request as seen by the flow: the host framework's contract is
/// "POST fields + uploaded files in, render/redirect decision out".
#[derive(Clone, Debug)]
pub struct FormRequest {
    pub method: Method,
    /// Request path, part of session-derived cache keys.
    pub path: String,
    /// Session identifier, if the host has one for this client.
    pub session_id: Option<String>,
    pub fields: FormData,
    pub files: FileMap<UploadedFile>,
}

impl FormRequest {
    /// A GET request with no submitted data.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            session_id: None,
            fields: FormData::new(),
            files: FileMap::new(),
        }
    }

    /// A POST request carrying `fields`.
    pub fn post(path: impl Into<String>, fields: FormData) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            session_id: None,
            fields,
            files: FileMap::new(),
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_files(mut self, files: FileMap<UploadedFile>) -> Self {
        self.files = files;
        self
    }
}
