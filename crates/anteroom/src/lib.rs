#![forbid(unsafe_code)]

//! # anteroom
//!
//! Multi-stage ("input → preview → confirm") form submission for web
//! applications: field values and uploaded files are cached between the
//! preview and confirm steps, so users do not re-upload files or re-enter
//! data, and the server re-validates the same submission at each stage.
//!
//! ## Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use anteroom::prelude::*;
//!
//! let file_cache = FileCache::new(DiskStore::new("/var/uploads", "/media/"));
//! let flow = FormFlow::new(file_cache, MemoryKv::new(), Arc::new(MyValidator))
//!     .with_config(FlowConfig {
//!         success_url: Some("/thanks/".into()),
//!         ..FlowConfig::default()
//!     });
//!
//! // Per request:
//! let response = flow.handle(request).await?;
//! match response {
//!     FlowResponse::Render { template, context } => { /* render */ }
//!     FlowResponse::Redirect(url) => { /* redirect */ }
//! }
//! ```

// ── Re-export sub-crates ────────────────────────────────────────────────

pub mod cache {
    pub use anteroom_cache::*;
}

pub mod core {
    pub use anteroom_core::*;
}

pub mod flow {
    pub use anteroom_flow::*;
}

pub mod store {
    pub use anteroom_store::*;
}

/// Commonly used types, for glob import.
pub mod prelude {
    pub use anteroom_cache::{
        CacheEntry, CachedFile, FileCache, FileCacheOptions, FileRef, KeyValueCache, MemoryKv,
        PostCache,
    };
    pub use anteroom_core::{FileMap, FormData, UploadedFile};
    pub use anteroom_flow::{
        CacheKeyPolicy, FieldErrors, FlowConfig, FlowError, FlowResponse, FormFlow, FormRequest,
        FormValidator, Method, OnDone, RenderContext, Stage, StageTemplate,
    };
    pub use anteroom_store::{BlobStore, DiskStore, MemStore};
}
