#![forbid(unsafe_code)]

//! # anteroom-cache
//!
//! The post/file caching layer: keeps one multi-stage form submission's field
//! values and uploaded files alive between the preview and confirm steps.
//!
//! ## Layering
//!
//! - [`FileCache`] puts uploaded blobs into a [`BlobStore`](anteroom_store::BlobStore)
//!   under unique temporary paths and materializes stored paths back into
//!   [`CachedFile`] handles.
//! - [`KeyValueCache`] is the narrow seam to an expiring key-value backend
//!   holding one [`CacheEntry`] per cache key. [`MemoryKv`] is the default
//!   process-wide implementation.
//! - [`PostCache`] ties both together: it owns the entry for one key and
//!   implements the merge/clear lifecycle (new uploads replace cached ones
//!   per field, clear flags drop them, entry deletion cascades to blobs).
//!
//! ## Ownership (normative)
//!
//! Every [`FileRef`] inside a [`CacheEntry`] points at exactly one live blob
//! until the field is cleared or overwritten, or the entry is destroyed.
//! Blob ownership only ever moves through [`PostCache::save`] /
//! [`PostCache::clear`]; there is no garbage collection.

mod entry;
mod error;
mod file;
mod kv;
mod post;

pub use entry::{CacheEntry, FileRef};
pub use error::{CacheError, CacheResult};
pub use file::{CachedFile, FileCache, FileCacheOptions};
pub use kv::{DEFAULT_TTL, KeyValueCache, MemoryKv};
pub use post::PostCache;
