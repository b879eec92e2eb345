#![forbid(unsafe_code)]

//! # anteroom-store
//!
//! Durable blob storage behind the anteroom file cache.
//!
//! ## Public contract
//!
//! The explicit public contract is the [`BlobStore`] trait. A store maps
//! opaque relative paths to byte blobs and resolves each path to a public URL
//! and (where the backing medium has one) a local filesystem path.
//!
//! ## Path safety (normative)
//!
//! Stores accept relative paths only: no absolute paths, no `..`, no empty
//! segments. Violations fail with [`StoreError::InvalidPath`] before touching
//! the backing medium.
//!
//! ## Delete semantics (normative)
//!
//! `delete` is idempotent: deleting a missing path is `Ok(())`. Higher layers
//! rely on this when cascading deletes race with concurrent clears.

mod base;
mod disk;
mod error;
mod mem;

pub use base::BlobStore;
pub use disk::DiskStore;
pub use error::{StoreError, StoreResult};
pub use mem::MemStore;
