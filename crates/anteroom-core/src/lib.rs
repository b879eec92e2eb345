#![forbid(unsafe_code)]

//! # anteroom-core
//!
//! Shared primitives for the anteroom workspace.
//!
//! Form submissions are modelled as *ordered multimaps*: keys are unique and
//! keep insertion order, each key holds an ordered sequence of values. Two
//! renditions exist:
//! - [`FormData`] for text fields (`field name → Vec<String>`),
//! - [`FileMap<T>`] for file-valued fields (`field name → Vec<T>`), generic so
//!   the same container carries raw uploads, storage references and loaded
//!   handles through the cache layers.
//!
//! Both obey the same merge law: [`FormData::overwrite_with`] /
//! [`FileMap::overwrite_with`] replace a key's values wholesale, never append
//! across maps.

mod file_map;
mod form_data;
mod upload;

pub use file_map::FileMap;
pub use form_data::FormData;
pub use upload::UploadedFile;
