#![forbid(unsafe_code)]

//! # anteroom-flow
//!
//! The input → preview → confirm state machine over the post cache.
//!
//! ## Public contract
//!
//! The explicit public contract is [`FormFlow`]: hand it a [`FormRequest`]
//! (method, path, session, fields, uploads) and it answers with a
//! [`FlowResponse`] — render the input or preview template with a
//! [`RenderContext`], or redirect to the success URL.
//!
//! The flow is explicit composition, not inheritance: it holds a
//! [`FormValidator`], an optional [`OnDone`] completion hook, a file cache
//! and a key-value backend, and drives them from the stage token in the
//! submitted form data.
//!
//! ## Stage protocol (normative)
//!
//! - GET always renders the input stage with an unbound form.
//! - POST/PUT resolve the stage token (unknown/missing tokens map to
//!   `input`), and when the token says `preview` the raw request is merged
//!   into the post cache *before* validation — browsers do not resubmit file
//!   inputs across steps, so validation must see the merged state.
//! - The form is validated against the cache's merged fields/files, never
//!   the raw request.
//! - A valid `post` stage runs the completion hook, clears the cache entry
//!   and redirects.

mod error;
mod flow;
mod key;
mod request;
mod response;
mod stage;
mod validate;

pub use error::{FlowError, FlowResult};
pub use flow::{FlowConfig, FormFlow};
pub use key::{CacheKeyPolicy, ResolvedKey, TOKEN_FIELD};
pub use request::{FormRequest, Method};
pub use response::{FlowResponse, RenderContext, StageTemplate};
pub use stage::{STAGE_FIELD, Stage};
pub use validate::{CompletionError, FieldErrors, FormValidator, OnDone};
