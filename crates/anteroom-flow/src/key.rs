#![forbid(unsafe_code)]

//! Cache key derivation policies.

use uuid::Uuid;

use crate::request::FormRequest;

/// Default name of the form field carrying the client-echoed cache token.
pub const TOKEN_FIELD: &str = "token";

/// How a request maps to the cache key scoping its in-flight submission.
///
/// Pick one per deployment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CacheKeyPolicy {
    /// Key = `"<session id>:<request path>"` — one cached submission per URL
    /// per session. Requests without a session get no cache at all.
    #[default]
    SessionPath,
    /// Key = an opaque token generated on first render and echoed back by
    /// the client in a hidden field on every subsequent POST. Works without
    /// sessions, but the rendered form must carry the token.
    ClientToken,
}

/// Outcome of key resolution for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedKey {
    Keyed {
        key: String,
        /// Token the rendered form must echo back; `None` under
        /// [`CacheKeyPolicy::SessionPath`].
        token: Option<String>,
    },
    /// Session-derived policy with no session: the flow runs without a
    /// cache.
    Uncached,
}

impl CacheKeyPolicy {
    /// Resolve the cache key for `req`, reading `token_field` for the
    /// client-echoed token where applicable.
    pub fn resolve(&self, req: &FormRequest, token_field: &str) -> ResolvedKey {
        match self {
            Self::SessionPath => match &req.session_id {
                Some(session) => ResolvedKey::Keyed {
                    key: format!("{session}:{path}", path = req.path),
                    token: None,
                },
                None => ResolvedKey::Uncached,
            },
            Self::ClientToken => {
                let token = match req.fields.get(token_field) {
                    Some(echoed) if !echoed.is_empty() => echoed.to_string(),
                    _ => Uuid::new_v4().to_string(),
                };
                ResolvedKey::Keyed {
                    key: format!("token:{token}"),
                    token: Some(token),
                }
            }
        }
    }
}
