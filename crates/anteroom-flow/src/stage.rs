#![forbid(unsafe_code)]

use crate::error::{FlowError, FlowResult};

/// Default name of the form field carrying the stage token.
pub const STAGE_FIELD: &str = "stage";

const TOKEN_INPUT: &str = "input";
const TOKEN_PREVIEW: &str = "preview";
const TOKEN_POST: &str = "post";

/// One stage of the multi-step submission.
///
/// Wire tokens are `"input"`, `"preview"` and `"post"`; the confirm step
/// keeps its historical `"post"` token while the state is named `Done`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Input,
    Preview,
    Done,
}

impl Stage {
    /// Map a request-borne token to a stage, defaulting unknown or missing
    /// tokens to [`Stage::Input`]. Never fails: a garbled client value means
    /// "start over", not a server fault.
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some(TOKEN_PREVIEW) => Self::Preview,
            Some(TOKEN_POST) => Self::Done,
            _ => Self::Input,
        }
    }

    /// Strict parse for programmatic callers driving stages directly.
    ///
    /// Unlike [`Stage::from_token`] this refuses unknown tokens with
    /// [`FlowError::InvalidState`]: a hardcoded stage that does not parse is
    /// a wiring bug, not client input.
    pub fn parse(token: &str) -> FlowResult<Self> {
        match token {
            TOKEN_INPUT => Ok(Self::Input),
            TOKEN_PREVIEW => Ok(Self::Preview),
            TOKEN_POST => Ok(Self::Done),
            other => Err(FlowError::InvalidState(other.to_string())),
        }
    }

    /// The wire token for this stage.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Input => TOKEN_INPUT,
            Self::Preview => TOKEN_PREVIEW,
            Self::Done => TOKEN_POST,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}
