#![forbid(unsafe_code)]

use anteroom_cache::CachedFile;
use anteroom_core::{FileMap, FormData};

use crate::{stage::Stage, validate::FieldErrors};

/// Which template the host should render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageTemplate {
    Input,
    Preview,
}

/// Everything a template needs to render one stage of the form.
///
/// `fields`/`files` are the merged cached state, not the raw request, so the
/// preview template can show previously uploaded files by name/URL instead
/// of re-prompting for them. `stage` and `stage_field` let the template
/// re-embed the stage control; `token` (client-token key policy only) must
/// be echoed back in a hidden field.
#[derive(Clone, Debug, Default)]
pub struct RenderContext {
    pub stage: Stage,
    /// Name of the form field carrying the stage token.
    pub stage_field: String,
    pub fields: FormData,
    pub files: FileMap<CachedFile>,
    pub errors: FieldErrors,
    /// Name of the form field carrying the cache token, when the key policy
    /// uses one.
    pub token_field: String,
    pub token: Option<String>,
}

/// The flow's answer to one request.
#[derive(Clone, Debug)]
pub enum FlowResponse {
    Render {
        template: StageTemplate,
        context: RenderContext,
    },
    /// Submission completed; redirect the client to this URL.
    Redirect(String),
}

impl FlowResponse {
    /// The render context, if this response renders a template.
    pub fn context(&self) -> Option<&RenderContext> {
        match self {
            Self::Render { context, .. } => Some(context),
            Self::Redirect(_) => None,
        }
    }

    pub fn template(&self) -> Option<StageTemplate> {
        match self {
            Self::Render { template, .. } => Some(*template),
            Self::Redirect(_) => None,
        }
    }
}
