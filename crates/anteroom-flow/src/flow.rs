#![forbid(unsafe_code)]

//! The multi-stage form handler.

use std::{sync::Arc, time::Duration};

use anteroom_cache::{CachedFile, DEFAULT_TTL, FileCache, KeyValueCache, PostCache};
use anteroom_core::{FileMap, FormData};
use anteroom_store::BlobStore;

use crate::{
    error::{FlowError, FlowResult},
    key::{CacheKeyPolicy, ResolvedKey, TOKEN_FIELD},
    request::{FormRequest, Method},
    response::{FlowResponse, RenderContext, StageTemplate},
    stage::{STAGE_FIELD, Stage},
    validate::{FieldErrors, FormValidator, OnDone},
};

/// Flow configuration.
#[derive(Clone, Debug)]
pub struct FlowConfig {
    /// Form field carrying the stage token.
    pub stage_field: String,
    /// Form field carrying the cache token under
    /// [`CacheKeyPolicy::ClientToken`].
    pub token_field: String,
    pub key_policy: CacheKeyPolicy,
    /// Redirect target after successful completion. Completion without one
    /// is a [`FlowError::MissingSuccessUrl`].
    pub success_url: Option<String>,
    /// Lifetime of cached entries in the key-value backend.
    pub ttl: Duration,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            stage_field: STAGE_FIELD.to_string(),
            token_field: TOKEN_FIELD.to_string(),
            key_policy: CacheKeyPolicy::default(),
            success_url: None,
            ttl: DEFAULT_TTL,
        }
    }
}

/// Drives one form through input → preview → confirm.
///
/// Explicit composition: the flow holds the validator, the optional
/// completion hook, the file cache and the key-value backend, and constructs
/// a [`PostCache`] per request from the resolved cache key.
pub struct FormFlow<S, K> {
    config: FlowConfig,
    file_cache: FileCache<S>,
    kv: K,
    validator: Arc<dyn FormValidator>,
    on_done: Option<Arc<dyn OnDone>>,
}

impl<S, K> FormFlow<S, K>
where
    S: BlobStore + Clone,
    K: KeyValueCache + Clone,
{
    pub fn new(file_cache: FileCache<S>, kv: K, validator: Arc<dyn FormValidator>) -> Self {
        Self {
            config: FlowConfig::default(),
            file_cache,
            kv,
            validator,
            on_done: None,
        }
    }

    pub fn with_config(mut self, config: FlowConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_on_done(mut self, on_done: Arc<dyn OnDone>) -> Self {
        self.on_done = Some(on_done);
        self
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Handle one request.
    ///
    /// GET renders the input stage with an unbound form. POST/PUT read the
    /// stage token from the submitted fields (unknown tokens clamp to
    /// `input`) and run the stage protocol against the post cache.
    pub async fn handle(&self, req: FormRequest) -> FlowResult<FlowResponse> {
        match req.method {
            Method::Get => self.render_initial(&req),
            Method::Post | Method::Put => {
                let stage = Stage::from_token(req.fields.get(&self.config.stage_field));
                self.process(req, stage).await
            }
        }
    }

    /// Handle a submission under an explicitly chosen stage, bypassing the
    /// request's stage field.
    ///
    /// For programmatic callers wiring their own transitions; a token
    /// outside the known set fails with [`FlowError::InvalidState`].
    pub async fn handle_with_stage(
        &self,
        req: FormRequest,
        stage_token: &str,
    ) -> FlowResult<FlowResponse> {
        let stage = Stage::parse(stage_token)?;
        self.process(req, stage).await
    }

    fn render_initial(&self, req: &FormRequest) -> FlowResult<FlowResponse> {
        let token = match self.config.key_policy.resolve(req, &self.config.token_field) {
            ResolvedKey::Keyed { token, .. } => token,
            ResolvedKey::Uncached => None,
        };
        Ok(self.render(
            StageTemplate::Input,
            Stage::Input,
            FormData::new(),
            FileMap::new(),
            FieldErrors::new(),
            token,
        ))
    }

    async fn process(&self, req: FormRequest, stage: Stage) -> FlowResult<FlowResponse> {
        tracing::debug!(stage = %stage, path = %req.path, "processing form submission");
        match self.config.key_policy.resolve(&req, &self.config.token_field) {
            ResolvedKey::Keyed { key, token } => self.process_keyed(req, stage, key, token).await,
            ResolvedKey::Uncached => self.process_uncached(req).await,
        }
    }

    async fn process_keyed(
        &self,
        req: FormRequest,
        stage: Stage,
        key: String,
        token: Option<String>,
    ) -> FlowResult<FlowResponse> {
        let mut cache = PostCache::open_with_ttl(
            key,
            self.file_cache.clone(),
            self.kv.clone(),
            self.config.ttl,
        )
        .await?;

        // Merge before validating: file inputs are not resubmitted by
        // browsers across steps, so only the cached state is complete.
        if stage == Stage::Preview {
            cache.save(&req.fields, &req.files).await?;
        }

        let fields = cache.fields().clone();
        let files = cache.files().clone();

        if let Err(errors) = self.validator.validate(&fields, &files).await {
            return Ok(self.render(
                StageTemplate::Input,
                Stage::Input,
                fields,
                files,
                errors,
                token,
            ));
        }

        match stage {
            Stage::Input => Ok(self.render(
                StageTemplate::Input,
                Stage::Input,
                fields,
                files,
                FieldErrors::new(),
                token,
            )),
            Stage::Preview => Ok(self.render(
                StageTemplate::Preview,
                Stage::Preview,
                fields,
                files,
                FieldErrors::new(),
                token,
            )),
            Stage::Done => {
                if let Some(hook) = &self.on_done {
                    hook.complete(&fields, &files)
                        .await
                        .map_err(FlowError::Completion)?;
                }
                cache.clear().await?;
                let url = self
                    .config
                    .success_url
                    .clone()
                    .ok_or(FlowError::MissingSuccessUrl)?;
                tracing::debug!(key = %cache.key(), url = %url, "submission completed");
                Ok(FlowResponse::Redirect(url))
            }
        }
    }

    /// Session-derived key policy with no session: no caching is possible,
    /// so the flow degrades to a plain input render over the raw request.
    async fn process_uncached(&self, req: FormRequest) -> FlowResult<FlowResponse> {
        tracing::debug!(path = %req.path, "no session; processing without post cache");
        let files: FileMap<CachedFile> = FileMap::new();
        let errors = match self.validator.validate(&req.fields, &files).await {
            Ok(()) => FieldErrors::new(),
            Err(errors) => errors,
        };
        Ok(self.render(
            StageTemplate::Input,
            Stage::Input,
            req.fields,
            files,
            errors,
            None,
        ))
    }

    fn render(
        &self,
        template: StageTemplate,
        stage: Stage,
        fields: FormData,
        files: FileMap<CachedFile>,
        errors: FieldErrors,
        token: Option<String>,
    ) -> FlowResponse {
        FlowResponse::Render {
            template,
            context: RenderContext {
                stage,
                stage_field: self.config.stage_field.clone(),
                fields,
                files,
                errors,
                token_field: self.config.token_field.clone(),
                token,
            },
        }
    }
}
