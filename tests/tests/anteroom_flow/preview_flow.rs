//! End-to-end stage protocol under the session-derived key policy.

use std::{sync::Arc, time::Duration};

use anteroom_cache::{FileCache, KeyValueCache, MemoryKv, PostCache};
use anteroom_core::{FileMap, UploadedFile};
use anteroom_flow::{
    FlowConfig, FlowError, FlowResponse, FormFlow, FormRequest, Method, StageTemplate,
};
use anteroom_store::MemStore;
use rstest::rstest;

use crate::common::{FailingDone, RecordingDone, RequireTitle, fields, mem_file_cache, upload};

const FORM_PATH: &str = "/polls/add/";
const SESSION: &str = "sess123";

struct Harness {
    flow: FormFlow<MemStore, MemoryKv>,
    file_cache: FileCache<MemStore>,
    kv: MemoryKv,
    done: Arc<RecordingDone>,
}

fn harness() -> Harness {
    let file_cache = mem_file_cache();
    let kv = MemoryKv::new();
    let done = Arc::new(RecordingDone::default());
    let flow = FormFlow::new(file_cache.clone(), kv.clone(), Arc::new(RequireTitle))
        .with_config(FlowConfig {
            success_url: Some("/polls/thanks/".to_string()),
            ..FlowConfig::default()
        })
        .with_on_done(done.clone());
    Harness {
        flow,
        file_cache,
        kv,
        done,
    }
}

fn preview_post() -> FormRequest {
    let uploads: FileMap<UploadedFile> =
        [("attachment", upload("sample.txt", b"file body"))]
            .into_iter()
            .collect();
    FormRequest::post(
        FORM_PATH,
        fields(&[("title", "hoge"), ("stage", "preview")]),
    )
    .with_session(SESSION)
    .with_files(uploads)
}

fn confirm_post() -> FormRequest {
    // The confirm step resubmits fields only; browsers drop file inputs.
    FormRequest::post(FORM_PATH, fields(&[("title", "hoge"), ("stage", "post")]))
        .with_session(SESSION)
}

#[rstest]
#[timeout(Duration::from_secs(5))]
#[tokio::test]
async fn get_renders_empty_input_form() {
    let h = harness();

    let response = h.flow.handle(FormRequest::get(FORM_PATH).with_session(SESSION)).await.unwrap();

    assert_eq!(response.template(), Some(StageTemplate::Input));
    let context = response.context().unwrap();
    assert!(context.fields.is_empty());
    assert!(context.files.is_empty());
    assert!(context.errors.is_empty());
    assert_eq!(context.stage_field, "stage");
}

#[rstest]
#[timeout(Duration::from_secs(5))]
#[tokio::test]
async fn preview_stage_caches_fields_and_file() {
    let h = harness();

    let response = h.flow.handle(preview_post()).await.unwrap();

    assert_eq!(response.template(), Some(StageTemplate::Preview));
    let context = response.context().unwrap();
    assert_eq!(context.fields.get("title"), Some("hoge"));
    let cached = context.files.get("attachment").unwrap();
    assert_eq!(&cached.content[..], b"file body");
    assert!(cached.name.ends_with(".txt"));

    // The post cache now holds the submission under the session key.
    let cache = PostCache::open(
        format!("{SESSION}:{FORM_PATH}"),
        h.file_cache.clone(),
        h.kv.clone(),
    )
    .await
    .unwrap();
    assert_eq!(cache.fields().get("title"), Some("hoge"));
    assert!(cache.files().contains_key("attachment"));
}

#[rstest]
#[timeout(Duration::from_secs(5))]
#[tokio::test]
async fn confirm_stage_completes_clears_and_redirects() {
    let h = harness();
    h.flow.handle(preview_post()).await.unwrap();

    let response = h.flow.handle(confirm_post()).await.unwrap();

    match response {
        FlowResponse::Redirect(url) => assert_eq!(url, "/polls/thanks/"),
        other => panic!("expected redirect, got {other:?}"),
    }

    // Completion saw the cached title and the cached file.
    let completions = h.done.completions();
    assert_eq!(completions.len(), 1);
    let (completed_fields, completed_files) = &completions[0];
    assert_eq!(completed_fields.get("title"), Some("hoge"));
    assert_eq!(completed_files.len(), 1);

    // Entry and blobs are gone.
    assert_eq!(
        h.kv.get(&format!("{SESSION}:{FORM_PATH}")).await.unwrap(),
        None
    );
    assert!(h.file_cache.store().is_empty());
}

#[rstest]
#[timeout(Duration::from_secs(5))]
#[tokio::test]
async fn invalid_submission_re_renders_input_with_errors() {
    let h = harness();

    let req = FormRequest::post(FORM_PATH, fields(&[("stage", "preview")]))
        .with_session(SESSION);
    let response = h.flow.handle(req).await.unwrap();

    assert_eq!(response.template(), Some(StageTemplate::Input));
    let context = response.context().unwrap();
    assert!(context.errors.get("title").is_some());
    assert!(h.done.completions().is_empty());
}

#[rstest]
#[timeout(Duration::from_secs(5))]
#[tokio::test]
async fn unknown_stage_token_defaults_to_input() {
    let h = harness();
    h.flow.handle(preview_post()).await.unwrap();

    let req = FormRequest::post(
        FORM_PATH,
        fields(&[("title", "hoge"), ("stage", "bogus")]),
    )
    .with_session(SESSION);
    let response = h.flow.handle(req).await.unwrap();

    // Clamped to the input stage: cached data still valid, so this is the
    // echo pass, not a fault and not a completion.
    assert_eq!(response.template(), Some(StageTemplate::Input));
    assert!(response.context().unwrap().errors.is_empty());
    assert!(h.done.completions().is_empty());
}

#[rstest]
#[timeout(Duration::from_secs(5))]
#[tokio::test]
async fn put_is_handled_like_post() {
    let h = harness();

    let mut req = preview_post();
    req.method = Method::Put;
    let response = h.flow.handle(req).await.unwrap();

    assert_eq!(response.template(), Some(StageTemplate::Preview));
}

#[rstest]
#[timeout(Duration::from_secs(5))]
#[tokio::test]
async fn missing_success_url_is_a_configuration_error() {
    let file_cache = mem_file_cache();
    let kv = MemoryKv::new();
    let flow = FormFlow::new(file_cache, kv, Arc::new(RequireTitle));

    flow.handle(preview_post()).await.unwrap();
    let result = flow.handle(confirm_post()).await;

    assert!(matches!(result, Err(FlowError::MissingSuccessUrl)));
}

#[rstest]
#[timeout(Duration::from_secs(5))]
#[tokio::test]
async fn failing_completion_keeps_the_entry() {
    let file_cache = mem_file_cache();
    let kv = MemoryKv::new();
    let flow = FormFlow::new(file_cache.clone(), kv.clone(), Arc::new(RequireTitle))
        .with_config(FlowConfig {
            success_url: Some("/polls/thanks/".to_string()),
            ..FlowConfig::default()
        })
        .with_on_done(Arc::new(FailingDone));

    flow.handle(preview_post()).await.unwrap();
    let result = flow.handle(confirm_post()).await;

    assert!(matches!(result, Err(FlowError::Completion(_))));
    // The submission survives for retry.
    assert!(
        kv.get(&format!("{SESSION}:{FORM_PATH}"))
            .await
            .unwrap()
            .is_some()
    );
}

#[rstest]
#[timeout(Duration::from_secs(5))]
#[tokio::test]
async fn no_session_degrades_to_uncached_input() {
    let h = harness();

    // Same preview POST, but the client has no session.
    let mut req = preview_post();
    req.session_id = None;
    let response = h.flow.handle(req).await.unwrap();

    assert_eq!(response.template(), Some(StageTemplate::Input));
    // Nothing was cached anywhere.
    assert!(h.file_cache.store().is_empty());
}

#[rstest]
#[timeout(Duration::from_secs(5))]
#[tokio::test]
async fn explicit_stage_outside_known_set_is_invalid_state() {
    let h = harness();

    let result = h
        .flow
        .handle_with_stage(preview_post(), "review")
        .await;

    assert!(matches!(result, Err(FlowError::InvalidState(_))));
}
