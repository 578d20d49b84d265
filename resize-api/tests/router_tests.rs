//! Request Router Tests

mod common;

use common::{router_with, FakeSigner, FakeTranscoder};
use resize_api::{InboundRequest, Intent};
use serde_json::{json, Value};
use std::sync::Arc;

fn body_json(body: &str) -> Value {
    serde_json::from_str(body).expect("response body is JSON")
}

fn submission() -> Value {
    json!({
        "bucket": "uploads",
        "key": "clip.mov",
        "output_bucket": "resized",
        "output_key": "resized-clip.mp4",
        "width": 640,
        "height": 360
    })
}

#[test]
fn test_intent_classification() {
    assert_eq!(
        Intent::of(&InboundRequest::new("GET").with_query("jobId", "abc")),
        Intent::JobStatus("abc".to_string())
    );
    assert_eq!(
        Intent::of(&InboundRequest::new("GET").with_query("key", "clip.mov")),
        Intent::UploadUrl
    );
    // An empty jobId falls through to the upload branch
    assert_eq!(
        Intent::of(&InboundRequest::new("GET").with_query("jobId", "")),
        Intent::UploadUrl
    );
    assert_eq!(Intent::of(&InboundRequest::new("post")), Intent::SubmitJob);
    assert_eq!(Intent::of(&InboundRequest::new("OPTIONS")), Intent::Preflight);
    assert_eq!(Intent::of(&InboundRequest::new("DELETE")), Intent::Unsupported);
}

#[tokio::test]
async fn test_upload_url_issued_for_input_bucket() {
    let router = router_with(Arc::new(FakeTranscoder::default()), FakeSigner::default());

    let response = router
        .dispatch(&InboundRequest::new("GET").with_query("key", "clip.mov"))
        .await;

    assert_eq!(response.status_code, 200);
    assert_eq!(
        body_json(&response.body),
        json!({ "url": "https://signed.test/put/uploads/clip.mov?expires=3600" })
    );
    assert_eq!(
        response.header("Access-Control-Allow-Methods"),
        Some("PUT, POST, GET, OPTIONS")
    );
}

#[tokio::test]
async fn test_upload_url_missing_key() {
    let router = router_with(Arc::new(FakeTranscoder::default()), FakeSigner::default());

    let response = router.dispatch(&InboundRequest::new("GET")).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(body_json(&response.body), json!({ "error": "Missing key parameter" }));
    assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
}

#[tokio::test]
async fn test_upload_url_empty_key() {
    let router = router_with(Arc::new(FakeTranscoder::default()), FakeSigner::default());

    let response = router
        .dispatch(&InboundRequest::new("GET").with_query("key", ""))
        .await;

    assert_eq!(response.status_code, 400);
    assert_eq!(body_json(&response.body), json!({ "error": "Missing key parameter" }));
    assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
}

#[tokio::test]
async fn test_upload_url_signer_failure_is_server_error() {
    let router = router_with(Arc::new(FakeTranscoder::default()), FakeSigner { fail: true });

    let response = router
        .dispatch(&InboundRequest::new("GET").with_query("key", "clip.mov"))
        .await;

    assert_eq!(response.status_code, 500);
    let error = response.error_body().unwrap().error;
    assert!(error.contains("Unable to locate credentials"));
    assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
}

#[tokio::test]
async fn test_submit_job_strips_extension_and_applies_dimensions() {
    let transcoder = Arc::new(FakeTranscoder::default());
    let router = router_with(transcoder.clone(), FakeSigner::default());

    let response = router
        .dispatch(&InboundRequest::new("POST").with_body(submission().to_string()))
        .await;

    assert_eq!(response.status_code, 200);
    assert_eq!(
        body_json(&response.body),
        json!({
            "message": "MediaConvert job created successfully",
            "jobId": "1700000000-abc123"
        })
    );

    let submitted = transcoder.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].input_file, "s3://uploads/clip.mov");
    assert_eq!(submitted[0].destination, "s3://resized/resized-clip");
    assert_eq!((submitted[0].width, submitted[0].height), (640, 360));
}

#[tokio::test]
async fn test_submit_job_default_dimensions() {
    let transcoder = Arc::new(FakeTranscoder::default());
    let router = router_with(transcoder.clone(), FakeSigner::default());

    let mut body = submission();
    body.as_object_mut().unwrap().remove("width");
    body.as_object_mut().unwrap().remove("height");

    let response = router
        .dispatch(&InboundRequest::new("POST").with_body(body.to_string()))
        .await;

    assert_eq!(response.status_code, 200);
    let submitted = transcoder.submitted.lock().unwrap();
    assert_eq!((submitted[0].width, submitted[0].height), (1280, 720));
}

#[tokio::test]
async fn test_submit_job_missing_each_required_field() {
    for field in ["bucket", "key", "output_bucket", "output_key"] {
        let transcoder = Arc::new(FakeTranscoder::default());
        let router = router_with(transcoder.clone(), FakeSigner::default());

        let mut body = submission();
        body.as_object_mut().unwrap().remove(field);

        let response = router
            .dispatch(&InboundRequest::new("POST").with_body(body.to_string()))
            .await;

        assert_eq!(response.status_code, 400, "missing {} should be rejected", field);
        assert_eq!(
            response.error_body().unwrap().error,
            "Missing required parameters in the event body"
        );
        assert!(transcoder.submitted.lock().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_submit_job_without_body() {
    let router = router_with(Arc::new(FakeTranscoder::default()), FakeSigner::default());

    let response = router.dispatch(&InboundRequest::new("POST")).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(response.error_body().unwrap().error, "Missing body in the event");
}

#[tokio::test]
async fn test_submit_job_malformed_body() {
    let router = router_with(Arc::new(FakeTranscoder::default()), FakeSigner::default());

    let response = router
        .dispatch(&InboundRequest::new("POST").with_body("{not json"))
        .await;

    assert_eq!(response.status_code, 400);
    assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
}

#[tokio::test]
async fn test_submit_job_service_failure() {
    let router = router_with(
        Arc::new(FakeTranscoder::failing("AccessDeniedException: role not assumable")),
        FakeSigner::default(),
    );

    let response = router
        .dispatch(&InboundRequest::new("POST").with_body(submission().to_string()))
        .await;

    assert_eq!(response.status_code, 500);
    assert!(response
        .error_body()
        .unwrap()
        .error
        .contains("AccessDeniedException: role not assumable"));
}

#[tokio::test]
async fn test_status_in_progress_has_only_status() {
    let router = router_with(
        Arc::new(FakeTranscoder::with_job("PROGRESSING", &["s3://resized/resized-clip"])),
        FakeSigner::default(),
    );

    let response = router
        .dispatch(&InboundRequest::new("GET").with_query("jobId", "1700000000-abc123"))
        .await;

    assert_eq!(response.status_code, 200);
    assert_eq!(body_json(&response.body), json!({ "status": "PROGRESSING" }));
}

#[tokio::test]
async fn test_status_complete_appends_extension_once() {
    let router = router_with(
        Arc::new(FakeTranscoder::with_job("COMPLETE", &["s3://resized/resized-clip"])),
        FakeSigner::default(),
    );

    let response = router
        .dispatch(&InboundRequest::new("GET").with_query("jobId", "1700000000-abc123"))
        .await;

    assert_eq!(response.status_code, 200);
    assert_eq!(
        body_json(&response.body),
        json!({
            "status": "COMPLETE",
            "downloadUrl": "https://signed.test/get/resized/resized-clip.mp4?expires=3600"
        })
    );
}

#[tokio::test]
async fn test_status_complete_keeps_existing_extension() {
    let router = router_with(
        Arc::new(FakeTranscoder::with_job("COMPLETE", &["s3://resized/resized-clip.mp4"])),
        FakeSigner::default(),
    );

    let response = router
        .dispatch(&InboundRequest::new("GET").with_query("jobId", "1700000000-abc123"))
        .await;

    let body = body_json(&response.body);
    assert_eq!(
        body["downloadUrl"],
        "https://signed.test/get/resized/resized-clip.mp4?expires=3600"
    );
}

#[tokio::test]
async fn test_status_complete_uses_first_output_group() {
    let router = router_with(
        Arc::new(FakeTranscoder::with_job(
            "COMPLETE",
            &["s3://resized/first", "s3://resized/second"],
        )),
        FakeSigner::default(),
    );

    let response = router
        .dispatch(&InboundRequest::new("GET").with_query("jobId", "1700000000-abc123"))
        .await;

    let body = body_json(&response.body);
    assert_eq!(body["downloadUrl"], "https://signed.test/get/resized/first.mp4?expires=3600");
}

#[tokio::test]
async fn test_status_complete_without_destination_is_server_error() {
    let router = router_with(
        Arc::new(FakeTranscoder::with_job("COMPLETE", &[])),
        FakeSigner::default(),
    );

    let response = router
        .dispatch(&InboundRequest::new("GET").with_query("jobId", "1700000000-abc123"))
        .await;

    assert_eq!(response.status_code, 500);
}

#[tokio::test]
async fn test_status_lookup_failure() {
    let router = router_with(Arc::new(FakeTranscoder::default()), FakeSigner::default());

    let response = router
        .dispatch(&InboundRequest::new("GET").with_query("jobId", "missing"))
        .await;

    assert_eq!(response.status_code, 500);
    assert!(response.error_body().unwrap().error.contains("NotFoundException"));
}

#[tokio::test]
async fn test_preflight_and_unsupported_methods() {
    let router = router_with(Arc::new(FakeTranscoder::default()), FakeSigner::default());

    let preflight = router.dispatch(&InboundRequest::new("OPTIONS")).await;
    assert_eq!(preflight.status_code, 200);
    assert_eq!(preflight.header("Access-Control-Allow-Headers"), Some("Content-Type"));

    let unsupported = router.dispatch(&InboundRequest::new("DELETE")).await;
    assert_eq!(unsupported.status_code, 405);
    assert_eq!(unsupported.header("Access-Control-Allow-Origin"), Some("*"));
}

#[tokio::test]
async fn test_proxy_event_dispatch() {
    let router = router_with(Arc::new(FakeTranscoder::default()), FakeSigner::default());

    let event: InboundRequest = serde_json::from_value(json!({
        "httpMethod": "GET",
        "queryStringParameters": { "key": "holiday.mov" },
        "body": null
    }))
    .unwrap();

    let response = router.dispatch(&event).await;
    assert_eq!(response.status_code, 200);
    assert_eq!(
        body_json(&response.body)["url"],
        "https://signed.test/put/uploads/holiday.mov?expires=3600"
    );
}

#[tokio::test]
async fn test_dispatch_under_service_span() {
    let router = router_with(Arc::new(FakeTranscoder::default()), FakeSigner::default())
        .with_parent_span(tracing::info_span!("service", service = "resize-api"));

    let response = router
        .dispatch(&InboundRequest::new("GET").with_query("key", "clip.mov"))
        .await;

    assert_eq!(response.status_code, 200);
}
