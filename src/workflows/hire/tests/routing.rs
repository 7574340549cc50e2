use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::hire::pipeline::SubmissionPipeline;
use crate::workflows::hire::router::{hire_router, quick_submit_handler};

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serializes")))
        .expect("request builds")
}

#[tokio::test]
async fn quick_route_returns_success_message() {
    let (pipeline, store, _) = build_pipeline(RecordingNotifier::new(NotifierMode::Deliver));
    let router = hire_router(Arc::new(pipeline));

    let response = router
        .oneshot(post_json(
            "/api/hire",
            serde_json::to_value(quick_request()).expect("value"),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body, json!({ "success": true, "message": "Request submitted" }));
    assert_eq!(store.records().len(), 1);
}

#[tokio::test]
async fn wizard_route_accepts_nested_payloads() {
    let (pipeline, store, _) = build_pipeline(RecordingNotifier::new(NotifierMode::Deliver));
    let router = hire_router(Arc::new(pipeline));
    let body = serde_json::to_value(complete_request()).expect("value");
    assert_eq!(body["projectDetails"]["workSchedule"], "weekdays");

    let response = router
        .oneshot(post_json("/api/v1/hire/requests", body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.records().len(), 1);
}

#[tokio::test]
async fn stage_failures_collapse_into_an_opaque_response() {
    for mode in [NotifierMode::FailRender, NotifierMode::FailSend] {
        let (pipeline, store, _) = build_pipeline(RecordingNotifier::new(mode));

        let response = quick_submit_handler(
            State(Arc::new(pipeline)),
            Ok(Json(quick_request())),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json_body(response).await;
        assert_eq!(
            body,
            json!({ "success": false, "message": "Something went wrong" })
        );
        assert_eq!(store.records().len(), 1, "record survives {mode:?}");
    }
}

#[tokio::test]
async fn persistence_failure_returns_internal_error() {
    let pipeline = SubmissionPipeline::new(
        Arc::new(UnavailableStore),
        Arc::new(RecordingNotifier::new(NotifierMode::Deliver)),
        routing(),
    );
    let router = hire_router(Arc::new(pipeline));

    let response = router
        .oneshot(post_json(
            "/api/hire",
            serde_json::to_value(quick_request()).expect("value"),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json_body(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn malformed_body_is_rejected_before_the_pipeline() {
    let (pipeline, store, notifier) = build_pipeline(RecordingNotifier::new(NotifierMode::Deliver));
    let router = hire_router(Arc::new(pipeline));

    let response = router
        .oneshot(
            Request::post("/api/hire")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"fullName\": 42"))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(
        body,
        json!({ "success": false, "message": "Invalid request payload" })
    );
    assert!(store.records().is_empty());
    assert_eq!(notifier.send_calls(), 0);
}
