// libs/video-generation-cell/tests/handlers_test.rs
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use video_generation_cell::handlers::VideoState;
use video_generation_cell::router::video_routes;
use video_generation_cell::services::{MockVideoGenerationClient, MOCK_VIDEO_ID};

fn app() -> Router {
    let client = Arc::new(MockVideoGenerationClient::completing());
    video_routes(Arc::new(VideoState::new(client)))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json_response: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, json_response)
}

fn post_json(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn generate_returns_job() {
    let (status, body) = send(app(), post_json(json!({"prompt": "Using the pulse oximeter"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["video"]["id"], MOCK_VIDEO_ID);
    assert_eq!(body["video"]["status"], "pending");
}

#[tokio::test]
async fn empty_prompt_is_rejected() {
    let (status, body) = send(app(), post_json(json!({"prompt": "  "}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Prompt"));
}

#[tokio::test]
async fn status_of_known_video() {
    let request = Request::builder()
        .uri(format!("/{}", MOCK_VIDEO_ID))
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["video"]["status"], "processing");
}

#[tokio::test]
async fn unknown_video_is_an_upstream_error() {
    let request = Request::builder().uri("/vid_missing").body(Body::empty()).unwrap();

    let (status, _) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}
