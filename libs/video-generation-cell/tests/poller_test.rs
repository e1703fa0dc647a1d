// libs/video-generation-cell/tests/poller_test.rs
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_config::AppConfig;
use video_generation_cell::models::{VideoGenerationRequest, VideoStatus};
use video_generation_cell::services::{HttpVideoGenerationClient, PollSettings, VideoGenerationPoller};

#[tokio::test]
async fn poller_follows_http_job_to_completion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/video/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "vid_7", "status": "pending"})))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/video/vid_7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "vid_7", "status": "processing", "progress": 50})))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/video/vid_7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "vid_7",
            "status": "completed",
            "progress": 100,
            "videoUrl": "https://cdn.example.com/vid_7.mp4"
        })))
        .mount(&mock_server)
        .await;

    let config = AppConfig {
        video_generation_api_key: "test-key".to_string(),
        video_generation_base_url: mock_server.uri(),
        ..AppConfig::default()
    };
    let client = HttpVideoGenerationClient::new(&config).unwrap();
    let poller = VideoGenerationPoller::with_settings(
        Arc::new(client),
        PollSettings {
            initial_delay: Duration::from_millis(1),
            interval: Duration::from_millis(1),
            max_polls: 10,
        },
    );

    let video = poller
        .generate_and_wait(&VideoGenerationRequest::new("Kiosk welcome walkthrough"))
        .await
        .unwrap();

    assert_eq!(video.status, VideoStatus::Completed);
    assert_eq!(video.video_url.as_deref(), Some("https://cdn.example.com/vid_7.mp4"));
}
