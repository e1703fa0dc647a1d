// libs/video-generation-cell/src/services/client.rs
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use shared_config::AppConfig;

use super::mock::MockVideoGenerationClient;
use crate::models::{VideoGenerationError, VideoGenerationRequest, VideoGenerationResponse};

#[async_trait]
pub trait VideoGenerationClient: Send + Sync {
    /// Submit a generation job. The returned id is used for status checks.
    async fn generate(&self, request: &VideoGenerationRequest) -> Result<VideoGenerationResponse, VideoGenerationError>;

    async fn check_status(&self, video_id: &str) -> Result<VideoGenerationResponse, VideoGenerationError>;
}

/// Client for hosted text-to-video APIs (RunwayML, Pika) that share the
/// `/video/generate` + `/video/{id}` shape.
pub struct HttpVideoGenerationClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl fmt::Debug for HttpVideoGenerationClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpVideoGenerationClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl HttpVideoGenerationClient {
    pub fn new(config: &AppConfig) -> Result<Self, VideoGenerationError> {
        if !config.is_video_generation_configured() {
            return Err(VideoGenerationError::NotConfigured);
        }

        Ok(Self {
            client: Client::new(),
            api_key: config.video_generation_api_key.clone(),
            base_url: config.video_generation_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read_response<T: DeserializeOwned>(
        response: reqwest::Response,
        action: &str,
    ) -> Result<T, VideoGenerationError> {
        let status = response.status();
        let response_text = response.text().await?;

        debug!("Video {} response: {} - {}", action, status, response_text);

        if !status.is_success() {
            error!("Video {} failed: {} - {}", action, status, response_text);
            return Err(VideoGenerationError::ApiError {
                message: format!("HTTP {}: {}", status, response_text),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| VideoGenerationError::ApiError {
            message: format!("Failed to parse {} response: {}", action, e),
        })
    }
}

#[async_trait]
impl VideoGenerationClient for HttpVideoGenerationClient {
    /// POST {base}/video/generate
    async fn generate(&self, request: &VideoGenerationRequest) -> Result<VideoGenerationResponse, VideoGenerationError> {
        request.validate()?;

        let url = format!("{}/video/generate", self.base_url);
        info!("Requesting video generation");
        debug!("Sending video generation request to: {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let generated: VideoGenerationResponse = Self::read_response(response, "generation").await?;

        info!("Video generation started: {} ({:?})", generated.id, generated.status);
        Ok(generated)
    }

    /// GET {base}/video/{id}
    async fn check_status(&self, video_id: &str) -> Result<VideoGenerationResponse, VideoGenerationError> {
        let url = format!("{}/video/{}", self.base_url, video_id);
        debug!("Checking video status at: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        Self::read_response(response, "status check").await
    }
}

/// HTTP client when an API key is configured, otherwise the offline mock.
pub fn client_from_config(config: &AppConfig) -> Arc<dyn VideoGenerationClient> {
    match HttpVideoGenerationClient::new(config) {
        Ok(client) => {
            info!("Video generation via {} ({})", config.video_generation_provider, client.base_url());
            Arc::new(client)
        }
        Err(_) => {
            warn!("Video generation not configured, using the mock video client");
            Arc::new(MockVideoGenerationClient::completing())
        }
    }
}
