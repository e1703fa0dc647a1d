use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "1:1")]
    Square,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGenerationRequest {
    pub prompt: String,
    /// Seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl VideoGenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            duration: None,
            aspect_ratio: None,
            model: None,
        }
    }

    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = Some(aspect_ratio);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn validate(&self) -> Result<(), VideoGenerationError> {
        if self.prompt.trim().is_empty() {
            return Err(VideoGenerationError::EmptyPrompt);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl VideoStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, VideoStatus::Completed | VideoStatus::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGenerationResponse {
    pub id: String,
    pub status: VideoStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Percent complete as reported by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    /// Seconds remaining as estimated by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
}

#[derive(Debug, Error)]
pub enum VideoGenerationError {
    #[error("Video generation not configured")]
    NotConfigured,

    #[error("Prompt must not be empty")]
    EmptyPrompt,

    #[error("Video generation API error: {message}")]
    ApiError { message: String },

    #[error("Video generation failed for {id}")]
    GenerationFailed { id: String },

    #[error("Video {id} still not ready after {polls} status checks")]
    TimedOut { id: String, polls: u32 },
}

impl From<reqwest::Error> for VideoGenerationError {
    fn from(err: reqwest::Error) -> Self {
        VideoGenerationError::ApiError {
            message: err.to_string(),
        }
    }
}
