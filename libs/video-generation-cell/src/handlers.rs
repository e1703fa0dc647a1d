use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::error::AppError;

use crate::models::{VideoGenerationError, VideoGenerationRequest};
use crate::services::VideoGenerationClient;

pub struct VideoState {
    client: Arc<dyn VideoGenerationClient>,
}

impl VideoState {
    pub fn new(client: Arc<dyn VideoGenerationClient>) -> Self {
        Self { client }
    }
}

#[axum::debug_handler]
pub async fn generate_video(
    State(state): State<Arc<VideoState>>,
    Json(request): Json<VideoGenerationRequest>,
) -> Result<Json<Value>, AppError> {
    let video = state.client.generate(&request).await.map_err(video_error)?;

    debug!("Video job {} submitted", video.id);
    Ok(Json(json!({ "video": video })))
}

#[axum::debug_handler]
pub async fn get_video_status(
    State(state): State<Arc<VideoState>>,
    Path(video_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let video = state.client.check_status(&video_id).await.map_err(video_error)?;

    Ok(Json(json!({ "video": video })))
}

fn video_error(err: VideoGenerationError) -> AppError {
    match err {
        VideoGenerationError::EmptyPrompt => AppError::ValidationError(err.to_string()),
        VideoGenerationError::NotConfigured => AppError::Internal(err.to_string()),
        VideoGenerationError::ApiError { .. }
        | VideoGenerationError::GenerationFailed { .. }
        | VideoGenerationError::TimedOut { .. } => AppError::ExternalService(err.to_string()),
    }
}
