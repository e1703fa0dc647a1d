// libs/video-generation-cell/src/services/mock.rs
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use super::client::VideoGenerationClient;
use crate::models::{VideoGenerationError, VideoGenerationRequest, VideoGenerationResponse, VideoStatus};

pub const MOCK_VIDEO_ID: &str = "mock-video-1";

/// Offline stand-in that walks through a fixed list of statuses, one per
/// status check. The last status repeats once the list is used up.
pub struct MockVideoGenerationClient {
    script: Mutex<Script>,
    total: usize,
}

struct Script {
    statuses: VecDeque<VideoStatus>,
    checks: usize,
}

impl MockVideoGenerationClient {
    pub fn new(statuses: Vec<VideoStatus>) -> Self {
        let total = statuses.len();
        Self {
            script: Mutex::new(Script {
                statuses: statuses.into(),
                checks: 0,
            }),
            total,
        }
    }

    /// Two processing checks, then a finished video.
    pub fn completing() -> Self {
        Self::new(vec![VideoStatus::Processing, VideoStatus::Processing, VideoStatus::Completed])
    }

    fn response(&self, status: VideoStatus, checks: usize) -> VideoGenerationResponse {
        let progress = match status {
            VideoStatus::Completed => 100,
            _ if self.total == 0 => 0,
            _ => (checks * 100 / self.total).min(99) as u8,
        };

        VideoGenerationResponse {
            id: MOCK_VIDEO_ID.to_string(),
            status,
            video_url: (status == VideoStatus::Completed)
                .then(|| format!("https://videos.example.com/{}.mp4", MOCK_VIDEO_ID)),
            thumbnail_url: None,
            progress: Some(progress),
            estimated_time: None,
        }
    }
}

#[async_trait]
impl VideoGenerationClient for MockVideoGenerationClient {
    async fn generate(&self, request: &VideoGenerationRequest) -> Result<VideoGenerationResponse, VideoGenerationError> {
        request.validate()?;
        debug!("Mock video generation accepted prompt");

        Ok(self.response(VideoStatus::Pending, 0))
    }

    async fn check_status(&self, video_id: &str) -> Result<VideoGenerationResponse, VideoGenerationError> {
        if video_id != MOCK_VIDEO_ID {
            return Err(VideoGenerationError::ApiError {
                message: format!("HTTP 404 Not Found: unknown video {}", video_id),
            });
        }

        let (status, checks) = {
            let mut script = self.script.lock().map_err(|_| VideoGenerationError::ApiError {
                message: "mock script lock poisoned".to_string(),
            })?;
            script.checks += 1;
            let status = if script.statuses.len() > 1 {
                script.statuses.pop_front()
            } else {
                script.statuses.front().copied()
            };
            (status.unwrap_or(VideoStatus::Processing), script.checks)
        };

        Ok(self.response(status, checks))
    }
}
