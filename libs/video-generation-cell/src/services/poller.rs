// libs/video-generation-cell/src/services/poller.rs
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::client::VideoGenerationClient;
use crate::models::{VideoGenerationError, VideoGenerationRequest, VideoGenerationResponse, VideoStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub initial_delay: Duration,
    pub interval: Duration,
    pub max_polls: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            interval: Duration::from_secs(2),
            max_polls: 150,
        }
    }
}

pub struct VideoGenerationPoller {
    client: Arc<dyn VideoGenerationClient>,
    settings: PollSettings,
}

impl VideoGenerationPoller {
    pub fn new(client: Arc<dyn VideoGenerationClient>) -> Self {
        Self::with_settings(client, PollSettings::default())
    }

    pub fn with_settings(client: Arc<dyn VideoGenerationClient>, settings: PollSettings) -> Self {
        Self { client, settings }
    }

    /// Submit `request` and wait for the video to finish.
    pub async fn generate_and_wait(
        &self,
        request: &VideoGenerationRequest,
    ) -> Result<VideoGenerationResponse, VideoGenerationError> {
        let started = self.client.generate(request).await?;
        if started.status.is_terminal() {
            return Self::finish(started);
        }

        self.wait_for_completion(&started.id).await
    }

    /// Poll until the job completes or fails. Gives up after `max_polls` checks.
    pub async fn wait_for_completion(&self, video_id: &str) -> Result<VideoGenerationResponse, VideoGenerationError> {
        tokio::time::sleep(self.settings.initial_delay).await;

        for poll in 1..=self.settings.max_polls {
            let status = self.client.check_status(video_id).await?;
            debug!(
                "Video {} poll {}: {:?} ({}%)",
                video_id,
                poll,
                status.status,
                status.progress.unwrap_or(0)
            );

            if status.status.is_terminal() {
                return Self::finish(status);
            }

            if poll < self.settings.max_polls {
                tokio::time::sleep(self.settings.interval).await;
            }
        }

        warn!("Gave up waiting for video {} after {} polls", video_id, self.settings.max_polls);
        Err(VideoGenerationError::TimedOut {
            id: video_id.to_string(),
            polls: self.settings.max_polls,
        })
    }

    fn finish(response: VideoGenerationResponse) -> Result<VideoGenerationResponse, VideoGenerationError> {
        match response.status {
            VideoStatus::Failed => {
                warn!("Video generation failed: {}", response.id);
                Err(VideoGenerationError::GenerationFailed { id: response.id })
            }
            _ => {
                info!("Video ready: {}", response.id);
                Ok(response)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::{MockVideoGenerationClient, MOCK_VIDEO_ID};
    use assert_matches::assert_matches;

    fn fast() -> PollSettings {
        PollSettings {
            initial_delay: Duration::from_millis(1),
            interval: Duration::from_millis(1),
            max_polls: 5,
        }
    }

    #[tokio::test]
    async fn test_completes_after_scripted_checks() {
        let poller = VideoGenerationPoller::with_settings(Arc::new(MockVideoGenerationClient::completing()), fast());

        let video = poller
            .generate_and_wait(&VideoGenerationRequest::new("Hand washing steps for patients"))
            .await
            .unwrap();

        assert_eq!(video.status, VideoStatus::Completed);
        assert_eq!(video.progress, Some(100));
        assert!(video.video_url.is_some());
    }

    #[tokio::test]
    async fn test_failed_status_is_an_error() {
        let client = MockVideoGenerationClient::new(vec![VideoStatus::Processing, VideoStatus::Failed]);
        let poller = VideoGenerationPoller::with_settings(Arc::new(client), fast());

        assert_matches!(
            poller.wait_for_completion(MOCK_VIDEO_ID).await,
            Err(VideoGenerationError::GenerationFailed { .. })
        );
    }

    #[tokio::test]
    async fn test_gives_up_after_max_polls() {
        let client = MockVideoGenerationClient::new(vec![VideoStatus::Processing]);
        let poller = VideoGenerationPoller::with_settings(Arc::new(client), fast());

        assert_matches!(
            poller.wait_for_completion(MOCK_VIDEO_ID).await,
            Err(VideoGenerationError::TimedOut { polls: 5, .. })
        );
    }

    #[tokio::test]
    async fn test_empty_prompt_is_rejected_before_submitting() {
        let poller = VideoGenerationPoller::with_settings(Arc::new(MockVideoGenerationClient::completing()), fast());

        assert_matches!(
            poller.generate_and_wait(&VideoGenerationRequest::new("   ")).await,
            Err(VideoGenerationError::EmptyPrompt)
        );
    }
}
