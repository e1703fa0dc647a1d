pub mod client;
pub mod mock;
pub mod poller;

pub use client::{client_from_config, HttpVideoGenerationClient, VideoGenerationClient};
pub use mock::{MockVideoGenerationClient, MOCK_VIDEO_ID};
pub use poller::{PollSettings, VideoGenerationPoller};
