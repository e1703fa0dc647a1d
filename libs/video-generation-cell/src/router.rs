use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{self, VideoState};

pub fn video_routes(state: Arc<VideoState>) -> Router {
    Router::new()
        .route("/", post(handlers::generate_video))
        .route("/{video_id}", get(handlers::get_video_status))
        .with_state(state)
}
