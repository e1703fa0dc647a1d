use std::sync::Arc;

use axum::{routing::post, Router};

use crate::handlers::{self, KioskState};

pub fn kiosk_routes(state: Arc<KioskState>) -> Router {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/register", post(handlers::register))
        .route("/flow/next", post(handlers::next))
        .with_state(state)
}
