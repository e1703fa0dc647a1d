use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::handlers::AppointmentState;
use appointment_cell::router::appointment_routes;
use appointment_cell::services::TracingNotifier;
use directory_cell::router::directory_routes;
use directory_cell::services::ProviderDirectory;
use kiosk_session_cell::handlers::KioskState;
use kiosk_session_cell::router::kiosk_routes;
use kiosk_session_cell::services::MockBiometricVerifier;
use shared_config::AppConfig;
use video_generation_cell::handlers::VideoState;
use video_generation_cell::router::video_routes;
use video_generation_cell::services::client_from_config;
use vitals_cell::handlers::VitalsState;
use vitals_cell::router::vitals_routes;

pub fn create_router(config: &AppConfig, directory: Arc<ProviderDirectory>) -> Router {
    let vitals_state = Arc::new(VitalsState::new(config.vitals_seed));
    let appointment_state = Arc::new(AppointmentState::new(
        directory.clone(),
        Arc::new(TracingNotifier::new()),
    ));
    // No scanner driver yet: biometric logins are accepted after the simulated scan.
    let kiosk_state = Arc::new(KioskState::new(Arc::new(MockBiometricVerifier::accepting())));
    let video_state = Arc::new(VideoState::new(client_from_config(config)));

    Router::new()
        .route("/", get(|| async { "Healthcare Kiosk API is running!" }))
        .nest("/directory", directory_routes(directory))
        .nest("/vitals", vitals_routes(vitals_state))
        .nest("/appointments", appointment_routes(appointment_state))
        .nest("/kiosk", kiosk_routes(kiosk_state))
        .nest("/videos", video_routes(video_state))
}
