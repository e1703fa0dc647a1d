// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{self, AppointmentState};

pub fn appointment_routes(state: Arc<AppointmentState>) -> Router {
    Router::new()
        .route("/", post(handlers::book_appointment))
        .route("/time-slots", get(handlers::list_time_slots))
        .with_state(state)
}
