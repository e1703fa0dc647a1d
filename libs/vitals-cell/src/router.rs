use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{self, VitalsState};

pub fn vitals_routes(state: Arc<VitalsState>) -> Router {
    Router::new()
        .route("/bmi", post(handlers::calculate_bmi))
        .route("/bmi/classify", get(handlers::classify))
        .route("/simulate", post(handlers::simulate))
        .route("/kinds", get(handlers::list_kinds))
        .with_state(state)
}
