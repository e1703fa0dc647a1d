use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::services::ProviderDirectory;

pub fn directory_routes(directory: Arc<ProviderDirectory>) -> Router {
    Router::new()
        .route("/providers", get(handlers::search_providers))
        .route("/providers/{provider_id}", get(handlers::get_provider))
        .route("/facilities/{facility_id}", get(handlers::get_facility))
        .route("/facilities/{facility_id}/providers", get(handlers::get_facility_providers))
        .route("/localities", get(handlers::list_localities))
        .route("/symptoms", get(handlers::list_symptoms))
        .route("/symptoms/resolve", get(handlers::resolve_symptom))
        .route("/body-parts", get(handlers::list_body_parts))
        .with_state(directory)
}
