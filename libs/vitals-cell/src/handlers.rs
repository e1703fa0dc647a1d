use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::debug;

use shared_models::error::AppError;

use crate::models::{VitalKind, VitalsError, VitalsReading};
use crate::services::{classify_bmi, compute_bmi, VitalsSimulator};

/// Shared handler state: the simulator stands in for the kiosk's sensors.
pub struct VitalsState {
    simulator: Mutex<VitalsSimulator>,
}

impl VitalsState {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            simulator: Mutex::new(VitalsSimulator::from_seed(seed)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BmiRequest {
    pub height_cm: f64,
    pub weight_kg: f64,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyQuery {
    pub bmi: f64,
}

#[derive(Debug, Deserialize)]
pub struct SimulateRequest {
    pub kind: String,
    #[serde(default)]
    pub prior: VitalsReading,
}

#[axum::debug_handler]
pub async fn calculate_bmi(Json(request): Json<BmiRequest>) -> Result<Json<Value>, AppError> {
    let bmi = compute_bmi(request.height_cm, request.weight_kg).map_err(vitals_error)?;

    Ok(Json(json!({
        "bmi": bmi,
        "classification": classify_bmi(bmi)
    })))
}

#[axum::debug_handler]
pub async fn classify(Query(query): Query<ClassifyQuery>) -> Result<Json<Value>, AppError> {
    if !query.bmi.is_finite() || query.bmi <= 0.0 {
        return Err(AppError::ValidationError(format!("Invalid BMI value: {}", query.bmi)));
    }

    Ok(Json(json!({
        "bmi": query.bmi,
        "classification": classify_bmi(query.bmi)
    })))
}

#[axum::debug_handler]
pub async fn simulate(
    State(state): State<Arc<VitalsState>>,
    Json(request): Json<SimulateRequest>,
) -> Result<Json<Value>, AppError> {
    let kind: VitalKind = request.kind.parse().map_err(vitals_error)?;

    if request.prior.captured_at.is_some() {
        return Err(vitals_error(VitalsError::SessionClosed));
    }

    let reading = {
        let mut simulator = state.simulator.lock().await;
        simulator.simulate_reading(kind, &request.prior)
    };

    debug!("Simulated {} for kiosk client", kind);

    Ok(Json(json!({
        "kind": kind,
        "reading": reading
    })))
}

#[axum::debug_handler]
pub async fn list_kinds() -> Result<Json<Value>, AppError> {
    let kinds: Vec<Value> = VitalKind::SEQUENCE
        .iter()
        .map(|kind| {
            json!({
                "kind": kind,
                "name": kind.name(),
                "unit": kind.unit(),
                "instruction": kind.instruction()
            })
        })
        .collect();

    Ok(Json(json!({
        "kinds": kinds,
        "total": kinds.len()
    })))
}

fn vitals_error(err: VitalsError) -> AppError {
    match err {
        VitalsError::InvalidMeasurement(_) => AppError::ValidationError(err.to_string()),
        VitalsError::UnknownVitalKind(_) => AppError::BadRequest(err.to_string()),
        VitalsError::SessionClosed | VitalsError::InvalidTransition { .. } => {
            AppError::Conflict(err.to_string())
        }
    }
}
