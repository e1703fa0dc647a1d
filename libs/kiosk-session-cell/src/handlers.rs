use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use shared_models::error::AppError;

use crate::models::{FlowError, FlowEvent, LoginError, LoginMethod, RegistrationError, Screen};
use crate::services::{next_screen, BiometricVerifier, FlowContext, LoginService, RegistrationForm, RegistrationService};

pub struct KioskState {
    login: LoginService,
    registration: RegistrationService,
}

impl KioskState {
    pub fn new(verifier: Arc<dyn BiometricVerifier>) -> Self {
        Self {
            login: LoginService::new(verifier),
            registration: RegistrationService::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub patient_id: String,
    pub credentials: LoginMethod,
}

#[derive(Debug, Deserialize)]
pub struct NextScreenRequest {
    pub screen: Screen,
    pub event: FlowEvent,
    #[serde(default)]
    pub has_patient: bool,
    #[serde(default)]
    pub vitals_today: bool,
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<KioskState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let patient = state
        .login
        .login(&request.patient_id, request.credentials)
        .await
        .map_err(login_error)?;

    Ok(Json(json!({ "patient": patient })))
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<KioskState>>,
    Json(form): Json<RegistrationForm>,
) -> Result<Json<Value>, AppError> {
    let patient = state
        .registration
        .register(form, Utc::now())
        .map_err(registration_error)?;

    info!("Kiosk registration completed for {}", patient.patient_id);
    Ok(Json(json!({ "patient": patient })))
}

/// Stateless screen lookup for kiosk front-ends that keep the session themselves.
#[axum::debug_handler]
pub async fn next(Json(request): Json<NextScreenRequest>) -> Result<Json<Value>, AppError> {
    let ctx = FlowContext {
        has_patient: request.has_patient,
        vitals_today: request.vitals_today,
    };
    let screen = next_screen(request.screen, request.event, ctx).map_err(flow_error)?;

    Ok(Json(json!({ "screen": screen })))
}

fn login_error(err: LoginError) -> AppError {
    match err {
        LoginError::Scanner(_) => AppError::ExternalService(err.to_string()),
        LoginError::BiometricRejected(_) => AppError::BadRequest(err.to_string()),
        LoginError::MissingPatientId | LoginError::InvalidPin | LoginError::InvalidOtp => {
            AppError::ValidationError(err.to_string())
        }
    }
}

fn registration_error(err: RegistrationError) -> AppError {
    AppError::ValidationError(err.to_string())
}

fn flow_error(err: FlowError) -> AppError {
    match err {
        FlowError::InvalidTransition { .. } => AppError::Conflict(err.to_string()),
        FlowError::EventNeedsData(_) | FlowError::NoPatient | FlowError::IncompleteVitals => {
            AppError::BadRequest(err.to_string())
        }
    }
}
