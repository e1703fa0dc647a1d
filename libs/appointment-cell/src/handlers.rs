use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Local;
use serde_json::{json, Value};

use directory_cell::services::ProviderDirectory;
use shared_models::error::AppError;

use crate::models::{AppointmentError, AppointmentRequest};
use crate::services::{dispatch_in_background, BookingService, Notification, NotificationDispatcher};

pub struct AppointmentState {
    pub booking: BookingService,
    pub notifier: Arc<dyn NotificationDispatcher>,
}

impl AppointmentState {
    pub fn new(directory: Arc<ProviderDirectory>, notifier: Arc<dyn NotificationDispatcher>) -> Self {
        Self {
            booking: BookingService::new(directory),
            notifier,
        }
    }
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppointmentState>>,
    Json(request): Json<AppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let today = Local::now().date_naive();

    let appointment = state.booking.confirm(request, today).map_err(appointment_error)?;

    let notifications = Notification::appointment_confirmation(&appointment);
    let channels: Vec<_> = notifications.iter().map(|n| n.channel).collect();
    dispatch_in_background(Arc::clone(&state.notifier), notifications);

    Ok(Json(json!({
        "appointment": appointment,
        "notifications": channels
    })))
}

#[axum::debug_handler]
pub async fn list_time_slots(
    State(state): State<Arc<AppointmentState>>,
) -> Result<Json<Value>, AppError> {
    let slots = state.booking.time_slots();

    Ok(Json(json!({
        "time_slots": slots,
        "total": slots.len()
    })))
}

fn appointment_error(err: AppointmentError) -> AppError {
    match err {
        AppointmentError::ProviderNotFound(_) | AppointmentError::FacilityNotFound(_) => {
            AppError::NotFound(err.to_string())
        }
        AppointmentError::ConsultationTypeUnsupported { .. } => AppError::Conflict(err.to_string()),
        _ => AppError::ValidationError(err.to_string()),
    }
}
