use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use directory_cell::models::{ConsultationType, FacilityId, ProviderId};

// ==============================================================================
// BOOKING REQUEST
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientContact {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub mobile: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// What the booking form submits. Nothing is created until it is confirmed.
#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentRequest {
    pub provider_id: ProviderId,
    pub date: NaiveDate,
    pub time_slot: String,
    pub consultation_type: ConsultationType,
    pub patient: PatientContact,
    #[serde(default)]
    pub symptoms: Option<String>,
}

// ==============================================================================
// APPOINTMENT
// ==============================================================================

/// A confirmed booking. Built in one step by `BookingService::confirm`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appointment {
    pub id: Uuid,
    pub provider_id: ProviderId,
    pub provider_name: String,
    pub specialization: String,
    pub facility_id: FacilityId,
    pub facility_name: String,
    pub facility_address: String,
    pub date: NaiveDate,
    pub time_slot: String,
    pub consultation_type: ConsultationType,
    pub patient: PatientContact,
    pub symptoms: Option<String>,
    pub fee: f64,
    pub confirmed_at: DateTime<Utc>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppointmentError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Patient age must be greater than zero")]
    InvalidAge,

    #[error("Mobile number must be 10 digits: {0}")]
    InvalidMobile(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Appointment date {date} is before {today}")]
    DateInPast { date: NaiveDate, today: NaiveDate },

    #[error("Time slot not offered: {0}")]
    UnknownTimeSlot(String),

    #[error("Choose teleconsultation or in-person")]
    ConsultationTypeRequired,

    #[error("Provider {provider_id} does not offer {consultation_type}")]
    ConsultationTypeUnsupported {
        provider_id: ProviderId,
        consultation_type: ConsultationType,
    },

    #[error("Provider {0} not found")]
    ProviderNotFound(ProviderId),

    #[error("Facility {0} not found")]
    FacilityNotFound(FacilityId),
}
