use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use appointment_cell::models::PatientContact;

// ==============================================================================
// SCREENS AND EVENTS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    Home,
    NewRegistration,
    Login,
    Profile,
    ServiceSelection,
    Vitals,
    Appointment,
    DoctorRecommendation,
    Confirmation,
}

/// Where the login screen sends the patient once authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoginRedirect {
    Vitals,
    Appointment,
    #[default]
    Services,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum FlowEvent {
    StartRegistration,
    StartLogin,
    ViewProfile,
    RegistrationComplete,
    LoginComplete { redirect: LoginRedirect },
    ContinueToServices,
    CheckVitals,
    BookAppointment,
    VitalsComplete,
    SymptomSelected,
    AppointmentBooked,
    Back,
    BackToHome,
    EndSession,
}

impl FlowEvent {
    /// Events that only make sense together with the data they announce
    /// (a profile, a reading, a symptom or an appointment).
    pub fn carries_data(&self) -> bool {
        matches!(
            self,
            FlowEvent::LoginComplete { .. }
                | FlowEvent::RegistrationComplete
                | FlowEvent::VitalsComplete
                | FlowEvent::SymptomSelected
                | FlowEvent::AppointmentBooked
        )
    }
}

impl fmt::Display for FlowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ==============================================================================
// PATIENT
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub patient_id: String,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub mobile: String,
    pub email: String,
    pub address: String,
    pub aadhaar_number: String,
    pub ayushman_bharat_id: Option<String>,
    pub emergency_contact: Option<String>,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub bmi: Option<f64>,
}

impl PatientProfile {
    /// Age in whole years on `on`.
    pub fn age_on(&self, on: NaiveDate) -> u32 {
        let mut age = on.year() - self.date_of_birth.year();
        if (on.month(), on.day()) < (self.date_of_birth.month(), self.date_of_birth.day()) {
            age -= 1;
        }
        age.max(0) as u32
    }

    /// Contact details as the booking form pre-fills them.
    pub fn contact(&self, on: NaiveDate) -> PatientContact {
        PatientContact {
            name: self.name.clone(),
            age: self.age_on(on),
            gender: self.gender.clone(),
            mobile: self.mobile.clone(),
            email: Some(self.email.clone()).filter(|e| !e.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiometricMethod {
    Fingerprint,
    Face,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "code", rename_all = "lowercase")]
pub enum LoginMethod {
    Pin(String),
    Otp(String),
    Fingerprint,
    Face,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    #[error("Cannot handle {event} on the {from:?} screen")]
    InvalidTransition { from: Screen, event: FlowEvent },

    #[error("{0} must be submitted together with its data")]
    EventNeedsData(FlowEvent),

    #[error("No patient is signed in")]
    NoPatient,

    #[error("Vitals reading is not complete")]
    IncompleteVitals,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoginError {
    #[error("Please enter Patient ID")]
    MissingPatientId,

    #[error("Security PIN must be 4 digits")]
    InvalidPin,

    #[error("Please enter the 6-digit OTP")]
    InvalidOtp,

    #[error("{0:?} authentication was not recognised")]
    BiometricRejected(BiometricMethod),

    #[error("Biometric scanner error: {0}")]
    Scanner(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Valid 10-digit Mobile number is required")]
    InvalidMobile,

    #[error("Valid Email is required")]
    InvalidEmail,

    #[error("Valid 12-digit Aadhaar Number is required")]
    InvalidAadhaar,

    #[error("Ayushman Bharat ID must be 17 characters")]
    InvalidAyushmanId,

    #[error("Valid Emergency Contact number is required")]
    InvalidEmergencyContact,

    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),
}
