// libs/kiosk-session-cell/src/services/registration.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use appointment_cell::services::validation::{is_digits, validate_email, validate_mobile};
use vitals_cell::services::compute_bmi;

use crate::models::{PatientProfile, RegistrationError};

const AYUSHMAN_ID_LEN: usize = 17;

/// New patient form as filled in at the kiosk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: String,
    pub mobile: String,
    pub email: String,
    pub address: String,
    pub aadhaar_number: String,
    pub ayushman_bharat_id: String,
    pub emergency_contact: String,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationService;

impl RegistrationService {
    pub fn new() -> Self {
        Self
    }

    /// Validate the form and create the patient record. Checks run in form order
    /// and the first failure is returned.
    pub fn register(&self, form: RegistrationForm, now: DateTime<Utc>) -> Result<PatientProfile, RegistrationError> {
        debug!("Validating registration for {}", form.full_name.trim());

        let full_name = required(&form.full_name, "Full Name")?;
        let date_of_birth = form.date_of_birth.ok_or(RegistrationError::MissingField("Date of Birth"))?;
        let gender = required(&form.gender, "Gender")?;

        let mobile = form.mobile.trim();
        if !validate_mobile(mobile) {
            return Err(RegistrationError::InvalidMobile);
        }

        let email = form.email.trim();
        if !validate_email(email) {
            return Err(RegistrationError::InvalidEmail);
        }

        let address = required(&form.address, "Address")?;

        let aadhaar = form.aadhaar_number.trim();
        if !is_digits(aadhaar, 12) {
            return Err(RegistrationError::InvalidAadhaar);
        }

        let ayushman = form.ayushman_bharat_id.trim();
        if !ayushman.is_empty() && ayushman.chars().count() != AYUSHMAN_ID_LEN {
            return Err(RegistrationError::InvalidAyushmanId);
        }

        let emergency_contact = form.emergency_contact.trim();
        if !validate_mobile(emergency_contact) {
            return Err(RegistrationError::InvalidEmergencyContact);
        }

        let height_cm = form.height_cm.ok_or(RegistrationError::MissingField("Height"))?;
        let weight_kg = form.weight_kg.ok_or(RegistrationError::MissingField("Weight"))?;
        let bmi = compute_bmi(height_cm, weight_kg)
            .map_err(|e| RegistrationError::InvalidMeasurement(e.to_string()))?;

        let profile = PatientProfile {
            patient_id: format!("PAT{}", now.timestamp_millis()),
            name: full_name,
            date_of_birth,
            gender,
            mobile: mobile.to_string(),
            email: email.to_string(),
            address,
            aadhaar_number: aadhaar.to_string(),
            ayushman_bharat_id: Some(ayushman.to_string()).filter(|id| !id.is_empty()),
            emergency_contact: Some(emergency_contact.to_string()),
            height_cm,
            weight_kg,
            bmi: Some(bmi),
        };

        info!("Registered patient {} ({})", profile.patient_id, profile.name);
        Ok(profile)
    }
}

fn required(value: &str, field: &'static str) -> Result<String, RegistrationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(RegistrationError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}
