// libs/kiosk-session-cell/src/services/login.rs
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use appointment_cell::services::validation::is_digits;
use vitals_cell::services::compute_bmi;

use crate::models::{BiometricMethod, LoginError, LoginMethod, PatientProfile};

const FIRST_NAMES: [&str; 10] = [
    "Alex", "Jordan", "Taylor", "Casey", "Morgan", "Riley", "Avery", "Quinn", "Blake", "Sage",
];
const LAST_NAMES: [&str; 10] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez",
];

const DEMO_HEIGHT_CM: f64 = 170.0;
const DEMO_WEIGHT_KG: f64 = 70.0;

/// Fingerprint and face scanners attached to the kiosk.
#[async_trait]
pub trait BiometricVerifier: Send + Sync {
    async fn verify(&self, patient_id: &str, method: BiometricMethod) -> Result<bool, LoginError>;
}

/// Scanner stand-in with a fixed verdict and an optional scan delay.
#[derive(Debug, Clone)]
pub struct MockBiometricVerifier {
    accept: bool,
    delay: Option<Duration>,
}

impl MockBiometricVerifier {
    pub fn accepting() -> Self {
        Self { accept: true, delay: None }
    }

    pub fn rejecting() -> Self {
        Self { accept: false, delay: None }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl BiometricVerifier for MockBiometricVerifier {
    async fn verify(&self, patient_id: &str, method: BiometricMethod) -> Result<bool, LoginError> {
        debug!("Simulated {:?} scan for patient {}", method, patient_id);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        Ok(self.accept)
    }
}

pub struct LoginService {
    verifier: Arc<dyn BiometricVerifier>,
}

impl LoginService {
    pub fn new(verifier: Arc<dyn BiometricVerifier>) -> Self {
        Self { verifier }
    }

    /// Authenticate a returning patient and load their profile.
    pub async fn login(&self, patient_id: &str, method: LoginMethod) -> Result<PatientProfile, LoginError> {
        let patient_id = patient_id.trim();
        if patient_id.is_empty() {
            return Err(LoginError::MissingPatientId);
        }

        match method {
            LoginMethod::Pin(pin) => {
                if !is_digits(pin.trim(), 4) {
                    return Err(LoginError::InvalidPin);
                }
            }
            LoginMethod::Otp(otp) => {
                if !is_digits(otp.trim(), 6) {
                    return Err(LoginError::InvalidOtp);
                }
            }
            LoginMethod::Fingerprint => self.verify_biometric(patient_id, BiometricMethod::Fingerprint).await?,
            LoginMethod::Face => self.verify_biometric(patient_id, BiometricMethod::Face).await?,
        }

        let profile = demo_profile(patient_id);
        info!("Patient {} signed in as {}", patient_id, profile.name);

        Ok(profile)
    }

    async fn verify_biometric(&self, patient_id: &str, method: BiometricMethod) -> Result<(), LoginError> {
        if self.verifier.verify(patient_id, method).await? {
            Ok(())
        } else {
            warn!("{:?} verification rejected for patient {}", method, patient_id);
            Err(LoginError::BiometricRejected(method))
        }
    }
}

/// Placeholder record for a patient id until the kiosk is wired to a patient registry.
pub fn demo_profile(patient_id: &str) -> PatientProfile {
    let name = demo_name(patient_id);
    let email = format!("{}@email.com", name.to_lowercase().replacen(' ', ".", 1));

    PatientProfile {
        patient_id: patient_id.to_string(),
        name,
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default(),
        gender: "Other".to_string(),
        mobile: "9876543210".to_string(),
        email,
        address: "123 Main Street, City".to_string(),
        aadhaar_number: "123456789012".to_string(),
        ayushman_bharat_id: None,
        emergency_contact: None,
        height_cm: DEMO_HEIGHT_CM,
        weight_kg: DEMO_WEIGHT_KG,
        bmi: compute_bmi(DEMO_HEIGHT_CM, DEMO_WEIGHT_KG).ok(),
    }
}

/// Names come from the last two digits of the id: units pick the first name,
/// tens the last name.
fn demo_name(patient_id: &str) -> String {
    let mut digits = patient_id.bytes().rev().filter(u8::is_ascii_digit).map(|b| (b - b'0') as usize);
    let units = digits.next().unwrap_or(0);
    let tens = digits.next().unwrap_or(0);

    format!("{} {}", FIRST_NAMES[units], LAST_NAMES[tens])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_name_uses_last_two_digits() {
        assert_eq!(demo_name("PAT042"), "Taylor Jones");
        assert_eq!(demo_name("7"), "Quinn Smith");
        assert_eq!(demo_name("no-digits"), "Alex Smith");
        assert_eq!(demo_name("123456789012345678901234"), "Morgan Brown");
    }

    #[test]
    fn test_demo_profile_fields() {
        let profile = demo_profile("PAT19");

        assert_eq!(profile.name, "Sage Johnson");
        assert_eq!(profile.email, "sage.johnson@email.com");
        assert_eq!(profile.bmi, Some(24.2));
        assert_eq!(profile.date_of_birth, NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
    }
}
