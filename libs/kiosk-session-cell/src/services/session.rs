// libs/kiosk-session-cell/src/services/session.rs
use chrono::NaiveDate;
use tracing::{debug, info};

use appointment_cell::models::{Appointment, PatientContact};
use appointment_cell::services::{Channel, Notification};
use directory_cell::models::Symptom;
use vitals_cell::models::VitalsReading;

use crate::models::{FlowError, FlowEvent, LoginRedirect, PatientProfile, Screen};
use crate::services::flow::{next_screen, FlowContext};

/// Everything one patient accumulates between walking up to the kiosk and
/// ending the session.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientSession {
    screen: Screen,
    patient: Option<PatientProfile>,
    vitals: Option<VitalsReading>,
    selected_symptom: Option<Symptom>,
    appointment: Option<Appointment>,
    voice_enabled: bool,
}

impl Default for PatientSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PatientSession {
    pub fn new() -> Self {
        Self {
            screen: Screen::Home,
            patient: None,
            vitals: None,
            selected_symptom: None,
            appointment: None,
            voice_enabled: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn patient(&self) -> Option<&PatientProfile> {
        self.patient.as_ref()
    }

    pub fn vitals(&self) -> Option<&VitalsReading> {
        self.vitals.as_ref()
    }

    pub fn selected_symptom(&self) -> Option<Symptom> {
        self.selected_symptom
    }

    pub fn appointment(&self) -> Option<&Appointment> {
        self.appointment.as_ref()
    }

    pub fn voice_enabled(&self) -> bool {
        self.voice_enabled
    }

    /// True when the stored reading was completed on `today`.
    pub fn has_vitals_today(&self, today: NaiveDate) -> bool {
        self.vitals
            .as_ref()
            .and_then(|v| v.captured_at)
            .is_some_and(|at| at.date_naive() == today)
    }

    /// Apply a navigation event. Events that carry data have their own
    /// `complete_*` / `select_*` / `record_*` methods.
    pub fn handle(&mut self, event: FlowEvent, today: NaiveDate) -> Result<Screen, FlowError> {
        if event.carries_data() {
            return Err(FlowError::EventNeedsData(event));
        }
        let next = next_screen(self.screen, event, self.context(today))?;

        let clears_session = match event {
            FlowEvent::EndSession => true,
            FlowEvent::BackToHome => self.patient.is_none(),
            _ => false,
        };
        if clears_session {
            self.reset();
        }

        self.screen = next;
        Ok(next)
    }

    pub fn complete_login(
        &mut self,
        profile: PatientProfile,
        redirect: LoginRedirect,
        today: NaiveDate,
    ) -> Result<Screen, FlowError> {
        let ctx = FlowContext { has_patient: true, ..self.context(today) };
        let next = next_screen(self.screen, FlowEvent::LoginComplete { redirect }, ctx)?;

        info!("Session started for patient {}", profile.patient_id);
        self.patient = Some(profile);
        self.screen = next;
        Ok(next)
    }

    pub fn complete_registration(&mut self, profile: PatientProfile, today: NaiveDate) -> Result<Screen, FlowError> {
        let ctx = FlowContext { has_patient: true, ..self.context(today) };
        let next = next_screen(self.screen, FlowEvent::RegistrationComplete, ctx)?;

        info!("Session started for new patient {}", profile.patient_id);
        self.patient = Some(profile);
        self.screen = next;
        Ok(next)
    }

    /// Store a finished reading and move on to booking. Height, weight and BMI
    /// from the reading refresh the patient's profile.
    pub fn complete_vitals(&mut self, reading: VitalsReading, today: NaiveDate) -> Result<Screen, FlowError> {
        if reading.captured_at.is_none() {
            return Err(FlowError::IncompleteVitals);
        }
        let next = next_screen(self.screen, FlowEvent::VitalsComplete, self.context(today))?;

        if let Some(patient) = self.patient.as_mut() {
            if let Some(height) = reading.height {
                patient.height_cm = height;
            }
            if let Some(weight) = reading.weight {
                patient.weight_kg = weight;
            }
            if reading.bmi.is_some() {
                patient.bmi = reading.bmi;
            }
        }

        debug!("Vitals stored for session");
        self.vitals = Some(reading);
        self.screen = next;
        Ok(next)
    }

    pub fn select_symptom(&mut self, symptom: Symptom, today: NaiveDate) -> Result<Screen, FlowError> {
        let next = next_screen(self.screen, FlowEvent::SymptomSelected, self.context(today))?;

        debug!("Symptom selected: {}", symptom.as_str());
        self.selected_symptom = Some(symptom);
        self.screen = next;
        Ok(next)
    }

    pub fn record_appointment(&mut self, appointment: Appointment, today: NaiveDate) -> Result<Screen, FlowError> {
        if self.patient.is_none() {
            return Err(FlowError::NoPatient);
        }
        let next = next_screen(self.screen, FlowEvent::AppointmentBooked, self.context(today))?;

        info!("Appointment {} recorded for session", appointment.id);
        self.appointment = Some(appointment);
        self.screen = next;
        Ok(next)
    }

    /// Contact details that pre-fill the booking form.
    pub fn booking_contact(&self, today: NaiveDate) -> Result<PatientContact, FlowError> {
        self.patient
            .as_ref()
            .map(|p| p.contact(today))
            .ok_or(FlowError::NoPatient)
    }

    /// Vitals summary for the patient on `channel`. `Ok(None)` when the channel
    /// has no recipient, e.g. email without an address.
    pub fn vitals_report(&self, channel: Channel, today: NaiveDate) -> Result<Option<Notification>, FlowError> {
        let contact = self.booking_contact(today)?;
        let reading = self
            .vitals
            .as_ref()
            .filter(|v| v.captured_at.is_some())
            .ok_or(FlowError::IncompleteVitals)?;

        Ok(Notification::vitals_report(&contact, reading, channel))
    }

    pub fn toggle_voice(&mut self) -> bool {
        self.voice_enabled = !self.voice_enabled;
        self.voice_enabled
    }

    /// Sign the patient out and return to the home screen.
    pub fn logout(&mut self) {
        info!("Patient signed out");
        self.reset();
        self.screen = Screen::Home;
    }

    // ==============================================================================
    // PRIVATE HELPER METHODS
    // ==============================================================================

    fn context(&self, today: NaiveDate) -> FlowContext {
        FlowContext {
            has_patient: self.patient.is_some(),
            vitals_today: self.has_vitals_today(today),
        }
    }

    /// Drop everything tied to the patient. Voice preference belongs to the kiosk.
    fn reset(&mut self) {
        self.patient = None;
        self.vitals = None;
        self.selected_symptom = None;
        self.appointment = None;
    }
}
