// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use directory_cell::models::ConsultationType;
use directory_cell::services::ProviderDirectory;

use crate::models::{Appointment, AppointmentError, AppointmentRequest, PatientContact};
use crate::services::validation::{validate_email, validate_mobile};

/// Half-hour slots the kiosk booking form offers.
pub const STANDARD_TIME_SLOTS: [&str; 14] = [
    "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM",
    "02:00 PM", "02:30 PM", "03:00 PM", "03:30 PM", "04:00 PM", "04:30 PM",
    "05:00 PM", "05:30 PM",
];

#[derive(Debug, Clone)]
pub struct BookingService {
    directory: Arc<ProviderDirectory>,
}

impl BookingService {
    pub fn new(directory: Arc<ProviderDirectory>) -> Self {
        Self { directory }
    }

    pub fn time_slots(&self) -> &'static [&'static str] {
        &STANDARD_TIME_SLOTS
    }

    /// Validate a booking form and turn it into a confirmed appointment.
    pub fn confirm(
        &self,
        request: AppointmentRequest,
        today: NaiveDate,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Confirming appointment with provider {} on {}", request.provider_id, request.date);

        self.validate_patient(&request.patient)?;
        self.validate_schedule(&request, today)?;

        let provider = self
            .directory
            .get_provider(request.provider_id)
            .map_err(|_| AppointmentError::ProviderNotFound(request.provider_id))?;

        if request.consultation_type == ConsultationType::Both {
            return Err(AppointmentError::ConsultationTypeRequired);
        }
        if !provider.capabilities.supports(request.consultation_type) {
            warn!(
                "Provider {} does not offer {}",
                provider.id, request.consultation_type
            );
            return Err(AppointmentError::ConsultationTypeUnsupported {
                provider_id: provider.id,
                consultation_type: request.consultation_type,
            });
        }

        let facility = self
            .directory
            .facility_of(provider)
            .map_err(|_| AppointmentError::FacilityNotFound(provider.facility_id))?;

        let symptoms = request
            .symptoms
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let appointment = Appointment {
            id: Uuid::new_v4(),
            provider_id: provider.id,
            provider_name: provider.name.clone(),
            specialization: provider.specialization.clone(),
            facility_id: facility.id,
            facility_name: facility.name.clone(),
            facility_address: facility.address.clone(),
            date: request.date,
            time_slot: request.time_slot,
            consultation_type: request.consultation_type,
            patient: request.patient,
            symptoms,
            fee: provider.consultation_fee,
            confirmed_at: Utc::now(),
        };

        info!(
            "Appointment {} confirmed with {} on {} at {}",
            appointment.id, appointment.provider_name, appointment.date, appointment.time_slot
        );

        Ok(appointment)
    }

    // ==============================================================================
    // PRIVATE HELPER METHODS
    // ==============================================================================

    fn validate_patient(&self, patient: &PatientContact) -> Result<(), AppointmentError> {
        if patient.name.trim().is_empty() {
            return Err(AppointmentError::MissingField("name"));
        }
        if patient.age == 0 {
            return Err(AppointmentError::InvalidAge);
        }
        if patient.gender.trim().is_empty() {
            return Err(AppointmentError::MissingField("gender"));
        }
        if patient.mobile.trim().is_empty() {
            return Err(AppointmentError::MissingField("mobile"));
        }
        if !validate_mobile(patient.mobile.trim()) {
            return Err(AppointmentError::InvalidMobile(patient.mobile.clone()));
        }
        if let Some(email) = patient.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            if !validate_email(email) {
                return Err(AppointmentError::InvalidEmail(email.to_string()));
            }
        }
        Ok(())
    }

    fn validate_schedule(
        &self,
        request: &AppointmentRequest,
        today: NaiveDate,
    ) -> Result<(), AppointmentError> {
        if request.date < today {
            return Err(AppointmentError::DateInPast {
                date: request.date,
                today,
            });
        }
        if request.time_slot.trim().is_empty() {
            return Err(AppointmentError::MissingField("time_slot"));
        }
        if !STANDARD_TIME_SLOTS.contains(&request.time_slot.as_str()) {
            return Err(AppointmentError::UnknownTimeSlot(request.time_slot.clone()));
        }
        Ok(())
    }
}
