// libs/appointment-cell/src/services/notification.rs
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use vitals_cell::models::VitalsReading;

use crate::models::{Appointment, PatientContact};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Sms,
    Email,
    Print,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Sms => "sms",
            Channel::Email => "email",
            Channel::Print => "print",
        };
        f.write_str(name)
    }
}

/// A message ready for one delivery channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub channel: Channel,
    /// Mobile number, email address, or the kiosk printer.
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    /// SMS to the patient's mobile, plus email when an address was given.
    pub fn appointment_confirmation(appointment: &Appointment) -> Vec<Notification> {
        let subject = format!("Appointment confirmed with {}", appointment.provider_name);
        let body = format!(
            "Appointment {} with {} ({}) at {}, {} on {} at {}. Consultation: {}. Fee: Rs {:.0}.",
            appointment.id,
            appointment.provider_name,
            appointment.specialization,
            appointment.facility_name,
            appointment.facility_address,
            appointment.date.format("%d %b %Y"),
            appointment.time_slot,
            appointment.consultation_type,
            appointment.fee
        );

        let mut notifications = vec![Notification {
            channel: Channel::Sms,
            recipient: appointment.patient.mobile.clone(),
            subject: subject.clone(),
            body: body.clone(),
        }];

        if let Some(email) = appointment.patient.email.as_deref().filter(|e| !e.is_empty()) {
            notifications.push(Notification {
                channel: Channel::Email,
                recipient: email.to_string(),
                subject,
                body,
            });
        }

        notifications
    }

    /// Vitals summary for the requested channel. `None` for email without an address.
    pub fn vitals_report(
        patient: &PatientContact,
        reading: &VitalsReading,
        channel: Channel,
    ) -> Option<Notification> {
        let recipient = match channel {
            Channel::Sms => patient.mobile.clone(),
            Channel::Email => patient.email.clone().filter(|e| !e.is_empty())?,
            Channel::Print => "kiosk-printer".to_string(),
        };

        Some(Notification {
            channel,
            recipient,
            subject: format!("Vitals report for {}", patient.name),
            body: vitals_summary(reading),
        })
    }
}

fn vitals_summary(reading: &VitalsReading) -> String {
    let mut lines = Vec::new();

    if let Some(t) = reading.temperature {
        lines.push(format!("Temperature: {:.1} °F", t));
    }
    if let Some(bp) = reading.blood_pressure {
        lines.push(format!("Blood Pressure: {} mmHg", bp));
    }
    if let Some(po) = reading.pulse_ox {
        lines.push(format!("Heart Rate: {} bpm", po.heart_rate));
        lines.push(format!("SpO2: {}%", po.oxygen_saturation));
    }
    if let Some(h) = reading.height {
        lines.push(format!("Height: {:.0} cm", h));
    }
    if let Some(w) = reading.weight {
        lines.push(format!("Weight: {:.0} kg", w));
    }
    if let Some(bmi) = reading.bmi {
        lines.push(format!("BMI: {:.1}", bmi));
    }

    if lines.is_empty() {
        "No vitals recorded".to_string()
    } else {
        lines.join("\n")
    }
}

/// Fire-and-forget delivery. Failures stay inside the dispatcher.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn dispatch(&self, notification: Notification);
}

/// Logs every delivery instead of sending it.
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationDispatcher for TracingNotifier {
    async fn dispatch(&self, notification: Notification) {
        info!(
            "Delivering {} notification to {}: {}",
            notification.channel, notification.recipient, notification.subject
        );
        debug!("Notification body: {}", notification.body);
    }
}

/// Send each notification on a background task without waiting for delivery.
pub fn dispatch_in_background(
    dispatcher: Arc<dyn NotificationDispatcher>,
    notifications: Vec<Notification>,
) {
    tokio::spawn(async move {
        for notification in notifications {
            dispatcher.dispatch(notification).await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitals_cell::models::{BloodPressure, PulseOx};

    fn patient(email: Option<&str>) -> PatientContact {
        PatientContact {
            name: "Arjun Rao".to_string(),
            age: 52,
            gender: "male".to_string(),
            mobile: "9123456780".to_string(),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn test_vitals_report_lists_recorded_values() {
        let reading = VitalsReading {
            temperature: Some(98.6),
            blood_pressure: Some(BloodPressure { systolic: 118, diastolic: 76 }),
            pulse_ox: Some(PulseOx { heart_rate: 70, oxygen_saturation: 99 }),
            weight: Some(68.0),
            ..VitalsReading::default()
        };

        let report = Notification::vitals_report(&patient(None), &reading, Channel::Sms).unwrap();

        assert_eq!(report.recipient, "9123456780");
        assert!(report.body.contains("Blood Pressure: 118/76 mmHg"));
        assert!(report.body.contains("SpO2: 99%"));
        assert!(!report.body.contains("BMI"));
    }

    #[test]
    fn test_email_report_needs_address() {
        let reading = VitalsReading::default();
        assert!(Notification::vitals_report(&patient(None), &reading, Channel::Email).is_none());

        let report =
            Notification::vitals_report(&patient(Some("arjun@example.in")), &reading, Channel::Email)
                .unwrap();
        assert_eq!(report.body, "No vitals recorded");
    }
}
