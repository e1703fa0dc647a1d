// libs/kiosk-session-cell/tests/session_test.rs
use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{NaiveDate, TimeZone, Utc};

use appointment_cell::models::AppointmentRequest;
use appointment_cell::services::{BookingService, Channel};
use directory_cell::models::{ConsultationType, Symptom};
use directory_cell::services::{ProviderDirectory, SeedCatalog};
use kiosk_session_cell::models::{FlowError, FlowEvent, LoginRedirect, Screen};
use kiosk_session_cell::services::{demo_profile, PatientSession};
use vitals_cell::models::VitalsReading;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

fn todays_reading() -> VitalsReading {
    VitalsReading {
        temperature: Some(98.4),
        height: Some(172.0),
        weight: Some(68.0),
        bmi: Some(23.0),
        captured_at: Some(Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()),
        ..Default::default()
    }
}

fn signed_in() -> PatientSession {
    let mut session = PatientSession::new();
    session.handle(FlowEvent::StartLogin, today()).unwrap();
    session
        .complete_login(demo_profile("PAT42"), LoginRedirect::Services, today())
        .unwrap();
    session
}

#[test]
fn booking_without_todays_vitals_routes_to_vitals() {
    let mut session = signed_in();
    assert_eq!(session.screen(), Screen::ServiceSelection);

    assert_eq!(session.handle(FlowEvent::BookAppointment, today()).unwrap(), Screen::Vitals);
}

#[test]
fn booking_after_todays_vitals_goes_to_appointment() {
    let mut session = signed_in();
    session.handle(FlowEvent::CheckVitals, today()).unwrap();
    session.complete_vitals(todays_reading(), today()).unwrap();
    session.handle(FlowEvent::Back, today()).unwrap();
    assert_eq!(session.screen(), Screen::ServiceSelection);

    assert_eq!(session.handle(FlowEvent::BookAppointment, today()).unwrap(), Screen::Appointment);

    let tomorrow = today().succ_opt().unwrap();
    session.handle(FlowEvent::Back, tomorrow).unwrap();
    assert_eq!(session.handle(FlowEvent::BookAppointment, tomorrow).unwrap(), Screen::Vitals);
}

#[test]
fn vitals_refresh_profile_measurements() {
    let mut session = signed_in();
    session.handle(FlowEvent::CheckVitals, today()).unwrap();
    session.complete_vitals(todays_reading(), today()).unwrap();

    let patient = session.patient().unwrap();
    assert_eq!(patient.height_cm, 172.0);
    assert_eq!(patient.weight_kg, 68.0);
    assert_eq!(patient.bmi, Some(23.0));
    assert_eq!(session.screen(), Screen::Appointment);
}

#[test]
fn unfinished_vitals_are_refused() {
    let mut session = signed_in();
    session.handle(FlowEvent::CheckVitals, today()).unwrap();

    let reading = VitalsReading { captured_at: None, ..todays_reading() };
    assert_matches!(session.complete_vitals(reading, today()), Err(FlowError::IncompleteVitals));
    assert_eq!(session.screen(), Screen::Vitals);
    assert!(session.vitals().is_none());
}

#[test]
fn full_visit_ends_on_confirmation() {
    let directory = Arc::new(ProviderDirectory::from_source(&SeedCatalog).unwrap());
    let booking = BookingService::new(directory);

    let mut session = signed_in();
    session.handle(FlowEvent::CheckVitals, today()).unwrap();
    session.complete_vitals(todays_reading(), today()).unwrap();
    session.select_symptom(Symptom::Headache, today()).unwrap();
    assert_eq!(session.screen(), Screen::DoctorRecommendation);

    let appointment = booking
        .confirm(
            AppointmentRequest {
                provider_id: 2,
                date: today(),
                time_slot: "10:00 AM".to_string(),
                consultation_type: ConsultationType::InPerson,
                patient: session.booking_contact(today()).unwrap(),
                symptoms: Some("headache".to_string()),
            },
            today(),
        )
        .unwrap();

    assert_eq!(session.record_appointment(appointment, today()).unwrap(), Screen::Confirmation);
    assert_eq!(session.selected_symptom(), Some(Symptom::Headache));
    assert!(session.appointment().is_some());
}

#[test]
fn back_to_home_keeps_signed_in_patient() {
    let mut session = signed_in();
    session.handle(FlowEvent::CheckVitals, today()).unwrap();

    assert_eq!(session.handle(FlowEvent::BackToHome, today()).unwrap(), Screen::Profile);
    assert!(session.patient().is_some());
}

#[test]
fn end_session_clears_everything_but_voice() {
    let mut session = signed_in();
    session.toggle_voice();
    session.handle(FlowEvent::CheckVitals, today()).unwrap();
    session.complete_vitals(todays_reading(), today()).unwrap();

    assert_eq!(session.handle(FlowEvent::EndSession, today()).unwrap(), Screen::Home);
    assert!(session.patient().is_none());
    assert!(session.vitals().is_none());
    assert!(session.voice_enabled());
    assert_matches!(
        session.handle(FlowEvent::ViewProfile, today()),
        Err(FlowError::InvalidTransition { from: Screen::Home, .. })
    );
}

#[test]
fn logout_returns_home() {
    let mut session = signed_in();
    session.logout();

    assert_eq!(session.screen(), Screen::Home);
    assert!(session.patient().is_none());
}

#[test]
fn rejected_event_leaves_session_unchanged() {
    let mut session = signed_in();
    let before = session.clone();

    assert_matches!(
        session.select_symptom(Symptom::Fever, today()),
        Err(FlowError::InvalidTransition { from: Screen::ServiceSelection, .. })
    );
    assert_eq!(session, before);
}

#[test]
fn vitals_report_needs_patient_and_reading() {
    let mut session = signed_in();
    assert_matches!(session.vitals_report(Channel::Sms, today()), Err(FlowError::IncompleteVitals));

    session.handle(FlowEvent::CheckVitals, today()).unwrap();
    session.complete_vitals(todays_reading(), today()).unwrap();

    let sms = session.vitals_report(Channel::Sms, today()).unwrap().unwrap();
    assert_eq!(sms.recipient, "9876543210");
    assert!(sms.body.contains("Temperature: 98.4 °F"));

    let print = session.vitals_report(Channel::Print, today()).unwrap().unwrap();
    assert_eq!(print.recipient, "kiosk-printer");

    assert_matches!(
        PatientSession::new().vitals_report(Channel::Sms, today()),
        Err(FlowError::NoPatient)
    );
}

#[test]
fn data_events_cannot_bypass_their_methods() {
    let mut session = PatientSession::new();
    session.handle(FlowEvent::StartLogin, today()).unwrap();

    let login = FlowEvent::LoginComplete { redirect: LoginRedirect::Vitals };
    assert_matches!(session.handle(login, today()), Err(FlowError::EventNeedsData(_)));
    assert_eq!(session.screen(), Screen::Login);
    assert!(session.patient().is_none());

    let mut session = signed_in();
    session.handle(FlowEvent::CheckVitals, today()).unwrap();
    assert_matches!(
        session.handle(FlowEvent::VitalsComplete, today()),
        Err(FlowError::EventNeedsData(FlowEvent::VitalsComplete))
    );

    session.complete_vitals(todays_reading(), today()).unwrap();
    assert_matches!(
        session.handle(FlowEvent::SymptomSelected, today()),
        Err(FlowError::EventNeedsData(_))
    );
    assert_eq!(session.screen(), Screen::Appointment);

    session.select_symptom(Symptom::Fever, today()).unwrap();
    assert_matches!(
        session.handle(FlowEvent::AppointmentBooked, today()),
        Err(FlowError::EventNeedsData(_))
    );
    assert_eq!(session.screen(), Screen::DoctorRecommendation);
    assert!(session.appointment().is_none());

    let mut session = PatientSession::new();
    session.handle(FlowEvent::StartRegistration, today()).unwrap();
    assert_matches!(
        session.handle(FlowEvent::RegistrationComplete, today()),
        Err(FlowError::EventNeedsData(_))
    );
    assert_eq!(session.screen(), Screen::NewRegistration);
}
