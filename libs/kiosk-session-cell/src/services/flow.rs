// libs/kiosk-session-cell/src/services/flow.rs
use tracing::{debug, warn};

use crate::models::{FlowError, FlowEvent, LoginRedirect, Screen};

/// Facts about the session that steer otherwise ambiguous transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowContext {
    pub has_patient: bool,
    pub vitals_today: bool,
}

/// Screen reached from `from` on `event`.
///
/// `BackToHome` and `EndSession` are accepted everywhere; everything else
/// must appear in the table below.
pub fn next_screen(from: Screen, event: FlowEvent, ctx: FlowContext) -> Result<Screen, FlowError> {
    let next = match (from, event) {
        (_, FlowEvent::EndSession) => Some(Screen::Home),
        (_, FlowEvent::BackToHome) => Some(if ctx.has_patient { Screen::Profile } else { Screen::Home }),

        (Screen::Home, FlowEvent::StartRegistration) => Some(Screen::NewRegistration),
        (Screen::Home, FlowEvent::StartLogin) => Some(Screen::Login),
        (Screen::Home, FlowEvent::ViewProfile) if ctx.has_patient => Some(Screen::Profile),

        (Screen::NewRegistration, FlowEvent::RegistrationComplete) => Some(Screen::ServiceSelection),
        (Screen::NewRegistration, FlowEvent::Back) => Some(Screen::Home),

        (Screen::Login, FlowEvent::LoginComplete { redirect }) => Some(match redirect {
            LoginRedirect::Vitals => Screen::Vitals,
            LoginRedirect::Appointment => Screen::Appointment,
            LoginRedirect::Services => Screen::ServiceSelection,
        }),
        (Screen::Login, FlowEvent::Back) => Some(Screen::Home),

        (Screen::Profile, FlowEvent::ContinueToServices) => Some(Screen::ServiceSelection),

        (Screen::ServiceSelection, FlowEvent::CheckVitals) => Some(Screen::Vitals),
        (Screen::ServiceSelection, FlowEvent::BookAppointment) => {
            Some(if ctx.vitals_today { Screen::Appointment } else { Screen::Vitals })
        }
        (Screen::ServiceSelection, FlowEvent::ViewProfile) => Some(Screen::Profile),

        (Screen::Vitals, FlowEvent::VitalsComplete) => Some(Screen::Appointment),
        (Screen::Vitals, FlowEvent::Back) => Some(Screen::ServiceSelection),

        (Screen::Appointment, FlowEvent::SymptomSelected) => Some(Screen::DoctorRecommendation),
        (Screen::Appointment, FlowEvent::Back) => Some(Screen::ServiceSelection),

        (Screen::DoctorRecommendation, FlowEvent::AppointmentBooked) => Some(Screen::Confirmation),
        (Screen::DoctorRecommendation, FlowEvent::Back) => Some(Screen::Appointment),

        _ => None,
    };

    match next {
        Some(screen) => {
            debug!("Screen {:?} --{}--> {:?}", from, event, screen);
            Ok(screen)
        }
        None => {
            warn!("Invalid screen transition attempted: {} on {:?}", event, from);
            Err(FlowError::InvalidTransition { from, event })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const SIGNED_IN: FlowContext = FlowContext {
        has_patient: true,
        vitals_today: false,
    };

    #[test]
    fn test_booking_without_todays_vitals_goes_to_vitals() {
        assert_eq!(
            next_screen(Screen::ServiceSelection, FlowEvent::BookAppointment, SIGNED_IN).unwrap(),
            Screen::Vitals
        );

        let checked = FlowContext { vitals_today: true, ..SIGNED_IN };
        assert_eq!(
            next_screen(Screen::ServiceSelection, FlowEvent::BookAppointment, checked).unwrap(),
            Screen::Appointment
        );
    }

    #[test]
    fn test_login_redirects() {
        for (redirect, expected) in [
            (LoginRedirect::Vitals, Screen::Vitals),
            (LoginRedirect::Appointment, Screen::Appointment),
            (LoginRedirect::Services, Screen::ServiceSelection),
        ] {
            let event = FlowEvent::LoginComplete { redirect };
            assert_eq!(next_screen(Screen::Login, event, SIGNED_IN).unwrap(), expected);
        }
    }

    #[test]
    fn test_back_to_home_depends_on_patient() {
        assert_eq!(
            next_screen(Screen::Vitals, FlowEvent::BackToHome, SIGNED_IN).unwrap(),
            Screen::Profile
        );
        assert_eq!(
            next_screen(Screen::Login, FlowEvent::BackToHome, FlowContext::default()).unwrap(),
            Screen::Home
        );
    }

    #[test]
    fn test_unlisted_transitions_fail() {
        assert_matches!(
            next_screen(Screen::Home, FlowEvent::VitalsComplete, SIGNED_IN),
            Err(FlowError::InvalidTransition { from: Screen::Home, .. })
        );
        assert_matches!(
            next_screen(Screen::Confirmation, FlowEvent::Back, SIGNED_IN),
            Err(FlowError::InvalidTransition { .. })
        );
        assert_matches!(
            next_screen(Screen::Home, FlowEvent::ViewProfile, FlowContext::default()),
            Err(FlowError::InvalidTransition { .. })
        );
    }
}
