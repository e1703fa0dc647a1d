// libs/kiosk-session-cell/tests/login_test.rs
use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;

use kiosk_session_cell::models::{BiometricMethod, LoginError, LoginMethod};
use kiosk_session_cell::services::{LoginService, MockBiometricVerifier};

fn service(verifier: MockBiometricVerifier) -> LoginService {
    LoginService::new(Arc::new(verifier))
}

#[tokio::test]
async fn pin_login_returns_profile_for_id() {
    let profile = service(MockBiometricVerifier::accepting())
        .login(" PAT1023 ", LoginMethod::Pin("4321".to_string()))
        .await
        .unwrap();

    assert_eq!(profile.patient_id, "PAT1023");
    assert_eq!(profile.name, "Casey Williams");
    assert_eq!(profile.email, "casey.williams@email.com");
    assert_eq!(profile.gender, "Other");
}

#[tokio::test]
async fn same_id_always_yields_same_profile() {
    let login = service(MockBiometricVerifier::accepting());

    let first = login.login("PAT88", LoginMethod::Otp("123456".to_string())).await.unwrap();
    let second = login.login("PAT88", LoginMethod::Pin("0000".to_string())).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn codes_must_have_exact_length() {
    let login = service(MockBiometricVerifier::accepting());

    assert_matches!(
        login.login("PAT1", LoginMethod::Pin("123".to_string())).await,
        Err(LoginError::InvalidPin)
    );
    assert_matches!(
        login.login("PAT1", LoginMethod::Pin("12a4".to_string())).await,
        Err(LoginError::InvalidPin)
    );
    assert_matches!(
        login.login("PAT1", LoginMethod::Otp("12345".to_string())).await,
        Err(LoginError::InvalidOtp)
    );
}

#[tokio::test]
async fn patient_id_is_required() {
    assert_matches!(
        service(MockBiometricVerifier::accepting())
            .login("   ", LoginMethod::Fingerprint)
            .await,
        Err(LoginError::MissingPatientId)
    );
}

#[tokio::test]
async fn rejected_biometric_fails_login() {
    assert_matches!(
        service(MockBiometricVerifier::rejecting())
            .login("PAT5", LoginMethod::Face)
            .await,
        Err(LoginError::BiometricRejected(BiometricMethod::Face))
    );
}

#[tokio::test]
async fn fingerprint_waits_for_scanner() {
    let verifier = MockBiometricVerifier::accepting().with_delay(Duration::from_millis(20));

    let profile = service(verifier).login("PAT5", LoginMethod::Fingerprint).await.unwrap();

    assert_eq!(profile.name, "Riley Smith");
}
