pub mod flow;
pub mod login;
pub mod registration;
pub mod session;

pub use flow::{next_screen, FlowContext};
pub use login::{demo_profile, BiometricVerifier, LoginService, MockBiometricVerifier};
pub use registration::{RegistrationForm, RegistrationService};
pub use session::PatientSession;
