pub mod calculator;
pub mod session;
pub mod simulator;

pub use calculator::{classify_bmi, compute_bmi};
pub use session::VitalsSession;
pub use simulator::{SensorInput, VitalsSimulator};
