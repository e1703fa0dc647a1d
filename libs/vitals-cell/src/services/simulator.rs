use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::models::{BloodPressure, Measurement, PulseOx, VitalKind, VitalsReading};

/// Source of a single measurement for a vital kind.
pub trait SensorInput: Send {
    fn read(&mut self, kind: VitalKind) -> Measurement;
}

/// Generates plausible readings in place of real hardware.
#[derive(Debug, Clone)]
pub struct VitalsSimulator<R = StdRng> {
    rng: R,
}

impl VitalsSimulator<StdRng> {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Same seed, same sequence of readings.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> VitalsSimulator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn measure(&mut self, kind: VitalKind) -> Measurement {
        let measurement = match kind {
            // Drawn in tenths so the result already has one decimal.
            VitalKind::Temperature => {
                Measurement::Temperature(self.rng.gen_range(970u32..=1004) as f64 / 10.0)
            }
            VitalKind::BloodPressure => Measurement::BloodPressure(BloodPressure {
                systolic: self.rng.gen_range(110..=140),
                diastolic: self.rng.gen_range(70..=90),
            }),
            VitalKind::PulseOx => Measurement::PulseOx(PulseOx {
                heart_rate: self.rng.gen_range(60..=100),
                oxygen_saturation: self.rng.gen_range(95..=100),
            }),
            VitalKind::Weight => Measurement::Weight(self.rng.gen_range(60u32..=80) as f64),
        };

        debug!("Simulated {} reading: {:?}", kind, measurement);
        measurement
    }

    /// `prior` with only the field for `kind` replaced by a fresh simulated value.
    pub fn simulate_reading(&mut self, kind: VitalKind, prior: &VitalsReading) -> VitalsReading {
        let mut reading = prior.clone();
        self.measure(kind).apply_to(&mut reading);
        reading
    }
}

impl<R: Rng + Send> SensorInput for VitalsSimulator<R> {
    fn read(&mut self, kind: VitalKind) -> Measurement {
        self.measure(kind)
    }
}
