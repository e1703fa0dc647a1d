use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ==============================================================================
// VITAL KINDS
// ==============================================================================

/// Sensors the kiosk walks a patient through, in measuring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VitalKind {
    Temperature,
    BloodPressure,
    PulseOx,
    Weight,
}

impl VitalKind {
    pub const SEQUENCE: [VitalKind; 4] = [
        VitalKind::Temperature,
        VitalKind::BloodPressure,
        VitalKind::PulseOx,
        VitalKind::Weight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VitalKind::Temperature => "temperature",
            VitalKind::BloodPressure => "blood-pressure",
            VitalKind::PulseOx => "pulse-ox",
            VitalKind::Weight => "weight",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VitalKind::Temperature => "Temperature",
            VitalKind::BloodPressure => "Blood Pressure",
            VitalKind::PulseOx => "Pulse Oximeter",
            VitalKind::Weight => "Weight Measurement",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            VitalKind::Temperature => "°F",
            VitalKind::BloodPressure => "mmHg",
            VitalKind::PulseOx => "bpm / %",
            VitalKind::Weight => "kg",
        }
    }

    /// What the kiosk reads out before taking the measurement.
    pub fn instruction(&self) -> &'static str {
        match self {
            VitalKind::Temperature => {
                "Please place the digital thermometer on your forehead and hold steady"
            }
            VitalKind::BloodPressure => {
                "Please insert your arm into the blood pressure cuff and remain still"
            }
            VitalKind::PulseOx => "Please place your index finger on the pulse oximeter sensor",
            VitalKind::Weight => {
                "Please step on the scale and stand straight for weight measurement"
            }
        }
    }

    /// The kind measured after this one, if any.
    pub fn next(&self) -> Option<VitalKind> {
        match self {
            VitalKind::Temperature => Some(VitalKind::BloodPressure),
            VitalKind::BloodPressure => Some(VitalKind::PulseOx),
            VitalKind::PulseOx => Some(VitalKind::Weight),
            VitalKind::Weight => None,
        }
    }
}

impl fmt::Display for VitalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VitalKind {
    type Err = VitalsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        VitalKind::SEQUENCE
            .iter()
            .copied()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| VitalsError::UnknownVitalKind(s.to_string()))
    }
}

// ==============================================================================
// READINGS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: u32,
    pub diastolic: u32,
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PulseOx {
    pub heart_rate: u32,
    pub oxygen_saturation: u32,
}

/// One sensor result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Measurement {
    Temperature(f64),
    BloodPressure(BloodPressure),
    PulseOx(PulseOx),
    Weight(f64),
}

impl Measurement {
    pub fn kind(&self) -> VitalKind {
        match self {
            Measurement::Temperature(_) => VitalKind::Temperature,
            Measurement::BloodPressure(_) => VitalKind::BloodPressure,
            Measurement::PulseOx(_) => VitalKind::PulseOx,
            Measurement::Weight(_) => VitalKind::Weight,
        }
    }

    /// Reject values no sensor could produce.
    pub fn validate(&self) -> Result<(), VitalsError> {
        let ok = match self {
            Measurement::Temperature(t) => t.is_finite() && *t > 0.0,
            Measurement::Weight(w) => w.is_finite() && *w > 0.0,
            Measurement::BloodPressure(bp) => bp.systolic > 0 && bp.diastolic > 0,
            Measurement::PulseOx(po) => po.heart_rate > 0 && po.oxygen_saturation <= 100,
        };

        if ok {
            Ok(())
        } else {
            Err(VitalsError::InvalidMeasurement(format!("{:?}", self)))
        }
    }

    /// Write this measurement into its slot on `reading`, leaving other fields untouched.
    pub fn apply_to(&self, reading: &mut VitalsReading) {
        match *self {
            Measurement::Temperature(t) => reading.temperature = Some(t),
            Measurement::BloodPressure(bp) => reading.blood_pressure = Some(bp),
            Measurement::PulseOx(po) => reading.pulse_ox = Some(po),
            Measurement::Weight(w) => reading.weight = Some(w),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsReading {
    /// °F
    pub temperature: Option<f64>,
    pub blood_pressure: Option<BloodPressure>,
    pub pulse_ox: Option<PulseOx>,
    /// cm
    pub height: Option<f64>,
    /// kg
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
    pub captured_at: Option<DateTime<Utc>>,
}

impl VitalsReading {
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.blood_pressure.is_none()
            && self.pulse_ox.is_none()
            && self.height.is_none()
            && self.weight.is_none()
    }
}

// ==============================================================================
// BMI
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiStatus {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityColor {
    Green,
    Orange,
    Red,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiClassification {
    pub status: BmiStatus,
    pub severity_color: SeverityColor,
    pub description: &'static str,
}

// ==============================================================================
// SESSION STATE
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "kind", rename_all = "kebab-case")]
pub enum VitalsSessionState {
    NotStarted,
    Measuring(VitalKind),
    Recorded(VitalKind),
    HeightPending,
    BmiPending,
    Complete,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum VitalsError {
    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),

    #[error("Vitals session is complete and read-only")]
    SessionClosed,

    #[error("Cannot {action} while the vitals session is {from:?}")]
    InvalidTransition {
        from: VitalsSessionState,
        action: &'static str,
    },

    #[error("Unknown vital kind: {0}")]
    UnknownVitalKind(String),
}
