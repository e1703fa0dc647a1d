use chrono::Utc;
use tracing::{debug, info, warn};

use crate::models::{
    BmiClassification, Measurement, VitalKind, VitalsError, VitalsReading, VitalsSessionState,
};
use crate::services::calculator::{classify_bmi, compute_bmi};
use crate::services::simulator::SensorInput;

/// One patient's pass through the vitals sensors.
///
/// The session only moves forward. Every recorded measurement is kept in an
/// append-only log; browsing back and forth moves a display cursor over that
/// log and never changes it. Once complete, the reading is frozen.
#[derive(Debug, Clone)]
pub struct VitalsSession {
    state: VitalsSessionState,
    reading: VitalsReading,
    log: Vec<Measurement>,
    display_index: Option<usize>,
}

impl Default for VitalsSession {
    fn default() -> Self {
        Self::new()
    }
}

impl VitalsSession {
    pub fn new() -> Self {
        Self {
            state: VitalsSessionState::NotStarted,
            reading: VitalsReading::default(),
            log: Vec::new(),
            display_index: None,
        }
    }

    pub fn state(&self) -> VitalsSessionState {
        self.state
    }

    pub fn reading(&self) -> &VitalsReading {
        &self.reading
    }

    pub fn log(&self) -> &[Measurement] {
        &self.log
    }

    pub fn is_complete(&self) -> bool {
        self.state == VitalsSessionState::Complete
    }

    /// The frozen reading, once the session has completed.
    pub fn completed_reading(&self) -> Option<&VitalsReading> {
        self.is_complete().then_some(&self.reading)
    }

    /// Get all valid next states for a given state
    pub fn get_valid_transitions(state: &VitalsSessionState) -> Vec<VitalsSessionState> {
        match state {
            VitalsSessionState::NotStarted => {
                vec![VitalsSessionState::Measuring(VitalKind::SEQUENCE[0])]
            }
            VitalsSessionState::Measuring(kind) => vec![VitalsSessionState::Recorded(*kind)],
            VitalsSessionState::Recorded(kind) => match kind.next() {
                Some(next) => vec![VitalsSessionState::Measuring(next)],
                None => vec![VitalsSessionState::HeightPending],
            },
            VitalsSessionState::HeightPending => vec![
                VitalsSessionState::BmiPending,
                VitalsSessionState::Complete, // height skipped
            ],
            VitalsSessionState::BmiPending => vec![VitalsSessionState::Complete],
            // Terminal
            VitalsSessionState::Complete => vec![],
        }
    }

    // ==============================================================================
    // SESSION STEPS
    // ==============================================================================

    /// Advance to the next sensor, or to height entry after the last one.
    pub fn next_step(&mut self) -> Result<VitalsSessionState, VitalsError> {
        let next = match self.state {
            VitalsSessionState::NotStarted => VitalsSessionState::Measuring(VitalKind::SEQUENCE[0]),
            VitalsSessionState::Recorded(kind) => match kind.next() {
                Some(next) => VitalsSessionState::Measuring(next),
                None => VitalsSessionState::HeightPending,
            },
            _ => return Err(self.rejected("move to the next step")),
        };

        self.transition_to(next, "move to the next step")?;
        Ok(next)
    }

    /// Store a measurement for the sensor currently in use.
    pub fn record(&mut self, measurement: Measurement) -> Result<(), VitalsError> {
        let next = VitalsSessionState::Recorded(measurement.kind());
        self.validate_transition(&next, "record a measurement")?;
        measurement.validate()?;

        measurement.apply_to(&mut self.reading);
        self.log.push(measurement);
        self.display_index = Some(self.log.len() - 1);
        self.state = next;

        debug!("Recorded {} measurement ({} in log)", measurement.kind(), self.log.len());
        Ok(())
    }

    /// Take the current sensor's measurement from `sensor` and record it.
    pub fn measure_with(&mut self, sensor: &mut dyn SensorInput) -> Result<Measurement, VitalsError> {
        let kind = match self.state {
            VitalsSessionState::Measuring(kind) => kind,
            _ => return Err(self.rejected("take a measurement")),
        };

        let measurement = sensor.read(kind);
        self.record(measurement)?;
        Ok(measurement)
    }

    pub fn enter_height(&mut self, height_cm: f64) -> Result<(), VitalsError> {
        self.validate_transition(&VitalsSessionState::BmiPending, "enter height")?;

        if !height_cm.is_finite() || height_cm <= 0.0 {
            return Err(VitalsError::InvalidMeasurement(format!(
                "height must be a positive number of centimetres, got {}",
                height_cm
            )));
        }

        self.reading.height = Some(height_cm);
        self.state = VitalsSessionState::BmiPending;
        Ok(())
    }

    /// Finish without height; the reading carries no BMI.
    pub fn skip_height(&mut self) -> Result<&VitalsReading, VitalsError> {
        if self.state != VitalsSessionState::HeightPending {
            return Err(self.rejected("skip height"));
        }

        info!("Height skipped, completing vitals without BMI");
        self.complete();
        Ok(&self.reading)
    }

    pub fn calculate_bmi(&mut self) -> Result<BmiClassification, VitalsError> {
        if self.state != VitalsSessionState::BmiPending {
            return Err(self.rejected("calculate BMI"));
        }

        let height = self.reading.height.ok_or_else(|| {
            VitalsError::InvalidMeasurement("height has not been entered".to_string())
        })?;
        let weight = self.reading.weight.ok_or_else(|| {
            VitalsError::InvalidMeasurement("weight has not been recorded".to_string())
        })?;

        let bmi = compute_bmi(height, weight)?;
        self.reading.bmi = Some(bmi);
        self.complete();

        Ok(classify_bmi(bmi))
    }

    // ==============================================================================
    // DISPLAY CURSOR
    // ==============================================================================

    pub fn displayed(&self) -> Option<&Measurement> {
        self.display_index.and_then(|idx| self.log.get(idx))
    }

    pub fn show_previous(&mut self) -> Option<&Measurement> {
        if let Some(idx) = self.display_index {
            self.display_index = Some(idx.saturating_sub(1));
        }
        self.displayed()
    }

    pub fn show_next(&mut self) -> Option<&Measurement> {
        if let Some(idx) = self.display_index {
            if idx + 1 < self.log.len() {
                self.display_index = Some(idx + 1);
            }
        }
        self.displayed()
    }

    // ==============================================================================
    // PRIVATE HELPER METHODS
    // ==============================================================================

    fn validate_transition(
        &self,
        next: &VitalsSessionState,
        action: &'static str,
    ) -> Result<(), VitalsError> {
        if Self::get_valid_transitions(&self.state).contains(next) {
            Ok(())
        } else {
            Err(self.rejected(action))
        }
    }

    fn transition_to(
        &mut self,
        next: VitalsSessionState,
        action: &'static str,
    ) -> Result<(), VitalsError> {
        self.validate_transition(&next, action)?;
        debug!("Vitals session {:?} -> {:?}", self.state, next);
        self.state = next;
        Ok(())
    }

    fn rejected(&self, action: &'static str) -> VitalsError {
        if self.is_complete() {
            return VitalsError::SessionClosed;
        }

        warn!("Invalid vitals action attempted: {} while {:?}", action, self.state);
        VitalsError::InvalidTransition {
            from: self.state,
            action,
        }
    }

    fn complete(&mut self) {
        self.reading.captured_at = Some(Utc::now());
        self.state = VitalsSessionState::Complete;
    }
}
