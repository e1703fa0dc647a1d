use tracing::debug;

use crate::models::{BmiClassification, BmiStatus, SeverityColor, VitalsError};

pub const UNDERWEIGHT_BELOW: f64 = 18.5;
pub const OVERWEIGHT_FROM: f64 = 25.0;
pub const OBESE_FROM: f64 = 30.0;

/// Body mass index from height in centimetres and weight in kilograms,
/// rounded half-up to one decimal.
pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> Result<f64, VitalsError> {
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(VitalsError::InvalidMeasurement(format!(
            "height must be a positive number of centimetres, got {}",
            height_cm
        )));
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(VitalsError::InvalidMeasurement(format!(
            "weight must be a positive number of kilograms, got {}",
            weight_kg
        )));
    }

    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    let rounded = (bmi * 10.0).round() / 10.0;

    debug!("BMI for {} cm / {} kg: {}", height_cm, weight_kg, rounded);
    Ok(rounded)
}

/// Adult BMI bands. The same table applies to every patient.
pub fn classify_bmi(bmi: f64) -> BmiClassification {
    if bmi < UNDERWEIGHT_BELOW {
        BmiClassification {
            status: BmiStatus::Underweight,
            severity_color: SeverityColor::Orange,
            description: "Below normal weight range",
        }
    } else if bmi < OVERWEIGHT_FROM {
        BmiClassification {
            status: BmiStatus::Normal,
            severity_color: SeverityColor::Green,
            description: "Healthy weight range",
        }
    } else if bmi < OBESE_FROM {
        BmiClassification {
            status: BmiStatus::Overweight,
            severity_color: SeverityColor::Orange,
            description: "Above normal weight range",
        }
    } else {
        BmiClassification {
            status: BmiStatus::Obese,
            severity_color: SeverityColor::Red,
            description: "Significantly above normal weight range",
        }
    }
}
