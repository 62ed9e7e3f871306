//! Sample Validation
//!
//! Runs before any upstream step. Only identity and numeric sanity are
//! checked here; out-of-range readings are clamped later by the risk model.

use thiserror::Error;

use super::types::SampleInput;

/// Rejected diagnosis request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputValidationError {
    #[error("variety identifier is required")]
    MissingVariety,

    #[error("reading `{field}` is not a number")]
    NotANumber { field: &'static str },
}

/// Validate a sample before the pipeline touches it
pub fn validate_sample(sample: &SampleInput) -> Result<(), InputValidationError> {
    if sample.variety.trim().is_empty() {
        return Err(InputValidationError::MissingVariety);
    }

    let readings = &sample.readings;
    let numeric = [
        ("temperature_c", readings.temperature_c),
        ("humidity_pct", readings.humidity_pct),
        ("rainfall_mm", readings.rainfall_mm),
    ];

    for (field, value) in numeric {
        if matches!(value, Some(v) if v.is_nan()) {
            return Err(InputValidationError::NotANumber { field });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::sample::EnvironmentalReadings;

    #[test]
    fn test_accepts_minimal_sample() {
        assert!(validate_sample(&SampleInput::new("IR64")).is_ok());
    }

    #[test]
    fn test_rejects_blank_variety() {
        assert_eq!(
            validate_sample(&SampleInput::new("   ")),
            Err(InputValidationError::MissingVariety)
        );
    }

    #[test]
    fn test_rejects_nan_reading() {
        let sample = SampleInput::new("IR64")
            .with_readings(EnvironmentalReadings::new().with_humidity(f32::NAN));

        assert_eq!(
            validate_sample(&sample),
            Err(InputValidationError::NotANumber { field: "humidity_pct" })
        );
    }

    #[test]
    fn test_out_of_range_is_not_rejected() {
        let sample = SampleInput::new("IR64")
            .with_readings(EnvironmentalReadings::new().with_temperature(80.0).with_humidity(140.0));
        assert!(validate_sample(&sample).is_ok());
    }
}
