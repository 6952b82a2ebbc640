use chrono::NaiveDate;
use itertools::Itertools;

use crate::core::{carrier::Carrier, factors::ReferenceSource};

/// Recoverable analysis failure: the affected section is withheld, the process keeps going.
#[derive(Clone, Debug, PartialEq, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    #[display("the period start ({start}) must not be after its end ({end})")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },

    #[display("the period end ({end}) must not be in the future (today is {today})")]
    FuturePeriodEnd { end: NaiveDate, today: NaiveDate },

    #[display("`{field}` must be a number, got `{value}`")]
    NotANumber { field: &'static str, value: String },

    #[display("`{field}` must be a non-negative number, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[display("`{field}` must lie within {min}..={max}, got {value}")]
    OutOfRange { field: &'static str, value: f64, min: f64, max: f64 },

    #[display("{reference} does not publish an emission factor for {carrier}")]
    UnsupportedSource { reference: ReferenceSource, carrier: Carrier },

    #[display("{section} is withheld, missing: {}", missing.iter().join(", "))]
    MissingPrerequisite { section: &'static str, missing: Vec<&'static str> },

    #[display("the assumed occupancy must be positive, got {value} %")]
    NonPositiveOccupancy { value: f64 },

    #[display("space-kilometres must be positive to derive the reference occupancy")]
    NonPositiveSpaceKilometers,

    #[display("the comparison already contains `{label}`")]
    DuplicateMode { label: String },
}

impl AnalysisError {
    /// Validate that the value is a finite non-negative number.
    pub fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() && value >= 0.0 { Ok(value) } else { Err(Self::Negative { field, value }) }
    }

    /// Parse the field as a number, reporting the field name on failure.
    pub fn parse_number(field: &'static str, value: &str) -> Result<f64, Self> {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| !number.is_nan())
            .ok_or_else(|| Self::NotANumber { field, value: value.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_ok() {
        assert_eq!(AnalysisError::parse_number("km", " 12.5 "), Ok(12.5));
    }

    #[test]
    fn parse_number_rejects_garbage() {
        assert_eq!(
            AnalysisError::parse_number("km", "twelve"),
            Err(AnalysisError::NotANumber { field: "km", value: "twelve".to_string() }),
        );
        assert!(AnalysisError::parse_number("km", "NaN").is_err());
    }

    #[test]
    fn ensure_non_negative_ok() {
        assert_eq!(AnalysisError::ensure_non_negative("km", 0.0), Ok(0.0));
        assert!(AnalysisError::ensure_non_negative("km", -1.0).is_err());
        assert!(AnalysisError::ensure_non_negative("km", f64::INFINITY).is_err());
    }

    #[test]
    fn missing_prerequisite_display() {
        let error = AnalysisError::MissingPrerequisite {
            section: "comparison",
            missing: vec!["ridepooling emissions", "bus projection"],
        };
        assert_eq!(
            error.to_string(),
            "comparison is withheld, missing: ridepooling emissions, bus projection",
        );
    }
}
