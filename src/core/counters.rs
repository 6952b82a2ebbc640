use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Observation period, both ends inclusive.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for Period {
    /// Calendar year 2022.
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2022, 12, 31).unwrap_or_default(),
        }
    }
}

impl Period {
    /// Check that the period is ordered and has already ended by `today`.
    pub fn validate(self, today: NaiveDate) -> Result<Self, AnalysisError> {
        if self.start > self.end {
            Err(AnalysisError::InvalidPeriod { start: self.start, end: self.end })
        } else if self.end > today {
            Err(AnalysisError::FuturePeriodEnd { end: self.end, today })
        } else {
            Ok(self)
        }
    }

    #[must_use]
    pub fn n_days(self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Transport performance of the ridepooling system over the period.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OperationalCounters {
    pub completed_bookings: u64,
    pub transported_passengers: u64,
    pub period: Period,
}

impl OperationalCounters {
    pub fn try_new(
        completed_bookings: u64,
        transported_passengers: u64,
        period: Period,
        today: NaiveDate,
    ) -> Result<Self, AnalysisError> {
        Ok(Self { completed_bookings, transported_passengers, period: period.validate(today)? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn period(start: (i32, u32, u32), end: (i32, u32, u32)) -> Period {
        Period {
            start: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        }
    }

    #[test]
    fn valid_period_ok() {
        let counters =
            OperationalCounters::try_new(8450, 13839, period((2022, 1, 1), (2022, 12, 31)), today())
                .unwrap();
        assert_eq!(counters.period.n_days(), 365);
    }

    #[test]
    fn default_is_2022() {
        assert_eq!(Period::default(), period((2022, 1, 1), (2022, 12, 31)));
    }

    #[test]
    fn single_day_period_ok() {
        assert!(period((2024, 6, 1), (2024, 6, 1)).validate(today()).is_ok());
    }

    #[test]
    fn reversed_period_fails() {
        assert!(matches!(
            period((2022, 12, 31), (2022, 1, 1)).validate(today()),
            Err(AnalysisError::InvalidPeriod { .. }),
        ));
    }

    #[test]
    fn future_period_fails() {
        assert!(matches!(
            OperationalCounters::try_new(1, 1, period((2024, 1, 1), (2024, 6, 2)), today()),
            Err(AnalysisError::FuturePeriodEnd { .. }),
        ));
    }
}
