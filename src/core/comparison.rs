use std::fmt::{Display, Formatter};

use enumset::EnumSet;
use serde::Serialize;

use crate::{
    core::{emissions::RidepoolingEmissions, occupancy::BusProjection},
    error::AnalysisError,
    quantity::emissions::GramsPerPassengerKilometer,
};

/// Transport mode with published Well-to-Wheel emissions.
///
/// German Environment Agency, «Umweltfreundlich mobil!» (2022).
#[derive(Debug, Hash, enumset::EnumSetType)]
pub enum ReferenceMode {
    Car,
    Bus,
    TramMetro,
    EBike,
    CargoEBike,
    Bicycle,
    Walking,
}

impl Display for ReferenceMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Car => write!(f, "Car (driver)"),
            Self::Bus => write!(f, "Bus"),
            Self::TramMetro => write!(f, "Tram/Metro"),
            Self::EBike => write!(f, "E-bike/Pedelec"),
            Self::CargoEBike => write!(f, "Cargo e-bike"),
            Self::Bicycle => write!(f, "Bicycle"),
            Self::Walking => write!(f, "Walking"),
        }
    }
}

impl ReferenceMode {
    pub const fn co2_per_pkm(self) -> GramsPerPassengerKilometer {
        GramsPerPassengerKilometer(match self {
            Self::Car => 152.86,
            Self::Bus => 80.54,
            Self::TramMetro => 59.30,
            Self::EBike | Self::CargoEBike => 3.9,
            Self::Bicycle | Self::Walking => 0.0,
        })
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonPoint {
    #[serde(rename = "mode")]
    pub label: String,

    #[serde(rename = "co2_per_pkm_g")]
    pub co2_per_pkm: GramsPerPassengerKilometer,
}

/// Emissions per passenger-kilometre by mode, unique labels in insertion order.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series(Vec<ComparisonPoint>);

impl Series {
    pub fn try_push(
        &mut self,
        label: impl Into<String>,
        co2_per_pkm: GramsPerPassengerKilometer,
    ) -> Result<(), AnalysisError> {
        let label = label.into();
        if self.contains(&label) {
            return Err(AnalysisError::DuplicateMode { label });
        }
        self.0.push(ComparisonPoint { label, co2_per_pkm });
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|point| point.label == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComparisonPoint> {
        self.0.iter()
    }
}

/// Ridepooling system against the bus and the other reference modes.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Comparison {
    pub ridepooling: ComparisonPoint,
    pub bus: BusProjection,
    pub series: Series,
}

impl Comparison {
    pub const DEFAULT_LABEL: &'static str = "Ridepooling system";

    /// Build the series: the ridepooling system first, then the reference modes with the
    /// literature bus value replaced by the projected one.
    pub fn try_new(
        system_name: &str,
        ridepooling: &RidepoolingEmissions,
        bus: BusProjection,
    ) -> Result<Self, AnalysisError> {
        let ridepooling =
            ComparisonPoint { label: label(system_name), co2_per_pkm: ridepooling.per_passenger_km };
        let mut series = Series::default();
        series.try_push(ridepooling.label.clone(), ridepooling.co2_per_pkm)?;
        for mode in EnumSet::<ReferenceMode>::all() {
            let co2_per_pkm =
                if mode == ReferenceMode::Bus { bus.co2_per_pkm } else { mode.co2_per_pkm() };
            series.try_push(mode.to_string(), co2_per_pkm)?;
        }
        Ok(Self { ridepooling, bus, series })
    }

    /// Ridepooling minus bus emissions per passenger-kilometre.
    pub fn difference(&self) -> GramsPerPassengerKilometer {
        self.ridepooling.co2_per_pkm - self.bus.co2_per_pkm
    }
}

/// Label of the ridepooling system that never collides with a reference mode.
fn label(system_name: &str) -> String {
    let system_name = system_name.trim();
    if system_name.is_empty() {
        Comparison::DEFAULT_LABEL.to_string()
    } else if EnumSet::<ReferenceMode>::all()
        .iter()
        .any(|mode| mode.to_string().eq_ignore_ascii_case(system_name))
    {
        format!("{system_name} (ridepooling)")
    } else {
        system_name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use itertools::Itertools;

    use super::*;
    use crate::{
        core::{
            carrier::PerCarrier,
            occupancy::{BusScenario, ReferenceOccupancy},
        },
        quantity::{emissions::Kilograms, proportions::Percentage},
    };

    fn ridepooling(co2_per_pkm: f64) -> RidepoolingEmissions {
        RidepoolingEmissions {
            per_carrier: PerCarrier::default(),
            total: Kilograms::ZERO,
            per_passenger_km: GramsPerPassengerKilometer(co2_per_pkm),
        }
    }

    fn get(series: &Series, label: &str) -> Option<GramsPerPassengerKilometer> {
        series.iter().find(|point| point.label == label).map(|point| point.co2_per_pkm)
    }

    fn bus(assumed: f64) -> BusProjection {
        BusScenario {
            reference_occupancy: ReferenceOccupancy::Fixed {
                occupancy: ReferenceOccupancy::LITERATURE,
            },
            assumed_occupancy: Some(Percentage(assumed)),
            ..BusScenario::default()
        }
        .project()
        .unwrap()
    }

    #[test]
    fn series_order_ok() {
        let comparison = Comparison::try_new("bussi", &ridepooling(172.8), bus(37.4)).unwrap();
        assert_eq!(
            comparison.series.iter().map(|point| point.label.as_str()).collect_vec(),
            vec![
                "bussi",
                "Car (driver)",
                "Bus",
                "Tram/Metro",
                "E-bike/Pedelec",
                "Cargo e-bike",
                "Bicycle",
                "Walking",
            ],
        );
        assert_abs_diff_eq!(get(&comparison.series, "Bus").unwrap().0, 40.27, epsilon = 1e-9);
        assert_eq!(get(&comparison.series, "Walking"), Some(GramsPerPassengerKilometer::ZERO));
        assert_eq!(get(&comparison.series, "Bicycle"), Some(GramsPerPassengerKilometer::ZERO));
        assert_abs_diff_eq!(comparison.difference().0, 132.53, epsilon = 1e-9);
    }

    #[test]
    fn empty_name_gets_default_label() {
        let comparison = Comparison::try_new("  ", &ridepooling(0.0), bus(18.7)).unwrap();
        assert_eq!(comparison.ridepooling.label, Comparison::DEFAULT_LABEL);
    }

    #[test]
    fn colliding_name_is_disambiguated() {
        let comparison = Comparison::try_new("bus", &ridepooling(50.0), bus(18.7)).unwrap();
        assert_eq!(comparison.ridepooling.label, "bus (ridepooling)");
        assert_eq!(comparison.series.iter().count(), 8);
    }

    #[test]
    fn duplicate_push_fails() {
        let mut series = Series::default();
        series.try_push("Bus", GramsPerPassengerKilometer(1.0)).unwrap();
        assert_eq!(
            series.try_push("Bus", GramsPerPassengerKilometer(2.0)),
            Err(AnalysisError::DuplicateMode { label: "Bus".to_string() }),
        );
        assert_eq!(series.iter().count(), 1);
    }

    #[test]
    fn serialize_ok() {
        let mut series = Series::default();
        series.try_push("Bicycle", GramsPerPassengerKilometer(0.0)).unwrap();
        assert_eq!(
            serde_json::to_string(&series).unwrap(),
            r#"[{"mode":"Bicycle","co2_per_pkm_g":0.0}]"#,
        );
    }
}
