use chrono::NaiveDate;
use itertools::Itertools;
use serde::Deserialize;

use crate::{
    core::{
        comparison::Comparison,
        counters::{OperationalCounters, Period},
        emissions::RidepoolingEmissions,
        factors::{EmissionFactors, FactorSelections},
        fleet::FleetTotals,
        metrics::PerformanceMetrics,
        occupancy::{BusProjection, BusScenario},
        vehicle::{Fleet, VehicleRecord},
    },
    error::AnalysisError,
    presets::SystemPreset,
    prelude::*,
};

/// Analysis inputs as read from the analysis file.
#[must_use]
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisInput {
    /// Ridepooling system name, defaults to the preset name.
    #[serde(default)]
    pub name: String,

    /// Fills in the name, the counters, and the leading vehicles.
    #[serde(default)]
    pub preset: Option<SystemPreset>,

    #[serde(default)]
    pub completed_bookings: Option<u64>,

    #[serde(default)]
    pub transported_passengers: Option<u64>,

    #[serde(default)]
    pub period: Period,

    /// Vehicles added after the preset fleet.
    #[serde(default)]
    pub vehicles: Fleet,

    /// Number of most recently added vehicles to drop.
    #[serde(default)]
    pub drop_last: usize,

    #[serde(default)]
    pub emission_factors: FactorSelections,

    #[serde(default)]
    pub bus: BusScenario,
}

impl AnalysisInput {
    pub fn system_name(&self) -> String {
        match self.preset {
            Some(preset) if self.name.trim().is_empty() => preset.to_string(),
            _ => self.name.clone(),
        }
    }

    /// Preset counters unless overridden, zero when neither is given.
    pub fn counters(&self) -> (u64, u64) {
        (
            self.completed_bookings
                .or_else(|| self.preset.map(SystemPreset::completed_bookings))
                .unwrap_or_default(),
            self.transported_passengers
                .or_else(|| self.preset.map(SystemPreset::transported_passengers))
                .unwrap_or_default(),
        )
    }

    /// Preset fleet followed by the listed vehicles, minus the dropped ones.
    pub fn fleet(&self) -> Fleet {
        let mut fleet = self.preset.map(SystemPreset::fleet).unwrap_or_default();
        fleet.extend(self.vehicles.iter().cloned());
        for vehicle in fleet.pop_n(self.drop_last) {
            debug!(%vehicle.vehicle_type, "dropped");
        }
        fleet
    }

    pub fn push_vehicle(&mut self, vehicle: VehicleRecord) {
        self.vehicles.push(vehicle);
    }
}

/// Every section of the analysis, each either computed or withheld.
#[must_use]
#[derive(Debug)]
pub struct Analysis {
    pub name: String,
    pub fleet: Fleet,
    pub counters: Result<OperationalCounters, AnalysisError>,
    pub totals: Result<FleetTotals, AnalysisError>,
    pub metrics: Result<PerformanceMetrics, AnalysisError>,
    pub factors: Result<EmissionFactors, AnalysisError>,
    pub emissions: Result<RidepoolingEmissions, AnalysisError>,
    pub bus: Result<BusProjection, AnalysisError>,
    pub comparison: Result<Comparison, AnalysisError>,
}

impl Analysis {
    /// Run the sections in dependency order.
    ///
    /// A failing section withholds every section that depends on it.
    #[instrument(skip_all, fields(name = %input.name))]
    pub fn run(input: &AnalysisInput, today: NaiveDate) -> Self {
        let name = input.system_name();
        let fleet = input.fleet();
        info!(n_vehicles = fleet.len(), "running the analysis…");

        let (completed_bookings, transported_passengers) = input.counters();
        let counters = OperationalCounters::try_new(
            completed_bookings,
            transported_passengers,
            input.period,
            today,
        );
        let totals = fleet.validate().map(|()| fleet.totals());

        let metrics = match (&totals, &counters) {
            (Ok(totals), Ok(counters)) => Ok(PerformanceMetrics::new(totals, counters)),
            _ => Err(missing(
                "performance metrics",
                [("fleet totals", totals.is_err()), ("operational counters", counters.is_err())],
            )),
        };

        let factors = input.emission_factors.resolve();

        let emissions = match (&totals, &metrics, &factors) {
            (Ok(totals), Ok(metrics), Ok(factors)) => {
                Ok(RidepoolingEmissions::new(totals, factors, metrics.passenger_distance))
            }
            _ => Err(missing(
                "ridepooling emissions",
                [
                    ("fleet totals", totals.is_err()),
                    ("passenger-kilometres", metrics.is_err()),
                    ("emission factors", factors.is_err()),
                ],
            )),
        };

        let bus = input.bus.project();

        let comparison = match (&emissions, &bus) {
            (Ok(emissions), Ok(bus)) => Comparison::try_new(&name, emissions, *bus),
            _ => Err(missing(
                "comparison",
                [
                    ("ridepooling emissions per passenger-kilometre", emissions.is_err()),
                    ("bus projection", bus.is_err()),
                ],
            )),
        };

        let analysis =
            Self { name, fleet, counters, totals, metrics, factors, emissions, bus, comparison };
        analysis.trace();
        analysis
    }

    fn trace(&self) {
        for (section, error) in self.errors() {
            warn!(section, %error, "withheld");
        }
        if let Ok(metrics) = &self.metrics {
            debug!(
                passenger_distance = %metrics.passenger_distance,
                empty_distance_share = %metrics.empty_distance_share,
                "performance metrics",
            );
        }
        if let Ok(comparison) = &self.comparison {
            info!(
                ridepooling = %comparison.ridepooling.co2_per_pkm,
                bus = %comparison.bus.co2_per_pkm,
                "compared",
            );
        }
    }

    /// Withheld sections in dependency order.
    pub fn errors(&self) -> impl Iterator<Item = (&'static str, &AnalysisError)> {
        [
            ("operational counters", self.counters.as_ref().err()),
            ("fleet totals", self.totals.as_ref().err()),
            ("performance metrics", self.metrics.as_ref().err()),
            ("emission factors", self.factors.as_ref().err()),
            ("ridepooling emissions", self.emissions.as_ref().err()),
            ("bus projection", self.bus.as_ref().err()),
            ("comparison", self.comparison.as_ref().err()),
        ]
        .into_iter()
        .filter_map(|(section, error)| error.map(|error| (section, error)))
    }
}

fn missing<const N: usize>(
    section: &'static str,
    prerequisites: [(&'static str, bool); N],
) -> AnalysisError {
    let missing = prerequisites
        .into_iter()
        .filter_map(|(name, is_missing)| is_missing.then_some(name))
        .collect_vec();
    AnalysisError::MissingPrerequisite { section, missing }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::quantity::{distance::Kilometers, emissions::GramsPerPassengerKilometer};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    const BUSSI: &str = r#"
        preset = "bussi"

        [period]
        start = "2022-01-01"
        end = "2022-12-31"

        [emission_factors]
        electricity = "uba-grid-mix"

        [bus]
        reference_occupancy = { percent = 18.7 }
        assumed_occupancy_percent = 37.4
    "#;

    #[test]
    fn bussi_ok() {
        let input: AnalysisInput = toml::from_str(BUSSI).unwrap();
        let analysis = Analysis::run(&input, today());
        assert_eq!(analysis.errors().count(), 0);
        assert_eq!(analysis.name, "bussi");

        let totals = analysis.totals.unwrap();
        assert_eq!(totals.total_distance, Kilometers(90_485.75));

        let metrics = analysis.metrics.unwrap();
        assert_abs_diff_eq!(metrics.passenger_distance.0, 65_613.96, epsilon = 1e-9);
        assert_abs_diff_eq!(metrics.empty_distance_share.0, 55.72, epsilon = 1e-9);

        let comparison = analysis.comparison.unwrap();
        assert_abs_diff_eq!(comparison.ridepooling.co2_per_pkm.0, 172.8, epsilon = 1e-9);
        assert_abs_diff_eq!(comparison.bus.co2_per_pkm.0, 40.27, epsilon = 1e-9);
        assert_eq!(comparison.series.iter().count(), 8);
    }

    #[test]
    fn overrides_ok() {
        let mut input: AnalysisInput = toml::from_str(BUSSI).unwrap();
        input.name = "Bus".to_string();
        input.completed_bookings = Some(0);
        input.push_vehicle("Vito:0:8.4:0:100:100".parse().unwrap());
        let analysis = Analysis::run(&input, today());

        assert_eq!(analysis.fleet.len(), 2);
        assert_eq!(analysis.metrics.unwrap().passenger_distance.0, 0.0);
        let comparison = analysis.comparison.unwrap();
        assert_eq!(comparison.ridepooling.label, "Bus (ridepooling)");
        assert_eq!(comparison.ridepooling.co2_per_pkm, GramsPerPassengerKilometer::ZERO);
    }

    #[test]
    fn drop_last_removes_preset_vehicle() {
        let input = AnalysisInput {
            preset: Some(SystemPreset::Bussi),
            drop_last: 1,
            ..AnalysisInput::default()
        };
        let analysis = Analysis::run(&input, today());
        assert!(analysis.fleet.is_empty());
        assert_eq!(analysis.totals.unwrap().total_distance, Kilometers::ZERO);
    }

    #[test]
    fn invalid_period_withholds_dependants() {
        let mut input: AnalysisInput = toml::from_str(BUSSI).unwrap();
        input.period.start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let analysis = Analysis::run(&input, today());

        assert!(matches!(analysis.counters, Err(AnalysisError::InvalidPeriod { .. })));
        assert!(analysis.totals.is_ok());
        assert!(analysis.factors.is_ok());
        assert!(analysis.bus.is_ok());
        assert_eq!(
            analysis.metrics.unwrap_err(),
            AnalysisError::MissingPrerequisite {
                section: "performance metrics",
                missing: vec!["operational counters"],
            },
        );
        assert_eq!(
            analysis.emissions.unwrap_err(),
            AnalysisError::MissingPrerequisite {
                section: "ridepooling emissions",
                missing: vec!["passenger-kilometres"],
            },
        );
        assert!(matches!(analysis.comparison, Err(AnalysisError::MissingPrerequisite { .. })));
    }

    #[test]
    fn invalid_bus_withholds_comparison_only() {
        let mut input: AnalysisInput = toml::from_str(BUSSI).unwrap();
        input.bus.assumed_occupancy = Some(crate::quantity::proportions::Percentage(0.0));
        let analysis = Analysis::run(&input, today());

        assert!(analysis.emissions.is_ok());
        assert!(matches!(analysis.bus, Err(AnalysisError::NonPositiveOccupancy { .. })));
        assert_eq!(
            analysis.comparison.as_ref().unwrap_err(),
            &AnalysisError::MissingPrerequisite {
                section: "comparison",
                missing: vec!["bus projection"],
            },
        );
        assert_eq!(analysis.errors().count(), 2);
    }

    #[test]
    fn demos_ok() {
        for demo in [include_str!("../../demos/bussi.toml"), include_str!("../../demos/custom.toml")]
        {
            let input: AnalysisInput = toml::from_str(demo).unwrap();
            let analysis = Analysis::run(&input, today());
            assert_eq!(analysis.errors().count(), 0);
        }
    }

    #[test]
    fn unknown_field_fails() {
        assert!(toml::from_str::<AnalysisInput>("bookings = 5").is_err());
    }

    #[test]
    fn misspelled_nested_key_fails() {
        let vehicle = r#"
            [[vehicles]]
            type = "Vito"
            empty_distance = 100.0
            occupied_distance = 200.0
        "#;
        assert!(toml::from_str::<AnalysisInput>(vehicle).is_err());
        assert!(toml::from_str::<AnalysisInput>("[bus]\nassumed_occupancy = 37.4").is_err());
        let period = r#"
            [period]
            start = "2022-01-01"
            end = "2022-12-31"
            days = 365
        "#;
        assert!(toml::from_str::<AnalysisInput>(period).is_err());
    }
}
