use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDate};
use clap::Parser;

use crate::{
    cli::{bus::BusArgs, factors::FactorArgs},
    core::{
        analysis::{Analysis, AnalysisInput},
        vehicle::VehicleRecord,
    },
    presets::{SystemPreset, VehiclePreset},
    prelude::*,
    tables::{
        build_bus_table,
        build_comparison_table,
        build_counters_table,
        build_emissions_table,
        build_factors_table,
        build_fleet_table,
        build_metrics_table,
        build_totals_table,
    },
};

#[derive(Parser)]
pub struct AnalyseArgs {
    /// Analysis file in TOML.
    #[clap(long = "config", env = "ANALYSIS_FILE")]
    config: Option<PathBuf>,

    /// Built-in ridepooling system to start from.
    #[clap(long, env = "PRESET")]
    preset: Option<SystemPreset>,

    /// Ridepooling system name.
    #[clap(long, env = "SYSTEM_NAME")]
    name: Option<String>,

    #[clap(long, env = "COMPLETED_BOOKINGS")]
    completed_bookings: Option<u64>,

    #[clap(long, env = "TRANSPORTED_PASSENGERS")]
    transported_passengers: Option<u64>,

    #[clap(long, env = "PERIOD_START")]
    period_start: Option<NaiveDate>,

    #[clap(long, env = "PERIOD_END")]
    period_end: Option<NaiveDate>,

    /// Append a vehicle as `type:gasoline:diesel:electricity:empty_km:occupied_km`,
    /// consumption per 100 km.
    #[clap(long = "vehicle", env = "VEHICLES", value_delimiter = ';')]
    vehicles: Vec<VehicleRecord>,

    /// Append a built-in vehicle type with no distance driven.
    #[clap(long = "vehicle-preset", env = "VEHICLE_PRESETS", value_delimiter = ',')]
    vehicle_presets: Vec<VehiclePreset>,

    /// Drop the given number of most recently added vehicles.
    #[clap(long, env = "DROP_LAST")]
    drop_last: Option<usize>,

    #[clap(flatten)]
    factors: FactorArgs,

    #[clap(flatten)]
    bus: BusArgs,

    /// Reference date for the period check, defaults to today.
    #[clap(long, env = "REFERENCE_DATE")]
    today: Option<NaiveDate>,

    /// Print the comparison series as JSON instead of the tables.
    #[clap(long)]
    json: bool,
}

impl AnalyseArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let input = self.input()?;
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let analysis = Analysis::run(&input, today);

        if self.json {
            let comparison = analysis.comparison.context("the comparison is withheld")?;
            println!("{}", serde_json::to_string_pretty(&comparison.series)?);
            return Ok(());
        }

        if analysis.fleet.is_empty() {
            warn!("the fleet is empty, add vehicles to account any emissions");
        } else {
            println!("{}", build_fleet_table(&analysis.fleet));
        }
        if let Ok(counters) = &analysis.counters {
            println!("{}", build_counters_table(counters));
        }
        if let Ok(totals) = &analysis.totals {
            println!("{}", build_totals_table(totals));
        }
        if let Ok(metrics) = &analysis.metrics {
            println!("{}", build_metrics_table(metrics));
        }
        if let Ok(factors) = &analysis.factors {
            println!("{}", build_factors_table(factors));
        }
        if let Ok(emissions) = &analysis.emissions {
            println!("{}", build_emissions_table(emissions));
        }
        if let Ok(bus) = &analysis.bus {
            println!("{}", build_bus_table(bus));
        }
        if let Ok(comparison) = &analysis.comparison {
            println!("{}", build_comparison_table(comparison));
        }
        Ok(())
    }

    /// Analysis file, if any, with the command-line overrides applied.
    fn input(&self) -> Result<AnalysisInput> {
        let mut input = match &self.config {
            Some(path) => read_input(path)?,
            None => AnalysisInput::default(),
        };
        if let Some(preset) = self.preset {
            input.preset = Some(preset);
        }
        if let Some(name) = &self.name {
            input.name.clone_from(name);
        }
        if let Some(completed_bookings) = self.completed_bookings {
            input.completed_bookings = Some(completed_bookings);
        }
        if let Some(transported_passengers) = self.transported_passengers {
            input.transported_passengers = Some(transported_passengers);
        }
        if let Some(start) = self.period_start {
            input.period.start = start;
        }
        if let Some(end) = self.period_end {
            input.period.end = end;
        }
        for vehicle in &self.vehicles {
            input.push_vehicle(vehicle.clone());
        }
        for preset in &self.vehicle_presets {
            input.push_vehicle(preset.to_record());
        }
        if let Some(drop_last) = self.drop_last {
            input.drop_last = drop_last;
        }
        self.factors.apply(&mut input.emission_factors);
        self.bus.apply(&mut input.bus);
        Ok(input)
    }
}

fn read_input(path: &Path) -> Result<AnalysisInput> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read `{}`", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("failed to parse `{}`", path.display()))
}
