use clap::Parser;

use crate::{
    core::occupancy::{BusScenario, ReferenceOccupancy},
    prelude::*,
    quantity::{
        distance::{Kilometers, PassengerKilometers, SpaceKilometers},
        emissions::GramsPerPassengerKilometer,
        proportions::Percentage,
    },
    tables::build_bus_table,
};

/// Bus scenario overrides, applied on top of the analysis file.
#[derive(Parser)]
pub struct BusArgs {
    /// Bus Well-to-Wheel emissions at the reference occupancy, g CO₂e per passenger-kilometre.
    #[clap(long = "bus-reference-co2", env = "BUS_REFERENCE_CO2")]
    reference_co2: Option<GramsPerPassengerKilometer>,

    /// Fixed bus reference occupancy, percent.
    #[clap(
        long = "bus-reference-occupancy",
        env = "BUS_REFERENCE_OCCUPANCY_PERCENT",
        conflicts_with_all = ["person_km", "space_distance", "utility_vehicle_distance"]
    )]
    reference_occupancy: Option<Percentage>,

    /// Bus person-kilometres to derive the reference occupancy from.
    #[clap(long = "bus-person-km", env = "BUS_PERSON_KM")]
    person_km: Option<PassengerKilometers>,

    /// Bus space-kilometres to derive the reference occupancy from.
    #[clap(
        long = "bus-space-km",
        env = "BUS_SPACE_KM",
        conflicts_with = "utility_vehicle_distance"
    )]
    space_distance: Option<SpaceKilometers>,

    /// Bus utility vehicle-kilometres, multiplied by the capacity into space-kilometres.
    #[clap(long = "bus-utility-vehicle-km", env = "BUS_UTILITY_VEHICLE_KM", requires = "capacity")]
    utility_vehicle_distance: Option<Kilometers>,

    /// Seat and standing places per bus.
    #[clap(long = "bus-capacity", env = "BUS_CAPACITY", requires = "utility_vehicle_distance")]
    capacity: Option<f64>,

    /// Assumed bus occupancy, percent. Defaults to the reference occupancy.
    #[clap(long = "assumed-occupancy", env = "ASSUMED_OCCUPANCY_PERCENT")]
    assumed_occupancy: Option<Percentage>,
}

impl BusArgs {
    pub fn apply(&self, scenario: &mut BusScenario) {
        if let Some(reference_co2) = self.reference_co2 {
            scenario.reference_co2 = reference_co2;
        }
        if let Some(assumed_occupancy) = self.assumed_occupancy {
            scenario.assumed_occupancy = Some(assumed_occupancy);
        }

        let person_km = self
            .person_km
            .or_else(|| scenario.reference_occupancy.person_km())
            .unwrap_or(ReferenceOccupancy::VDV_PERSON_KM);
        if let Some(occupancy) = self.reference_occupancy {
            scenario.reference_occupancy = ReferenceOccupancy::Fixed { occupancy };
        } else if let (Some(utility_vehicle_distance), Some(capacity)) =
            (self.utility_vehicle_distance, self.capacity)
        {
            scenario.reference_occupancy = ReferenceOccupancy::DerivedFromVehicles {
                person_km,
                utility_vehicle_distance,
                capacity,
            };
        } else if self.person_km.is_some() || self.space_distance.is_some() {
            let space_distance = self
                .space_distance
                .or_else(|| scenario.reference_occupancy.space_distance())
                .unwrap_or(ReferenceOccupancy::VDV_SPACE_KM);
            scenario.reference_occupancy = ReferenceOccupancy::Derived { person_km, space_distance };
        }
    }
}

#[derive(Parser)]
pub struct BusCommandArgs {
    #[clap(flatten)]
    bus: BusArgs,

    /// Print the projection as JSON.
    #[clap(long)]
    json: bool,
}

impl BusCommandArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let mut scenario = BusScenario::default();
        self.bus.apply(&mut scenario);
        let projection = scenario.project()?;
        info!(co2_per_pkm = %projection.co2_per_pkm, "projected");
        if self.json {
            println!("{}", serde_json::to_string_pretty(&projection)?);
        } else {
            println!("{}", build_bus_table(&projection));
        }
        Ok(())
    }
}
