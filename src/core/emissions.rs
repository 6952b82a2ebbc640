use serde::Serialize;

use crate::{
    core::{
        carrier::{Carrier, PerCarrier},
        factors::EmissionFactors,
        fleet::FleetTotals,
    },
    quantity::{
        distance::PassengerKilometers,
        emissions::{GramsPerPassengerKilometer, Kilograms},
        round,
    },
};

/// Well-to-Wheel emissions of the ridepooling system over the period.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct RidepoolingEmissions {
    pub per_carrier: PerCarrier<Kilograms>,

    /// Rounded to 0.1 g.
    pub total: Kilograms,

    /// Zero when no passenger-kilometres were performed.
    pub per_passenger_km: GramsPerPassengerKilometer,
}

impl RidepoolingEmissions {
    /// Apply the effective emission factors to the fleet consumption.
    ///
    /// The electricity mass is scaled by the non-renewable share once more after the factor
    /// has already been blended with the renewable factor. Both steps are kept as they are
    /// published; the second one is pending domain review.
    pub fn new(
        totals: &FleetTotals,
        factors: &EmissionFactors,
        passenger_distance: PassengerKilometers,
    ) -> Self {
        let per_carrier = totals.consumption.map(|carrier, consumption| {
            let emissions = consumption * factors.effective[carrier];
            match carrier {
                Carrier::Electricity => emissions * (1.0 - factors.renewable.share.to_ratio()),
                Carrier::Gasoline | Carrier::Diesel => emissions,
            }
        });
        let total = per_carrier.iter().map(|(_, emissions)| emissions).sum::<Kilograms>().round_to(4);
        let per_passenger_km = if passenger_distance.is_positive() {
            GramsPerPassengerKilometer(round(total.0 / passenger_distance.0, 4) * 1000.0)
        } else {
            GramsPerPassengerKilometer::ZERO
        };
        Self { per_carrier, total, per_passenger_km }
    }
}
