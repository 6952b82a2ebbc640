use serde::Serialize;

use crate::{
    core::{counters::OperationalCounters, fleet::FleetTotals},
    quantity::{
        distance::{Kilometers, PassengerKilometers},
        proportions::Percentage,
        round,
    },
};

/// Distance-based performance indicators of the ridepooling system.
///
/// Every ratio falls back to zero when its denominator is zero, and every figure is rounded to
/// two decimal places.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    /// Total vehicle-kilometres per completed booking.
    pub average_trip_distance: Kilometers,

    /// Occupied vehicle-kilometres per completed booking.
    pub average_occupied_trip_distance: Kilometers,

    /// Average occupied distance per booking scaled by the transported passengers.
    pub passenger_distance: PassengerKilometers,

    pub empty_distance_share: Percentage,

    /// Passenger-kilometres per vehicle-kilometre.
    pub bundling_ratio: f64,

    /// Passenger-kilometres per occupied vehicle-kilometre.
    pub occupancy_ratio: f64,
}

impl PerformanceMetrics {
    #[expect(clippy::cast_precision_loss)]
    pub fn new(totals: &FleetTotals, counters: &OperationalCounters) -> Self {
        let bookings = counters.completed_bookings as f64;
        let passengers = counters.transported_passengers as f64;

        let per_booking = |distance: Kilometers| {
            if counters.completed_bookings == 0 { Kilometers::ZERO } else { distance / bookings }
        };
        let average_trip_distance = per_booking(totals.total_distance).round_to(2);
        let average_occupied_trip_distance = per_booking(totals.occupied_distance).round_to(2);

        // Not `occupied_distance × average occupancy`: both counters are period aggregates.
        let passenger_distance =
            PassengerKilometers(per_booking(totals.occupied_distance).0 * passengers).round_to(2);

        let empty_distance_share =
            Percentage(ratio(totals.empty_distance.0, totals.total_distance.0) * 100.0)
                .round_to(2);
        let bundling_ratio = round(ratio(passenger_distance.0, totals.total_distance.0), 2);
        let occupancy_ratio = round(ratio(passenger_distance.0, totals.occupied_distance.0), 2);

        Self {
            average_trip_distance,
            average_occupied_trip_distance,
            passenger_distance,
            empty_distance_share,
            bundling_ratio,
            occupancy_ratio,
        }
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 { numerator / denominator } else { 0.0 }
}
