use serde::Serialize;

use crate::{
    core::{carrier::PerCarrier, vehicle::VehicleRecord},
    quantity::{consumption::Consumption, distance::Kilometers},
};

/// Fleet-wide distance and energy totals.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct FleetTotals {
    pub empty_distance: Kilometers,
    pub occupied_distance: Kilometers,

    /// Sum of the empty and occupied distance, rounded to 0.01 km.
    pub total_distance: Kilometers,

    /// Unrounded, it feeds the emission figures downstream.
    pub consumption: PerCarrier<Consumption>,
}

impl<'a> FromIterator<&'a VehicleRecord> for FleetTotals {
    fn from_iter<T: IntoIterator<Item = &'a VehicleRecord>>(iterator: T) -> Self {
        let mut totals = Self::default();
        for vehicle in iterator {
            let distance = vehicle.distance();
            totals.empty_distance += vehicle.empty_distance;
            totals.occupied_distance += vehicle.occupied_distance;
            totals.consumption += vehicle.consumption.map(|_, rate| rate * distance);
        }
        totals.total_distance = (totals.empty_distance + totals.occupied_distance).round_to(2);
        totals
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use itertools::Itertools;

    use super::*;
    use crate::{core::vehicle::Fleet, quantity::consumption::ConsumptionRate};

    fn vehicle(gasoline: f64, diesel: f64, electricity: f64, empty: f64, occupied: f64) -> VehicleRecord {
        VehicleRecord::builder()
            .vehicle_type("test")
            .consumption(PerCarrier {
                gasoline: ConsumptionRate(gasoline),
                diesel: ConsumptionRate(diesel),
                electricity: ConsumptionRate(electricity),
            })
            .empty_distance(Kilometers(empty))
            .occupied_distance(Kilometers(occupied))
            .build()
    }

    #[test]
    fn empty_fleet_is_zero() {
        let totals = Fleet::default().totals();
        assert_eq!(totals, FleetTotals::default());
        assert_eq!(totals.total_distance, Kilometers::ZERO);
    }

    #[test]
    fn single_vehicle_ok() {
        let totals = [vehicle(1.2, 0.0, 20.5, 50_422.31, 40_063.44)].iter().collect::<FleetTotals>();
        assert_eq!(totals.total_distance, Kilometers(90_485.75));
        assert_abs_diff_eq!(totals.consumption.gasoline.0, 1_085.829, epsilon = 1e-6);
        assert_abs_diff_eq!(totals.consumption.diesel.0, 0.0);
        assert_abs_diff_eq!(totals.consumption.electricity.0, 18_549.578_75, epsilon = 1e-6);
    }

    #[test]
    fn total_distance_rounds_ties_to_even() {
        let totals = [vehicle(0.0, 8.4, 0.0, 10.0, 0.125)].iter().collect::<FleetTotals>();
        assert_eq!(totals.total_distance, Kilometers(10.12));
    }

    #[test]
    fn mixed_fleet_sums_per_carrier() {
        let totals = [vehicle(0.0, 8.4, 0.0, 100.0, 300.0), vehicle(0.0, 0.0, 29.8, 50.0, 150.0)]
            .iter()
            .collect::<FleetTotals>();
        assert_eq!(totals.empty_distance, Kilometers(150.0));
        assert_eq!(totals.occupied_distance, Kilometers(450.0));
        assert_eq!(totals.total_distance, Kilometers(600.0));
        assert_abs_diff_eq!(totals.consumption.diesel.0, 33.6, epsilon = 1e-9);
        assert_abs_diff_eq!(totals.consumption.electricity.0, 59.6, epsilon = 1e-9);
    }

    #[test]
    fn order_does_not_matter() {
        let vehicles = [
            vehicle(1.2, 0.0, 20.5, 50_422.31, 40_063.44),
            vehicle(0.0, 8.4, 0.0, 1_234.56, 7_890.12),
            vehicle(0.0, 0.0, 29.8, 0.01, 0.02),
        ];
        let expected = vehicles.iter().collect::<FleetTotals>();
        for permutation in vehicles.iter().permutations(vehicles.len()) {
            let totals = permutation.into_iter().collect::<FleetTotals>();
            assert_eq!(totals.total_distance, expected.total_distance);
            assert_abs_diff_eq!(
                totals.total_distance.0,
                (totals.empty_distance + totals.occupied_distance).0,
                epsilon = 0.005,
            );
            assert_abs_diff_eq!(
                totals.consumption.electricity.0,
                expected.consumption.electricity.0,
                epsilon = 1e-6,
            );
        }
    }
}
