quantity!(Kilometers, suffix: "km", precision: 2);

/// Passengers times kilometres travelled.
quantity!(PassengerKilometers, suffix: "pkm", precision: 2);

/// Utility vehicle-kilometres times seat-and-standing capacity.
quantity!(SpaceKilometers, suffix: "space-km", precision: 1);

impl SpaceKilometers {
    pub fn from_vehicle_distance(utility_vehicle_distance: Kilometers, capacity: f64) -> Self {
        Self(utility_vehicle_distance.0 * capacity)
    }
}
