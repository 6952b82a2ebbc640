use std::ops::Mul;

use crate::quantity::consumption::Consumption;

/// Grams of CO₂e emitted per unit of the energy carrier (`g/l` or `g/kWh`).
quantity!(EmissionFactor, precision: 1);

quantity!(Kilograms, suffix: "kg CO₂e", precision: 4);

quantity!(GramsPerPassengerKilometer, suffix: "g CO₂e/pkm", precision: 2);

impl Mul<EmissionFactor> for Consumption {
    type Output = Kilograms;

    fn mul(self, factor: EmissionFactor) -> Self::Output {
        Kilograms(self.0 * factor.0 / 1000.0)
    }
}

impl EmissionFactor {
    /// Linear blend of the grid factor with the self-generated factor, rounded to 0.1.
    pub fn blend(self, renewable: Self, renewable_ratio: f64) -> Self {
        Self(self.0 * (1.0 - renewable_ratio) + renewable.0 * renewable_ratio).round_to(1)
    }
}
