use std::ops::Mul;

use crate::quantity::distance::Kilometers;

/// Energy carrier consumed per 100 km: litres for liquid fuels, kilowatt-hours for electricity.
quantity!(ConsumptionRate, precision: 1);

/// Energy carrier consumed in total: litres for liquid fuels, kilowatt-hours for electricity.
quantity!(Consumption, precision: 2);

impl Mul<Kilometers> for ConsumptionRate {
    type Output = Consumption;

    fn mul(self, distance: Kilometers) -> Self::Output {
        Consumption(self.0 * distance.0 / 100.0)
    }
}
