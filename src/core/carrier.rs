use std::{
    fmt::{Display, Formatter},
    ops::{AddAssign, Index, IndexMut},
};

use comfy_table::Color;
use enumset::EnumSet;
use serde::{Deserialize, Serialize};

/// Energy carrier consumed by a vehicle.
#[derive(Debug, Hash, Serialize, Deserialize, enumset::EnumSetType)]
#[serde(rename_all = "snake_case")]
pub enum Carrier {
    Gasoline,
    Diesel,
    Electricity,
}

impl Display for Carrier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gasoline => write!(f, "Gasoline"),
            Self::Diesel => write!(f, "Diesel"),
            Self::Electricity => write!(f, "Electricity"),
        }
    }
}

impl Carrier {
    /// Unit in which the carrier is consumed.
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Gasoline | Self::Diesel => "l",
            Self::Electricity => "kWh",
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Gasoline => Color::DarkYellow,
            Self::Diesel => Color::Magenta,
            Self::Electricity => Color::Cyan,
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        EnumSet::<Self>::all().iter()
    }
}

/// One value per [`Carrier`].
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerCarrier<T> {
    #[serde(default)]
    pub gasoline: T,

    #[serde(default)]
    pub diesel: T,

    #[serde(default)]
    pub electricity: T,
}

impl<T> Index<Carrier> for PerCarrier<T> {
    type Output = T;

    fn index(&self, carrier: Carrier) -> &Self::Output {
        match carrier {
            Carrier::Gasoline => &self.gasoline,
            Carrier::Diesel => &self.diesel,
            Carrier::Electricity => &self.electricity,
        }
    }
}

impl<T> IndexMut<Carrier> for PerCarrier<T> {
    fn index_mut(&mut self, carrier: Carrier) -> &mut Self::Output {
        match carrier {
            Carrier::Gasoline => &mut self.gasoline,
            Carrier::Diesel => &mut self.diesel,
            Carrier::Electricity => &mut self.electricity,
        }
    }
}

impl<T: Copy> PerCarrier<T> {
    pub fn from_fn(mut f: impl FnMut(Carrier) -> T) -> Self {
        Self {
            gasoline: f(Carrier::Gasoline),
            diesel: f(Carrier::Diesel),
            electricity: f(Carrier::Electricity),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Carrier, T)> + '_ {
        Carrier::all().map(|carrier| (carrier, self[carrier]))
    }

    pub fn map<U: Copy>(&self, mut f: impl FnMut(Carrier, T) -> U) -> PerCarrier<U> {
        PerCarrier::from_fn(|carrier| f(carrier, self[carrier]))
    }
}

impl<T: AddAssign> AddAssign for PerCarrier<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.gasoline += rhs.gasoline;
        self.diesel += rhs.diesel;
        self.electricity += rhs.electricity;
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn iter_order_ok() {
        let values = PerCarrier { gasoline: 1, diesel: 2, electricity: 3 };
        assert_eq!(
            values.iter().collect_vec(),
            vec![(Carrier::Gasoline, 1), (Carrier::Diesel, 2), (Carrier::Electricity, 3)],
        );
    }

    #[test]
    fn index_mut_ok() {
        let mut values = PerCarrier::<u32>::default();
        values[Carrier::Diesel] += 5;
        assert_eq!(values, PerCarrier { gasoline: 0, diesel: 5, electricity: 0 });
    }

    #[test]
    fn add_assign_ok() {
        let mut sum = PerCarrier { gasoline: 1, diesel: 2, electricity: 3 };
        sum += PerCarrier { gasoline: 10, diesel: 20, electricity: 30 };
        assert_eq!(sum, PerCarrier { gasoline: 11, diesel: 22, electricity: 33 });
    }
}
