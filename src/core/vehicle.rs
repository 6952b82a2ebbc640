use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        carrier::{Carrier, PerCarrier},
        fleet::FleetTotals,
    },
    error::AnalysisError,
    quantity::{consumption::ConsumptionRate, distance::Kilometers},
};

/// Fleet-wide distances and consumption rates of one vehicle type.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, bon::Builder)]
#[serde(deny_unknown_fields)]
pub struct VehicleRecord {
    #[builder(into)]
    #[serde(rename = "type")]
    pub vehicle_type: String,

    /// Consumption per 100 km for each carrier, zero for the carriers not used.
    #[builder(default)]
    #[serde(default)]
    pub consumption: PerCarrier<ConsumptionRate>,

    /// Kilometres driven without a revenue passenger aboard.
    #[builder(default)]
    #[serde(default, rename = "empty_km")]
    pub empty_distance: Kilometers,

    /// Kilometres driven with at least one revenue passenger aboard.
    #[builder(default)]
    #[serde(default, rename = "occupied_km")]
    pub occupied_distance: Kilometers,
}

impl VehicleRecord {
    pub fn distance(&self) -> Kilometers {
        self.empty_distance + self.occupied_distance
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        for (carrier, rate) in self.consumption.iter() {
            let field = match carrier {
                Carrier::Gasoline => "gasoline consumption",
                Carrier::Diesel => "diesel consumption",
                Carrier::Electricity => "electricity consumption",
            };
            AnalysisError::ensure_non_negative(field, rate.0)?;
        }
        AnalysisError::ensure_non_negative("empty kilometres", self.empty_distance.0)?;
        AnalysisError::ensure_non_negative("occupied kilometres", self.occupied_distance.0)?;
        Ok(())
    }
}

/// Parse `type:gasoline:diesel:electricity:empty_km:occupied_km`, the type may contain colons.
impl FromStr for VehicleRecord {
    type Err = AnalysisError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut parts = value.rsplitn(6, ':');
        let mut next = |field: &'static str| {
            let part = parts.next().unwrap_or_default();
            AnalysisError::parse_number(field, part)
                .and_then(|number| AnalysisError::ensure_non_negative(field, number))
        };
        let occupied_distance = Kilometers(next("occupied kilometres")?);
        let empty_distance = Kilometers(next("empty kilometres")?);
        let electricity = ConsumptionRate(next("electricity consumption")?);
        let diesel = ConsumptionRate(next("diesel consumption")?);
        let gasoline = ConsumptionRate(next("gasoline consumption")?);
        let vehicle_type = parts.next().unwrap_or_default().trim();
        Ok(Self::builder()
            .vehicle_type(vehicle_type)
            .consumption(PerCarrier { gasoline, diesel, electricity })
            .empty_distance(empty_distance)
            .occupied_distance(occupied_distance)
            .build())
    }
}

/// Ordered vehicle list of the current analysis: appended at the end, removed from the end.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fleet(Vec<VehicleRecord>);

impl Fleet {
    pub fn push(&mut self, vehicle: VehicleRecord) {
        self.0.push(vehicle);
    }

    /// Remove the most recently added vehicle.
    pub fn pop(&mut self) -> Option<VehicleRecord> {
        self.0.pop()
    }

    /// Remove up to `n` most recently added vehicles, the last one first.
    pub fn pop_n(&mut self, n: usize) -> Vec<VehicleRecord> {
        (0..n).map_while(|_| self.pop()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VehicleRecord> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        self.iter().try_for_each(VehicleRecord::validate)
    }

    pub fn totals(&self) -> FleetTotals {
        self.iter().collect()
    }
}

impl FromIterator<VehicleRecord> for Fleet {
    fn from_iter<T: IntoIterator<Item = VehicleRecord>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<VehicleRecord> for Fleet {
    fn extend<T: IntoIterator<Item = VehicleRecord>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}
