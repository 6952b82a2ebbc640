//! Built-in ridepooling systems and vehicle types.

use std::fmt::{Display, Formatter};

use enumset::EnumSet;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        carrier::PerCarrier,
        vehicle::{Fleet, VehicleRecord},
    },
    quantity::{consumption::ConsumptionRate, distance::Kilometers},
};

/// Vehicle type with WLTP consumption (Deutsche Automobil Treuhand, «Leitfaden CO₂», 2022).
#[derive(Debug, Hash, Serialize, Deserialize, clap::ValueEnum, enumset::EnumSetType)]
#[serde(rename_all = "kebab-case")]
pub enum VehiclePreset {
    LevcTx,
    MercedesVito,
    MercedesEVito,
}

impl Display for VehiclePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LevcTx => write!(f, "LEVC TX (Volvo XC 90 Recharge T8 AWD)"),
            Self::MercedesVito => write!(f, "Mercedes Vito lang 114 CDI"),
            Self::MercedesEVito => write!(f, "Mercedes eVito Tourer PRO lang (90 kWh)"),
        }
    }
}

impl VehiclePreset {
    pub fn all() -> impl Iterator<Item = Self> {
        EnumSet::<Self>::all().iter()
    }

    /// Consumption per 100 km.
    pub const fn consumption(self) -> PerCarrier<ConsumptionRate> {
        let (gasoline, diesel, electricity) = match self {
            Self::LevcTx => (1.2, 0.0, 20.5),
            Self::MercedesVito => (0.0, 8.4, 0.0),
            Self::MercedesEVito => (0.0, 0.0, 29.8),
        };
        PerCarrier {
            gasoline: ConsumptionRate(gasoline),
            diesel: ConsumptionRate(diesel),
            electricity: ConsumptionRate(electricity),
        }
    }

    /// Vehicle record with the preset consumption and no distance driven yet.
    pub fn to_record(self) -> VehicleRecord {
        VehicleRecord::builder()
            .vehicle_type(self.to_string())
            .consumption(self.consumption())
            .build()
    }
}

/// Ridepooling system with published transport performance.
#[derive(Debug, Hash, Serialize, Deserialize, clap::ValueEnum, enumset::EnumSetType)]
#[serde(rename_all = "kebab-case")]
pub enum SystemPreset {
    Bussi,
    GMobil,
    KommitShuttle,
    LoopMuenster,
}

impl Display for SystemPreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bussi => write!(f, "bussi"),
            Self::GMobil => write!(f, "G-Mobil"),
            Self::KommitShuttle => write!(f, "kommit-Shuttle"),
            Self::LoopMuenster => write!(f, "LOOPmünster"),
        }
    }
}

impl SystemPreset {
    pub fn all() -> impl Iterator<Item = Self> {
        EnumSet::<Self>::all().iter()
    }

    pub const fn completed_bookings(self) -> u64 {
        match self {
            Self::Bussi => 8450,
            Self::GMobil => 60045,
            Self::KommitShuttle => 21895,
            Self::LoopMuenster => 151_415,
        }
    }

    pub const fn transported_passengers(self) -> u64 {
        match self {
            Self::Bussi => 13839,
            Self::GMobil => 74556,
            Self::KommitShuttle => 26263,
            Self::LoopMuenster => 187_309,
        }
    }

    /// Known fleet, empty when only the counters are published.
    pub fn fleet(self) -> Fleet {
        match self {
            Self::Bussi => {
                let vehicle = VehicleRecord {
                    empty_distance: Kilometers(50_422.31),
                    occupied_distance: Kilometers(40_063.44),
                    ..VehiclePreset::LevcTx.to_record()
                };
                [vehicle].into_iter().collect()
            }
            Self::GMobil | Self::KommitShuttle | Self::LoopMuenster => Fleet::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bussi_fleet_ok() {
        let fleet = SystemPreset::Bussi.fleet();
        assert_eq!(fleet.len(), 1);
        assert_eq!(fleet.totals().total_distance, Kilometers(90_485.75));
    }

    #[test]
    fn other_fleets_are_empty() {
        assert!(
            SystemPreset::all()
                .filter(|preset| *preset != SystemPreset::Bussi)
                .all(|preset| preset.fleet().is_empty())
        );
    }

    #[test]
    fn vehicle_preset_has_no_distance() {
        let record = VehiclePreset::MercedesVito.to_record();
        assert_eq!(record.vehicle_type, "Mercedes Vito lang 114 CDI");
        assert_eq!(record.consumption.diesel, ConsumptionRate(8.4));
        assert_eq!(record.distance(), Kilometers::ZERO);
    }
}
