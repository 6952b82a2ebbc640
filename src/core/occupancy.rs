use serde::{Deserialize, Serialize};

use crate::{
    core::comparison::ReferenceMode,
    error::AnalysisError,
    quantity::{
        distance::{Kilometers, PassengerKilometers, SpaceKilometers},
        emissions::GramsPerPassengerKilometer,
        proportions::Percentage,
    },
};

/// Bus emissions scaled inversely with the load factor.
///
/// Unclamped: occupancies above 100 % pass as hypothetical scenarios, a non-positive assumed
/// occupancy fails.
pub fn project(
    reference_co2: GramsPerPassengerKilometer,
    reference_occupancy: Percentage,
    assumed_occupancy: Percentage,
) -> Result<GramsPerPassengerKilometer, AnalysisError> {
    if !assumed_occupancy.is_positive() {
        return Err(AnalysisError::NonPositiveOccupancy { value: assumed_occupancy.0 });
    }
    Ok(reference_co2 * (reference_occupancy / assumed_occupancy))
}

/// Source of the bus reference occupancy.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum ReferenceOccupancy {
    /// Fixed literature value.
    Fixed {
        #[serde(rename = "percent")]
        occupancy: Percentage,
    },

    /// Derived from the transport statistics: person-kilometres over space-kilometres.
    Derived {
        person_km: PassengerKilometers,

        #[serde(rename = "space_km")]
        space_distance: SpaceKilometers,
    },

    /// Same as [`ReferenceOccupancy::Derived`], with space-kilometres from the vehicle distance.
    DerivedFromVehicles {
        person_km: PassengerKilometers,

        #[serde(rename = "utility_vehicle_km")]
        utility_vehicle_distance: Kilometers,

        /// Seat and standing places per vehicle.
        capacity: f64,
    },
}

impl Default for ReferenceOccupancy {
    /// VDV statistics 2022, millions of person- and space-kilometres.
    fn default() -> Self {
        Self::Derived { person_km: Self::VDV_PERSON_KM, space_distance: Self::VDV_SPACE_KM }
    }
}

impl ReferenceOccupancy {
    /// Average German bus occupancy (VDV statistics 2022).
    pub const LITERATURE: Percentage = Percentage(18.7);

    /// Millions of person-kilometres by bus, VDV statistics 2022.
    pub const VDV_PERSON_KM: PassengerKilometers = PassengerKilometers(24_311.0);

    /// Millions of space-kilometres by bus, VDV statistics 2022.
    pub const VDV_SPACE_KM: SpaceKilometers = SpaceKilometers(130_184.0);

    pub const fn person_km(self) -> Option<PassengerKilometers> {
        match self {
            Self::Fixed { .. } => None,
            Self::Derived { person_km, .. } | Self::DerivedFromVehicles { person_km, .. } => {
                Some(person_km)
            }
        }
    }

    pub fn space_distance(self) -> Option<SpaceKilometers> {
        match self {
            Self::Fixed { .. } => None,
            Self::Derived { space_distance, .. } => Some(space_distance),
            Self::DerivedFromVehicles { utility_vehicle_distance, capacity, .. } => {
                Some(SpaceKilometers::from_vehicle_distance(utility_vehicle_distance, capacity))
            }
        }
    }

    /// Occupancy in percent: `person_km / space_km × 100` for the derived variants.
    pub fn occupancy(self) -> Result<Percentage, AnalysisError> {
        let person_km = match self {
            Self::Fixed { occupancy } => {
                return AnalysisError::ensure_non_negative("reference occupancy", occupancy.0)
                    .map(Percentage);
            }
            Self::Derived { person_km, .. } | Self::DerivedFromVehicles { person_km, .. } => {
                person_km
            }
        };
        AnalysisError::ensure_non_negative("person-kilometres", person_km.0)?;
        let space_distance = self
            .space_distance()
            .filter(|space_distance| space_distance.is_positive())
            .ok_or(AnalysisError::NonPositiveSpaceKilometers)?;
        Ok(Percentage(person_km.0 / space_distance.0 * 100.0))
    }
}

/// Bus scenario as entered by the analyst.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BusScenario {
    /// Well-to-Wheel emissions at the reference occupancy.
    #[serde(default = "BusScenario::default_reference_co2", rename = "reference_co2_per_pkm")]
    pub reference_co2: GramsPerPassengerKilometer,

    #[serde(default)]
    pub reference_occupancy: ReferenceOccupancy,

    /// Defaults to the reference occupancy, which leaves the emissions unchanged.
    #[serde(default, rename = "assumed_occupancy_percent")]
    pub assumed_occupancy: Option<Percentage>,
}

impl Default for BusScenario {
    fn default() -> Self {
        Self {
            reference_co2: Self::default_reference_co2(),
            reference_occupancy: ReferenceOccupancy::default(),
            assumed_occupancy: None,
        }
    }
}

impl BusScenario {
    pub const LITERATURE_CO2: GramsPerPassengerKilometer = ReferenceMode::Bus.co2_per_pkm();

    const fn default_reference_co2() -> GramsPerPassengerKilometer {
        Self::LITERATURE_CO2
    }

    /// Resolve the reference occupancy and project the emissions onto the assumed one.
    ///
    /// The assumed occupancy comes from a bounded input and must lie within `(0, 100]`.
    pub fn project(&self) -> Result<BusProjection, AnalysisError> {
        AnalysisError::ensure_non_negative("bus reference emissions", self.reference_co2.0)?;
        let reference_occupancy = self.reference_occupancy.occupancy()?;
        let assumed_occupancy = self.assumed_occupancy.unwrap_or(reference_occupancy);
        if assumed_occupancy > Percentage::HUNDRED {
            return Err(AnalysisError::OutOfRange {
                field: "assumed occupancy",
                value: assumed_occupancy.0,
                min: 0.0,
                max: 100.0,
            });
        }
        let co2_per_pkm = project(self.reference_co2, reference_occupancy, assumed_occupancy)?;
        Ok(BusProjection {
            reference_co2: self.reference_co2,
            reference_occupancy,
            space_distance: self.reference_occupancy.space_distance(),
            assumed_occupancy,
            co2_per_pkm,
        })
    }
}

/// Bus emissions at the assumed occupancy.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct BusProjection {
    pub reference_co2: GramsPerPassengerKilometer,
    pub reference_occupancy: Percentage,

    /// Present when the reference occupancy is derived from the transport statistics.
    pub space_distance: Option<SpaceKilometers>,

    pub assumed_occupancy: Percentage,
    pub co2_per_pkm: GramsPerPassengerKilometer,
}

impl BusProjection {
    /// Relative change of the assumed occupancy against the reference one.
    #[must_use]
    pub fn percent_difference(&self) -> Option<Percentage> {
        self.reference_occupancy.is_positive().then(|| {
            Percentage(
                (self.assumed_occupancy - self.reference_occupancy) / self.reference_occupancy
                    * 100.0,
            )
        })
    }

    /// Person-kilometres implied by the space-kilometres at the reference occupancy.
    pub fn person_km(&self) -> Option<PassengerKilometers> {
        self.space_distance.map(|space_distance| {
            PassengerKilometers(space_distance.0 * self.reference_occupancy.to_ratio())
        })
    }
}
