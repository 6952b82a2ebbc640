use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
    core::carrier::{Carrier, PerCarrier},
    error::AnalysisError,
    quantity::{emissions::EmissionFactor, proportions::Percentage},
};

/// Published Well-to-Wheel emission factor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceSource {
    /// Helmholtz Association of German Research Centres, CO₂e (liquid fuels).
    Helmholtz,

    /// CO2online, CO₂ only (liquid fuels).
    Co2Online,

    /// German Environment Agency: CO₂e including upstream chains, 2022 (electricity).
    UbaLifeCycle,

    /// German Environment Agency: CO₂ factor of the electricity mix, 2022 (electricity).
    UbaGridMix,
}

impl Display for ReferenceSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Helmholtz => write!(f, "Helmholtz Association [CO₂e]"),
            Self::Co2Online => write!(f, "CO2online [CO₂]"),
            Self::UbaLifeCycle => write!(f, "UBA, CO₂e incl. upstream chains (2022)"),
            Self::UbaGridMix => write!(f, "UBA, electricity mix (2022)"),
        }
    }
}

impl ReferenceSource {
    /// Factor in `g/l` for liquid fuels and `g/kWh` for electricity, if the source covers the carrier.
    pub const fn factor(self, carrier: Carrier) -> Option<EmissionFactor> {
        let grams = match (self, carrier) {
            (Self::Helmholtz, Carrier::Gasoline) => 3030.0,
            (Self::Helmholtz, Carrier::Diesel) => 3410.0,
            (Self::Co2Online, Carrier::Gasoline) => 2370.0,
            (Self::Co2Online, Carrier::Diesel) => 2650.0,
            (Self::UbaLifeCycle, Carrier::Electricity) => 498.0,
            (Self::UbaGridMix, Carrier::Electricity) => 434.0,
            _ => return None,
        };
        Some(EmissionFactor(grams))
    }
}

/// Either a named reference or a user-supplied factor.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum FactorSelection {
    Reference(ReferenceSource),
    Custom { custom: EmissionFactor },
}

impl Display for FactorSelection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reference(source) => Display::fmt(source, f),
            Self::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl FactorSelection {
    pub fn resolve(self, carrier: Carrier) -> Result<EmissionFactor, AnalysisError> {
        match self {
            Self::Reference(source) => source
                .factor(carrier)
                .ok_or(AnalysisError::UnsupportedSource { reference: source, carrier }),
            Self::Custom { custom } => {
                AnalysisError::ensure_non_negative("custom emission factor", custom.0)
                    .map(EmissionFactor)
            }
        }
    }
}

/// Share of self-generated (photovoltaic) electricity and its emission factor.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenewableShare {
    #[serde(default, rename = "share_percent")]
    pub share: Percentage,

    #[serde(default = "RenewableShare::default_factor")]
    pub factor: EmissionFactor,
}

impl Default for RenewableShare {
    fn default() -> Self {
        Self { share: Percentage::ZERO, factor: Self::default_factor() }
    }
}

impl RenewableShare {
    /// Electricity Maps, photovoltaics in Germany.
    pub const DEFAULT_FACTOR: EmissionFactor = EmissionFactor(35.0);

    const fn default_factor() -> EmissionFactor {
        Self::DEFAULT_FACTOR
    }

    pub fn validate(self) -> Result<Self, AnalysisError> {
        if !self.share.is_proportion() {
            return Err(AnalysisError::OutOfRange {
                field: "renewable share",
                value: self.share.0,
                min: 0.0,
                max: 100.0,
            });
        }
        AnalysisError::ensure_non_negative("renewable emission factor", self.factor.0)?;
        Ok(self)
    }
}

/// Emission factor selection per carrier, as entered by the analyst.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactorSelections {
    #[serde(default = "FactorSelections::default_fuel")]
    pub gasoline: FactorSelection,

    #[serde(default = "FactorSelections::default_fuel")]
    pub diesel: FactorSelection,

    #[serde(default = "FactorSelections::default_electricity")]
    pub electricity: FactorSelection,

    #[serde(default)]
    pub renewable: RenewableShare,
}

impl Default for FactorSelections {
    fn default() -> Self {
        Self {
            gasoline: Self::default_fuel(),
            diesel: Self::default_fuel(),
            electricity: Self::default_electricity(),
            renewable: RenewableShare::default(),
        }
    }
}

impl FactorSelections {
    const fn default_fuel() -> FactorSelection {
        FactorSelection::Reference(ReferenceSource::Helmholtz)
    }

    const fn default_electricity() -> FactorSelection {
        FactorSelection::Reference(ReferenceSource::UbaLifeCycle)
    }

    pub fn per_carrier(&self) -> PerCarrier<FactorSelection> {
        PerCarrier { gasoline: self.gasoline, diesel: self.diesel, electricity: self.electricity }
    }

    /// Look up every factor and fold the renewable share into the electricity factor.
    pub fn resolve(&self) -> Result<EmissionFactors, AnalysisError> {
        let selections = self.per_carrier();
        let grid = PerCarrier {
            gasoline: selections.gasoline.resolve(Carrier::Gasoline)?,
            diesel: selections.diesel.resolve(Carrier::Diesel)?,
            electricity: selections.electricity.resolve(Carrier::Electricity)?,
        };
        let renewable = self.renewable.validate()?;
        let effective = PerCarrier {
            electricity: grid.electricity.blend(renewable.factor, renewable.share.to_ratio()),
            ..grid
        };
        Ok(EmissionFactors { selections, grid, effective, renewable })
    }
}

/// Resolved emission factors.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct EmissionFactors {
    pub selections: PerCarrier<FactorSelection>,

    /// Factors as selected, electricity without the renewable blend.
    pub grid: PerCarrier<EmissionFactor>,

    /// Factors to apply, electricity blended with the renewable factor.
    pub effective: PerCarrier<EmissionFactor>,

    pub renewable: RenewableShare,
}
