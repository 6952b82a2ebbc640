use clap::Parser;

use crate::{
    core::factors::{FactorSelection, FactorSelections, ReferenceSource},
    quantity::{emissions::EmissionFactor, proportions::Percentage},
};

/// Emission factor overrides, applied on top of the analysis file.
#[derive(Parser)]
pub struct FactorArgs {
    #[clap(long, env = "GASOLINE_SOURCE", conflicts_with = "gasoline_factor")]
    gasoline_source: Option<ReferenceSource>,

    /// Custom gasoline factor, g CO₂e per litre.
    #[clap(long, env = "GASOLINE_FACTOR")]
    gasoline_factor: Option<EmissionFactor>,

    #[clap(long, env = "DIESEL_SOURCE", conflicts_with = "diesel_factor")]
    diesel_source: Option<ReferenceSource>,

    /// Custom diesel factor, g CO₂e per litre.
    #[clap(long, env = "DIESEL_FACTOR")]
    diesel_factor: Option<EmissionFactor>,

    #[clap(long, env = "ELECTRICITY_SOURCE", conflicts_with = "electricity_factor")]
    electricity_source: Option<ReferenceSource>,

    /// Custom electricity factor, g CO₂e per kilowatt-hour.
    #[clap(long, env = "ELECTRICITY_FACTOR")]
    electricity_factor: Option<EmissionFactor>,

    /// Share of self-generated electricity, percent.
    #[clap(long, env = "RENEWABLE_SHARE_PERCENT")]
    renewable_share: Option<Percentage>,

    /// Emission factor of the self-generated electricity, g CO₂e per kilowatt-hour.
    #[clap(long, env = "RENEWABLE_FACTOR")]
    renewable_factor: Option<EmissionFactor>,
}

impl FactorArgs {
    pub fn apply(&self, selections: &mut FactorSelections) {
        override_selection(&mut selections.gasoline, self.gasoline_source, self.gasoline_factor);
        override_selection(&mut selections.diesel, self.diesel_source, self.diesel_factor);
        override_selection(
            &mut selections.electricity,
            self.electricity_source,
            self.electricity_factor,
        );
        if let Some(share) = self.renewable_share {
            selections.renewable.share = share;
        }
        if let Some(factor) = self.renewable_factor {
            selections.renewable.factor = factor;
        }
    }
}

fn override_selection(
    selection: &mut FactorSelection,
    source: Option<ReferenceSource>,
    custom: Option<EmissionFactor>,
) {
    if let Some(custom) = custom {
        *selection = FactorSelection::Custom { custom };
    } else if let Some(source) = source {
        *selection = FactorSelection::Reference(source);
    }
}
