use clap::Parser;

use crate::{
    prelude::*,
    tables::{
        build_bus_reference_table,
        build_reference_sources_table,
        build_system_presets_table,
        build_vehicle_presets_table,
    },
};

#[derive(Parser)]
pub struct PresetsArgs {}

impl PresetsArgs {
    pub fn run(self) -> Result {
        println!("{}", build_system_presets_table());
        println!("{}", build_vehicle_presets_table());
        println!("{}", build_reference_sources_table());
        println!("{}", build_bus_reference_table());
        Ok(())
    }
}
