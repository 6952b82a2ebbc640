mod analyse;
mod bus;
mod factors;
mod presets;

use clap::{Parser, Subcommand};

use crate::cli::{analyse::AnalyseArgs, bus::BusCommandArgs, presets::PresetsArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: account the ridepooling emissions and compare them with the bus.
    #[clap(name = "analyse", visible_alias = "analyze")]
    Analyse(Box<AnalyseArgs>),

    /// Project the bus emissions onto an assumed occupancy.
    #[clap(name = "bus")]
    Bus(Box<BusCommandArgs>),

    /// List the built-in ridepooling systems, vehicle types, and emission factors.
    #[clap(name = "presets")]
    Presets(PresetsArgs),
}
