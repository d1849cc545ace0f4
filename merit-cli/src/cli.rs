mod plan;
mod serve;

use clap::{Parser, Subcommand};
use merit_quantities::emission::EmissionIntensity;
use tracing::Level;

pub use self::{
    plan::{PlanArgs, plan},
    serve::ServeArgs,
};
use crate::core::cost_model::CostModel;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    /// Most verbose log level to emit, logs go to stderr.
    #[clap(long, default_value = "info", env = "LOG_LEVEL", global = true)]
    pub log_level: Level,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Allocate the load of a single payload and print the production plan.
    #[clap(name = "plan")]
    Plan(Box<PlanArgs>),

    /// Serve the production plan API over HTTP.
    #[clap(name = "serve")]
    Serve(Box<ServeArgs>),
}

#[derive(Copy, Clone, Parser)]
pub struct EngineArgs {
    /// CO₂ emitted by gas-fired units, in tonnes per megawatt-hour.
    #[clap(long, default_value = "0.3", env = "GAS_EMISSION_INTENSITY")]
    pub gas_emission_intensity: EmissionIntensity,
}

impl EngineArgs {
    pub fn cost_model(self) -> CostModel {
        CostModel::builder().gas_emission_intensity(self.gas_emission_intensity).build()
    }
}
