use clap::Parser;

use crate::cli::EngineArgs;

#[derive(Parser)]
pub struct ServeArgs {
    #[clap(long, default_value = "0.0.0.0:8888", env = "BIND_ADDRESS")]
    pub bind_address: String,

    #[clap(flatten)]
    pub engine: EngineArgs,
}
