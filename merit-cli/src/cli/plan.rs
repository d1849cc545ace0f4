use std::{fs, io, path::PathBuf};

use clap::Parser;

use crate::{
    api::{payload::Payload, response::ProductionPlan},
    cli::EngineArgs,
    core::request::LoadRequest,
    prelude::*,
    service,
    tables::build_allocation_table,
};

#[derive(Parser)]
pub struct PlanArgs {
    /// Payload JSON file, `-` reads from stdin.
    #[clap(long, default_value = "-", env = "PAYLOAD_PATH")]
    pub payload: PathBuf,

    /// Print the JSON response instead of the table.
    #[clap(long)]
    pub json: bool,

    #[clap(flatten)]
    pub engine: EngineArgs,
}

impl PlanArgs {
    fn read_payload(&self) -> Result<Payload> {
        let json = if self.payload.as_os_str() == "-" {
            io::read_to_string(io::stdin()).context("failed to read the payload from stdin")?
        } else {
            fs::read_to_string(&self.payload)
                .with_context(|| format!("failed to read `{}`", self.payload.display()))?
        };
        serde_json::from_str(&json).context("failed to parse the payload")
    }
}

#[instrument(skip_all)]
pub fn plan(args: &PlanArgs) -> Result {
    let request = LoadRequest::try_from(args.read_payload()?)?;
    let cost_model = args.engine.cost_model();
    let allocation = service::plan(&request, cost_model)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ProductionPlan::from(&allocation))?);
    } else {
        println!("{}", build_allocation_table(&request, &allocation, &cost_model));
    }
    Ok(())
}
