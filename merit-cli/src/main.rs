#![allow(clippy::doc_markdown)]
#![doc = include_str!("../../README.md")]

mod api;
mod cli;
mod core;
mod prelude;
mod server;
mod service;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command, plan},
    prelude::*,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();
    info!(version = crate_version!(), "starting…");

    match args.command {
        Command::Plan(args) => {
            plan(&args)?;
        }
        Command::Serve(args) => {
            server::serve(&args.bind_address, args.engine.cost_model()).await?;
        }
    }

    info!("done!");
    Ok(())
}
