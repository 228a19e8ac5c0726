//! sims-bottler - install The Sims - Complete Collection into a Bottles container

use std::process::ExitCode;

use clap::Parser;
use sims_bottler::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    sims_bottler::logging::init(cli.verbose);
    ExitCode::from(cli.run().await)
}
