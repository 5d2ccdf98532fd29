//! Entry point for pages-deploy.
use std::process::ExitCode;

use clap::Parser;
use pages_deploy::{
    cli::{execute, CommandExit, DeployArgs},
    lib::telemetry,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match bootstrap().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<(), CommandExit> {
    telemetry::init_tracing().map_err(CommandExit::from_error)?;
    let args = DeployArgs::parse();
    let request = args.into_request().map_err(CommandExit::from_error)?;

    if let Some(payload) = execute(request).await? {
        println!("{payload}");
    }
    Ok(())
}
