//! kaideploy
//!
//! Packages an app directory and installs it on a device through the
//! debugger socket:
//! - Zip the directory in memory (skipping `.git`)
//! - listTabs -> uploadPackage -> chunk* -> done -> install -> remove [-> launch]
//! - Exit status 1 on any failure

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use kaideploy_core::error::Result;
use kaideploy_installer::cli::Cli;
use kaideploy_installer::obs::observer_for;
use kaideploy_installer::{deploy, InstallOutcome};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    match run(&cli).await {
        Ok(outcome) => {
            println!("deploy done. appId={}", outcome.app_id);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(code = e.code().as_str(), "deploy failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<InstallOutcome> {
    let cfg = cli.resolve_config()?;
    deploy(&cfg, &cli.path, cli.launch, observer_for(cli.verbosity())).await
}
