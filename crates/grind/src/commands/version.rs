//! Version command - CLI and API versions.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use super::capture::client_for;
use super::Context;

/// Arguments for the version command.
#[derive(Args, Debug)]
pub struct VersionArgs {
    #[command(subcommand)]
    pub command: Option<VersionCommand>,
}

#[derive(Subcommand, Debug)]
pub enum VersionCommand {
    /// Show the version reported by the grind API
    Api,
}

/// Run the version command.
pub async fn run(args: VersionArgs, ctx: &Context) -> Result<()> {
    match args.command {
        None => cmd_cli_version(),
        Some(VersionCommand::Api) => cmd_api_version(ctx).await,
    }
}

fn cmd_cli_version() -> Result<()> {
    println!("CLI Version: {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}

async fn cmd_api_version(ctx: &Context) -> Result<()> {
    let client = client_for(ctx)?;
    let info = client
        .get_version()
        .await
        .context("Failed to fetch API version")?;

    println!("API Version: {}", info.version);
    if let Some(service) = &info.service {
        println!("Service: {service}");
    }
    if let Some(timestamp) = &info.timestamp {
        println!("Timestamp: {timestamp}");
    }
    Ok(())
}
