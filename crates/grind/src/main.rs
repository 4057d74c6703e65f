//! grind - Personal capture CLI
//!
//! Main entry point for the grind CLI.

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};

use grind_config::RcStore;

mod commands;

use commands::{auth, capture, config, version};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// grind - Personal capture CLI
#[derive(Parser)]
#[command(name = "grind")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authentication management
    Auth(auth::AuthArgs),

    /// Capture and list thoughts
    Capture(capture::CaptureArgs),

    /// Configuration management
    Config(config::ConfigArgs),

    /// Show CLI or API version
    Version(version::VersionArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let store = RcStore::open().context("could not locate the grind rc file")?;

    // Initialize tracing — console (human-readable) + rotating JSON file.
    // LOG_LEVEL from the rc file sets the base level; --verbose overrides.
    let level = if cli.verbose {
        "debug".to_string()
    } else {
        store.get_or("LOG_LEVEL", "info")
    };
    let filter = format!(
        "grind={level},grind_auth={level},grind_client={level},grind_config={level},warn"
    );

    let log_dir = dirs::home_dir()
        .map(|d| d.join(".grind").join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("logs"));
    let file_appender = tracing_appender::rolling::daily(&log_dir, "grind.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_filter(tracing_subscriber::EnvFilter::new(&filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "grind=debug,grind_auth=debug,grind_client=debug,grind_config=debug,info",
                )),
        )
        .init();

    // Create context for commands
    let ctx = commands::Context {
        store,
        verbose: cli.verbose,
    };
    tracing::debug!(rc = %ctx.store.path().display(), "using rc file");

    // Dispatch to command handlers
    match cli.command {
        Commands::Auth(args) => auth::run(args, &ctx).await,
        Commands::Capture(args) => capture::run(args, &ctx).await,
        Commands::Config(args) => config::run(args, &ctx).await,
        Commands::Version(args) => version::run(args, &ctx).await,
    }
}
