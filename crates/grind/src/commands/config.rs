//! Config command - rc-file management.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use grind_config::REQUIRED_KEYS;

use super::{Context, DEFAULT_API_BASE_URL, DEFAULT_CLIENT_ID, DEFAULT_ISSUER_URL};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the raw rc file
    List,

    /// Get a config value
    Get {
        key: String,
    },

    /// Set a config value
    Set {
        key: String,
        value: String,
    },

    /// Remove a config value (required keys are protected)
    Unset {
        key: String,
    },

    /// Show the rc file path
    Path,

    /// Write defaults for any missing required keys
    Init,
}

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::List => cmd_list(ctx),
        ConfigCommand::Get {
            key,
        } => cmd_get(&key, ctx),
        ConfigCommand::Set {
            key,
            value,
        } => cmd_set(&key, &value, ctx),
        ConfigCommand::Unset {
            key,
        } => cmd_unset(&key, ctx),
        ConfigCommand::Path => cmd_path(ctx),
        ConfigCommand::Init => cmd_init(ctx),
    }
}

fn cmd_list(ctx: &Context) -> Result<()> {
    match ctx.store.raw() {
        Some(raw) => println!("{}:\n{}", ctx.store.path().display(), raw),
        None => println!("No .grindrc file found."),
    }
    Ok(())
}

fn cmd_get(key: &str, ctx: &Context) -> Result<()> {
    match ctx.store.get(key) {
        Some(value) => println!("{key}: {value}"),
        None => println!("{key} is not set"),
    }
    Ok(())
}

fn cmd_set(key: &str, value: &str, ctx: &Context) -> Result<()> {
    ctx.store.set(key, value)?;
    println!("Set {key} = {value} in {}", ctx.store.path().display());
    Ok(())
}

fn cmd_unset(key: &str, ctx: &Context) -> Result<()> {
    if REQUIRED_KEYS.contains(&key) {
        println!("Cannot remove required key {key}.");
        return Ok(());
    }
    if ctx.store.unset(key)? {
        println!("Removed {key}.");
    } else {
        println!("{key} is not set");
    }
    Ok(())
}

fn cmd_path(ctx: &Context) -> Result<()> {
    println!("{}", ctx.store.path().display());
    Ok(())
}

fn cmd_init(ctx: &Context) -> Result<()> {
    let defaults: &[(&str, &str)] = &[
        ("APP_MODE", "divergent"),
        ("API_BASE_URL", DEFAULT_API_BASE_URL),
        ("OIDC_ISSUER_URL", DEFAULT_ISSUER_URL),
        ("OIDC_CLIENT_ID", DEFAULT_CLIENT_ID),
        ("LOG_LEVEL", "info"),
    ];

    let missing = ctx.store.missing_required();
    if missing.is_empty() {
        println!("All required keys are set. Use 'grind config set' to change them.");
        return Ok(());
    }

    for (key, value) in defaults.iter().copied() {
        if missing.contains(&key) {
            ctx.store.set(key, value)?;
            println!("  {key} = {value}");
        }
    }
    println!(
        "{} Config saved to {}",
        style("✓").green(),
        ctx.store.path().display()
    );
    Ok(())
}
