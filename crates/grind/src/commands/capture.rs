//! Capture command - submit and list captures.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use console::style;

use grind_client::GrindClient;

use super::{Context, DEFAULT_API_BASE_URL};

/// Arguments for the capture command.
#[derive(Args, Debug)]
pub struct CaptureArgs {
    #[command(subcommand)]
    pub command: CaptureCommand,
}

#[derive(Subcommand, Debug)]
pub enum CaptureCommand {
    /// Capture a thought
    New {
        /// The text to capture
        text: String,
    },

    /// List captures not yet migrated
    List,
}

/// Run the capture command.
pub async fn run(args: CaptureArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CaptureCommand::New {
            text,
        } => cmd_new(&text, ctx).await,
        CaptureCommand::List => cmd_list(ctx).await,
    }
}

/// Build an API client from the rc file: base URL, optional user id, and the
/// stored access token when present.
pub(crate) fn client_for(ctx: &Context) -> Result<GrindClient> {
    let mut builder =
        GrindClient::builder().base_url(ctx.store.get_or("API_BASE_URL", DEFAULT_API_BASE_URL));

    if let Some(user_id) = ctx.store.get("USER_ID") {
        builder = builder.user_id(user_id);
    }
    if let Some(token) = ctx.store.get("ACCESS_TOKEN").filter(|t| !t.is_empty()) {
        builder = builder.auth_token(token);
    }

    builder.build().context("could not build API client")
}

async fn cmd_new(text: &str, ctx: &Context) -> Result<()> {
    let client = client_for(ctx)?;
    client
        .create_capture(text)
        .await
        .context("Failed to create capture")?;

    println!("{} Capture saved.", style("✓").green());
    Ok(())
}

async fn cmd_list(ctx: &Context) -> Result<()> {
    let client = client_for(ctx)?;
    let captures = client
        .list_unmigrated()
        .await
        .context("Failed to fetch captures")?;

    if captures.is_empty() {
        println!("No unmigrated captures.");
        return Ok(());
    }

    println!("{} unmigrated capture(s):", captures.len());
    for capture in &captures {
        // char-based so multi-byte text can't split mid-character
        let mut preview: String = capture.raw_text.chars().take(50).collect();
        if capture.raw_text.chars().count() > 50 {
            preview.push_str("...");
        }
        match &capture.created_at {
            Some(created) => println!("  {} {}", preview, style(format!("({created})")).dim()),
            None => println!("  {preview}"),
        }
    }
    Ok(())
}
