//! Auth command - device flow login and session management.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use tokio_util::sync::CancellationToken;

use grind_auth::{stored_token, CredentialStore, DeviceAuthenticator, IssuerConfig, ACCESS_TOKEN};
use grind_config::RcStore;

use super::{Context, DEFAULT_CLIENT_ID, DEFAULT_ISSUER_URL};

/// Arguments for the auth command.
#[derive(Args, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Authenticate via the Device Authorization Grant
    Login,

    /// Clear the stored access token
    Logout,

    /// Show whether a token is stored
    Status,
}

/// Run the auth command.
pub async fn run(args: AuthArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AuthCommand::Login => cmd_login(ctx).await,
        AuthCommand::Logout => cmd_logout(ctx),
        AuthCommand::Status => cmd_status(ctx),
    }
}

/// Rc-file store behind the core's credential seam.
struct RcCredentials {
    store: RcStore,
}

impl CredentialStore for RcCredentials {
    fn get(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    fn set(&self, key: &str, value: &str) -> grind_auth::Result<()> {
        self.store
            .set(key, value)
            .map_err(|e| grind_auth::AuthError::Store(e.to_string()))
    }
}

async fn cmd_login(ctx: &Context) -> Result<()> {
    let issuer = IssuerConfig::new(
        ctx.store.get_or("OIDC_ISSUER_URL", DEFAULT_ISSUER_URL),
        ctx.store.get_or("OIDC_CLIENT_ID", DEFAULT_CLIENT_ID),
    );
    let credentials = RcCredentials {
        store: ctx.store.clone(),
    };

    // ctrl-c aborts the poll loop instead of leaving the process hanging in
    // a sleep
    let cancel = CancellationToken::new();
    let canceller = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            canceller.cancel();
        }
    });

    println!("Authenticate via Device Code flow...");
    DeviceAuthenticator::new(issuer)
        .authenticate(&credentials, &cancel)
        .await
        .map_err(|e| anyhow::anyhow!("Authentication failed: {e}"))?;

    println!("{} Authentication successful!", style("✓").green());
    Ok(())
}

fn cmd_logout(ctx: &Context) -> Result<()> {
    // blank the token rather than deleting the key; an empty value reads as
    // logged out
    ctx.store.set(ACCESS_TOKEN, "")?;
    println!("Logged out successfully.");
    Ok(())
}

fn cmd_status(ctx: &Context) -> Result<()> {
    let credentials = RcCredentials {
        store: ctx.store.clone(),
    };
    if stored_token(&credentials).is_some() {
        println!("You are logged in.");
    } else {
        println!("You are not logged in.");
    }
    Ok(())
}
