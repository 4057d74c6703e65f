//! Token polling loop.
//!
//! Polls the token endpoint with the device code until the user approves,
//! honoring the grant's error vocabulary: `authorization_pending` keeps the
//! interval, `slow_down` doubles it (capped), `access_denied` and
//! `expired_token` terminate. The session deadline is a hard ceiling checked
//! before every request — the server's willingness to keep answering
//! `pending` does not extend it.

use std::time::Duration;

use serde::Deserialize;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::authenticator::IssuerConfig;
use crate::error::{AuthError, Result};
use crate::initiation::{DeviceSession, OAuthErrorBody};
use crate::store::{CredentialStore, ACCESS_TOKEN, ACCESS_TOKEN_EXPIRES_IN, REFRESH_TOKEN};

/// Grant type for device code token requests (RFC 8628 §3.4).
pub const DEVICE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// Ceiling for the backoff interval under repeated `slow_down`.
pub const MAX_POLL_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Tokens from a successful poll. Ownership moves to the credential store
/// immediately; nothing else holds these long-term.
#[derive(Debug, Clone)]
pub struct TokenResult {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
}

/// Outcome of a single poll attempt.
#[derive(Debug)]
pub(crate) enum PollOutcome {
    Success(TokenResult),
    Pending,
    SlowDown,
    Denied,
    Expired,
    Fatal(String),
}

/// Interval after a `slow_down`: doubled, capped.
pub(crate) fn next_interval(current: Duration) -> Duration {
    (current * 2).min(MAX_POLL_INTERVAL)
}

/// Poll the token endpoint until a terminal outcome.
///
/// On success the tokens are persisted to `store` and the access token is
/// returned. `session.poll_interval` is the only state this mutates.
pub async fn poll_for_token(
    http: &reqwest::Client,
    issuer: &IssuerConfig,
    session: &mut DeviceSession,
    store: &dyn CredentialStore,
    cancel: &CancellationToken,
) -> Result<String> {
    let token_endpoint = issuer.token_endpoint();

    loop {
        if cancel.is_cancelled() {
            return Err(AuthError::Cancelled);
        }
        if Instant::now() > session.expires_at {
            return Err(AuthError::AuthorizationExpired);
        }

        let outcome = poll_once(http, &token_endpoint, &issuer.client_id, &session.device_code).await;
        match outcome {
            PollOutcome::Success(tokens) => {
                persist(store, &tokens)?;
                tracing::info!("access token acquired");
                return Ok(tokens.access_token);
            }
            PollOutcome::Pending => {
                tracing::trace!(interval = ?session.poll_interval, "authorization pending");
            }
            PollOutcome::SlowDown => {
                session.poll_interval = next_interval(session.poll_interval);
                tracing::debug!(interval = ?session.poll_interval, "provider requested slow down");
            }
            PollOutcome::Denied => return Err(AuthError::AccessDenied),
            PollOutcome::Expired => return Err(AuthError::DeviceCodeExpired),
            PollOutcome::Fatal(message) => return Err(AuthError::TokenPoll(message)),
        }

        tokio::select! {
            _ = cancel.cancelled() => return Err(AuthError::Cancelled),
            _ = tokio::time::sleep(session.poll_interval) => {}
        }
    }
}

async fn poll_once(
    http: &reqwest::Client,
    token_endpoint: &str,
    client_id: &str,
    device_code: &str,
) -> PollOutcome {
    let params = [
        ("grant_type", DEVICE_GRANT_TYPE),
        ("device_code", device_code),
        ("client_id", client_id),
    ];

    let response = match http.post(token_endpoint).form(&params).send().await {
        Ok(response) => response,
        Err(e) => return PollOutcome::Fatal(e.to_string()),
    };

    if response.status().is_success() {
        let body = match response.json::<TokenResponse>().await {
            Ok(body) => body,
            Err(e) => return PollOutcome::Fatal(e.to_string()),
        };
        return match body.access_token.filter(|t| !t.is_empty()) {
            Some(access_token) => PollOutcome::Success(TokenResult {
                access_token,
                refresh_token: body.refresh_token,
                expires_in: body.expires_in,
            }),
            None => PollOutcome::Fatal("No access token received".to_string()),
        };
    }

    let body = response.json::<OAuthErrorBody>().await.unwrap_or_default();
    match body.code() {
        Some("authorization_pending") => PollOutcome::Pending,
        Some("slow_down") => PollOutcome::SlowDown,
        Some("access_denied") => PollOutcome::Denied,
        Some("expired_token") => PollOutcome::Expired,
        _ => PollOutcome::Fatal(
            body.best_message()
                .unwrap_or_else(|| "Token polling failed".to_string()),
        ),
    }
}

fn persist(store: &dyn CredentialStore, tokens: &TokenResult) -> Result<()> {
    store.set(ACCESS_TOKEN, &tokens.access_token)?;
    if let Some(refresh_token) = &tokens.refresh_token {
        store.set(REFRESH_TOKEN, refresh_token)?;
    }
    if let Some(expires_in) = tokens.expires_in {
        store.set(ACCESS_TOKEN_EXPIRES_IN, &expires_in.to_string())?;
    }
    Ok(())
}
