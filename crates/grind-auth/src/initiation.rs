//! Device session initiation.
//!
//! Requests a device code / user code pair, retrying once against the
//! alternate conventional path when the first endpoint looks wrong. The
//! retry heuristic (404, a PKCE challenge-method complaint, or a guessed
//! `/auth/device` path) matches observed provider deployments rather than
//! anything in the RFC; it lives entirely in this module.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use tokio::time::Instant;

use crate::authenticator::IssuerConfig;
use crate::error::{AuthError, Result};

/// Scopes requested for the device session.
pub const SCOPE: &str = "openid profile email";

/// Floor for the polling interval, regardless of a smaller provider
/// suggestion (RFC 8628 default).
pub const MIN_POLL_INTERVAL_SECS: u64 = 5;

/// Session lifetime assumed when the provider omits `expires_in`.
pub const DEFAULT_EXPIRES_IN_SECS: u64 = 600;

/// Device authorization response, field names per RFC 8628.
#[derive(Debug, Deserialize)]
pub(crate) struct DeviceAuthorizationResponse {
    pub device_code: String,
    #[serde(default)]
    pub user_code: Option<String>,
    pub verification_uri: String,
    #[serde(default)]
    pub verification_uri_complete: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub interval: Option<u64>,
}

/// OAuth error body (`error` / `error_description`), tolerated missing.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct OAuthErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl OAuthErrorBody {
    /// Best human-readable message: description, then code.
    pub(crate) fn best_message(&self) -> Option<String> {
        non_empty(self.error_description.as_deref()).or_else(|| non_empty(self.error.as_deref()))
    }

    pub(crate) fn code(&self) -> Option<&str> {
        self.error.as_deref().filter(|c| !c.is_empty())
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

/// One in-flight authentication attempt.
///
/// Created from the initiation response and destroyed when the attempt
/// terminates; never persisted. The deadline is fixed at creation — only
/// `poll_interval` mutates afterwards (it grows under `slow_down`).
#[derive(Debug)]
pub struct DeviceSession {
    pub device_code: String,
    pub user_code: Option<String>,
    pub verification_uri: String,
    pub verification_uri_complete: Option<String>,
    pub expires_at: Instant,
    pub poll_interval: Duration,
}

impl DeviceSession {
    fn from_response(response: DeviceAuthorizationResponse) -> Self {
        let interval_secs = response
            .interval
            .unwrap_or(MIN_POLL_INTERVAL_SECS)
            .max(MIN_POLL_INTERVAL_SECS);
        let expires_in_secs = response.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);

        Self {
            device_code: response.device_code,
            user_code: response.user_code,
            verification_uri: response.verification_uri,
            verification_uri_complete: response.verification_uri_complete,
            expires_at: Instant::now() + Duration::from_secs(expires_in_secs),
            poll_interval: Duration::from_secs(interval_secs),
        }
    }
}

/// How one POST to a device authorization endpoint failed.
enum AttemptFailure {
    /// The provider answered with an error status.
    Provider {
        status: StatusCode,
        body: OAuthErrorBody,
    },
    /// No usable response (connect failure, timeout, undecodable success body).
    Transport(String),
}

/// Request a device code / user code pair from `endpoint`.
///
/// On failure, retries once against the alternate conventional path when the
/// failure suggests a wrong path guess; `unauthorized_client` from either
/// endpoint fails immediately with remediation guidance.
pub async fn initiate(
    http: &reqwest::Client,
    issuer: &IssuerConfig,
    endpoint: &str,
) -> Result<DeviceSession> {
    let failure = match try_post(http, endpoint, &issuer.client_id).await {
        Ok(response) => return Ok(DeviceSession::from_response(response)),
        Err(failure) => failure,
    };

    if !should_retry_alternate(&failure, endpoint) {
        return Err(initiation_error(failure, issuer));
    }

    let alternate = issuer.alternate_device_endpoint();
    tracing::debug!(endpoint = %alternate, "retrying device authorization at alternate path");
    match try_post(http, &alternate, &issuer.client_id).await {
        Ok(response) => Ok(DeviceSession::from_response(response)),
        Err(failure) => Err(initiation_error(failure, issuer)),
    }
}

async fn try_post(
    http: &reqwest::Client,
    endpoint: &str,
    client_id: &str,
) -> std::result::Result<DeviceAuthorizationResponse, AttemptFailure> {
    let params = [("client_id", client_id), ("scope", SCOPE)];
    let response = http
        .post(endpoint)
        .form(&params)
        .send()
        .await
        .map_err(|e| AttemptFailure::Transport(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        response
            .json::<DeviceAuthorizationResponse>()
            .await
            .map_err(|e| AttemptFailure::Transport(e.to_string()))
    } else {
        let body = response.json::<OAuthErrorBody>().await.unwrap_or_default();
        Err(AttemptFailure::Provider {
            status,
            body,
        })
    }
}

fn should_retry_alternate(failure: &AttemptFailure, endpoint: &str) -> bool {
    let (is_404, looks_like_pkce) = match failure {
        AttemptFailure::Provider {
            status,
            body,
        } => (
            *status == StatusCode::NOT_FOUND,
            body.error_description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains("code_challenge_method")),
        ),
        AttemptFailure::Transport(_) => (false, false),
    };

    is_404 || looks_like_pkce || endpoint.ends_with("/auth/device")
}

fn initiation_error(failure: AttemptFailure, issuer: &IssuerConfig) -> AuthError {
    match failure {
        AttemptFailure::Provider {
            body, ..
        } => {
            if body.code() == Some("unauthorized_client") {
                return AuthError::UnauthorizedClient(issuer.client_id.clone());
            }
            AuthError::Initiation(
                body.best_message()
                    .unwrap_or_else(|| "Failed to initiate device authorization".to_string()),
            )
        }
        AttemptFailure::Transport(message) => AuthError::Initiation(message),
    }
}
