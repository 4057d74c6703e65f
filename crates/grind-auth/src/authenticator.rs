//! Flow orchestration: discovery → initiation → hand-off → polling.

use tokio_util::sync::CancellationToken;

use crate::discovery;
use crate::error::Result;
use crate::handoff::{DesktopHandoff, Handoff};
use crate::initiation;
use crate::poller;
use crate::store::CredentialStore;

/// Keycloak-style well-known metadata path.
pub(crate) const WELL_KNOWN_PATH: &str = "/.well-known/openid-configuration";

/// Conventional device authorization path, tried first.
pub(crate) const DEVICE_AUTH_PATH: &str = "/protocol/openid-connect/auth/device";

/// Path variant used by some provider deployments, tried on failure.
pub(crate) const DEVICE_AUTH_PATH_ALTERNATE: &str = "/protocol/openid-connect/device/auth";

/// Token endpoint path.
pub(crate) const TOKEN_PATH: &str = "/protocol/openid-connect/token";

/// Provider coordinates for one authentication attempt.
#[derive(Debug, Clone)]
pub struct IssuerConfig {
    pub issuer_url: String,
    pub client_id: String,
}

impl IssuerConfig {
    /// Create a config, trimming any trailing slash off the issuer URL so
    /// path concatenation stays clean.
    pub fn new(issuer_url: impl Into<String>, client_id: impl Into<String>) -> Self {
        let issuer_url = issuer_url.into().trim_end_matches('/').to_string();
        Self {
            issuer_url,
            client_id: client_id.into(),
        }
    }

    pub(crate) fn well_known_url(&self) -> String {
        format!("{}{}", self.issuer_url, WELL_KNOWN_PATH)
    }

    pub(crate) fn fallback_device_endpoint(&self) -> String {
        format!("{}{}", self.issuer_url, DEVICE_AUTH_PATH)
    }

    pub(crate) fn alternate_device_endpoint(&self) -> String {
        format!("{}{}", self.issuer_url, DEVICE_AUTH_PATH_ALTERNATE)
    }

    pub fn token_endpoint(&self) -> String {
        format!("{}{}", self.issuer_url, TOKEN_PATH)
    }
}

/// Device Authorization Grant client.
///
/// One instance runs one or more sequential authentication attempts against a
/// fixed issuer. Collaborators are injected at construction; the credential
/// store and cancellation signal arrive per attempt.
pub struct DeviceAuthenticator {
    http: reqwest::Client,
    issuer: IssuerConfig,
    handoff: Box<dyn Handoff>,
}

impl DeviceAuthenticator {
    pub fn new(issuer: IssuerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            issuer,
            handoff: Box::new(DesktopHandoff),
        }
    }

    /// Replace the HTTP client (shared connection pools, test clients).
    pub fn with_http(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Replace the user hand-off (tests use a silent one).
    pub fn with_handoff(mut self, handoff: Box<dyn Handoff>) -> Self {
        self.handoff = handoff;
        self
    }

    pub fn issuer(&self) -> &IssuerConfig {
        &self.issuer
    }

    /// Run the full flow and return the access token.
    ///
    /// On success the token (and refresh token / lifetime when present) has
    /// already been persisted to `store`. Cancelling `cancel` aborts the
    /// poll loop immediately with [`crate::AuthError::Cancelled`].
    pub async fn authenticate(
        &self,
        store: &dyn CredentialStore,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let endpoint = discovery::resolve_device_endpoint(&self.http, &self.issuer).await;
        tracing::debug!(%endpoint, "resolved device authorization endpoint");

        let mut session = initiation::initiate(&self.http, &self.issuer, &endpoint).await?;
        tracing::info!(
            verification_uri = %session.verification_uri,
            "device authorization initiated"
        );

        // Fire-and-forget: browser/clipboard failures never gate the flow.
        self.handoff.present(&session).await;

        poller::poll_for_token(&self.http, &self.issuer, &mut session, store, cancel).await
    }
}
