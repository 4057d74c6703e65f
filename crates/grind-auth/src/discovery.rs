//! Provider discovery via OpenID Connect well-known metadata.

use std::time::Duration;

use serde::Deserialize;

use crate::authenticator::IssuerConfig;

/// Timeout for the metadata request. Discovery is advisory — a slow provider
/// must not stall the flow longer than this.
pub const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Deserialize)]
struct ProviderMetadata {
    #[serde(default)]
    device_authorization_endpoint: Option<String>,
}

/// Resolve the device authorization endpoint for the issuer.
///
/// Tries `{issuer}/.well-known/openid-configuration`; on any failure
/// (network, timeout, non-2xx, malformed JSON, missing field) falls back
/// silently to the conventional path. Never fails — the initiator retries
/// with a second conventional path if this guess turns out wrong.
pub async fn resolve_device_endpoint(http: &reqwest::Client, issuer: &IssuerConfig) -> String {
    match fetch_device_endpoint(http, &issuer.well_known_url()).await {
        Some(endpoint) => endpoint,
        None => {
            tracing::debug!(
                issuer = %issuer.issuer_url,
                "discovery failed, falling back to conventional device endpoint"
            );
            issuer.fallback_device_endpoint()
        }
    }
}

async fn fetch_device_endpoint(http: &reqwest::Client, well_known_url: &str) -> Option<String> {
    let response = http
        .get(well_known_url)
        .header(reqwest::header::ACCEPT, "application/json")
        .timeout(DISCOVERY_TIMEOUT)
        .send()
        .await
        .ok()?
        .error_for_status()
        .ok()?;

    let metadata: ProviderMetadata = response.json().await.ok()?;
    metadata
        .device_authorization_endpoint
        .filter(|e| !e.is_empty())
}
