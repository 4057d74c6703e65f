//! CLI command handlers.

use grind_config::RcStore;

pub mod auth;
pub mod capture;
pub mod config;
pub mod version;

/// Default OIDC issuer when the rc file has no `OIDC_ISSUER_URL`.
pub const DEFAULT_ISSUER_URL: &str = "https://divergent-flow-keycloak.fly.dev/realms/df-prod";

/// Default OIDC client id when the rc file has no `OIDC_CLIENT_ID`.
pub const DEFAULT_CLIENT_ID: &str = "cli-app";

/// Default API base URL when the rc file has no `API_BASE_URL`.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// The rc-file store (settings and persisted credentials).
    pub store: RcStore,
    /// Verbose output enabled.
    pub verbose: bool,
}
