//! OAuth 2.0 Device Authorization Grant (RFC 8628) client.
//!
//! The grind CLI runs on machines without a reachable localhost callback
//! listener, so login uses the device flow: resolve the provider's device
//! authorization endpoint, request a device/user code pair, hand the
//! verification URL to the user (browser + clipboard, best-effort), then
//! poll the token endpoint until approval or a terminal failure.
//!
//! The flow exposes exactly one capability to the rest of the CLI: produce a
//! valid access token, or fail. Tokens land in a [`CredentialStore`] injected
//! per attempt.
//!
//! ```no_run
//! use grind_auth::{DeviceAuthenticator, IssuerConfig, InMemoryCredentialStore};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> grind_auth::Result<()> {
//! let issuer = IssuerConfig::new("https://keycloak.example/realms/prod", "cli-app");
//! let store = InMemoryCredentialStore::new();
//! let token = DeviceAuthenticator::new(issuer)
//!     .authenticate(&store, &CancellationToken::new())
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod authenticator;
pub mod discovery;
pub mod error;
pub mod handoff;
pub mod initiation;
pub mod poller;
pub mod store;

pub use authenticator::{DeviceAuthenticator, IssuerConfig};
pub use error::{AuthError, Result};
pub use handoff::{DesktopHandoff, Handoff};
pub use initiation::DeviceSession;
pub use poller::TokenResult;
pub use store::{
    stored_token, CredentialStore, InMemoryCredentialStore, ACCESS_TOKEN,
    ACCESS_TOKEN_EXPIRES_IN, REFRESH_TOKEN,
};
