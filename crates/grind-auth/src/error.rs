//! Error types for the device authorization flow.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that terminate an authentication attempt.
///
/// Messages are user-facing: the CLI prints them verbatim, so terminal user
/// errors carry re-initiation guidance and `UnauthorizedClient` carries the
/// provider-side remediation.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The user rejected the authorization request.
    #[error("Access denied during authorization.")]
    AccessDenied,

    /// The client-side deadline passed before the user approved.
    #[error("Device authorization expired. Please run login again.")]
    AuthorizationExpired,

    /// The provider invalidated the device code.
    #[error("Device code expired. Please run login again.")]
    DeviceCodeExpired,

    /// The client is not enabled for the device grant on the provider.
    #[error(
        "Client '{0}' is not authorized for the Device Authorization Grant. Enable the grant for this client on the provider."
    )]
    UnauthorizedClient(String),

    /// Initiation failed with the best message the provider gave us.
    #[error("{0}")]
    Initiation(String),

    /// Token polling hit a terminal provider or transport error.
    #[error("{0}")]
    TokenPoll(String),

    /// The attempt was cancelled from outside.
    #[error("Authentication cancelled")]
    Cancelled,

    /// Persisting credentials failed.
    #[error("Failed to persist credentials: {0}")]
    Store(String),
}
