//! Configuration error types.

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while reading or writing the rc file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to write the rc file.
    #[error("failed to write config file '{path}': {source}")]
    WriteFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize the rc contents.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Rejected value for a validated key.
    #[error("{key} must be one of: {allowed}")]
    InvalidValue { key: String, allowed: String },

    /// Home directory could not be resolved.
    #[error("could not determine home directory")]
    NoHomeDir,
}
