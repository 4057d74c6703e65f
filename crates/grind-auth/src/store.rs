//! Credential persistence seam.
//!
//! The flow's only obligation to the rest of the CLI is "produce a valid
//! access token, or fail" — the token lands in whatever implements
//! [`CredentialStore`]. Production wires in the rc-file store; tests inject
//! [`InMemoryCredentialStore`].

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::Result;

/// Store key for the access token.
pub const ACCESS_TOKEN: &str = "ACCESS_TOKEN";

/// Store key for the refresh token.
///
/// Stored verbatim when the provider returns one; no refresh flow consumes it.
pub const REFRESH_TOKEN: &str = "REFRESH_TOKEN";

/// Store key for the access token lifetime reported at issuance (seconds).
pub const ACCESS_TOKEN_EXPIRES_IN: &str = "ACCESS_TOKEN_EXPIRES_IN";

/// Synchronous key-value persistence for credentials.
pub trait CredentialStore: Send + Sync {
    /// Get a stored value.
    fn get(&self, key: &str) -> Option<String>;

    /// Set a value, overwriting any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// A stored access token, treating the empty string as absent (logout writes
/// an empty value rather than deleting the key).
pub fn stored_token(store: &dyn CredentialStore) -> Option<String> {
    store.get(ACCESS_TOKEN).filter(|t| !t.is_empty())
}

/// In-memory credential store for tests.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    values: Mutex<HashMap<String, String>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
