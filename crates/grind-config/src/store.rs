//! The `~/.grindrc` key-value store.
//!
//! A flat JSON object read in full on every `get` and written back in full on
//! every `set`. A missing or malformed file reads as empty — first-run and a
//! corrupted rc behave the same, and the next `set` rewrites a clean file.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};

/// Rc filename within the home directory.
pub const RC_FILE: &str = ".grindrc";

/// Environment variable overriding the rc file location (used by tests and
/// sandboxed installs).
pub const RC_PATH_ENV: &str = "GRIND_RC_PATH";

/// Keys required by the application and not removable via the CLI.
pub const REQUIRED_KEYS: &[&str] = &[
    "APP_MODE",
    "API_BASE_URL",
    "OIDC_ISSUER_URL",
    "OIDC_CLIENT_ID",
    "LOG_LEVEL",
];

/// Allowed values for `APP_MODE`.
pub const APP_MODE_CHOICES: &[&str] = &["divergent", "typical"];

/// File-backed key-value store.
///
/// All operations are synchronous; callers that need the store from async
/// contexts pass `&RcStore` through and call it inline (the file is tiny).
#[derive(Debug, Clone)]
pub struct RcStore {
    path: PathBuf,
}

impl RcStore {
    /// Open the store at the default location: `$GRIND_RC_PATH` if set,
    /// otherwise `~/.grindrc`.
    pub fn open() -> Result<Self> {
        if let Ok(path) = std::env::var(RC_PATH_ENV) {
            return Ok(Self::at_path(PathBuf::from(path)));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::at_path(home.join(RC_FILE)))
    }

    /// Open the store at an explicit path.
    pub fn at_path(path: PathBuf) -> Self {
        Self {
            path,
        }
    }

    /// Path of the rc file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw rc file contents, if the file exists.
    pub fn raw(&self) -> Option<String> {
        std::fs::read_to_string(&self.path).ok()
    }

    fn load(&self) -> Map<String, Value> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str::<Value>(&contents) {
                Ok(Value::Object(map)) => map,
                Ok(_) | Err(_) => {
                    tracing::debug!(path = %self.path.display(), "rc file unreadable, treating as empty");
                    Map::new()
                }
            },
            Err(_) => Map::new(),
        }
    }

    fn save(&self, map: &Map<String, Value>) -> Result<()> {
        let json = serde_json::to_string_pretty(&Value::Object(map.clone()))?;
        std::fs::write(&self.path, json).map_err(|e| ConfigError::WriteFile {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    /// Get a value by key.
    ///
    /// String values come back as-is; anything else (numbers, booleans left
    /// by older versions) comes back as its JSON text.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.load().get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        }
    }

    /// Get a value by key, falling back to `default` when absent.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Set a value, creating the rc file if needed.
    ///
    /// `APP_MODE` is validated against [`APP_MODE_CHOICES`] and stored
    /// lowercased.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let value = if key == "APP_MODE" {
            let lowered = value.to_lowercase();
            if !APP_MODE_CHOICES.contains(&lowered.as_str()) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    allowed: APP_MODE_CHOICES.join(", "),
                });
            }
            lowered
        } else {
            value.to_string()
        };

        let mut map = self.load();
        map.insert(key.to_string(), Value::String(value));
        self.save(&map)
    }

    /// Remove a key from the rc file.
    ///
    /// Returns `true` if the key was removed, `false` when it was absent or
    /// is one of [`REQUIRED_KEYS`].
    pub fn unset(&self, key: &str) -> Result<bool> {
        if REQUIRED_KEYS.contains(&key) {
            return Ok(false);
        }
        let mut map = self.load();
        if map.remove(key).is_none() {
            return Ok(false);
        }
        self.save(&map)?;
        Ok(true)
    }

    /// Required keys that have no value yet.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let map = self.load();
        REQUIRED_KEYS
            .iter()
            .filter(|k| !map.contains_key(**k))
            .copied()
            .collect()
    }
}
