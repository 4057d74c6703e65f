//! Wire types for the grind capture API.

use serde::{Deserialize, Serialize};

/// Capture submission body. Text goes up raw; the API handles encoding.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRequest {
    pub user_id: String,
    pub raw_text: String,
    pub migrated: bool,
}

/// A stored capture as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capture {
    #[serde(default)]
    pub id: Option<String>,
    pub raw_text: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub migrated: bool,
}

/// Version info from `GET /v1/version`.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}
