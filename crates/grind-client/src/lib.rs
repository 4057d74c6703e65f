//! HTTP client for the grind capture API.
//!
//! Two small surfaces: capture submission/listing and the API version check.
//! Built with an explicit builder so commands construct exactly the client
//! they need (base URL from config, optional bearer token from the
//! credential store).

pub mod client;
pub mod error;
pub mod types;

pub use client::{ClientBuilder, GrindClient, DEFAULT_USER_ID};
pub use error::{Error, Result};
pub use types::{Capture, CaptureRequest, VersionInfo};
