//! Configuration store for the grind CLI.
//!
//! A single flat JSON rc file (`~/.grindrc`) holding string settings and
//! persisted credentials. Consumers get an explicit [`RcStore`] handle rather
//! than a process-global — commands construct one at startup and pass it to
//! whatever needs it, so tests can point the store at a temp directory.

pub mod error;
pub mod store;

pub use error::{ConfigError, Result};
pub use store::{RcStore, APP_MODE_CHOICES, RC_FILE, RC_PATH_ENV, REQUIRED_KEYS};
