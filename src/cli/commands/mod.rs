//! Command handlers organized by document kind.

/// Utility commands
pub mod general;
/// Invoice commands
pub mod invoice;
/// Service report commands
pub mod report;

use crate::errors::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

/// Reads a TOML draft form.
pub(crate) fn read_draft<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!("Reading draft {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    toml::from_str(&contents).map_err(|e| Error::InvalidDraft {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
