//! Application configuration loading from config.toml
//!
//! The configuration file carries the issuing company's profile, which pre-fills every new
//! invoice, and the defaults a form returns to when it is reset. Every key is optional; a
//! missing file yields the built-in defaults.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_VAR: &str = "INVOICE_DESK_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config.toml";

const DEFAULT_NOTES: &str = "1. All cheques should be crossed and made payable to the company.\n\n\
2. Please include the invoice number on your cheque.\n\n\
3. Goods are neither returnable nor refundable.";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Issuing company profile
    pub company: CompanyConfig,
    /// Values a reset form starts from
    pub defaults: FormDefaults,
}

/// Issuing company profile
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompanyConfig {
    /// Company name
    pub name: String,
    /// Business registration number
    pub uen: String,
    /// Office phone
    pub office: String,
    /// Postal address
    pub address: String,
    /// Tax registration number
    pub gst_registration: String,
    /// Optional logo image embedded into every invoice
    pub logo_path: Option<PathBuf>,
}

/// Defaults applied to new and reset forms
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    /// Document tax rate in percent
    pub gst_rate: f64,
    /// Payment terms
    pub terms: String,
    /// Page marker
    pub page_info: String,
    /// Footer notes
    pub notes: String,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            gst_rate: 8.0,
            terms: "30 Days".to_string(),
            page_info: "01 of 01".to_string(),
            notes: DEFAULT_NOTES.to_string(),
        }
    }
}

/// Loads the configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.display()),
    })
}

/// Loads the configuration named by `INVOICE_DESK_CONFIG`, or `./config.toml`.
///
/// A missing file is not an error: the built-in defaults are used instead.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if Path::new(&path).exists() {
        load_config(&path)
    } else {
        info!("No configuration file at {path}; using defaults");
        Ok(AppConfig::default())
    }
}
