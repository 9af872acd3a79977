/// Database configuration and connection management
pub mod database;

/// Company profile and form defaults loaded from config.toml
pub mod settings;

pub use settings::{AppConfig, CompanyConfig, FormDefaults, load_app_configuration, load_config};
