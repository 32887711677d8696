// src/config.rs

//! Configuration loading utilities.
//!
//! The CLI loads a TOML file from the storage directory; the Lambda
//! deployment assembles the same structure from environment variables.

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::{Config, SourceVariant};

/// Load configuration from a TOML file, falling back to defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    Ok(Config::load_or_default(path))
}

/// Config loader for the Lambda environment.
///
/// Recognized variables: `SOURCE_VARIANT` (`html`/`api`), `SOURCE_URL`,
/// `FETCH_TIMEOUT_SECS`, `TABLE_NAME`.
pub struct EnvConfigLoader;

impl EnvConfigLoader {
    /// Build a configuration from environment variables over defaults.
    pub fn load() -> Result<Config> {
        let mut config = Config::default();

        if let Ok(variant) = std::env::var("SOURCE_VARIANT") {
            config.source.variant = match variant.to_lowercase().as_str() {
                "html" => SourceVariant::Html,
                "api" => SourceVariant::Api,
                other => {
                    return Err(AppError::config(format!(
                        "Unknown SOURCE_VARIANT: {other}"
                    )));
                }
            };
        }

        if let Ok(url) = std::env::var("SOURCE_URL") {
            match config.source.variant {
                SourceVariant::Html => config.source.html_url = url,
                SourceVariant::Api => config.source.api_url = url,
            }
        }

        if let Ok(timeout) = std::env::var("FETCH_TIMEOUT_SECS") {
            config.source.timeout_secs = timeout
                .parse()
                .map_err(|e| AppError::config(format!("Invalid FETCH_TIMEOUT_SECS: {e}")))?;
        }

        if let Ok(table) = std::env::var("TABLE_NAME") {
            config.store.table_name = table;
        }

        config.validate()?;
        Ok(config)
    }
}
