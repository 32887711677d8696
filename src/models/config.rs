//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Source endpoint and fetch behavior settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Snapshot store settings
    #[serde(default)]
    pub store: StoreConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.source.user_agent.trim().is_empty() {
            return Err(AppError::config("source.user_agent is empty"));
        }
        if self.source.timeout_secs == 0 {
            return Err(AppError::config("source.timeout_secs must be > 0"));
        }
        if self.source.limit == 0 || self.source.limit > defaults::limit() {
            return Err(AppError::config(format!(
                "source.limit must be between 1 and {}",
                defaults::limit()
            )));
        }
        url::Url::parse(&self.source.html_url)
            .map_err(|e| AppError::config(format!("source.html_url is invalid: {e}")))?;
        // The year placeholder is substituted before parsing
        let probe = self.source.api_url.replace("{year}", "2026");
        url::Url::parse(&probe)
            .map_err(|e| AppError::config(format!("source.api_url is invalid: {e}")))?;
        if self.store.table_name.trim().is_empty() {
            return Err(AppError::config("store.table_name is empty"));
        }
        Ok(())
    }
}

/// Which extraction strategy to run against the institute's endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceVariant {
    /// Scrape the public reports page
    #[default]
    Html,
    /// Query the JSON API parameterized by calendar year
    Api,
}

/// Source endpoint and HTTP behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Extraction strategy selection
    #[serde(default)]
    pub variant: SourceVariant,

    /// URL of the reports HTML page
    #[serde(default = "defaults::html_url")]
    pub html_url: String,

    /// URL template of the JSON API; `{year}` is replaced at fetch time
    #[serde(default = "defaults::api_url")]
    pub api_url: String,

    /// Maximum number of records per batch
    #[serde(default = "defaults::limit")]
    pub limit: usize,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            variant: SourceVariant::default(),
            html_url: defaults::html_url(),
            api_url: defaults::api_url(),
            limit: defaults::limit(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// Snapshot store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory for the local file-backed store
    #[serde(default = "defaults::data_dir")]
    pub data_dir: String,

    /// DynamoDB table name (Lambda deployment)
    #[serde(default = "defaults::table_name")]
    pub table_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: defaults::data_dir(),
            table_name: defaults::table_name(),
        }
    }
}

mod defaults {
    pub fn html_url() -> String {
        "https://ultimosismo.igp.gob.pe/ultimo-sismo/sismos-reportados".into()
    }
    pub fn api_url() -> String {
        "https://ultimosismo.igp.gob.pe/api/ultimo-sismo/ajaxb/{year}".into()
    }
    pub fn limit() -> usize {
        10
    }
    pub fn timeout() -> u64 {
        15
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; sismo-crawler/1.0)".into()
    }
    pub fn data_dir() -> String {
        "records".into()
    }
    pub fn table_name() -> String {
        "TablaSismos".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.source.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.source.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_oversized_limit() {
        let mut config = Config::default();
        config.source.limit = 50;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_api_url() {
        let mut config = Config::default();
        config.source.api_url = "not a url {year}".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn variant_parses_from_toml() {
        let config: Config = toml::from_str("[source]\nvariant = \"api\"\n").unwrap();
        assert_eq!(config.source.variant, SourceVariant::Api);
    }
}
