//! Pipeline configuration.
//!
//! Every constant of the extraction run lives here so it can be swapped out
//! (tests point the endpoint at a mock server, users can set their own SEC
//! identity). Values come from an optional TOML file:
//!
//! ```toml
//! endpoint_template = "https://data.sec.gov/api/xbrl/companyfacts/CIK{cik}.json"
//! identity_string = "Example Corp research@example.com"
//! reporting_unit = "USD"
//! courtesy_delay_ms = 500
//! metric_whitelist = ["Assets", "Liabilities"]
//! ```
//!
//! Missing keys fall back to [`PipelineConfig::default`].

use factsheet_data::edgar::{
    CIK_PLACEHOLDER, DEFAULT_ENDPOINT_TEMPLATE, DEFAULT_METRICS, DEFAULT_REPORTING_UNIT,
    DEFAULT_USER_AGENT, EdgarClient, MetricExtractor,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default pause before each facts request.
pub const DEFAULT_COURTESY_DELAY_MS: u64 = 500;

/// File name looked up in the platform config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Config values are inconsistent
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Facts endpoint; `{cik}` is replaced by the 10-digit CIK
    pub endpoint_template: String,
    /// User-Agent sent with every request
    pub identity_string: String,
    /// Metrics to extract, in output order
    pub metric_whitelist: Vec<String>,
    /// Unit of measure to read (e.g. "USD")
    pub reporting_unit: String,
    /// Pause before every request, in milliseconds
    pub courtesy_delay_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            endpoint_template: DEFAULT_ENDPOINT_TEMPLATE.to_string(),
            identity_string: DEFAULT_USER_AGENT.to_string(),
            metric_whitelist: DEFAULT_METRICS.iter().map(|m| (*m).to_string()).collect(),
            reporting_unit: DEFAULT_REPORTING_UNIT.to_string(),
            courtesy_delay_ms: DEFAULT_COURTESY_DELAY_MS,
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&content)
    }

    /// Load the config file from the platform config directory if there is
    /// one, otherwise return the defaults.
    ///
    /// - Linux: `~/.config/factsheet/config.toml`
    /// - macOS: `~/Library/Application Support/factsheet/config.toml`
    /// - Windows: `%APPDATA%\factsheet\config.toml`
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Check that the values describe a runnable pipeline.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.endpoint_template.contains(CIK_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "endpoint_template must contain {}",
                CIK_PLACEHOLDER
            )));
        }
        if self.identity_string.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "identity_string must not be empty".to_string(),
            ));
        }
        if self.metric_whitelist.is_empty() {
            return Err(ConfigError::Invalid(
                "metric_whitelist must name at least one metric".to_string(),
            ));
        }
        if self.reporting_unit.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "reporting_unit must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Pause before each request.
    pub const fn courtesy_delay(&self) -> Duration {
        Duration::from_millis(self.courtesy_delay_ms)
    }

    /// Extractor for the configured metrics and unit.
    pub fn extractor(&self) -> MetricExtractor {
        MetricExtractor::new(self.metric_whitelist.clone(), self.reporting_unit.clone())
    }

    /// HTTP client for the configured endpoint and identity.
    pub fn edgar_client(&self) -> factsheet_data::Result<EdgarClient> {
        EdgarClient::with_identity(self.endpoint_template.clone(), &self.identity_string)
    }
}

/// Platform-specific location of the config file.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("factsheet").join(CONFIG_FILE_NAME))
}
