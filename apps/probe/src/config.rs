//! Configuration management for the CRUD probe

use crate::error::{Error, Result};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub payload: PayloadConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Collection URL of the scratch-data service. Records are addressed as
    /// `{base_url}/{id}`; trailing slashes are ignored when joining.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. Default: 30
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl TargetConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Field values for the created record and the update overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct PayloadConfig {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_firstname")]
    pub firstname: String,
    #[serde(default = "default_surname")]
    pub surname: String,
    #[serde(default = "default_mobile_number")]
    pub mobile_number: String,
    #[serde(default = "default_updated_username")]
    pub updated_username: String,
    #[serde(default = "default_updated_firstname")]
    pub updated_firstname: String,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            firstname: default_firstname(),
            surname: default_surname(),
            mobile_number: default_mobile_number(),
            updated_username: default_updated_username(),
            updated_firstname: default_updated_firstname(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Use JSON formatting for logs
    #[serde(default)]
    pub json: bool,

    /// Enable file logging in addition to console
    #[serde(default)]
    pub file_enabled: bool,

    /// Directory for log files (default: ./logs)
    #[serde(default = "default_log_directory")]
    pub file_directory: String,

    /// Log file prefix (default: crud-probe)
    #[serde(default = "default_log_file_prefix")]
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            file_enabled: false,
            file_directory: default_log_directory(),
            file_prefix: default_log_file_prefix(),
        }
    }
}

fn default_base_url() -> String {
    "https://crudcrud.com/api/e918226c57dc4ca8b901050aa60a2fbc/users/".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_username() -> String {
    "TestUser".to_string()
}

fn default_firstname() -> String {
    "John".to_string()
}

fn default_surname() -> String {
    "Doe".to_string()
}

fn default_mobile_number() -> String {
    "1234567890".to_string()
}

fn default_updated_username() -> String {
    "UpdatedUser".to_string()
}

fn default_updated_firstname() -> String {
    "UpdatedFirstName".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "./logs".to_string()
}

fn default_log_file_prefix() -> String {
    "crud-probe".to_string()
}

impl Config {
    /// Load configuration from environment and config files
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default("target.base_url", default_base_url())?
            .set_default("target.timeout_seconds", default_timeout_seconds())?
            .set_default("payload.username", default_username())?
            .set_default("payload.firstname", default_firstname())?
            .set_default("payload.surname", default_surname())?
            .set_default("payload.mobile_number", default_mobile_number())?
            .set_default("payload.updated_username", default_updated_username())?
            .set_default("payload.updated_firstname", default_updated_firstname())?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.json", false)?
            .set_default("logging.file_enabled", false)?
            .set_default("logging.file_directory", default_log_directory())?
            .set_default("logging.file_prefix", default_log_file_prefix())?
            .add_source(config::File::with_name("probe").required(false))
            // Example: PROBE__TARGET__BASE_URL → config.target.base_url
            .add_source(
                config::Environment::with_prefix("PROBE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.target.base_url).map_err(|e| {
            Error::Config(format!(
                "target.base_url '{}' is not a valid URL: {e}",
                self.target.base_url
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "target.base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.target.timeout_seconds == 0 {
            return Err(Error::Config(
                "target.timeout_seconds must be > 0".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(Error::Config("logging.level must not be empty".to_string()));
        }
        Ok(())
    }
}
