//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable
//! overrides for values an operator would rather keep out of a checked-in
//! file.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

/// Logging configuration.
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl LoggingConfig {
    pub fn init(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

/// Default `required_confidence` used when a CLI invocation doesn't
/// override it.
fn default_required_confidence() -> f64 {
    0.5
}

/// Default per-request timeout, in milliseconds.
fn default_timeout_ms() -> u64 {
    30_000
}

/// Top-level application configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default = "default_required_confidence")]
    pub required_confidence: f64,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            logging: LoggingConfig::default(),
            required_confidence: default_required_confidence(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let content = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_ref.display().to_string(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.required_confidence) {
            return Err(ConfigError::MissingField {
                field: "required_confidence must be in [0, 1]",
            }
            .into());
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::MissingField {
                field: "timeout_ms must be greater than 0",
            }
            .into());
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        self.logging.init();
    }
}
