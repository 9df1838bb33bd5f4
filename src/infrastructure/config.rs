//! Configuration management for the simulator
//!
//! Loads configuration from config.toml at startup.
//! File locations and the read batch size live here rather than in code.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Simulator configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Input/output locations and batching
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Simulation run settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Hierarchy definition CSV
    #[serde(default = "default_portfolios_path")]
    pub portfolios_path: PathBuf,

    /// Price update CSV
    #[serde(default = "default_prices_path")]
    pub prices_path: PathBuf,

    /// Output CSV (NAME, PRICE)
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Price rows read per batch; tuning only, never changes the output
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "portfolio_sim=debug,hierarchy=debug"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for a daily rolling log file; console only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Emit JSON lines instead of human-readable text
    #[serde(default)]
    pub json: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            portfolios_path: default_portfolios_path(),
            prices_path: default_prices_path(),
            output_path: default_output_path(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: None,
            json: false,
        }
    }
}

fn default_portfolios_path() -> PathBuf {
    PathBuf::from("data/input/portfolios.csv")
}

fn default_prices_path() -> PathBuf {
    PathBuf::from("data/input/prices.csv")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("data/output/portfolio_prices.csv")
}

fn default_chunk_size() -> usize {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from config.toml file
    ///
    /// The path can be overridden with `CONFIG_PATH`. If the file doesn't
    /// exist, returns default configuration.
    /// # Errors
    /// Returns error if file exists but cannot be read, parsed or validated.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // File not found - use defaults
                Ok(Config::default())
            }
            Err(e) => Err(ConfigError::IoError(e)),
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.chunk_size == 0 {
            return Err(ConfigError::Invalid(
                "simulation.chunk_size must be at least 1".into(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.level must not be empty".into()));
        }
        Ok(())
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    /// Parse error (invalid TOML)
    #[error("Failed to parse config: {0}")]
    ParseError(String),
    /// Well-formed but unusable values
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl From<ConfigError> for crate::SimError {
    fn from(e: ConfigError) -> Self {
        crate::SimError::Config(e.to_string())
    }
}
