use std::path::Path;

use serde::Deserialize;

use crate::OutputFormat;

/// Settings read from `ledger.toml`. Every section is optional.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub loans: LoanConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoanConfig {
    /// Horizon for schedules and extra-payment simulations
    pub max_months: u32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoanConfig {
    fn default() -> Self {
        LoanConfig {
            max_months: ledger_engine_core::loans::DEFAULT_MAX_MONTHS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
            json: false,
        }
    }
}

impl Config {
    /// Load the config file if it exists. A missing file yields defaults;
    /// a malformed one is an error.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        if !Path::new(path).is_file() {
            return Ok(Config::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config '{}': {}", path, e))?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config '{}': {}", path, e))?;
        Ok(config)
    }
}
