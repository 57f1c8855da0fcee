//! Configuration loading
//!
//! Order of precedence: defaults, then the TOML file, then `BINGO_*`
//! environment variables. The merged result is validated before use.

use crate::config::{HallConfig, LogLevel, WinDetection};
use crate::errors::{ConfigurationError, HallResult};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Configuration loader with environment variable support
#[derive(Default)]
pub struct ConfigLoader {
    config_path: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    /// Load configuration from file and environment variables
    pub fn load(&self) -> HallResult<HallConfig> {
        let mut config = match self.config_path {
            Some(ref path) => self.load_from_file(path)?,
            None => HallConfig::default(),
        };

        apply_overrides(&mut config, |key| env::var(key).ok())?;

        config.validate()?;
        Ok(config)
    }

    fn load_from_file(&self, path: &str) -> HallResult<HallConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to read {}: {}", path, e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to parse TOML: {}", e)).into())
    }

    /// Save configuration to file
    pub fn save(&self, config: &HallConfig, path: &str) -> HallResult<()> {
        let toml_string = toml::to_string_pretty(config)
            .map_err(|e| ConfigurationError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml_string)
            .map_err(|e| ConfigurationError::SaveFailed(format!("Failed to write to {}: {}", path, e)).into())
    }
}

fn parse_var<T: FromStr>(key: &str, value: String, reason: &str) -> Result<T, ConfigurationError> {
    value.parse().map_err(|_| ConfigurationError::InvalidValue {
        field: key.to_string(),
        value,
        reason: reason.to_string(),
    })
}

/// Apply `BINGO_*` overrides read through `lookup`
pub fn apply_overrides<F>(config: &mut HallConfig, lookup: F) -> Result<(), ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("BINGO_ADMIN_ID") {
        config.bot.admin_id = parse_var("BINGO_ADMIN_ID", value, "Invalid user id")?;
    }

    if let Some(dir) = lookup("BINGO_DATA_DIR") {
        config.storage.data_directory = dir;
    }

    if let Some(dir) = lookup("BINGO_MESSAGE_LOG_DIR") {
        config.storage.message_log_directory = dir;
    }

    if let Some(value) = lookup("BINGO_CALL_INTERVAL_MS") {
        config.game.call_interval_ms = parse_var("BINGO_CALL_INTERVAL_MS", value, "Invalid interval")?;
    }

    if let Some(value) = lookup("BINGO_TOURNAMENT_INTERVAL_MS") {
        config.tournament.call_interval_ms =
            parse_var("BINGO_TOURNAMENT_INTERVAL_MS", value, "Invalid interval")?;
    }

    if let Some(value) = lookup("BINGO_WIN_DETECTION") {
        let mode = match value.as_str() {
            "claim_gated" => WinDetection::ClaimGated,
            "automatic" => WinDetection::Automatic,
            _ => {
                return Err(ConfigurationError::InvalidValue {
                    field: "BINGO_WIN_DETECTION".to_string(),
                    value,
                    reason: "Expected claim_gated or automatic".to_string(),
                })
            }
        };
        config.game.win_detection = mode;
        config.tournament.win_detection = mode;
    }

    if let Some(value) = lookup("BINGO_LOG_LEVEL") {
        config.monitoring.log_level = match value.to_lowercase().as_str() {
            "error" => LogLevel::Error,
            "warn" => LogLevel::Warn,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => {
                return Err(ConfigurationError::InvalidValue {
                    field: "BINGO_LOG_LEVEL".to_string(),
                    value,
                    reason: "Unknown log level".to_string(),
                })
            }
        };
    }

    Ok(())
}
