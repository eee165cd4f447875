//! Engine defaults and their JSON persistence.

use std::{
    io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::ScheduleError;
use crate::schedule::{horizon::DEFAULT_DUE_SOON_DAYS, Frequency, HorizonOptions};
use crate::utils::persistence::save_json;

const CONFIG_DIR: &str = "cadence_core";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Caller-facing defaults for projections and charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "EngineConfig::default_horizon_days")]
    pub default_horizon_days: u32,
    #[serde(default = "EngineConfig::default_due_soon_days")]
    pub due_soon_days: u32,
    #[serde(default = "EngineConfig::default_bucket_period")]
    pub default_bucket_period: Frequency,
    #[serde(default = "EngineConfig::default_currency_precision")]
    pub currency_precision: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_horizon_days: Self::default_horizon_days(),
            due_soon_days: Self::default_due_soon_days(),
            default_bucket_period: Self::default_bucket_period(),
            currency_precision: Self::default_currency_precision(),
        }
    }
}

impl EngineConfig {
    pub fn default_horizon_days() -> u32 {
        30
    }

    pub fn default_due_soon_days() -> u32 {
        DEFAULT_DUE_SOON_DAYS
    }

    pub fn default_bucket_period() -> Frequency {
        Frequency::Monthly
    }

    pub fn default_currency_precision() -> u8 {
        2
    }

    pub fn horizon(&self, horizon_days: Option<u32>) -> HorizonOptions {
        HorizonOptions {
            horizon_days: horizon_days.unwrap_or(self.default_horizon_days),
            due_soon_days: self.due_soon_days,
        }
    }

    /// Keys accepted by [`EngineConfig::set_value`].
    pub const KEYS: [&'static str; 4] = [
        "default_horizon_days",
        "due_soon_days",
        "default_bucket_period",
        "currency_precision",
    ];

    /// Updates one setting from its textual form. The config is left untouched
    /// when the value does not parse or fails validation.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut updated = self.clone();
        match key {
            "default_horizon_days" => updated.default_horizon_days = parse_number(key, value)?,
            "due_soon_days" => updated.due_soon_days = parse_number(key, value)?,
            "default_bucket_period" => {
                updated.default_bucket_period = value
                    .parse::<Frequency>()
                    .map_err(|err: ScheduleError| ConfigError::Invalid(err.to_string()))?
            }
            "currency_precision" => updated.currency_precision = parse_number(key, value)?,
            other => {
                return Err(ConfigError::Invalid(format!(
                    "unknown key `{other}` (expected one of: {})",
                    Self::KEYS.join(", ")
                )))
            }
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_bucket_period.is_recurring() {
            return Err(ConfigError::Invalid(
                "default_bucket_period must be a periodic frequency".into(),
            ));
        }
        if self.currency_precision > 6 {
            return Err(ConfigError::Invalid(format!(
                "currency_precision {} exceeds 6",
                self.currency_precision
            )));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("`{value}` is not a valid {key}")))
}

/// Loads and saves [`EngineConfig`] at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Manager rooted at the platform config directory, falling back to the
    /// home directory and then the working directory.
    pub fn at_default_location() -> Self {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reads the stored config, or the defaults when nothing is stored yet.
    pub fn load(&self) -> Result<EngineConfig, ConfigError> {
        if !self.config_path.exists() {
            return Ok(EngineConfig::default());
        }
        let data = std::fs::read_to_string(&self.config_path)?;
        let config: EngineConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &EngineConfig) -> Result<(), ConfigError> {
        config.validate()?;
        save_json(config, &self.config_path)?;
        Ok(())
    }
}
