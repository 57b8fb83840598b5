//! Runner configuration
//!
//! Configuration for the step runner, loaded from a YAML file. Every field
//! has a default, so an empty file is a valid configuration:
//!
//! ```yaml
//! delay:
//!   mode: random
//!   min_ms: 1000
//!   max_ms: 4000
//!
//! steps:
//!   - Leave the station
//!   - Cross the bridge
//!
//! arrival_message: "You arrived at the café!"
//! final_message: "Final log"
//!
//! launches:
//!   endpoint: https://api.spacexdata.com/v4/launches
//!   timeout_ms: 30000
//!   limit: 10
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::loader::LoadError;
use super::StepSequence;
use crate::engine::delay::DelayStrategy;
use crate::engine::runner::{DEFAULT_ARRIVAL_MESSAGE, DEFAULT_FINAL_MESSAGE};

pub const DEFAULT_LAUNCHES_ENDPOINT: &str = "https://api.spacexdata.com/v4/launches";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid delay range: min_ms ({min_ms}) is greater than max_ms ({max_ms})")]
    InvalidDelayRange { min_ms: u64, max_ms: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DelayMode {
    #[default]
    Fixed,
    Random,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DelayConfig {
    #[serde(default)]
    pub mode: DelayMode,

    #[serde(default = "default_fixed_ms")]
    pub fixed_ms: u64,

    #[serde(default = "default_min_ms")]
    pub min_ms: u64,

    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

fn default_fixed_ms() -> u64 {
    2000
}

fn default_min_ms() -> u64 {
    1000
}

fn default_max_ms() -> u64 {
    4000
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            mode: DelayMode::default(),
            fixed_ms: default_fixed_ms(),
            min_ms: default_min_ms(),
            max_ms: default_max_ms(),
        }
    }
}

impl DelayConfig {
    pub fn to_strategy(&self) -> Result<DelayStrategy, ConfigError> {
        match self.mode {
            DelayMode::Fixed => Ok(DelayStrategy::fixed(Duration::from_millis(self.fixed_ms))),
            DelayMode::Random => {
                if self.min_ms > self.max_ms {
                    return Err(ConfigError::InvalidDelayRange {
                        min_ms: self.min_ms,
                        max_ms: self.max_ms,
                    });
                }
                Ok(DelayStrategy::random(
                    Duration::from_millis(self.min_ms),
                    Duration::from_millis(self.max_ms),
                ))
            }
        }
    }
}

/// Where mission patches are fetched from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchesConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Number of launches to show; all when unset
    #[serde(default)]
    pub limit: Option<usize>,
}

fn default_endpoint() -> String {
    DEFAULT_LAUNCHES_ENDPOINT.to_string()
}

fn default_timeout_ms() -> u64 {
    30000
}

impl Default for LaunchesConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
            limit: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    #[serde(default)]
    pub delay: DelayConfig,

    /// Custom step list; the built-in directions when unset
    #[serde(default)]
    pub steps: Option<StepSequence>,

    #[serde(default = "default_arrival_message")]
    pub arrival_message: String,

    #[serde(default = "default_final_message")]
    pub final_message: String,

    #[serde(default)]
    pub launches: LaunchesConfig,
}

fn default_arrival_message() -> String {
    DEFAULT_ARRIVAL_MESSAGE.to_string()
}

fn default_final_message() -> String {
    DEFAULT_FINAL_MESSAGE.to_string()
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            delay: DelayConfig::default(),
            steps: None,
            arrival_message: default_arrival_message(),
            final_message: default_final_message(),
            launches: LaunchesConfig::default(),
        }
    }
}

impl RunnerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        // an empty file deserializes to unit, not to a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: RunnerConfig =
            serde_yaml::from_str(&content).map_err(|e| LoadError::Yaml {
                file: path.display().to_string(),
                error: e,
            })?;
        Ok(config)
    }

    pub fn delay_strategy(&self) -> Result<DelayStrategy, ConfigError> {
        self.delay.to_strategy()
    }

    /// The configured steps, or the built-in directions
    pub fn sequence(&self) -> StepSequence {
        self.steps.clone().unwrap_or_default()
    }
}
