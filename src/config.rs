use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

use crate::scoring::TimerConfig;

/// Packs in the store when no override is configured
pub const DEFAULT_TOTAL_PACKS: usize = 8;

pub const TOTAL_PACKS_ENV: &str = "TRIVIADARE_TOTAL_PACKS";
pub const TIMER_SECONDS_ENV: &str = "TRIVIADARE_TIMER_SECONDS";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("No timer preset for {0} seconds (expected 15, 30, 45 or 60)")]
    UnknownTimer(u32),
}

/// Engine-wide settings fixed at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Size of the pack catalog, used by the pack completionist achievement
    pub total_packs_available: usize,
    /// Timer used when a game does not pick one
    pub default_timer: TimerConfig,
    /// Buffered notifications per subscriber on the event bus
    pub event_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            total_packs_available: DEFAULT_TOTAL_PACKS,
            default_timer: TimerConfig::default(),
            event_capacity: 100,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `TRIVIADARE_TOTAL_PACKS` and
    /// `TRIVIADARE_TIMER_SECONDS` when set
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(TOTAL_PACKS_ENV) {
            config.total_packs_available = parse_positive(TOTAL_PACKS_ENV, &value)? as usize;
        }

        if let Some(value) = lookup(TIMER_SECONDS_ENV) {
            let seconds = parse_positive(TIMER_SECONDS_ENV, &value)?;
            config.default_timer =
                TimerConfig::for_time_limit(seconds).ok_or(ConfigError::UnknownTimer(seconds))?;
        }

        Ok(config)
    }
}

fn parse_positive(name: &'static str, value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        })
}
