//! Environment configuration for the inspector.

use thiserror::Error;

const DEFAULT_RADIUS: u32 = 2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MAP_RADIUS must be a non-negative integer, got {0:?}")]
    InvalidRadius(String),

    #[error("MAP_SEED must be an unsigned 64-bit integer, got {0:?}")]
    InvalidSeed(String),
}

/// What to build and how to print it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub radius: u32,
    pub seed: Option<u64>,
    pub pretty: bool,
}

impl Config {
    /// Read `MAP_RADIUS`, `MAP_SEED` and `MAP_PRETTY` from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let radius = match lookup("MAP_RADIUS") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidRadius(value))?,
            None => DEFAULT_RADIUS,
        };
        let seed = match lookup("MAP_SEED") {
            Some(value) => Some(value.trim().parse().map_err(|_| ConfigError::InvalidSeed(value))?),
            None => None,
        };
        let pretty = lookup("MAP_PRETTY")
            .map(|value| matches!(value.trim(), "1" | "true"))
            .unwrap_or(false);
        Ok(Self { radius, seed, pretty })
    }
}
