use std::collections::HashSet;
use std::env;

use crate::domain::ChannelKey;
use crate::error::AppError;

/// Process configuration read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Channels where recruitment may start. Empty means every channel.
    pub allowed_channels: HashSet<ChannelKey>,
    /// Fixed seed for session ids and team allocation; entropy when unset.
    pub rng_seed: Option<u64>,
}

impl ServerConfig {
    /// Builds the configuration from `MATCHROOM_*` environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("MATCHROOM_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("MATCHROOM_PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("MATCHROOM_PORT must be a valid port number, got '{raw}'"))
            })?,
            Err(_) => 3001,
        };
        let allowed_channels = match env::var("MATCHROOM_ALLOWED_CHANNELS") {
            Ok(raw) => parse_channel_list(&raw)?,
            Err(_) => HashSet::new(),
        };
        let rng_seed = match env::var("MATCHROOM_RNG_SEED") {
            Ok(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                AppError::config(format!("MATCHROOM_RNG_SEED must be an unsigned integer, got '{raw}'"))
            })?),
            Err(_) => None,
        };

        Ok(Self {
            host,
            port,
            allowed_channels,
            rng_seed,
        })
    }
}

/// Parses a comma-separated list of channel keys, ignoring blank entries.
pub fn parse_channel_list(raw: &str) -> Result<HashSet<ChannelKey>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry.parse::<ChannelKey>().map_err(|_| {
                AppError::config(format!(
                    "MATCHROOM_ALLOWED_CHANNELS entries must be channel ids, got '{entry}'"
                ))
            })
        })
        .collect()
}
