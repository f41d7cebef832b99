//! Runtime configuration, read from `GYM_BUDDY_*` environment variables.

use std::time::Duration;
use thiserror::Error;

pub const CHANNEL_BUFFER_VAR: &str = "GYM_BUDDY_CHANNEL_BUFFER";
pub const LOAD_TIMEOUT_VAR: &str = "GYM_BUDDY_LOAD_TIMEOUT_MS";
pub const AUTO_CONFIRM_VAR: &str = "GYM_BUDDY_AUTO_CONFIRM";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must be true or false, got {value:?}")]
    InvalidBool { key: &'static str, value: String },

    #[error("GYM_BUDDY_CHANNEL_BUFFER must be at least 1")]
    ZeroBuffer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Capacity of each backend request channel.
    pub channel_buffer: usize,
    /// List loads that take longer fail with a timeout. `None` waits forever.
    pub load_timeout: Option<Duration>,
    /// The answer the demo gives to every "Are you sure?" prompt.
    pub auto_confirm: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            load_timeout: None,
            auto_confirm: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(CHANNEL_BUFFER_VAR) {
            config.channel_buffer = parse_number(CHANNEL_BUFFER_VAR, &value)?;
            if config.channel_buffer == 0 {
                return Err(ConfigError::ZeroBuffer);
            }
        }
        if let Some(value) = lookup(LOAD_TIMEOUT_VAR) {
            let millis: u64 = parse_number(LOAD_TIMEOUT_VAR, &value)?;
            config.load_timeout = Some(Duration::from_millis(millis));
        }
        if let Some(value) = lookup(AUTO_CONFIRM_VAR) {
            config.auto_confirm = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidBool {
                        key: AUTO_CONFIRM_VAR,
                        value,
                    })
                }
            };
        }
        Ok(config)
    }
}

fn parse_number<N: std::str::FromStr>(key: &'static str, value: &str) -> Result<N, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}
