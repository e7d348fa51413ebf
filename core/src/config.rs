//! Client configuration.
//!
//! The base endpoint is the only required value. A timeout is optional and
//! handed to the transport; the client itself never times out or retries.

use std::time::Duration;

use thiserror::Error;

pub const BASE_URL_VAR: &str = "TODO_API_BASE_URL";
pub const TIMEOUT_SECS_VAR: &str = "TODO_API_TIMEOUT_SECS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("invalid value {value:?} for {var}")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read `TODO_API_BASE_URL` and the optional `TODO_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(BASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingVar(BASE_URL_VAR))?;

        let timeout = match lookup(TIMEOUT_SECS_VAR) {
            None => None,
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    var: TIMEOUT_SECS_VAR,
                    value: raw.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
        };

        Ok(Self { base_url, timeout })
    }
}
