//! Client configuration

use crate::client::RetryPolicy;
use crate::core::constants::{
    DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_BACKOFF,
};
use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReclaimConfig {
    /// Base URL of the reclaim service (`/scan`, `/reclaim` are appended)
    pub api_url: String,

    /// Per-attempt request timeout
    pub timeout: Duration,

    /// Retry applied to transport failures
    pub retry: RetryPolicy,
}

impl Default for ReclaimConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            retry: RetryPolicy::new(DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_BACKOFF),
        }
    }
}

impl ReclaimConfig {
    /// Read `DCSOL_API_URL`, `DCSOL_TIMEOUT_SECS`, `DCSOL_RETRY_ATTEMPTS` and
    /// `DCSOL_RETRY_BACKOFF_MS`, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_url = lookup("DCSOL_API_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.api_url);
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError {
                var: "DCSOL_API_URL",
                reason: format!("expected an http(s) URL, got {api_url}"),
            });
        }

        let timeout_secs: u64 = parse_var(&lookup, "DCSOL_TIMEOUT_SECS")?
            .unwrap_or(defaults.timeout.as_secs());
        if timeout_secs == 0 {
            return Err(ConfigError {
                var: "DCSOL_TIMEOUT_SECS",
                reason: "timeout must be positive".to_string(),
            });
        }

        let attempts: u32 =
            parse_var(&lookup, "DCSOL_RETRY_ATTEMPTS")?.unwrap_or(defaults.retry.max_attempts);
        let backoff_ms: u64 = parse_var(&lookup, "DCSOL_RETRY_BACKOFF_MS")?
            .unwrap_or(defaults.retry.backoff.as_millis() as u64);

        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            retry: RetryPolicy::new(attempts, Duration::from_millis(backoff_ms)),
        })
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(var)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError {
                var,
                reason: e.to_string(),
            })
        })
        .transpose()
}
