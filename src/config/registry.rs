//! Registry configuration structures.

use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::AppResult;

/// Environment variable overriding [`RegistryConfig::max_sleep_secs`].
pub const ENV_MAX_SLEEP_SECS: &str = "DEFERRED_CALLBACKS_MAX_SLEEP_SECS";
/// Environment variable overriding [`RegistryConfig::unbounded_timeout_secs`].
pub const ENV_UNBOUNDED_TIMEOUT_SECS: &str = "DEFERRED_CALLBACKS_UNBOUNDED_TIMEOUT_SECS";

/// Tuning for [`CallbackRegistry::wait_until_due`](crate::core::CallbackRegistry::wait_until_due).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Longest single sleep of the wait loop, in seconds. Bounds how long an
    /// interrupt request can go unnoticed.
    pub max_sleep_secs: f64,
    /// Timeout substituted for negative ("wait forever") timeouts, in seconds.
    pub unbounded_timeout_secs: f64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_sleep_secs: 2.0,
            unbounded_timeout_secs: 3e10,
        }
    }
}

impl RegistryConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if !self.max_sleep_secs.is_finite() || self.max_sleep_secs <= 0.0 {
            return Err("max_sleep_secs must be finite and greater than 0".into());
        }
        if !self.unbounded_timeout_secs.is_finite() || self.unbounded_timeout_secs <= 0.0 {
            return Err("unbounded_timeout_secs must be finite and greater than 0".into());
        }
        if self.unbounded_timeout_secs < self.max_sleep_secs {
            return Err("unbounded_timeout_secs must be at least max_sleep_secs".into());
        }
        Ok(())
    }

    /// Per-iteration sleep cap as a `Duration`.
    #[must_use]
    pub fn max_sleep(&self) -> Duration {
        Duration::try_from_secs_f64(self.max_sleep_secs).unwrap_or(Duration::MAX)
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from the environment (and a `.env` file if present).
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        let mut cfg = Self::default();
        if let Some(value) = read_secs(ENV_MAX_SLEEP_SECS)? {
            cfg.max_sleep_secs = value;
        }
        if let Some(value) = read_secs(ENV_UNBOUNDED_TIMEOUT_SECS)? {
            cfg.unbounded_timeout_secs = value;
        }
        cfg.validate().map_err(anyhow::Error::msg)?;
        Ok(cfg)
    }
}

fn read_secs(name: &str) -> AppResult<Option<f64>> {
    match std::env::var(name) {
        Ok(raw) => {
            let secs = raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("{name} is not a number: {raw:?}"))?;
            Ok(Some(secs))
        }
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("failed to read {name}")),
    }
}
