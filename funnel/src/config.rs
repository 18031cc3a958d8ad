//! Router configuration.
//!
//! Values come from [`RouterConfig::default`], builder setters, the process environment
//! ([`RouterConfig::from_env`]) or a `.env` file ([`RouterConfig::from_file`]).
//!
//! | Variable                      | Field                  | Default            |
//! |-------------------------------|------------------------|--------------------|
//! | `FUNNEL_VERSION`              | `version`              | `v1`               |
//! | `FUNNEL_DEFAULT_CONTENT_TYPE` | `default_content_type` | `application/json` |
//! | `FUNNEL_STAGE_BUDGET_MS`      | `stage_budget_ms`      | unset              |

use std::env;
use std::path::Path;
use std::time::Duration;

use rustc_hash::FxHashMap;
use thiserror::Error;

pub const VERSION_VAR: &str = "FUNNEL_VERSION";
pub const DEFAULT_CONTENT_TYPE_VAR: &str = "FUNNEL_DEFAULT_CONTENT_TYPE";
pub const STAGE_BUDGET_VAR: &str = "FUNNEL_STAGE_BUDGET_MS";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse environment variable '{key}': {message}")]
    ParseError { key: String, message: String },

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Failed to load .env file: {0}")]
    DotenvError(#[from] dotenv::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    pub version: String,
    pub default_content_type: String,
    pub stage_budget_ms: Option<u64>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            version: "v1".to_string(),
            default_content_type: "application/json".to_string(),
            stage_budget_ms: None,
        }
    }
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_default_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.default_content_type = content_type.into();
        self
    }

    /// Budget is kept in whole milliseconds, rounded up, so any non-zero duration stays non-zero.
    /// A zero duration is rejected by [`RouterConfig::validate`].
    pub fn with_stage_budget(mut self, budget: Duration) -> Self {
        let millis = budget.as_nanos().div_ceil(1_000_000);
        self.stage_budget_ms = Some(u64::try_from(millis).unwrap_or(u64::MAX));
        self
    }

    pub fn stage_budget(&self) -> Option<Duration> {
        self.stage_budget_ms.map(Duration::from_millis)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from a `.env` file. Variables already set in the process environment take
    /// precedence over the file, and the environment itself is left untouched.
    // `dotenv::from_path` would write the file into the process environment; the iterator
    // form reads it without that side effect.
    #[allow(deprecated)]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut file_vars = FxHashMap::default();
        for item in dotenv::from_path_iter(path.as_ref())? {
            let (key, value) = item?;
            file_vars.insert(key, value);
        }

        Self::from_lookup(|key| env::var(key).ok().or_else(|| file_vars.get(key).cloned()))
    }

    /// Build a config from any key lookup, falling back to defaults for missing keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(version) = lookup(VERSION_VAR) {
            config.version = version;
        }
        if let Some(content_type) = lookup(DEFAULT_CONTENT_TYPE_VAR) {
            config.default_content_type = content_type;
        }
        if let Some(raw) = lookup(STAGE_BUDGET_VAR) {
            let budget = raw.trim().parse::<u64>().map_err(|e| ConfigError::ParseError {
                key: STAGE_BUDGET_VAR.to_string(),
                message: e.to_string(),
            })?;
            config.stage_budget_ms = Some(budget);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_content_type.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "default content type must not be empty".to_string(),
            ));
        }
        if self.stage_budget_ms == Some(0) {
            return Err(ConfigError::ValidationError(
                "stage budget must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
