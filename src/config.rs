//! Settings for the overdue sweeper process.
//!
//! Settings are read from an optional JSON file and then overridden by
//! environment variables:
//!
//! ```json
//! {
//!   "database_url": "postgres://tasks@localhost/tasks",
//!   "sweep_interval_secs": 60,
//!   "pool_max_size": 4
//! }
//! ```
//!
//! | Variable                       | Field                 |
//! |--------------------------------|-----------------------|
//! | `TASKLANE_DATABASE_URL`        | `database_url`        |
//! | `TASKLANE_SWEEP_INTERVAL_SECS` | `sweep_interval_secs` |
//! | `TASKLANE_POOL_MAX_SIZE`       | `pool_max_size`       |

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding [`SweeperConfig::database_url`].
pub const DATABASE_URL_ENV: &str = "TASKLANE_DATABASE_URL";
/// Environment variable overriding [`SweeperConfig::sweep_interval_secs`].
pub const SWEEP_INTERVAL_ENV: &str = "TASKLANE_SWEEP_INTERVAL_SECS";
/// Environment variable overriding [`SweeperConfig::pool_max_size`].
pub const POOL_MAX_SIZE_ENV: &str = "TASKLANE_POOL_MAX_SIZE";

const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
const DEFAULT_POOL_MAX_SIZE: u32 = 4;

/// Errors raised while loading sweeper settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that was requested.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The settings file is not valid JSON for [`SweeperConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// An environment override could not be parsed.
    #[error("invalid value '{value}' for {key}")]
    InvalidOverride {
        /// Variable name.
        key: &'static str,
        /// Rejected value.
        value: String,
    },
    /// No database URL was configured.
    #[error("database_url must be set")]
    MissingDatabaseUrl,
    /// A numeric setting that must be positive was zero.
    #[error("{0} must be greater than 0")]
    NotPositive(&'static str),
}

/// Read access to environment variables.
pub trait EnvSource {
    /// Returns the value of `key`, if set and valid UTF-8.
    fn var(&self, key: &str) -> Option<String>;
}

/// [`EnvSource`] backed by the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Settings for the sweeper binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweeperConfig {
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Seconds between overdue sweeps.
    pub sweep_interval_secs: u64,
    /// Maximum number of pooled database connections.
    pub pool_max_size: u32,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            pool_max_size: DEFAULT_POOL_MAX_SIZE,
        }
    }
}

impl SweeperConfig {
    /// Loads settings from `path` (when given), applies overrides from
    /// `env`, and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, an
    /// override is malformed, or the final settings are invalid.
    pub fn load(path: Option<&Utf8Path>, env: &impl EnvSource) -> Result<Self, ConfigError> {
        let base = match path {
            Some(config_path) => Self::from_json(&read_config_file(config_path)?)?,
            None => Self::default(),
        };
        base.with_overrides(env)?.validated()
    }

    /// Parses settings from JSON text. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not valid settings
    /// JSON.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] when a numeric override does
    /// not parse.
    pub fn with_overrides(mut self, env: &impl EnvSource) -> Result<Self, ConfigError> {
        if let Some(url) = env.var(DATABASE_URL_ENV) {
            self.database_url = url;
        }
        if let Some(raw) = env.var(SWEEP_INTERVAL_ENV) {
            self.sweep_interval_secs = parse_override(SWEEP_INTERVAL_ENV, raw)?;
        }
        if let Some(raw) = env.var(POOL_MAX_SIZE_ENV) {
            self.pool_max_size = parse_override(POOL_MAX_SIZE_ENV, raw)?;
        }
        Ok(self)
    }

    /// Checks that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] or
    /// [`ConfigError::NotPositive`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        if self.sweep_interval_secs == 0 {
            return Err(ConfigError::NotPositive("sweep_interval_secs"));
        }
        if self.pool_max_size == 0 {
            return Err(ConfigError::NotPositive("pool_max_size"));
        }
        Ok(self)
    }

    /// Returns the sweep interval as a [`Duration`].
    #[must_use]
    pub const fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

fn parse_override<T: std::str::FromStr>(key: &'static str, raw: String) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidOverride { key, value: raw })
}

fn read_config_file(path: &Utf8Path) -> Result<String, ConfigError> {
    let read_error = |source| ConfigError::Read {
        path: path.to_string(),
        source,
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::other("config path must include a file name"))
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    dir.read_to_string(file_name).map_err(read_error)
}
