//! Configuration (YAML/Env loading)
//!
//! ```yaml
//! database:
//!   path: /var/lib/hub/hub.db
//! query:
//!   default_limit: 100
//! log:
//!   filter: info,hub_query=debug
//! ```
//!
//! Every section and field is optional. Environment overrides are applied
//! after the file: `HUB_DATABASE_PATH`, `HUB_DEFAULT_LIMIT`, `HUB_LOG`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const ENV_DATABASE_PATH: &str = "HUB_DATABASE_PATH";
pub const ENV_DEFAULT_LIMIT: &str = "HUB_DEFAULT_LIMIT";
pub const ENV_LOG: &str = "HUB_LOG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HubConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// Limits applied by the resource service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    /// Used when a payload carries no limit
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// `EnvFilter` directives
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("hub.db")
}

fn default_limit() -> usize {
    100
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl HubConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from any variable lookup
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = lookup(ENV_DATABASE_PATH) {
            self.database.path = PathBuf::from(path);
        }
        if let Some(value) = lookup(ENV_DEFAULT_LIMIT) {
            self.query.default_limit =
                value
                    .trim()
                    .parse::<usize>()
                    .map_err(|e| ConfigError::InvalidEnv {
                        var: ENV_DEFAULT_LIMIT.to_string(),
                        value: value.clone(),
                        reason: e.to_string(),
                    })?;
        }
        if let Some(filter) = lookup(ENV_LOG) {
            self.log.filter = filter;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.query.default_limit == 0 {
            return Err(ConfigError::Range {
                field: "query.default_limit".to_string(),
                value: "0".to_string(),
                hint: "Use a limit of at least 1.".to_string(),
            });
        }
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Range {
                field: "database.path".to_string(),
                value: "\"\"".to_string(),
                hint: "Set a path for the SQLite database file.".to_string(),
            });
        }
        Ok(())
    }
}
