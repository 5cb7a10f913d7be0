//! Tracing setup

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;
use crate::error::ConfigError;

/// Install a global fmt subscriber filtered by `config.filter`
///
/// Returns `Ok(false)` if a global subscriber was already installed, which
/// leaves the existing one in place.
pub fn init_tracing(config: &LogConfig) -> Result<bool, ConfigError> {
    let filter = parse_filter(&config.filter)?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(filter = %config.filter, "tracing initialized");
    }
    Ok(installed)
}

fn parse_filter(filter: &str) -> Result<EnvFilter, ConfigError> {
    EnvFilter::try_new(filter).map_err(|e| ConfigError::LogFilter {
        filter: filter.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert!(parse_filter("info").is_ok());
        assert!(parse_filter("warn,hub_query=debug").is_ok());
    }

    #[test]
    fn test_invalid_filter() {
        let err = parse_filter("hub_query=loud").unwrap_err();
        assert!(matches!(err, ConfigError::LogFilter { .. }));
    }

    #[test]
    fn test_second_init_keeps_first_subscriber() {
        let config = LogConfig::default();
        init_tracing(&config).unwrap();
        assert!(!init_tracing(&config).unwrap());
    }
}
