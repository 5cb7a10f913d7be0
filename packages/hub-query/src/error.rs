//! Error types for hub-query

use thiserror::Error;

/// Outcome of a failed service operation
///
/// Only two kinds reach callers. Store details are logged where the
/// failure is classified and never carried in the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The query matched zero eligible rows
    #[error("Resource not found")]
    NotFound,

    /// The store failed for any reason other than "no rows"
    #[error("Failed to fetch resources")]
    Internal,
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Range validation error
    #[error("Invalid value for field '{field}': {value}. {hint}")]
    Range {
        field: String,
        value: String,
        hint: String,
    },

    /// Environment override could not be parsed
    #[error("Invalid environment override {var}={value}: {reason}")]
    InvalidEnv {
        var: String,
        value: String,
        reason: String,
    },

    /// Log filter directive could not be parsed
    #[error("Invalid log filter '{filter}': {reason}")]
    LogFilter { filter: String, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_generic() {
        assert_eq!(ServiceError::NotFound.to_string(), "Resource not found");
        assert_eq!(ServiceError::Internal.to_string(), "Failed to fetch resources");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Range {
            field: "query.default_limit".into(),
            value: "0".into(),
            hint: "Use a limit of at least 1.".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for field 'query.default_limit': 0. Use a limit of at least 1."
        );
    }
}
