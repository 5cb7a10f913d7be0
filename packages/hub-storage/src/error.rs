//! Error types for hub-storage

use std::fmt;
use thiserror::Error;

/// Storage error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Database errors (connectivity, malformed SQL, constraint failures)
    Database,
    /// The fetch matched no rows where exactly one was requested
    RecordNotFound,
    /// A version string has a component that is not an integer
    MalformedVersion,
    /// Configuration errors
    Config,
    /// I/O errors
    IO,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Database => "database",
            ErrorKind::RecordNotFound => "record_not_found",
            ErrorKind::MalformedVersion => "malformed_version",
            ErrorKind::Config => "config",
            ErrorKind::IO => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Storage error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct StorageError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl StorageError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    pub fn record_not_found(entity: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::RecordNotFound,
            format!("No {} matched the fetch", entity.into()),
        )
    }

    pub fn malformed_version(version: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::MalformedVersion,
            format!("Version is not a dot-separated integer sequence: {:?}", version.into()),
        )
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    /// True for the "no matching rows" signal, false for every real failure.
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::RecordNotFound
    }
}

// SQLite error conversions
#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => {
                StorageError::record_not_found("row").with_source(err)
            }
            other => StorageError::database(format!("SQLite error: {}", other)).with_source(other),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::new(ErrorKind::IO, format!("I/O error: {}", err)).with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_database_error() {
        let err = StorageError::database("Connection failed");
        assert_eq!(err.kind, ErrorKind::Database);
        assert_eq!(err.message, "Connection failed");
        assert!(err.source.is_none());
        assert!(!err.is_not_found());

        let msg = format!("{}", err);
        assert_eq!(msg, "[database] Connection failed");
    }

    #[test]
    fn test_record_not_found() {
        let err = StorageError::record_not_found("resource");
        assert_eq!(err.kind, ErrorKind::RecordNotFound);
        assert!(err.is_not_found());

        let msg = format!("{}", err);
        assert!(msg.contains("[record_not_found]"));
        assert!(msg.contains("resource"));
    }

    #[test]
    fn test_malformed_version() {
        let err = StorageError::malformed_version("1.x");
        assert_eq!(err.kind, ErrorKind::MalformedVersion);
        assert!(!err.is_not_found());
        assert!(err.message.contains("\"1.x\""));
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn test_from_rusqlite_no_rows_is_not_found() {
        let err: StorageError = rusqlite::Error::QueryReturnedNoRows.into();
        assert_eq!(err.kind, ErrorKind::RecordNotFound);
        assert!(err.is_not_found());
        assert!(err.source().is_some());
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn test_from_rusqlite_other_is_database() {
        let err: StorageError = rusqlite::Error::InvalidQuery.into();
        assert_eq!(err.kind, ErrorKind::Database);
        assert!(err.message.contains("SQLite error"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StorageError = io_err.into();
        assert_eq!(err.kind, ErrorKind::IO);
        assert_eq!(err.source().map(|e| e.to_string()).as_deref(), Some("denied"));
    }
}
