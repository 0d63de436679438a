//! Error types for codeenergy-storage

use std::fmt;
use thiserror::Error;

/// Storage error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reading or appending the log file failed
    Io,
    /// A record could not be encoded
    Serialization,
    /// A persisted line could not be decoded
    MalformedRecord,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Io => "io",
            ErrorKind::Serialization => "serialization",
            ErrorKind::MalformedRecord => "malformed_record",
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
    /// 1-based line number of the offending record, for malformed input
    pub line: Option<usize>,
}

impl StorageError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
            line: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }

    /// A log line that does not decode into a record
    pub fn malformed_record(line: usize, source: serde_json::Error) -> Self {
        let mut err = Self::new(
            ErrorKind::MalformedRecord,
            format!("Malformed record on line {}: {}", line, source),
        )
        .with_source(source);
        err.line = Some(line);
        err
    }

    pub fn is_malformed(&self) -> bool {
        self.kind == ErrorKind::MalformedRecord
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::io(format!("IO error: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::serialization(format!("JSON error: {}", err)).with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let err = StorageError::io("disk full");
        assert_eq!(format!("{}", err), "[io] disk full");
    }

    #[test]
    fn test_malformed_record_carries_line() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json")
            .err()
            .unwrap();
        let err = StorageError::malformed_record(7, json_err);

        assert_eq!(err.kind, ErrorKind::MalformedRecord);
        assert_eq!(err.line, Some(7));
        assert!(err.is_malformed());
        assert!(err.message.contains("line 7"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: StorageError = io_err.into();
        assert_eq!(err.kind, ErrorKind::Io);
        assert!(err.line.is_none());
        assert!(err.source().unwrap().to_string().contains("missing"));
    }

    #[test]
    fn test_error_kind_as_str() {
        assert_eq!(ErrorKind::Io.as_str(), "io");
        assert_eq!(ErrorKind::Serialization.as_str(), "serialization");
        assert_eq!(ErrorKind::MalformedRecord.as_str(), "malformed_record");
    }
}
