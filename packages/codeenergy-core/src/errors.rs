//! Error types for codeenergy-core
//!
//! Provides unified error handling across the crate. Process measurement is
//! the exception: its failures are data (see `RunResult::failed`), not errors.

use thiserror::Error;

/// Main error type for codeenergy-core operations
#[derive(Debug, Error)]
pub enum EnergyError {
    /// Unknown language tag, invalid configuration value
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Run log error, including malformed persisted records
    #[error("Storage error: {0}")]
    Storage(#[from] codeenergy_storage::StorageError),

    /// Benchmark orchestration error (compile step, empty request)
    #[error("Benchmark error: {0}")]
    Benchmark(String),

    /// External predictor failure
    #[error("Model error: {0}")]
    Model(String),
}

impl EnergyError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        EnergyError::Configuration(msg.into())
    }

    pub fn benchmark(msg: impl Into<String>) -> Self {
        EnergyError::Benchmark(msg.into())
    }

    pub fn model(msg: impl Into<String>) -> Self {
        EnergyError::Model(msg.into())
    }

    /// True for errors raised at a call boundary because of bad input
    pub fn is_configuration(&self) -> bool {
        matches!(self, EnergyError::Configuration(_))
    }
}

impl From<crate::config::ConfigError> for EnergyError {
    fn from(err: crate::config::ConfigError) -> Self {
        EnergyError::Configuration(err.to_string())
    }
}

/// Result type alias for codeenergy operations
pub type Result<T> = std::result::Result<T, EnergyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_helper() {
        let err = EnergyError::config("unsupported language: cobol");
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "Configuration error: unsupported language: cobol"
        );
    }

    #[test]
    fn test_storage_error_converts() {
        let err: EnergyError = codeenergy_storage::StorageError::io("disk full").into();
        assert!(matches!(err, EnergyError::Storage(_)));
        assert!(!err.is_configuration());
    }
}
