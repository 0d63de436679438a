//! Errors raised while loading or validating a profiler config

use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric setting outside its accepted bounds
    #[error("{field} = {value} is outside {min}..={max} ({hint})")]
    Range {
        field: &'static str,
        value: String,
        min: String,
        max: String,
        hint: &'static str,
    },

    #[error("config file has no 'version' key; start the file with 'version: 1'")]
    MissingVersion,

    #[error("config version {found} is not supported (known: {})", join_versions(supported))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    #[error("no scoring preset named '{0}' (standard, service, editor, local)")]
    UnknownPreset(String),

    #[error("no scoring strategy named '{0}' (feature_weighted, rule_based)")]
    UnknownStrategy(String),

    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Validation(String),
}

fn join_versions(versions: &[u32]) -> String {
    versions
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    pub fn range_with_hint(
        field: &'static str,
        value: impl Display,
        min: impl Display,
        max: impl Display,
        hint: &'static str,
    ) -> Self {
        Self::Range {
            field,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
            hint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_message_carries_hint() {
        let err = ConfigError::range_with_hint(
            "measurement.sample_interval_ms",
            0,
            1,
            1000,
            "Use 5 for the default polling rate",
        );
        let msg = err.to_string();
        assert!(msg.contains("sample_interval_ms"));
        assert!(msg.contains("1..=1000"));
        assert!(msg.contains("Use 5"));
    }

    #[test]
    fn test_unsupported_version_lists_supported() {
        let err = ConfigError::UnsupportedVersion {
            found: 2,
            supported: vec![1],
        };
        assert_eq!(
            err.to_string(),
            "config version 2 is not supported (known: 1)"
        );
    }
}
