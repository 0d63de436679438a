//! Profiler configuration
//!
//! Every section has working defaults; a YAML file only needs `version: 1`
//! plus the fields it wants to change.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigFileV1, CONFIG_VERSION, SUPPORTED_VERSIONS};
use super::validation::Validatable;
use crate::features::scoring::WeightPreset;

/// Process measurement settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MeasurementConfig {
    /// Resource polling interval
    pub sample_interval_ms: u64,
    /// Per-run wall-clock limit; unlimited when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<f64>,
    /// Read hardware energy counters when the host exposes them
    pub energy: bool,
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 5,
            timeout_secs: None,
            energy: true,
        }
    }
}

impl MeasurementConfig {
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| secs.is_finite() && *secs > 0.0)
            .map(Duration::from_secs_f64)
    }
}

/// Benchmark collection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchmarkConfig {
    pub input_sizes: Vec<u64>,
    /// Measurements per (sample, input size)
    pub repeats: usize,
    pub python: String,
    pub node: String,
    pub java: String,
    pub javac: String,
    /// Append-only run log
    pub log_path: PathBuf,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            input_sizes: vec![100, 400, 1600],
            repeats: 3,
            python: "python3".to_string(),
            node: "node".to_string(),
            java: "java".to_string(),
            javac: "javac".to_string(),
            log_path: PathBuf::from("dataset.jsonl"),
        }
    }
}

/// Heuristic scorer kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    FeatureWeighted,
    RuleBased,
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "feature_weighted" => Ok(StrategyKind::FeatureWeighted),
            "rule_based" => Ok(StrategyKind::RuleBased),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Scoring settings
///
/// Names are kept as strings so that an unknown one is reported by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    pub strategy: String,
    pub preset: String,
    /// Predicted mJ mapped to a file score of 1.0
    pub model_score_scale: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_hotspots: Option<usize>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            strategy: "feature_weighted".to_string(),
            preset: WeightPreset::Standard.as_str().to_string(),
            model_score_scale: 2000.0,
            max_hotspots: None,
        }
    }
}

impl ScoringConfig {
    pub fn strategy(&self) -> ConfigResult<StrategyKind> {
        self.strategy.parse()
    }

    pub fn preset(&self) -> ConfigResult<WeightPreset> {
        self.preset.parse()
    }
}

/// Complete profiler configuration (schema v1)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilerConfig {
    pub measurement: MeasurementConfig,
    pub benchmark: BenchmarkConfig,
    pub scoring: ScoringConfig,
}

impl ProfilerConfig {
    /// Parse and validate YAML text
    ///
    /// # Errors
    ///
    /// Missing or unsupported `version`, unknown fields, unknown names and
    /// out-of-range values are all rejected.
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let config = Self {
            measurement: file.measurement,
            benchmark: file.benchmark,
            scoring: file.scoring,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        debug!(path = %path.display(), "loaded profiler config");
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(CONFIG_VERSION),
            measurement: self.measurement.clone(),
            benchmark: self.benchmark.clone(),
            scoring: self.scoring.clone(),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}
