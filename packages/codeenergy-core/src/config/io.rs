//! YAML schema types
//!
//! The on-disk shape is versioned separately from `ProfilerConfig` so that a
//! missing version can be reported instead of failing inside serde.

use serde::{Deserialize, Serialize};

use super::profiler_config::{BenchmarkConfig, MeasurementConfig, ScoringConfig};

/// Current schema version
pub const CONFIG_VERSION: u32 = 1;
pub const SUPPORTED_VERSIONS: [u32; 1] = [CONFIG_VERSION];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    #[serde(default)]
    pub version: Option<u32>,

    #[serde(default)]
    pub measurement: MeasurementConfig,

    #[serde(default)]
    pub benchmark: BenchmarkConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,
}
