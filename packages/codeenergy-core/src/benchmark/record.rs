//! Persisted run record
//!
//! One record per (sample, input size). Field names follow the dataset
//! format consumed by the training scripts.

use serde::{Deserialize, Serialize};

use super::metadata::CollectionMetadata;
use crate::features::aggregation::ConfigMedian;
use crate::shared::models::{FeatureVector, Language};

/// Median-of-repeats measurement of one configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicMetrics {
    pub time_s: Option<f64>,
    pub cpu_time_s: Option<f64>,
    pub peak_mem_bytes: Option<u64>,
    #[serde(rename = "energy_mJ")]
    pub energy_mj: Option<f64>,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default)]
    pub repeats: usize,
    #[serde(default)]
    pub failed_runs: usize,
}

impl From<&ConfigMedian> for DynamicMetrics {
    fn from(median: &ConfigMedian) -> Self {
        Self {
            time_s: median.time_s,
            cpu_time_s: median.cpu_time_s,
            peak_mem_bytes: median.peak_mem_bytes,
            energy_mj: median.energy_mj,
            stdout: median.stdout.clone(),
            stderr: median.stderr.clone(),
            repeats: median.runs,
            failed_runs: median.failed_runs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub sample_id: String,
    pub language: Language,
    pub source_path: String,
    pub source: String,
    /// "<sample_id>::N=<input_size>"
    pub run_id: String,
    pub input_size: u64,
    pub static_features: FeatureVector,
    pub dynamic: DynamicMetrics,
    pub metadata: CollectionMetadata,
    /// Filled by labelling tools; empty when collected
    #[serde(default)]
    pub labels: serde_json::Map<String, serde_json::Value>,
}

impl RunRecord {
    pub fn run_id(sample_id: &str, input_size: u64) -> String {
        format!("{}::N={}", sample_id, input_size)
    }

    /// The stored median, as the aggregator sees it
    pub fn to_config_median(&self) -> ConfigMedian {
        ConfigMedian {
            input_size: self.input_size,
            time_s: self.dynamic.time_s,
            cpu_time_s: self.dynamic.cpu_time_s,
            peak_mem_bytes: self.dynamic.peak_mem_bytes,
            energy_mj: self.dynamic.energy_mj,
            runs: self.dynamic.repeats,
            failed_runs: self.dynamic.failed_runs,
            stdout: self.dynamic.stdout.clone(),
            stderr: self.dynamic.stderr.clone(),
        }
    }
}
