//! Process execution results

use serde::{Deserialize, Serialize};

/// Resource usage of one process execution
///
/// Never mutated after creation. A failed execution has every numeric field
/// `None` and carries a diagnostic in `error` (mirrored into `stderr`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub time_s: Option<f64>,
    pub cpu_time_s: Option<f64>,
    pub peak_mem_bytes: Option<u64>,
    #[serde(rename = "energy_mJ")]
    pub energy_mj: Option<f64>,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    pub run_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunResult {
    /// Failed execution with a diagnostic
    pub fn failed(run_index: usize, diagnostic: impl Into<String>) -> Self {
        let diagnostic = diagnostic.into();
        Self {
            time_s: None,
            cpu_time_s: None,
            peak_mem_bytes: None,
            energy_mj: None,
            stdout: String::new(),
            stderr: diagnostic.clone(),
            run_index,
            error: Some(diagnostic),
        }
    }

    /// Callers branch on the presence of wall time
    pub fn is_success(&self) -> bool {
        self.time_s.is_some()
    }

    pub fn with_run_index(mut self, run_index: usize) -> Self {
        self.run_index = run_index;
        self
    }
}

/// A run tagged with the input size it was executed at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizedRun {
    pub input_size: u64,
    pub run: RunResult,
}

impl SizedRun {
    pub fn new(input_size: u64, run: RunResult) -> Self {
        Self { input_size, run }
    }
}
