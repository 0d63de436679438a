//! Run Aggregation
//!
//! Turns repeated, multi-size executions into one classification per sample:
//! 1. Median-of-repeats per (sample, input size), independently per metric
//! 2. OLS fit of log(median time) on log(input size)
//! 3. Fixed half-open slope thresholds to a `ComplexityLabel`
//!
//! Insufficient data is not an error: fewer than two usable points yields an
//! undefined slope and `ComplexityLabel::Other`.
//!
//! # Example
//!
//! ```rust
//! use codeenergy_core::features::aggregation::{ComplexityLabel, RunAggregator};
//! use codeenergy_core::shared::models::{RunResult, SizedRun};
//! use std::collections::BTreeMap;
//!
//! let timed = |size: u64, t: f64| SizedRun::new(size, RunResult {
//!     time_s: Some(t), cpu_time_s: Some(t), peak_mem_bytes: Some(0), energy_mj: None,
//!     stdout: String::new(), stderr: String::new(), run_index: 0, error: None,
//! });
//! let mut grouped = BTreeMap::new();
//! grouped.insert("sq".to_string(), vec![timed(100, 1.0), timed(400, 16.0), timed(1600, 256.0)]);
//!
//! let out = RunAggregator::new().aggregate(&grouped);
//! assert_eq!(out[0].complexity, ComplexityLabel::Quadratic);
//! ```

pub mod aggregator;
pub mod domain;
pub mod statistics;

pub use aggregator::RunAggregator;
pub use domain::{AggregatedSample, ComplexityLabel, ConfigMedian, SLOPE_THRESHOLDS};
pub use statistics::{fit_scaling_exponent, median_of, present_median};
