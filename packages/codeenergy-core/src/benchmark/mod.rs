//! Benchmark collection
//!
//! Turns a source file into persisted run records:
//! - Per-language invocation (with a one-off compile step for JVM sources)
//! - Sequential measurement of every (input size, repeat) pair
//! - Median-of-repeats record per input size, appended to the run log
//!
//! # Examples
//!
//! ```no_run
//! use codeenergy_core::benchmark::{BenchmarkRequest, BenchmarkRunner, RunRecord};
//! use codeenergy_core::config::ProfilerConfig;
//! use codeenergy_core::features::process_measure::ProcessMeasurer;
//! use codeenergy_storage::JsonlRecordLog;
//!
//! let config = ProfilerConfig::from_file("profiler.yaml").unwrap();
//! let log = JsonlRecordLog::<RunRecord>::open(&config.benchmark.log_path);
//! let measurer = ProcessMeasurer::from_config(&config.measurement);
//!
//! let mut runner = BenchmarkRunner::new(config.benchmark.clone(), measurer, log);
//! let report = runner.run(&BenchmarkRequest::new("python", "samples/bubble_sort.py")).unwrap();
//! println!("{} records", report.records.len());
//! ```

pub mod invocation;
pub mod metadata;
pub mod record;
pub mod runner;

pub use invocation::Invocation;
pub use metadata::CollectionMetadata;
pub use record::{DynamicMetrics, RunRecord};
pub use runner::{BenchmarkReport, BenchmarkRequest, BenchmarkRunner};
