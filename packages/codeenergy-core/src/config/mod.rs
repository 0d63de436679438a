//! Profiler configuration
//!
//! YAML schema v1 with per-section defaults and range validation.
//!
//! # Examples
//!
//! ```rust
//! use codeenergy_core::config::ProfilerConfig;
//!
//! let config = ProfilerConfig::from_yaml("version: 1\nbenchmark:\n  repeats: 5\n").unwrap();
//! assert_eq!(config.benchmark.repeats, 5);
//! assert_eq!(config.measurement.sample_interval_ms, 5);
//! ```

pub mod error;
pub mod io;
pub mod profiler_config;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigFileV1, CONFIG_VERSION};
pub use profiler_config::{
    BenchmarkConfig, MeasurementConfig, ProfilerConfig, ScoringConfig, StrategyKind,
};
pub use validation::Validatable;
