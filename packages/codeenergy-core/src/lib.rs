/*
 * Code Energy Profiler - core
 *
 * Feature-First Architecture:
 * - shared/     : Common models (FeatureVector, RunResult, Hotspot, Sample)
 * - features/   : Vertical slices (static_analysis, process_measure, aggregation, scoring)
 * - benchmark/  : Collection pipeline (invoke -> measure -> median -> run log)
 * - config/     : YAML v1 configuration
 *
 * Execution model:
 * - Single-threaded and synchronous
 * - Measurements are serialized process-wide
 */

#![allow(clippy::new_without_default)] // Unit-struct constructors kept for API symmetry
#![allow(clippy::module_inception)] // Module naming intentional

/// Shared models
pub mod shared;

/// Feature slices
pub mod features;

/// Benchmark collection pipeline
pub mod benchmark;

/// Configuration (YAML v1)
pub mod config;

/// Crate error type
pub mod errors;

pub use benchmark::{BenchmarkReport, BenchmarkRequest, BenchmarkRunner, RunRecord};
pub use config::{ConfigError, ProfilerConfig};
pub use errors::{EnergyError, Result};
pub use features::aggregation::{AggregatedSample, ComplexityLabel, RunAggregator};
pub use features::process_measure::{CommandLine, ProcessMeasurer};
pub use features::scoring::{
    FeatureWeighted, RuleBased, ScoreRequest, ScoreResponse, ScorerSelector, ScoringStrategy,
    WeightPreset,
};
pub use features::static_analysis::StaticAnalyzer;
pub use shared::models::{FeatureVector, Hotspot, Language, RunResult, Sample};
