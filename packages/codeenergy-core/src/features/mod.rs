//! Feature modules - each slice keeps its own domain/infrastructure split
//!
//! - static_analysis : source text -> FeatureVector
//! - process_measure : one child process -> RunResult
//! - aggregation     : run history -> complexity classification
//! - scoring         : FeatureVector or source -> file score + hotspots

pub mod aggregation;
pub mod process_measure;
pub mod scoring;
pub mod static_analysis;
