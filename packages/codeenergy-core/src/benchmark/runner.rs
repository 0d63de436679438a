//! Benchmark orchestration
//!
//! Analyze a sample once, measure it sequentially for every (input size,
//! repeat) pair, and append one median record per size to the run log.

use std::path::{Path, PathBuf};
use std::process::Command;

use codeenergy_storage::RecordLog;
use tracing::{debug, info};

use super::invocation::Invocation;
use super::metadata::CollectionMetadata;
use super::record::{DynamicMetrics, RunRecord};
use crate::config::BenchmarkConfig;
use crate::errors::{EnergyError, Result};
use crate::features::aggregation::RunAggregator;
use crate::features::process_measure::{CommandLine, ProcessMeasurer};
use crate::features::static_analysis::StaticAnalyzer;
use crate::shared::models::{Language, Sample};

/// One sample to collect
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRequest {
    /// Defaults to the source file stem
    pub sample_id: Option<String>,
    pub language: String,
    pub source_path: PathBuf,
    /// Defaults to the configured sizes
    pub input_sizes: Option<Vec<u64>>,
    /// Defaults to the configured repeat count
    pub repeats: Option<usize>,
}

impl BenchmarkRequest {
    pub fn new(language: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
        Self {
            sample_id: None,
            language: language.into(),
            source_path: source_path.into(),
            input_sizes: None,
            repeats: None,
        }
    }

    pub fn with_id(mut self, sample_id: impl Into<String>) -> Self {
        self.sample_id = Some(sample_id.into());
        self
    }

    pub fn with_sizes(mut self, input_sizes: Vec<u64>) -> Self {
        self.input_sizes = Some(input_sizes);
        self
    }

    pub fn with_repeats(mut self, repeats: usize) -> Self {
        self.repeats = Some(repeats);
        self
    }
}

/// Everything collected for one request
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    /// Every individual run, grouped by input size
    pub sample: Sample,
    /// Records appended to the log, ascending input size
    pub records: Vec<RunRecord>,
}

pub struct BenchmarkRunner<L> {
    config: BenchmarkConfig,
    measurer: ProcessMeasurer,
    analyzer: StaticAnalyzer,
    log: L,
}

impl<L: RecordLog<RunRecord>> BenchmarkRunner<L> {
    pub fn new(config: BenchmarkConfig, measurer: ProcessMeasurer, log: L) -> Self {
        Self {
            config,
            measurer,
            analyzer: StaticAnalyzer::new(),
            log,
        }
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn into_log(self) -> L {
        self.log
    }

    /// Collect one sample
    ///
    /// # Errors
    ///
    /// Unknown language, unreadable source, empty size list, a failed compile
    /// step, or a log append failure. Failed measurements are not errors;
    /// they are recorded.
    pub fn run(&mut self, request: &BenchmarkRequest) -> Result<BenchmarkReport> {
        let language = Language::from_tag(&request.language)?;
        let path = request.source_path.as_path();
        let source = std::fs::read_to_string(path)?;
        let sample_id = resolve_sample_id(request, path)?;

        let input_sizes = request
            .input_sizes
            .clone()
            .unwrap_or_else(|| self.config.input_sizes.clone());
        let repeats = request.repeats.unwrap_or(self.config.repeats);
        if input_sizes.is_empty() || repeats == 0 {
            return Err(EnergyError::benchmark(format!(
                "nothing to run for '{}': {} sizes x {} repeats",
                sample_id,
                input_sizes.len(),
                repeats
            )));
        }

        let features = self.analyzer.analyze_language(&source, language);
        let mut sample = Sample::new(
            sample_id.clone(),
            language,
            Some(path.to_path_buf()),
            source.clone(),
            features.clone(),
        );

        info!(
            sample_id = %sample_id,
            language = %language,
            sizes = input_sizes.len(),
            repeats,
            "collecting sample"
        );

        let mut compiled = false;
        let mut records = Vec::with_capacity(input_sizes.len());

        for &input_size in &input_sizes {
            let invocation = Invocation::for_language(language, path, input_size, &self.config)?;
            if let (Some(compile), false) = (&invocation.compile, compiled) {
                run_compile_step(compile)?;
                compiled = true;
            }

            for run_index in 0..repeats {
                let result = self
                    .measurer
                    .measure(&invocation.run, None)
                    .with_run_index(run_index);
                sample.push_run(input_size, result);
            }

            let median = RunAggregator::median_config(input_size, sample.runs_at(input_size));
            let record = RunRecord {
                sample_id: sample_id.clone(),
                language,
                source_path: path.display().to_string(),
                source: source.clone(),
                run_id: RunRecord::run_id(&sample_id, input_size),
                input_size,
                static_features: features.clone(),
                dynamic: DynamicMetrics::from(&median),
                metadata: CollectionMetadata::capture(),
                labels: serde_json::Map::new(),
            };
            self.log.append(&record)?;

            info!(
                run_id = %record.run_id,
                time_s = ?record.dynamic.time_s,
                failed_runs = record.dynamic.failed_runs,
                "wrote run"
            );
            records.push(record);
        }

        Ok(BenchmarkReport { sample, records })
    }
}

fn resolve_sample_id(request: &BenchmarkRequest, path: &Path) -> Result<String> {
    if let Some(id) = &request.sample_id {
        return Ok(id.clone());
    }
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| EnergyError::benchmark(format!("no sample id for '{}'", path.display())))
}

fn run_compile_step(compile: &CommandLine) -> Result<()> {
    debug!(command = %compile, "compiling sample");
    let output = Command::new(&compile.program)
        .args(&compile.args)
        .output()
        .map_err(|e| EnergyError::benchmark(format!("failed to run '{}': {}", compile, e)))?;

    if !output.status.success() {
        return Err(EnergyError::benchmark(format!(
            "'{}' failed ({}): {}",
            compile,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(())
}
