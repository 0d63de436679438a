//! Run aggregator
//!
//! Groups executions per (sample, input size), reduces each group with
//! median-of-repeats, then fits a power-law exponent across sizes and maps it
//! to a `ComplexityLabel`.

use std::collections::BTreeMap;

use codeenergy_storage::RecordLog;
use tracing::{debug, info};

use super::domain::{AggregatedSample, ComplexityLabel, ConfigMedian};
use super::statistics::{fit_scaling_exponent, median_index, median_of, present_median};
use crate::benchmark::RunRecord;
use crate::errors::Result;
use crate::shared::models::{Language, RunResult, Sample, SizedRun};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunAggregator;

impl RunAggregator {
    pub fn new() -> Self {
        Self
    }

    /// One `AggregatedSample` per sample id, in id order
    ///
    /// Ids with no runs (or only failed runs) still produce a record with an
    /// undefined slope and the `Other` label.
    pub fn aggregate(&self, grouped: &BTreeMap<String, Vec<SizedRun>>) -> Vec<AggregatedSample> {
        grouped
            .iter()
            .map(|(sample_id, runs)| {
                let configs = group_by_size(runs)
                    .into_iter()
                    .map(|(size, runs)| Self::median_config(size, &runs))
                    .collect();
                self.classify(sample_id, None, configs)
            })
            .collect()
    }

    /// Aggregate in-memory samples, keeping their language
    pub fn aggregate_samples(&self, samples: &[Sample]) -> Vec<AggregatedSample> {
        samples
            .iter()
            .map(|sample| {
                let configs = sample
                    .input_sizes()
                    .map(|size| Self::median_config(size, sample.runs_at(size)))
                    .collect();
                self.classify(sample.id(), Some(sample.language()), configs)
            })
            .collect()
    }

    /// Rebuild classifications from persisted per-size records
    ///
    /// Each record already holds a median. If a configuration was collected
    /// more than once, the record appended last wins.
    pub fn aggregate_records(&self, records: &[RunRecord]) -> Vec<AggregatedSample> {
        let mut by_sample: BTreeMap<&str, (Language, BTreeMap<u64, ConfigMedian>)> =
            BTreeMap::new();

        for record in records {
            let entry = by_sample
                .entry(record.sample_id.as_str())
                .or_insert_with(|| (record.language, BTreeMap::new()));
            entry.1.insert(record.input_size, record.to_config_median());
        }

        by_sample
            .into_iter()
            .map(|(sample_id, (language, configs))| {
                self.classify(sample_id, Some(language), configs.into_values().collect())
            })
            .collect()
    }

    /// Load a run log and aggregate it
    ///
    /// # Errors
    ///
    /// A malformed line aborts the whole batch; no partial classification is
    /// produced.
    pub fn aggregate_log<L>(&self, log: &L) -> Result<Vec<AggregatedSample>>
    where
        L: RecordLog<RunRecord>,
    {
        let records = log.load_all()?;
        debug!(records = records.len(), "loaded run log");
        Ok(self.aggregate_records(&records))
    }

    /// Median-of-repeats for one configuration, independently per metric
    pub fn median_config(input_size: u64, runs: &[RunResult]) -> ConfigMedian {
        let representative = runs.get(median_index(runs.len()));

        ConfigMedian {
            input_size,
            time_s: median_of(runs.iter().map(|r| r.time_s)),
            cpu_time_s: median_of(runs.iter().map(|r| r.cpu_time_s)),
            peak_mem_bytes: median_of(runs.iter().map(|r| r.peak_mem_bytes)),
            energy_mj: median_of(runs.iter().map(|r| r.energy_mj)),
            runs: runs.len(),
            failed_runs: runs.iter().filter(|r| !r.is_success()).count(),
            stdout: representative.map(|r| r.stdout.clone()).unwrap_or_default(),
            stderr: representative.map(|r| r.stderr.clone()).unwrap_or_default(),
        }
    }

    fn classify(
        &self,
        sample_id: &str,
        language: Option<Language>,
        configs: Vec<ConfigMedian>,
    ) -> AggregatedSample {
        let points: Vec<(u64, Option<f64>)> =
            configs.iter().map(|c| (c.input_size, c.time_s)).collect();
        let slope = fit_scaling_exponent(&points);
        let complexity = ComplexityLabel::from_slope(slope);

        let median_time_s = present_median(configs.iter().map(|c| c.time_s));
        let median_energy_mj = present_median(configs.iter().map(|c| c.energy_mj));

        info!(
            sample_id,
            configs = configs.len(),
            slope = ?slope,
            complexity = %complexity,
            "classified sample"
        );

        AggregatedSample {
            sample_id: sample_id.to_string(),
            language,
            slope,
            complexity,
            configs,
            median_time_s,
            median_energy_mj,
        }
    }
}

/// Runs grouped by input size (ascending), execution order kept within a size
fn group_by_size(runs: &[SizedRun]) -> BTreeMap<u64, Vec<RunResult>> {
    let mut grouped: BTreeMap<u64, Vec<RunResult>> = BTreeMap::new();
    for sized in runs {
        grouped
            .entry(sized.input_size)
            .or_default()
            .push(sized.run.clone());
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(index: usize, time: f64) -> RunResult {
        RunResult {
            time_s: Some(time),
            cpu_time_s: Some(time * 0.9),
            peak_mem_bytes: Some(1_000 + index as u64),
            energy_mj: None,
            stdout: format!("run {}", index),
            stderr: String::new(),
            run_index: index,
            error: None,
        }
    }

    #[test]
    fn test_median_config_representative_output() {
        let runs = vec![run(0, 3.0), run(1, 1.0), run(2, 2.0)];
        let config = RunAggregator::median_config(100, &runs);

        assert_eq!(config.time_s, Some(2.0));
        assert_eq!(config.peak_mem_bytes, Some(1_001));
        assert_eq!(config.energy_mj, None);
        // Output comes from the run at the median position in execution order
        assert_eq!(config.stdout, "run 1");
        assert_eq!(config.runs, 3);
        assert_eq!(config.failed_runs, 0);
    }

    #[test]
    fn test_failed_runs_count_as_worst_case() {
        let runs = vec![
            run(0, 1.0),
            RunResult::failed(1, "timed out after 1.000s"),
            RunResult::failed(2, "timed out after 1.000s"),
        ];
        let config = RunAggregator::median_config(100, &runs);
        assert_eq!(config.time_s, None);
        assert_eq!(config.failed_runs, 2);
    }

    #[test]
    fn test_every_sample_id_is_emitted() {
        let mut grouped = BTreeMap::new();
        grouped.insert("empty".to_string(), Vec::new());
        grouped.insert(
            "linear".to_string(),
            vec![
                SizedRun::new(100, run(0, 0.1)),
                SizedRun::new(1000, run(0, 1.0)),
            ],
        );

        let out = RunAggregator::new().aggregate(&grouped);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].sample_id, "empty");
        assert_eq!(out[0].complexity, ComplexityLabel::Other);
        assert!(out[0].slope.is_none());
        assert_eq!(out[1].complexity, ComplexityLabel::Linear);
        assert_eq!(out[1].fitted_points(), 2);
    }
}
