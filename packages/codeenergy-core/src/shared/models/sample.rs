//! Sample under measurement

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::{FeatureVector, Language, RunResult, SizedRun};

/// One code unit benchmarked across input sizes and repeats
///
/// Append-only: runs can be added but never removed or replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    id: String,
    language: Language,
    source_path: Option<PathBuf>,
    source: String,
    features: FeatureVector,
    runs: BTreeMap<u64, Vec<RunResult>>,
}

impl Sample {
    pub fn new(
        id: impl Into<String>,
        language: Language,
        source_path: Option<PathBuf>,
        source: impl Into<String>,
        features: FeatureVector,
    ) -> Self {
        Self {
            id: id.into(),
            language,
            source_path,
            source: source.into(),
            features,
            runs: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn source_path(&self) -> Option<&PathBuf> {
        self.source_path.as_ref()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn features(&self) -> &FeatureVector {
        &self.features
    }

    /// Record a run at `input_size`
    pub fn push_run(&mut self, input_size: u64, run: RunResult) {
        self.runs.entry(input_size).or_default().push(run);
    }

    /// Runs at one input size, in execution order
    pub fn runs_at(&self, input_size: u64) -> &[RunResult] {
        self.runs.get(&input_size).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Input sizes with at least one run, ascending
    pub fn input_sizes(&self) -> impl Iterator<Item = u64> + '_ {
        self.runs.keys().copied()
    }

    pub fn run_count(&self) -> usize {
        self.runs.values().map(Vec::len).sum()
    }

    /// All runs tagged with their input size
    pub fn sized_runs(&self) -> Vec<SizedRun> {
        self.runs
            .iter()
            .flat_map(|(size, runs)| runs.iter().map(move |r| SizedRun::new(*size, r.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_run(index: usize, time: f64) -> RunResult {
        RunResult {
            time_s: Some(time),
            cpu_time_s: Some(time),
            peak_mem_bytes: Some(1024),
            energy_mj: None,
            stdout: String::new(),
            stderr: String::new(),
            run_index: index,
            error: None,
        }
    }

    #[test]
    fn test_runs_accumulate_per_size() {
        let fv = FeatureVector::empty(Language::PythonicIndent);
        let mut sample = Sample::new("s1", Language::PythonicIndent, None, "pass", fv);

        sample.push_run(400, ok_run(0, 0.4));
        sample.push_run(100, ok_run(0, 0.1));
        sample.push_run(100, ok_run(1, 0.2));

        assert_eq!(sample.run_count(), 3);
        assert_eq!(sample.runs_at(100).len(), 2);
        assert_eq!(sample.runs_at(100)[1].run_index, 1);
        assert!(sample.runs_at(1600).is_empty());
        assert_eq!(sample.input_sizes().collect::<Vec<_>>(), vec![100, 400]);
        assert_eq!(sample.sized_runs().len(), 3);
    }
}
