//! Aggregation invariants
//!
//! - Median-of-repeats resists a minority of outliers
//! - Power-law inputs recover their exponent
//! - Fewer than two usable sizes classify as "other"
//! - A malformed persisted line aborts aggregation

use std::collections::BTreeMap;

use codeenergy_core::benchmark::RunRecord;
use codeenergy_core::features::aggregation::{median_of, ComplexityLabel, RunAggregator};
use codeenergy_core::shared::models::{Language, RunResult, Sample, SizedRun};
use codeenergy_core::FeatureVector;
use codeenergy_storage::{InMemoryRecordLog, RecordLog};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

fn timed(run_index: usize, time_s: f64) -> RunResult {
    RunResult {
        time_s: Some(time_s),
        cpu_time_s: Some(time_s),
        peak_mem_bytes: Some(1 << 20),
        energy_mj: Some(time_s * 10.0),
        stdout: String::new(),
        stderr: String::new(),
        run_index,
        error: None,
    }
}

fn grouped(points: &[(u64, f64)]) -> BTreeMap<String, Vec<SizedRun>> {
    let runs = points
        .iter()
        .flat_map(|&(size, t)| (0..3).map(move |r| SizedRun::new(size, timed(r, t))))
        .collect();
    BTreeMap::from([("sample".to_string(), runs)])
}

#[test]
fn test_quadratic_samples_fit_slope_two() {
    let out = RunAggregator::new().aggregate(&grouped(&[
        (100, 0.01),
        (400, 0.16),
        (1600, 2.56),
    ]));
    let slope = out[0].slope.unwrap();
    assert!((slope - 2.0).abs() < 1e-6, "slope {}", slope);
    assert_eq!(out[0].complexity, ComplexityLabel::Quadratic);
}

#[test]
fn test_linear_samples() {
    let out = RunAggregator::new().aggregate(&grouped(&[(100, 0.1), (400, 0.4), (1600, 1.6)]));
    assert_eq!(out[0].complexity, ComplexityLabel::Linear);
    assert_eq!(out[0].fitted_points(), 3);
}

#[test]
fn test_single_size_is_other() {
    let out = RunAggregator::new().aggregate(&grouped(&[(100, 0.1)]));
    assert!(out[0].slope.is_none());
    assert_eq!(out[0].complexity, ComplexityLabel::Other);
}

#[test]
fn test_failed_size_drops_out_of_fit() {
    let mut input = grouped(&[(100, 0.1), (400, 0.4)]);
    let runs = input.get_mut("sample").unwrap();
    for r in 0..3 {
        runs.push(SizedRun::new(1600, RunResult::failed(r, "timed out after 1.000s")));
    }

    let out = RunAggregator::new().aggregate(&input);
    assert_eq!(out[0].configs.len(), 3);
    assert_eq!(out[0].fitted_points(), 2);
    assert_eq!(out[0].configs[2].failed_runs, 3);
    assert_eq!(out[0].complexity, ComplexityLabel::Linear);
}

#[test]
fn test_failed_size_keeps_sample_medians() {
    let mut input = grouped(&[(100, 1.0)]);
    let runs = input.get_mut("sample").unwrap();
    for r in 0..3 {
        runs.push(SizedRun::new(400, RunResult::failed(r, "failed to spawn 'python3'")));
    }

    let out = RunAggregator::new().aggregate(&input);
    assert_eq!(out[0].configs[1].time_s, None);
    assert_eq!(out[0].median_time_s, Some(1.0));
    assert_eq!(out[0].median_energy_mj, Some(10.0));
    assert_eq!(out[0].complexity, ComplexityLabel::Other);
}

#[test]
fn test_sample_median_averages_even_sizes() {
    let out = RunAggregator::new().aggregate(&grouped(&[(100, 0.1), (400, 0.4)]));
    let median = out[0].median_time_s.unwrap();
    assert!((median - 0.25).abs() < 1e-12, "median {}", median);
}

#[test]
fn test_median_of_repeats_example() {
    let times = [1.0, 1.1, 1.2, 1.1, 50.0];
    assert_eq!(median_of(times.map(Some)), Some(1.1));
}

#[test]
fn test_samples_keep_language() {
    let mut sample = Sample::new(
        "fib",
        Language::JvmLike,
        None,
        "class Fib {}",
        FeatureVector::empty(Language::JvmLike),
    );
    sample.push_run(10, timed(0, 0.01));
    sample.push_run(100, timed(0, 0.1));

    let out = RunAggregator::new().aggregate_samples(&[sample]);
    assert_eq!(out[0].language, Some(Language::JvmLike));
    assert_eq!(out[0].complexity, ComplexityLabel::Linear);
}

#[test]
fn test_malformed_log_aborts_aggregation() {
    let log = InMemoryRecordLog::<RunRecord>::from_lines(vec!["{not json".to_string()]);
    let err = RunAggregator::new().aggregate_log(&log).unwrap_err();
    assert!(err.to_string().contains("line 1"), "{}", err);
}

#[test]
fn test_empty_log_aggregates_to_nothing() {
    let log = InMemoryRecordLog::<RunRecord>::default();
    assert!(log.is_empty().unwrap());
    assert!(RunAggregator::new().aggregate_log(&log).unwrap().is_empty());
}

// ============================================================================
// QuickCheck
// ============================================================================

#[quickcheck]
fn qc_median_ignores_minority_outliers(base: Vec<u16>, outlier: u32) -> TestResult {
    // A strict majority of identical values pins the median
    if base.is_empty() {
        return TestResult::discard();
    }
    let value = f64::from(base[0]);
    let majority = base.len() + 1;
    let minority = base.len();

    let mut values: Vec<Option<f64>> = vec![Some(value); majority];
    values.extend(std::iter::repeat(Some(f64::from(outlier))).take(minority));

    TestResult::from_bool(median_of(values) == Some(value))
}

#[quickcheck]
fn qc_median_is_a_member(values: Vec<u32>) -> TestResult {
    if values.is_empty() {
        return TestResult::discard();
    }
    let median = median_of(values.iter().copied().map(Some));
    TestResult::from_bool(median.is_some_and(|m| values.contains(&m)))
}
