//! Scoring invariants and pinned preset outputs
//!
//! - Bounds: every strategy keeps fileScore and hotspot scores in [0, 1]
//! - Depth weight: a saturated nesting depth alone is a lower bound
//! - Presets: exact file scores for a fixed reference vector
//! - Rule-based: nested-loop distance and empty-input behaviour

use codeenergy_core::features::scoring::{
    FeatureWeighted, RuleBased, ScoreInput, ScoringStrategy, WeightPreset,
};
use codeenergy_core::shared::models::{CodeRange, FeatureVector, Language};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn reference_vector() -> FeatureVector {
    let mut fv = FeatureVector::empty(Language::PythonicIndent);
    fv.nested_loop_depth = 3;
    fv.loop_count = 6;
    fv.string_concat_ops = 4;
    fv.list_scan_ops = 10;
    fv.avg_function_length = 30.0;
    fv.token_count = 1200;
    fv.hotspot_seeds = vec![CodeRange::lines(2, 7, 0), CodeRange::lines(10, 15, 0)];
    fv
}

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{}: expected {}, got {}",
        what,
        expected,
        actual
    );
}

// ============================================================================
// Pinned preset outputs
// ============================================================================

#[test]
fn test_standard_preset_pinned() {
    // .40*.5 + .25*.3 + .15*(4/15) + .10*.4 + .10*.1
    let outcome = FeatureWeighted::new(WeightPreset::Standard).score_features(&reference_vector(), None);
    assert_close(outcome.file_score, 0.365, "standard fileScore");
    assert_close(outcome.estimated_mj.unwrap(), 365.0, "standard estimate");
    assert_close(outcome.hotspots[1].score, 0.365 * 0.88, "standard second seed");
    assert_close(outcome.hotspots[0].estimate_mj.unwrap(), 182.5, "standard energy share");
}

#[test]
fn test_service_preset_pinned() {
    let outcome = FeatureWeighted::new(WeightPreset::Service).score_features(&reference_vector(), None);
    assert_close(outcome.file_score, 0.365, "service fileScore");
    assert_eq!(outcome.estimated_mj, None);
    // trunc(200 + 120 * 1 * 0.365) = 243
    assert_eq!(outcome.hotspots[1].estimate_mj, Some(243.0));
}

#[test]
fn test_editor_preset_pinned() {
    // .55*.5 + .18*.3 + .12*(4/15) + .10*.4 + .05*.1 = .406
    // + .18 (depth 3) + .08 (10 scans) = .666
    let outcome = FeatureWeighted::new(WeightPreset::Editor).score_features(&reference_vector(), None);
    assert_close(outcome.file_score, 0.666, "editor fileScore");
    assert_close(outcome.hotspots[0].score, 0.746, "editor first seed");
    assert_close(outcome.hotspots[1].score, 0.666 * 0.92 + 0.08, "editor second seed");
    assert_eq!(
        outcome.hotspots[0].rule_id.as_deref(),
        Some("nested-loop-set-lookup")
    );
}

#[test]
fn test_local_preset_pinned() {
    // raw = 2.4 + 1.8 + 1.2 + 2.0 + 0.6 = 8.0
    let outcome = FeatureWeighted::new(WeightPreset::Local).score_features(&reference_vector(), None);
    assert_close(outcome.file_score, 8.0 / 9.0, "local fileScore");
    assert_close(outcome.hotspots[0].score, 4.0 / 9.0, "local seed share");
    assert!(outcome.hotspots.iter().all(|h| h.suggestion.is_none()));
}

#[test]
fn test_presets_report_distinct_versions() {
    let versions: Vec<&str> = WeightPreset::ALL.iter().map(|p| p.version()).collect();
    assert_eq!(
        versions,
        vec![
            "feature-weighted-v1",
            "heuristic-v1",
            "heuristic-ext-v1",
            "heuristic-local-v1"
        ]
    );
}

// ============================================================================
// Depth weight lower bound
// ============================================================================

#[test]
fn test_saturated_depth_is_lower_bound() {
    for depth in [6, 7, 50] {
        let mut fv = FeatureVector::empty(Language::JvmLike);
        fv.nested_loop_depth = depth;

        let standard = FeatureWeighted::new(WeightPreset::Standard).file_score(&fv);
        assert!(standard >= 0.40, "standard depth {} -> {}", depth, standard);

        let editor = FeatureWeighted::new(WeightPreset::Editor).file_score(&fv);
        assert!(editor >= 0.55, "editor depth {} -> {}", depth, editor);
    }
}

// ============================================================================
// Rule-based detector
// ============================================================================

#[test]
fn test_loops_three_lines_apart_are_one_nested_hotspot() {
    let source = "\
for i in range(n):
    a = i
    b = a
    for j in range(n):
        pass
";
    let outcome = RuleBased::new()
        .score(ScoreInput::source(source, Language::PythonicIndent))
        .unwrap();

    let nested: Vec<_> = outcome
        .hotspots
        .iter()
        .filter(|h| h.rule_id.as_deref() == Some("nested-loops"))
        .collect();
    assert_eq!(nested.len(), 1);
    assert_eq!(nested[0].start.line, 0);
    assert_eq!(nested[0].end.line, 3);
}

#[test]
fn test_no_loops_scores_zero() {
    let source = "def add(a, b):\n    return a + b\n";
    let outcome = RuleBased::new()
        .score(ScoreInput::source(source, Language::PythonicIndent))
        .unwrap();
    assert_eq!(outcome.file_score, 0.0);
    assert!(outcome.hotspots.is_empty());
}

// ============================================================================
// Bounds (property-based)
// ============================================================================

fn arb_feature_vector() -> impl Strategy<Value = FeatureVector> {
    (
        (0usize..10_000, 0usize..200, 0usize..40, 0usize..200, 0usize..200),
        (0usize..200, any::<bool>(), 0.0f64..5_000.0, 0u32..20),
    )
        .prop_map(
            |((tokens, loops, depth, concat, scan), (new_ops, recursion, avg_len, seeds))| {
                let mut fv = FeatureVector::empty(Language::PythonicIndent);
                fv.token_count = tokens;
                fv.loop_count = loops;
                fv.nested_loop_depth = depth;
                fv.string_concat_ops = concat;
                fv.list_scan_ops = scan;
                fv.new_ops = new_ops;
                fv.recursion_detected = recursion;
                fv.avg_function_length = avg_len;
                fv.hotspot_seeds = (0..seeds)
                    .map(|i| CodeRange::lines(i * 3, i * 3 + 5, 0))
                    .collect();
                fv
            },
        )
}

proptest! {
    #[test]
    fn prop_feature_weighted_scores_are_bounded(fv in arb_feature_vector()) {
        for preset in WeightPreset::ALL {
            let outcome = FeatureWeighted::new(preset).score(ScoreInput::features(&fv)).unwrap();
            prop_assert!((0.0..=1.0).contains(&outcome.file_score));
            for hs in &outcome.hotspots {
                prop_assert!((0.0..=1.0).contains(&hs.score));
                if let Some(confidence) = hs.confidence {
                    prop_assert!((0.0..=1.0).contains(&confidence));
                }
                if hs.score < 0.25 {
                    prop_assert!(hs.suggestion.is_none());
                }
            }
        }
    }

    #[test]
    fn prop_rule_based_scores_are_bounded(source in "[ a-z:+=(){}.\n\"']{0,400}") {
        for language in Language::ALL {
            let outcome = RuleBased::new().score(ScoreInput::source(&source, language)).unwrap();
            prop_assert!((0.0..=1.0).contains(&outcome.file_score));
            let max = outcome.hotspots.iter().map(|h| h.score).fold(0.0, f64::max);
            prop_assert_eq!(outcome.file_score, max);
        }
    }
}
