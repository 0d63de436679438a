//! Feature-weighted scoring strategy
//!
//! Combines saturated static-feature factors into a file score, then spreads
//! that score over the seed ranges with a rank-based decay. The exact shape
//! of both steps is selected by a `WeightPreset`.

use tracing::debug;

use super::presets::{
    Factors, WeightPreset, EDITOR_DEPTH_BOOSTS, EDITOR_SCAN_BOOST, ENERGY_BUDGET_MJ,
};
use super::suggestions::contextual_suggestion;
use crate::errors::Result;
use crate::features::scoring::domain::{
    first_matching_rule, ScoreInput, ScoreOutcome, ScoringStrategy,
    SUGGESTION_VISIBILITY_THRESHOLD,
};
use crate::features::static_analysis::StaticAnalyzer;
use crate::shared::models::{clamp_unit, CodeRange, FeatureVector, Hotspot};

#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureWeighted {
    preset: WeightPreset,
    max_hotspots: Option<usize>,
    analyzer: StaticAnalyzer,
}

impl FeatureWeighted {
    pub fn new(preset: WeightPreset) -> Self {
        Self {
            preset,
            max_hotspots: None,
            analyzer: StaticAnalyzer::new(),
        }
    }

    /// Cap the number of hotspots below the preset's own limit
    pub fn with_max_hotspots(mut self, max_hotspots: Option<usize>) -> Self {
        self.max_hotspots = max_hotspots;
        self
    }

    pub fn preset(&self) -> WeightPreset {
        self.preset
    }

    /// File score in [0, 1]
    pub fn file_score(&self, fv: &FeatureVector) -> f64 {
        let Some(weights) = self.preset.weights() else {
            return squashed_score(fv);
        };

        let mut score = Factors::from_features(fv).weighted(weights);

        if self.preset == WeightPreset::Editor {
            if let Some((_, boost)) = EDITOR_DEPTH_BOOSTS
                .iter()
                .find(|(min_depth, _)| fv.nested_loop_depth >= *min_depth)
            {
                score += boost;
            }
            let (scan_floor, scan_boost) = EDITOR_SCAN_BOOST;
            if fv.list_scan_ops > scan_floor {
                score += scan_boost;
            }
        }

        clamp_unit(score)
    }

    /// Whole-file energy estimate, for presets that report one
    pub fn estimated_mj(&self, file_score: f64) -> Option<f64> {
        match self.preset {
            WeightPreset::Standard | WeightPreset::Local => Some(file_score * ENERGY_BUDGET_MJ),
            WeightPreset::Service | WeightPreset::Editor => None,
        }
    }

    fn seed_limit(&self) -> usize {
        match (self.preset.seed_limit(), self.max_hotspots) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => usize::MAX,
        }
    }

    /// One hotspot per seed, in seed order
    pub fn hotspots(&self, fv: &FeatureVector, seeds: &[CodeRange], file_score: f64) -> Vec<Hotspot> {
        let seeds = &seeds[..seeds.len().min(self.seed_limit())];
        if seeds.is_empty() {
            return Vec::new();
        }
        let share = 1.0 / seeds.len() as f64;

        seeds
            .iter()
            .enumerate()
            .map(|(rank, seed)| {
                let rank_f = rank as f64;
                match self.preset {
                    WeightPreset::Standard => {
                        let base = file_score * (1.0 - rank_f * 0.12);
                        Hotspot::new(*seed, base)
                            .with_confidence(0.8 - 0.04 * rank_f)
                            .with_estimate(file_score * ENERGY_BUDGET_MJ * share)
                            .with_suggestion(contextual_suggestion(fv, base).map(String::from))
                    }
                    WeightPreset::Service => {
                        let base = file_score * (1.0 - rank_f * 0.12);
                        Hotspot::new(*seed, base)
                            .with_confidence(0.8 - 0.04 * rank_f)
                            .with_estimate((200.0 + 120.0 * rank_f * file_score).trunc())
                            .with_suggestion(contextual_suggestion(fv, base).map(String::from))
                    }
                    WeightPreset::Editor => {
                        let depth_bonus = if fv.nested_loop_depth >= 3 { 0.08 } else { 0.0 };
                        let score = (file_score * (1.0 - rank_f * 0.08) + depth_bonus).min(1.0);
                        let hotspot = Hotspot::new(*seed, score)
                            .with_confidence((0.8 - 0.05 * rank_f).max(0.0))
                            .with_estimate(200.0 + 80.0 * rank_f);
                        with_catalog_suggestion(hotspot, fv)
                    }
                    WeightPreset::Local => Hotspot::new(*seed, file_score * share)
                        .with_confidence(0.4)
                        .with_estimate(file_score * ENERGY_BUDGET_MJ * share),
                }
            })
            .collect()
    }

    /// Score a feature vector; `seeds` overrides the vector's own seeds
    pub fn score_features(&self, fv: &FeatureVector, seeds: Option<&[CodeRange]>) -> ScoreOutcome {
        let file_score = self.file_score(fv);
        let seeds = seeds.unwrap_or(&fv.hotspot_seeds);
        let hotspots = self.hotspots(fv, seeds, file_score);

        debug!(
            preset = %self.preset,
            file_score,
            hotspots = hotspots.len(),
            "scored feature vector"
        );

        ScoreOutcome {
            file_score,
            estimated_mj: self.estimated_mj(file_score),
            hotspots,
        }
    }
}

impl ScoringStrategy for FeatureWeighted {
    fn version(&self) -> &'static str {
        self.preset.version()
    }

    fn score(&self, input: ScoreInput<'_>) -> Result<ScoreOutcome> {
        match input {
            ScoreInput::Features { features, seeds } => Ok(self.score_features(features, seeds)),
            ScoreInput::Source { source, language } => {
                let fv = self.analyzer.analyze_language(source, language);
                Ok(self.score_features(&fv, None))
            }
        }
    }
}

/// 1 - 1/(1 + raw) over a linear mix of raw counts
fn squashed_score(fv: &FeatureVector) -> f64 {
    let raw = 0.4 * fv.loop_count as f64
        + 0.6 * fv.nested_loop_depth as f64
        + 0.3 * fv.string_concat_ops as f64
        + 0.2 * fv.list_scan_ops as f64
        + 0.0005 * fv.token_count as f64;

    if raw > 0.0 {
        clamp_unit(1.0 - 1.0 / (1.0 + raw))
    } else {
        0.0
    }
}

fn with_catalog_suggestion(hotspot: Hotspot, fv: &FeatureVector) -> Hotspot {
    if hotspot.score < SUGGESTION_VISIBILITY_THRESHOLD {
        return hotspot;
    }
    match first_matching_rule(fv, hotspot.score) {
        Some((rule, delta)) => hotspot
            .with_rule(rule.id)
            .with_suggestion(Some(rule.description.to_string()))
            .with_delta(delta),
        None => hotspot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::scoring::infrastructure::suggestions::NESTED_LOOP_ADVICE;
    use crate::shared::models::Language;

    fn seeds(n: u32) -> Vec<CodeRange> {
        (0..n).map(|i| CodeRange::lines(i * 10, i * 10 + 5, 0)).collect()
    }

    fn nested() -> FeatureVector {
        let mut fv = FeatureVector::empty(Language::PythonicIndent);
        fv.nested_loop_depth = 6;
        fv.loop_count = 20;
        fv.hotspot_seeds = seeds(3);
        fv
    }

    #[test]
    fn test_empty_vector_scores_zero() {
        let fv = FeatureVector::empty(Language::JvmLike);
        for preset in WeightPreset::ALL {
            let outcome = FeatureWeighted::new(preset).score_features(&fv, None);
            assert_eq!(outcome.file_score, 0.0, "{}", preset);
            assert!(outcome.hotspots.is_empty());
        }
    }

    #[test]
    fn test_standard_rank_decay() {
        let fv = nested();
        let outcome = FeatureWeighted::new(WeightPreset::Standard).score_features(&fv, None);

        assert!((outcome.file_score - 0.65).abs() < 1e-9);
        assert_eq!(outcome.estimated_mj, Some(outcome.file_score * 1000.0));

        let scores: Vec<f64> = outcome.hotspots.iter().map(|h| h.score).collect();
        assert!((scores[0] - 0.65).abs() < 1e-9);
        assert!((scores[1] - 0.65 * 0.88).abs() < 1e-9);
        assert!((scores[2] - 0.65 * 0.76).abs() < 1e-9);

        let energy: f64 = outcome.hotspots.iter().filter_map(|h| h.estimate_mj).sum();
        assert!((energy - 650.0).abs() < 1e-9);
        assert_eq!(outcome.hotspots[0].suggestion.as_deref(), Some(NESTED_LOOP_ADVICE));
        assert!((outcome.hotspots[1].confidence.unwrap() - 0.76).abs() < 1e-9);
    }

    #[test]
    fn test_service_caps_seeds_and_truncates_energy() {
        let mut fv = nested();
        fv.hotspot_seeds = seeds(12);
        let outcome = FeatureWeighted::new(WeightPreset::Service).score_features(&fv, None);

        assert_eq!(outcome.hotspots.len(), 8);
        assert_eq!(outcome.estimated_mj, None);
        assert_eq!(outcome.hotspots[0].estimate_mj, Some(200.0));
        // 200 + 120 * 1 * 0.65 = 278.0
        assert_eq!(outcome.hotspots[1].estimate_mj, Some(278.0));
        // 200 + 120 * 3 * 0.65 = 434.0
        assert_eq!(outcome.hotspots[3].estimate_mj, Some(434.0));
    }

    #[test]
    fn test_max_hotspots_override() {
        let mut fv = nested();
        fv.hotspot_seeds = seeds(12);
        let scorer = FeatureWeighted::new(WeightPreset::Service).with_max_hotspots(Some(2));
        assert_eq!(scorer.score_features(&fv, None).hotspots.len(), 2);

        let scorer = FeatureWeighted::new(WeightPreset::Local).with_max_hotspots(Some(20));
        assert_eq!(scorer.score_features(&fv, None).hotspots.len(), 12);
    }

    #[test]
    fn test_editor_catalog_suggestions() {
        let fv = nested();
        let outcome = FeatureWeighted::new(WeightPreset::Editor).score_features(&fv, None);

        // .55 + .18 plus the .30 depth boost saturates
        assert_eq!(outcome.file_score, 1.0);
        let first = &outcome.hotspots[0];
        assert_eq!(first.score, 1.0);
        assert_eq!(first.rule_id.as_deref(), Some("nested-loop-set-lookup"));
        assert!((first.delta_score.unwrap() - 0.35).abs() < 1e-9);
        assert_eq!(outcome.hotspots[2].estimate_mj, Some(360.0));
        assert!((outcome.hotspots[2].confidence.unwrap() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_local_even_split() {
        let fv = nested();
        let outcome = FeatureWeighted::new(WeightPreset::Local).score_features(&fv, None);

        // raw = 0.4 * 20 + 0.6 * 6 = 11.6
        let expected = 1.0 - 1.0 / 12.6;
        assert!((outcome.file_score - expected).abs() < 1e-9);
        for hs in &outcome.hotspots {
            assert!((hs.score - expected / 3.0).abs() < 1e-9);
            assert_eq!(hs.confidence, Some(0.4));
            assert!(hs.suggestion.is_none());
        }
    }

    #[test]
    fn test_explicit_seeds_override_vector_seeds() {
        let fv = nested();
        let explicit = seeds(1);
        let outcome = FeatureWeighted::new(WeightPreset::Standard)
            .score(ScoreInput::Features {
                features: &fv,
                seeds: Some(&explicit),
            })
            .unwrap();
        assert_eq!(outcome.hotspots.len(), 1);
    }

    #[test]
    fn test_source_input_is_analyzed() {
        let source = "for a in xs:\n    for b in ys:\n        total += a * b\n";
        let outcome = FeatureWeighted::new(WeightPreset::Standard)
            .score(ScoreInput::source(source, Language::PythonicIndent))
            .unwrap();
        assert!(outcome.file_score > 0.0);
        assert_eq!(outcome.hotspots.len(), 2);
    }
}
