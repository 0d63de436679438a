//! Suggestion rule catalog
//!
//! Each rule pairs a match predicate over (features, hotspot score) with a
//! fixed description and an estimated score reduction.

use crate::shared::models::FeatureVector;

pub struct SuggestionRule {
    pub id: &'static str,
    pub description: &'static str,
    matches: fn(&FeatureVector, f64) -> bool,
    estimated_delta: fn(&FeatureVector, f64) -> f64,
}

impl SuggestionRule {
    pub fn matches(&self, features: &FeatureVector, hotspot_score: f64) -> bool {
        (self.matches)(features, hotspot_score)
    }

    pub fn estimated_delta(&self, features: &FeatureVector, hotspot_score: f64) -> f64 {
        (self.estimated_delta)(features, hotspot_score)
    }
}

impl std::fmt::Debug for SuggestionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionRule").field("id", &self.id).finish()
    }
}

fn recursion_potential(fv: &FeatureVector) -> f64 {
    if fv.recursion_detected {
        1.0
    } else {
        0.0
    }
}

/// Rules in priority order
pub static SUGGESTION_RULES: [SuggestionRule; 5] = [
    SuggestionRule {
        id: "nested-loop-set-lookup",
        description: "Replace nested loops / repeated membership with set/dict lookups.",
        matches: |fv, score| fv.nested_loop_depth >= 2 && score >= 0.4,
        estimated_delta: |_, score| score * 0.35,
    },
    SuggestionRule {
        id: "string-concat-join",
        description: "Accumulate strings in list and join once instead of += in loop.",
        matches: |fv, score| fv.string_concat_ops > 2 && score >= 0.3,
        estimated_delta: |fv, _| (fv.string_concat_ops as f64 / 10.0) * 0.4,
    },
    SuggestionRule {
        id: "list-scan-to-set",
        description: "Replace repeated membership tests in list with a set.",
        matches: |fv, score| fv.list_scan_ops > 5 && score >= 0.25,
        estimated_delta: |fv, _| (fv.list_scan_ops as f64 / 50.0).min(0.3),
    },
    SuggestionRule {
        id: "reduce-recursion-depth",
        description: "Consider iterative approach or memoization to reduce recursion overhead.",
        matches: |fv, score| recursion_potential(fv) > 0.0 && score >= 0.35,
        estimated_delta: |fv, _| (recursion_potential(fv) * 0.15).min(0.4),
    },
    SuggestionRule {
        id: "optimize-memory-allocation",
        description: "Pre-allocate collections or use generators to reduce memory overhead.",
        matches: |fv, score| fv.new_ops > 8 && score >= 0.3,
        estimated_delta: |fv, _| (fv.new_ops as f64 / 40.0).min(0.25),
    },
];

/// First rule matching a hotspot, with its estimated delta
pub fn first_matching_rule(
    features: &FeatureVector,
    hotspot_score: f64,
) -> Option<(&'static SuggestionRule, f64)> {
    SUGGESTION_RULES
        .iter()
        .find(|rule| rule.matches(features, hotspot_score))
        .map(|rule| (rule, rule.estimated_delta(features, hotspot_score)))
}
