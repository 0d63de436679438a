//! Contextual suggestion text
//!
//! Picks advice from the dominant feature of the file. Hidden below the
//! visibility threshold.

use crate::features::scoring::domain::SUGGESTION_VISIBILITY_THRESHOLD;
use crate::shared::models::FeatureVector;

pub const NESTED_LOOP_ADVICE: &str =
    "Reduce nested loops or use optimized data structures (sets/dicts)";
pub const JOIN_ADVICE: &str = "Use string join() instead of concatenation in loops";
pub const SET_LOOKUP_ADVICE: &str = "Convert list membership tests to set lookups";
pub const GENERIC_ADVICE: &str = "Consider optimizing this code section";

/// Suggestion for a hotspot of severity `score`
pub fn contextual_suggestion(features: &FeatureVector, score: f64) -> Option<&'static str> {
    if score.is_nan() || score < SUGGESTION_VISIBILITY_THRESHOLD {
        return None;
    }

    let text = if features.nested_loop_depth >= 2 {
        NESTED_LOOP_ADVICE
    } else if features.string_concat_ops > 3 {
        JOIN_ADVICE
    } else if features.list_scan_ops > 5 {
        SET_LOOKUP_ADVICE
    } else {
        GENERIC_ADVICE
    };
    Some(text)
}
