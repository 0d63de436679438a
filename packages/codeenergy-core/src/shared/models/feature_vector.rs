//! Static feature vector
//!
//! Structured summary of the textual properties of one sample, produced by
//! the static analyzer and consumed by the scorers and external predictors.
//! Field names on the wire are camelCase.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{CodeRange, Language};

/// Version tag of the regex-based extractor
pub const FEATURE_VECTOR_VERSION: &str = "fv-regex-v1";

/// Input column order expected by trained predictors
pub const MODEL_FEATURE_ORDER: [&str; 7] = [
    "tokenCount",
    "loopCount",
    "nestedLoopDepth",
    "stringConcatOps",
    "listScanOps",
    "functionCount",
    "avgFunctionLength",
];

/// Static code features of one (sample, language) pair
///
/// Immutable once produced; the analyzer never hands out a partially filled
/// vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureVector {
    #[serde(rename = "languageId")]
    pub language: Language,
    pub version: String,

    /// Character length of the comment-stripped text
    pub token_count: usize,
    /// Non-blank lines after comment stripping
    pub line_count: usize,
    pub loop_count: usize,
    pub nested_loop_depth: usize,
    pub string_concat_ops: usize,
    /// Membership / linear-scan operations
    pub list_scan_ops: usize,
    pub sort_ops: usize,
    /// Allocation operations (`new X`)
    pub new_ops: usize,
    pub array_literals: usize,
    pub map_like: usize,
    pub cyclomatic_tokens: usize,
    pub function_count: usize,
    pub avg_function_length: f64,
    pub recursion_detected: bool,
    pub has_repeated_builds_in_loop: bool,
    pub comment_ratio: f64,
    pub contains_ops_java: usize,
    #[serde(default)]
    pub api_call_counts: BTreeMap<String, usize>,
    /// Candidate hotspot ranges, one per loop line
    #[serde(default, alias = "hotspotsSeeds")]
    pub hotspot_seeds: Vec<CodeRange>,
}

impl FeatureVector {
    /// All-zero vector for `language`
    pub fn empty(language: Language) -> Self {
        Self {
            language,
            version: FEATURE_VECTOR_VERSION.to_string(),
            token_count: 0,
            line_count: 0,
            loop_count: 0,
            nested_loop_depth: 0,
            string_concat_ops: 0,
            list_scan_ops: 0,
            sort_ops: 0,
            new_ops: 0,
            array_literals: 0,
            map_like: 0,
            cyclomatic_tokens: 0,
            function_count: 0,
            avg_function_length: 0.0,
            recursion_detected: false,
            has_repeated_builds_in_loop: false,
            comment_ratio: 0.0,
            contains_ops_java: 0,
            api_call_counts: BTreeMap::new(),
            hotspot_seeds: Vec::new(),
        }
    }

    /// Numeric inputs in `MODEL_FEATURE_ORDER`
    pub fn model_inputs(&self) -> [f64; 7] {
        [
            self.token_count as f64,
            self.loop_count as f64,
            self.nested_loop_depth as f64,
            self.string_concat_ops as f64,
            self.list_scan_ops as f64,
            self.function_count as f64,
            self.avg_function_length,
        ]
    }

    pub fn api_calls(&self, pattern: &str) -> usize {
        self.api_call_counts.get(pattern).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_are_camel_case() {
        let mut fv = FeatureVector::empty(Language::PythonicIndent);
        fv.nested_loop_depth = 2;
        let json = serde_json::to_value(&fv).unwrap();

        assert_eq!(json["languageId"], "python");
        assert_eq!(json["nestedLoopDepth"], 2);
        assert_eq!(json["version"], FEATURE_VECTOR_VERSION);
        assert!(json.get("hotspotSeeds").is_some());
    }

    #[test]
    fn test_accepts_legacy_seed_field_name() {
        let mut json = serde_json::to_value(FeatureVector::empty(Language::JvmLike)).unwrap();
        let obj = json.as_object_mut().unwrap();
        obj.remove("hotspotSeeds");
        obj.insert(
            "hotspotsSeeds".to_string(),
            serde_json::json!([{"start": {"line": 1, "character": 0}, "end": {"line": 4, "character": 2}}]),
        );

        let fv: FeatureVector = serde_json::from_value(json).unwrap();
        assert_eq!(fv.hotspot_seeds.len(), 1);
        assert_eq!(fv.hotspot_seeds[0].end.line, 4);
    }

    #[test]
    fn test_model_inputs_order() {
        let mut fv = FeatureVector::empty(Language::BraceBased);
        fv.token_count = 10;
        fv.avg_function_length = 2.5;
        let inputs = fv.model_inputs();
        assert_eq!(inputs[0], 10.0);
        assert_eq!(inputs[6], 2.5);
        assert_eq!(MODEL_FEATURE_ORDER[6], "avgFunctionLength");
    }
}
