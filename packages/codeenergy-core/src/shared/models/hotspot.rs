//! Hotspot output of one scoring call

use serde::{Deserialize, Serialize};

use super::{CodeRange, Position};

/// A code range flagged as energy/complexity relevant
///
/// Ephemeral: derived per scoring call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    pub start: Position,
    pub end: Position,
    /// Severity in [0, 1]
    pub score: f64,
    pub rule_id: Option<String>,
    pub suggestion: Option<String>,
    pub confidence: Option<f64>,
    pub delta_score: Option<f64>,
    #[serde(rename = "estimate_mJ")]
    pub estimate_mj: Option<f64>,
}

impl Hotspot {
    /// Bare hotspot over `range`; the score is clamped to [0, 1]
    pub fn new(range: CodeRange, score: f64) -> Self {
        Self {
            start: range.start,
            end: range.end,
            score: clamp_unit(score),
            rule_id: None,
            suggestion: None,
            confidence: None,
            delta_score: None,
            estimate_mj: None,
        }
    }

    pub fn range(&self) -> CodeRange {
        CodeRange::new(self.start, self.end)
    }

    pub fn with_rule(mut self, rule_id: impl Into<String>) -> Self {
        self.rule_id = Some(rule_id.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: Option<String>) -> Self {
        self.suggestion = suggestion;
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(clamp_unit(confidence));
        self
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta_score = Some(delta);
        self
    }

    pub fn with_estimate(mut self, estimate_mj: f64) -> Self {
        self.estimate_mj = Some(estimate_mj);
        self
    }
}

/// Clamp to [0, 1]; NaN maps to 0
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
