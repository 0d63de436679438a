//! Domain models for scoring
//!
//! A scoring strategy turns a feature vector or raw source into a bounded
//! file score plus an ordered list of hotspots. Trained predictors are an
//! external capability behind `EnergyPredictor`.

pub mod rules;

use crate::errors::Result;
use crate::shared::models::{CodeRange, FeatureVector, Hotspot, Language};

pub use rules::{first_matching_rule, SuggestionRule, SUGGESTION_RULES};

/// Severity below which per-hotspot suggestions are hidden
pub const SUGGESTION_VISIBILITY_THRESHOLD: f64 = 0.25;

/// Input of one scoring call
#[derive(Debug, Clone, Copy)]
pub enum ScoreInput<'a> {
    /// Extracted features; `seeds` overrides `features.hotspot_seeds`
    Features {
        features: &'a FeatureVector,
        seeds: Option<&'a [CodeRange]>,
    },
    /// Raw source text
    Source { source: &'a str, language: Language },
}

impl<'a> ScoreInput<'a> {
    pub fn features(features: &'a FeatureVector) -> Self {
        ScoreInput::Features {
            features,
            seeds: None,
        }
    }

    pub fn source(source: &'a str, language: Language) -> Self {
        ScoreInput::Source { source, language }
    }
}

/// Result of one scoring call
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    /// Always within [0, 1]
    pub file_score: f64,
    pub estimated_mj: Option<f64>,
    /// In discovery order
    pub hotspots: Vec<Hotspot>,
}

impl ScoreOutcome {
    pub fn empty() -> Self {
        Self {
            file_score: 0.0,
            estimated_mj: None,
            hotspots: Vec::new(),
        }
    }

    pub fn max_hotspot_score(&self) -> Option<f64> {
        self.hotspots.iter().map(|h| h.score).reduce(f64::max)
    }
}

/// Common contract of the heuristic scorers
pub trait ScoringStrategy: Send + Sync {
    /// Version tag reported as `modelVersion`
    fn version(&self) -> &'static str;

    /// # Errors
    ///
    /// `EnergyError::Configuration` when the input kind is not supported by
    /// the strategy.
    fn score(&self, input: ScoreInput<'_>) -> Result<ScoreOutcome>;
}

/// Opaque trained model: features in, predicted energy (mJ) out
pub trait EnergyPredictor: Send + Sync {
    fn version(&self) -> &str;

    fn predict(&self, features: &FeatureVector) -> Result<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_outcome() {
        let outcome = ScoreOutcome::empty();
        assert_eq!(outcome.file_score, 0.0);
        assert!(outcome.max_hotspot_score().is_none());
    }
}
