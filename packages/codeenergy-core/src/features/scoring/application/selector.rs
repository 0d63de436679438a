//! Scorer selection
//!
//! Resolved once from configuration: either a trained predictor with a
//! heuristic fallback, or a heuristic strategy alone.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{ScoringConfig, StrategyKind};
use crate::errors::Result;
use crate::features::scoring::domain::{EnergyPredictor, ScoreInput, ScoreOutcome, ScoringStrategy};
use crate::features::scoring::infrastructure::{FeatureWeighted, RuleBased};
use crate::features::static_analysis::StaticAnalyzer;
use crate::shared::models::{clamp_unit, FeatureVector, Hotspot, Language};

/// Scoring request: extracted features, or raw source plus a language tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreRequest {
    Features { features: FeatureVector },
    Source { source: String, language: String },
}

/// Scoring response in wire shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub file_score: f64,
    #[serde(rename = "estimated_mJ")]
    pub estimated_mj: Option<f64>,
    pub model_version: String,
    pub hotspots: Vec<Hotspot>,
}

impl ScoreResponse {
    fn from_outcome(outcome: ScoreOutcome, model_version: &str) -> Self {
        Self {
            file_score: outcome.file_score,
            estimated_mj: outcome.estimated_mj,
            model_version: model_version.to_string(),
            hotspots: outcome.hotspots,
        }
    }
}

pub enum ScorerSelector {
    /// Trained predictor; predicted mJ divided by `scale_mj` gives the score
    Model {
        predictor: Box<dyn EnergyPredictor>,
        scale_mj: f64,
        fallback: FeatureWeighted,
    },
    Heuristic(Box<dyn ScoringStrategy>),
}

impl std::fmt::Debug for ScorerSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScorerSelector::Model {
                predictor,
                scale_mj,
                fallback,
            } => f
                .debug_struct("Model")
                .field("predictor", &predictor.version())
                .field("scale_mj", scale_mj)
                .field("fallback", &fallback.preset())
                .finish(),
            ScorerSelector::Heuristic(strategy) => {
                f.debug_tuple("Heuristic").field(&strategy.version()).finish()
            }
        }
    }
}

impl ScorerSelector {
    /// Build the scorer for `config`; a supplied predictor takes precedence
    ///
    /// # Errors
    ///
    /// `EnergyError::Configuration` for an unknown preset or strategy name.
    pub fn resolve(
        config: &ScoringConfig,
        predictor: Option<Box<dyn EnergyPredictor>>,
    ) -> Result<Self> {
        let preset = config.preset()?;
        let fallback = FeatureWeighted::new(preset).with_max_hotspots(config.max_hotspots);

        let selector = match predictor {
            Some(predictor) => ScorerSelector::Model {
                predictor,
                scale_mj: config.model_score_scale,
                fallback,
            },
            None => match config.strategy()? {
                StrategyKind::FeatureWeighted => ScorerSelector::Heuristic(Box::new(fallback)),
                StrategyKind::RuleBased => ScorerSelector::Heuristic(Box::new(RuleBased::new())),
            },
        };

        info!(model_version = selector.model_version(), "resolved scorer");
        Ok(selector)
    }

    pub fn heuristic(strategy: impl ScoringStrategy + 'static) -> Self {
        ScorerSelector::Heuristic(Box::new(strategy))
    }

    /// Version tag reported when scoring succeeds on the primary path
    pub fn model_version(&self) -> &str {
        match self {
            ScorerSelector::Model { predictor, .. } => predictor.version(),
            ScorerSelector::Heuristic(strategy) => strategy.version(),
        }
    }

    /// # Errors
    ///
    /// `EnergyError::Configuration` for an unknown language tag, or when the
    /// request kind is not supported by the heuristic strategy.
    pub fn score(&self, request: &ScoreRequest) -> Result<ScoreResponse> {
        match self {
            ScorerSelector::Heuristic(strategy) => {
                let outcome = match request {
                    ScoreRequest::Features { features } => {
                        strategy.score(ScoreInput::features(features))?
                    }
                    ScoreRequest::Source { source, language } => {
                        let language = Language::from_tag(language)?;
                        strategy.score(ScoreInput::source(source, language))?
                    }
                };
                Ok(ScoreResponse::from_outcome(outcome, strategy.version()))
            }
            ScorerSelector::Model {
                predictor,
                scale_mj,
                fallback,
            } => {
                let analyzed;
                let features = match request {
                    ScoreRequest::Features { features } => features,
                    ScoreRequest::Source { source, language } => {
                        analyzed = StaticAnalyzer::new().analyze(source, language)?;
                        &analyzed
                    }
                };
                Ok(Self::score_with_model(
                    predictor.as_ref(),
                    *scale_mj,
                    fallback,
                    features,
                ))
            }
        }
    }

    fn score_with_model(
        predictor: &dyn EnergyPredictor,
        scale_mj: f64,
        fallback: &FeatureWeighted,
        features: &FeatureVector,
    ) -> ScoreResponse {
        match predictor.predict(features) {
            Ok(predicted_mj) if predicted_mj.is_finite() => {
                let file_score = clamp_unit(predicted_mj / scale_mj);
                let hotspots = fallback.hotspots(features, &features.hotspot_seeds, file_score);
                ScoreResponse {
                    file_score,
                    estimated_mj: Some(predicted_mj),
                    model_version: predictor.version().to_string(),
                    hotspots,
                }
            }
            Ok(predicted_mj) => {
                warn!(predicted_mj, "non-finite model prediction, using heuristic");
                ScoreResponse::from_outcome(
                    fallback.score_features(features, None),
                    fallback.version(),
                )
            }
            Err(err) => {
                warn!(error = %err, "model prediction failed, using heuristic");
                ScoreResponse::from_outcome(
                    fallback.score_features(features, None),
                    fallback.version(),
                )
            }
        }
    }
}
