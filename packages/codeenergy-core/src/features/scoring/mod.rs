//! Heuristic Scoring
//!
//! Bounded energy score plus ordered hotspots for one source file:
//! - Feature-weighted strategy with named, versioned presets
//! - Rule-based line scanner for raw source
//! - Suggestion rule catalog
//! - Scorer selection between a trained predictor and the heuristics
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Application Layer                       │
//! │  - ScorerSelector                       │
//! │  - ScoreRequest / ScoreResponse         │
//! └─────────────────────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────┐
//! │ Infrastructure Layer                    │
//! │  - FeatureWeighted + WeightPreset       │
//! │  - RuleBased                            │
//! └─────────────────────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────┐
//! │ Domain Layer                            │
//! │  - ScoringStrategy, EnergyPredictor     │
//! │  - SuggestionRule catalog               │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use codeenergy_core::features::scoring::{FeatureWeighted, ScoreInput, ScoringStrategy, WeightPreset};
//! use codeenergy_core::shared::models::{FeatureVector, Language};
//!
//! let mut fv = FeatureVector::empty(Language::PythonicIndent);
//! fv.nested_loop_depth = 6;
//!
//! let outcome = FeatureWeighted::new(WeightPreset::Standard)
//!     .score(ScoreInput::features(&fv))
//!     .unwrap();
//! assert!(outcome.file_score >= 0.40);
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{ScoreRequest, ScoreResponse, ScorerSelector};
pub use domain::{
    EnergyPredictor, ScoreInput, ScoreOutcome, ScoringStrategy, SuggestionRule,
    SUGGESTION_VISIBILITY_THRESHOLD,
};
pub use infrastructure::{FeatureWeighted, RuleBased, WeightPreset};
