//! Scoring strategy implementations

pub mod feature_weighted;
pub mod presets;
pub mod rule_based;
pub mod suggestions;

pub use feature_weighted::FeatureWeighted;
pub use presets::{FactorWeights, Factors, WeightPreset};
pub use rule_based::RuleBased;
pub use suggestions::contextual_suggestion;
