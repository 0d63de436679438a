//! Shared models

mod feature_vector;
mod hotspot;
mod language;
mod run;
mod sample;
mod span;

pub use feature_vector::{FeatureVector, FEATURE_VECTOR_VERSION, MODEL_FEATURE_ORDER};
pub use hotspot::{clamp_unit, Hotspot};
pub use language::Language;
pub use run::{RunResult, SizedRun};
pub use sample::Sample;
pub use span::{CodeRange, Position};
