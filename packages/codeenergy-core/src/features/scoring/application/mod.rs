//! Scoring application layer

pub mod selector;

pub use selector::{ScoreRequest, ScoreResponse, ScorerSelector};
