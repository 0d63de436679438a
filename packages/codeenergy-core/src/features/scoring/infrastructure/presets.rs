//! Named weight presets for the feature-weighted strategy
//!
//! Each preset is a distinct, versioned configuration. The constants differ
//! on purpose and are never blended; tests pin the exact output of each.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::shared::models::FeatureVector;

/// Saturation thresholds: a factor reaches 1.0 at this raw value
pub const DEPTH_SATURATION: f64 = 6.0;
pub const LOOP_SATURATION: f64 = 20.0;
pub const CONCAT_SATURATION: f64 = 15.0;
pub const SCAN_SATURATION: f64 = 25.0;
pub const LENGTH_SATURATION: f64 = 300.0;

/// Energy budget (mJ) of a file scoring 1.0
pub const ENERGY_BUDGET_MJ: f64 = 1000.0;

/// Convex weights over the five normalized factors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorWeights {
    pub depth: f64,
    pub loops: f64,
    pub concat: f64,
    pub scan: f64,
    pub length: f64,
}

impl FactorWeights {
    pub fn total(&self) -> f64 {
        self.depth + self.loops + self.concat + self.scan + self.length
    }
}

pub const STANDARD_WEIGHTS: FactorWeights = FactorWeights {
    depth: 0.40,
    loops: 0.25,
    concat: 0.15,
    scan: 0.10,
    length: 0.10,
};

pub const EDITOR_WEIGHTS: FactorWeights = FactorWeights {
    depth: 0.55,
    loops: 0.18,
    concat: 0.12,
    scan: 0.10,
    length: 0.05,
};

/// (minimum depth, boost); first match wins
pub const EDITOR_DEPTH_BOOSTS: [(usize, f64); 3] = [(4, 0.30), (3, 0.18), (2, 0.06)];
pub const EDITOR_SCAN_BOOST: (usize, f64) = (8, 0.08);

/// Normalized factors, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Factors {
    pub depth: f64,
    pub loops: f64,
    pub concat: f64,
    pub scan: f64,
    pub length: f64,
}

impl Factors {
    pub fn from_features(fv: &FeatureVector) -> Self {
        Self {
            depth: saturate(fv.nested_loop_depth as f64, DEPTH_SATURATION),
            loops: saturate(fv.loop_count as f64, LOOP_SATURATION),
            concat: saturate(fv.string_concat_ops as f64, CONCAT_SATURATION),
            scan: saturate(fv.list_scan_ops as f64, SCAN_SATURATION),
            length: saturate(fv.avg_function_length, LENGTH_SATURATION),
        }
    }

    pub fn weighted(&self, weights: &FactorWeights) -> f64 {
        weights.depth * self.depth
            + weights.loops * self.loops
            + weights.concat * self.concat
            + weights.scan * self.scan
            + weights.length * self.length
    }
}

/// min(1, value / saturation), floored at 0
pub fn saturate(value: f64, saturation: f64) -> f64 {
    if saturation <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    (value / saturation).clamp(0.0, 1.0)
}

/// Selectable scoring configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightPreset {
    /// Service weights, energy budget split evenly across seeds
    #[default]
    Standard,
    /// Service response shape: at most 8 seeds, rank-based energy estimate
    Service,
    /// Depth-heavy weights with non-linear boosts and catalog suggestions
    Editor,
    /// Squashed linear score, even split, no suggestions
    Local,
}

impl WeightPreset {
    pub const ALL: [WeightPreset; 4] = [
        WeightPreset::Standard,
        WeightPreset::Service,
        WeightPreset::Editor,
        WeightPreset::Local,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeightPreset::Standard => "standard",
            WeightPreset::Service => "service",
            WeightPreset::Editor => "editor",
            WeightPreset::Local => "local",
        }
    }

    /// Version tag reported as `modelVersion`
    pub fn version(&self) -> &'static str {
        match self {
            WeightPreset::Standard => "feature-weighted-v1",
            WeightPreset::Service => "heuristic-v1",
            WeightPreset::Editor => "heuristic-ext-v1",
            WeightPreset::Local => "heuristic-local-v1",
        }
    }

    /// Factor weights, `None` for the squashed preset
    pub fn weights(&self) -> Option<&'static FactorWeights> {
        match self {
            WeightPreset::Standard | WeightPreset::Service => Some(&STANDARD_WEIGHTS),
            WeightPreset::Editor => Some(&EDITOR_WEIGHTS),
            WeightPreset::Local => None,
        }
    }

    /// Built-in seed cap
    pub fn seed_limit(&self) -> Option<usize> {
        match self {
            WeightPreset::Service => Some(8),
            _ => None,
        }
    }
}

impl FromStr for WeightPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(WeightPreset::Standard),
            "service" => Ok(WeightPreset::Service),
            "editor" => Ok(WeightPreset::Editor),
            "local" => Ok(WeightPreset::Local),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

impl fmt::Display for WeightPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
