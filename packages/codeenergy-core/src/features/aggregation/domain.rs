//! Domain models for run aggregation
//!
//! Pure data plus the fixed slope-to-label policy.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::shared::models::Language;

/// Empirical complexity classes
///
/// Ordered by computational cost (ascending); `Other` sorts last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLabel {
    /// O(1)
    Constant,
    /// O(log n)
    Logarithmic,
    /// O(n)
    Linear,
    /// O(n log n)
    Linearithmic,
    /// O(n^2)
    Quadratic,
    /// O(n^3) and beyond
    CubicOrWorse,
    /// Slope undefined (fewer than two usable points)
    Other,
}

/// Exclusive upper slope bound of each finite class, ascending
///
/// Policy constants, not learned from data.
pub const SLOPE_THRESHOLDS: [(f64, ComplexityLabel); 5] = [
    (0.4, ComplexityLabel::Constant),
    (0.8, ComplexityLabel::Logarithmic),
    (1.25, ComplexityLabel::Linear),
    (1.7, ComplexityLabel::Linearithmic),
    (2.5, ComplexityLabel::Quadratic),
];

impl ComplexityLabel {
    /// Map a fitted scaling exponent to its class
    pub fn from_slope(slope: Option<f64>) -> Self {
        let Some(slope) = slope.filter(|s| !s.is_nan()) else {
            return Self::Other;
        };
        SLOPE_THRESHOLDS
            .iter()
            .find(|(bound, _)| slope < *bound)
            .map(|(_, label)| *label)
            .unwrap_or(Self::CubicOrWorse)
    }

    /// Wire name (e.g. "cubic_or_worse")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Logarithmic => "logarithmic",
            Self::Linear => "linear",
            Self::Linearithmic => "linearithmic",
            Self::Quadratic => "quadratic",
            Self::CubicOrWorse => "cubic_or_worse",
            Self::Other => "other",
        }
    }

    /// Big-O notation (e.g. "O(n^2)")
    pub fn big_o(&self) -> &'static str {
        match self {
            Self::Constant => "O(1)",
            Self::Logarithmic => "O(log n)",
            Self::Linear => "O(n)",
            Self::Linearithmic => "O(n log n)",
            Self::Quadratic => "O(n^2)",
            Self::CubicOrWorse => "O(n^3+)",
            Self::Other => "O(?)",
        }
    }

    /// Is this considered slow? (>= O(n^2))
    pub fn is_slow(&self) -> bool {
        matches!(self, Self::Quadratic | Self::CubicOrWorse)
    }

    fn order_index(&self) -> u8 {
        match self {
            Self::Constant => 0,
            Self::Logarithmic => 1,
            Self::Linear => 2,
            Self::Linearithmic => 3,
            Self::Quadratic => 4,
            Self::CubicOrWorse => 5,
            Self::Other => 6,
        }
    }
}

impl PartialOrd for ComplexityLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ComplexityLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order_index().cmp(&other.order_index())
    }
}

impl fmt::Display for ComplexityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Median-of-repeats for one (sample, input size) configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigMedian {
    pub input_size: u64,
    pub time_s: Option<f64>,
    pub cpu_time_s: Option<f64>,
    pub peak_mem_bytes: Option<u64>,
    #[serde(rename = "energy_mJ")]
    pub energy_mj: Option<f64>,
    /// Repeats aggregated, failed ones included
    pub runs: usize,
    pub failed_runs: usize,
    /// Output of the run at the median position, in execution order
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
}

/// Complexity classification of one sample
///
/// Derived once after all configurations complete; immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedSample {
    pub sample_id: String,
    pub language: Option<Language>,
    pub slope: Option<f64>,
    pub complexity: ComplexityLabel,
    /// Per-configuration medians, ascending input size
    pub configs: Vec<ConfigMedian>,
    /// Median over configurations that produced a value; even counts average
    pub median_time_s: Option<f64>,
    #[serde(rename = "median_energy_mJ")]
    pub median_energy_mj: Option<f64>,
}

impl AggregatedSample {
    /// Number of configurations whose median time entered the fit
    pub fn fitted_points(&self) -> usize {
        self.configs
            .iter()
            .filter(|c| c.time_s.is_some_and(|t| t.is_finite() && t > 0.0))
            .count()
    }
}
