//! Configuration validation

use tracing::debug;

use super::error::{ConfigError, ConfigResult};
use super::profiler_config::{BenchmarkConfig, MeasurementConfig, ProfilerConfig, ScoringConfig};

/// Trait for validatable configuration objects
pub trait Validatable {
    /// `Ok(())` if valid, the first violation otherwise
    fn validate(&self) -> ConfigResult<()>;

    /// Section name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

impl Validatable for MeasurementConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !(1..=1000).contains(&self.sample_interval_ms) {
            return Err(ConfigError::range_with_hint(
                "measurement.sample_interval_ms",
                self.sample_interval_ms,
                1,
                1000,
                "Use 5 for the default polling rate",
            ));
        }
        if let Some(timeout) = self.timeout_secs {
            if !timeout.is_finite() || timeout <= 0.0 {
                return Err(ConfigError::Validation(format!(
                    "{}.timeout_secs must be a positive number of seconds, got {}",
                    self.config_name(),
                    timeout
                )));
            }
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "measurement"
    }
}

impl Validatable for BenchmarkConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !(1..=100).contains(&self.repeats) {
            return Err(ConfigError::range_with_hint(
                "benchmark.repeats",
                self.repeats,
                1,
                100,
                "Odd values give an exact median; 3 or 5 is typical",
            ));
        }
        if self.input_sizes.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{}.input_sizes must list at least one size",
                self.config_name()
            )));
        }
        if self.input_sizes.contains(&0) {
            return Err(ConfigError::Validation(format!(
                "{}.input_sizes must be positive; a zero size cannot enter the log-log fit",
                self.config_name()
            )));
        }
        for (field, value) in [
            ("python", &self.python),
            ("node", &self.node),
            ("java", &self.java),
            ("javac", &self.javac),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{}.{} executable must not be empty",
                    self.config_name(),
                    field
                )));
            }
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "benchmark"
    }
}

impl Validatable for ScoringConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.strategy()?;
        self.preset()?;
        if !self.model_score_scale.is_finite() || self.model_score_scale <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "{}.model_score_scale must be positive, got {}",
                self.config_name(),
                self.model_score_scale
            )));
        }
        if self.max_hotspots == Some(0) {
            return Err(ConfigError::range_with_hint(
                "scoring.max_hotspots",
                0,
                1,
                usize::MAX,
                "Omit the field to keep every seed",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "scoring"
    }
}

impl Validatable for ProfilerConfig {
    fn validate(&self) -> ConfigResult<()> {
        let sections: [&dyn Validatable; 3] = [&self.measurement, &self.benchmark, &self.scoring];
        for section in sections {
            section.validate().inspect_err(|e| {
                debug!(
                    config = self.config_name(),
                    section = section.config_name(),
                    error = %e,
                    "rejected config"
                );
            })?;
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "profiler"
    }
}
