//! Domain model for process measurement
//!
//! Ports for the two platform capabilities the measurer depends on: sampling
//! a live child's resources, and bracketing its lifetime with an energy
//! counter. Both are optional in the sense that their failure never fails a
//! measurement.

use std::time::Duration;
use thiserror::Error;

/// Default busy-poll interval
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(5);

/// Program and arguments of one measured execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// One observation of a live process
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResourceSample {
    /// Current resident set size
    pub rss_bytes: Option<u64>,
    /// Kernel-tracked peak resident set size, when the platform reports it
    pub peak_rss_bytes: Option<u64>,
    /// Cumulative user + system cpu time
    pub cpu_time_s: Option<f64>,
}

/// Sampling failure
#[derive(Debug, Error)]
pub enum SampleError {
    /// The process exited between polls; not a measurement failure
    #[error("process {0} is gone")]
    Gone(u32),

    #[error("failed to sample process {pid}: {message}")]
    Failed { pid: u32, message: String },
}

/// Samples resident memory and cpu time of a running process
pub trait ResourceSampler: Send {
    fn name(&self) -> &'static str;

    /// Reset state before observing a new process
    fn begin(&mut self, pid: u32);

    fn sample(&mut self, pid: u32) -> Result<ResourceSample, SampleError>;
}

/// Energy counter failure
#[derive(Debug, Error)]
pub enum MeterError {
    #[error("energy counter unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read energy counter: {0}")]
    Read(#[from] std::io::Error),

    #[error("unparseable energy counter value: {0:?}")]
    Parse(String),

    #[error("end() called without begin()")]
    NotStarted,
}

/// Platform power-measurement capability
///
/// `begin`/`end` bracket the whole measured interval; `end` reports the
/// energy consumed in milli-joules.
pub trait EnergyMeter: Send {
    fn name(&self) -> &'static str;

    fn begin(&mut self) -> Result<(), MeterError>;

    fn end(&mut self) -> Result<f64, MeterError>;
}

/// Running aggregate of resource samples for one child
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SampleStats {
    pub peak_rss_bytes: u64,
    pub cpu_time_s: f64,
    pub samples: usize,
}

impl SampleStats {
    /// Fold one sample in: peak is the running maximum, cpu time the latest
    /// reported value
    pub fn absorb(&mut self, sample: ResourceSample) {
        self.samples += 1;
        if let Some(rss) = sample.rss_bytes {
            self.peak_rss_bytes = self.peak_rss_bytes.max(rss);
        }
        if let Some(hwm) = sample.peak_rss_bytes {
            self.peak_rss_bytes = self.peak_rss_bytes.max(hwm);
        }
        if let Some(cpu) = sample.cpu_time_s {
            self.cpu_time_s = cpu;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_track_peak_and_last_cpu() {
        let mut stats = SampleStats::default();
        stats.absorb(ResourceSample {
            rss_bytes: Some(4096),
            peak_rss_bytes: None,
            cpu_time_s: Some(0.01),
        });
        stats.absorb(ResourceSample {
            rss_bytes: Some(1024),
            peak_rss_bytes: Some(8192),
            cpu_time_s: Some(0.03),
        });
        stats.absorb(ResourceSample {
            rss_bytes: None,
            peak_rss_bytes: None,
            cpu_time_s: None,
        });

        assert_eq!(stats.peak_rss_bytes, 8192);
        assert_eq!(stats.cpu_time_s, 0.03);
        assert_eq!(stats.samples, 3);
    }
}
