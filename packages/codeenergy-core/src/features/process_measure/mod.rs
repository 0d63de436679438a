//! Process Measurement
//!
//! One resource-usage record per child execution:
//! - Wall time from spawn to reap
//! - Peak resident memory (running maximum over samples)
//! - Cumulative cpu time (last sample before exit)
//! - Energy in milli-joules when a power counter is available
//! - Captured stdout/stderr
//!
//! Measurement is synchronous and exclusive. The calling thread blocks for
//! the child's lifetime, and a process-wide lock keeps two measurements from
//! overlapping. There is no retry; noise is absorbed by median-of-repeats
//! during aggregation.
//!
//! # Example
//!
//! ```rust,no_run
//! use codeenergy_core::features::process_measure::{CommandLine, ProcessMeasurer};
//! use std::time::Duration;
//!
//! let mut measurer = ProcessMeasurer::new();
//! let run = measurer.measure(
//!     &CommandLine::new("python3", ["bench.py", "1600"]),
//!     Some(Duration::from_secs(30)),
//! );
//! if run.time_s.is_none() {
//!     eprintln!("run failed: {:?}", run.error);
//! }
//! ```

pub mod domain;
pub mod infrastructure;
pub mod measurer;

pub use domain::{
    CommandLine, EnergyMeter, MeterError, ResourceSample, ResourceSampler, SampleError,
    SampleStats, DEFAULT_SAMPLE_INTERVAL,
};
pub use infrastructure::{default_sampler, detect_energy_meter, ProcfsSampler, SysinfoSampler};
pub use measurer::ProcessMeasurer;
