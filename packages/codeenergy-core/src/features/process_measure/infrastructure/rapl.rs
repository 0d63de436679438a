//! Intel RAPL energy meter
//!
//! Reads the package energy counter exposed by the powercap subsystem. The
//! counter is in micro-joules and wraps at `max_energy_range_uj`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::features::process_measure::domain::{EnergyMeter, MeterError};

/// Package energy counter
const RAPL_ENERGY_PATH: &str = "/sys/class/powercap/intel-rapl/intel-rapl:0/energy_uj";

/// Alternative locations of the same counter
const RAPL_ALTERNATIVE_PATHS: &[&str] = &[
    "/sys/class/powercap/intel-rapl:0/energy_uj",
    "/sys/devices/virtual/powercap/intel-rapl/intel-rapl:0/energy_uj",
];

#[derive(Debug, Clone)]
pub struct RaplMeter {
    energy_path: PathBuf,
    max_range_uj: Option<u64>,
    start_uj: Option<u64>,
}

impl RaplMeter {
    /// Find a readable counter; `None` when RAPL is not exposed
    pub fn detect() -> Option<Self> {
        std::iter::once(RAPL_ENERGY_PATH)
            .chain(RAPL_ALTERNATIVE_PATHS.iter().copied())
            .map(Path::new)
            .find(|path| read_counter(path).is_ok())
            .map(Self::with_path)
    }

    /// Meter over an explicit `energy_uj` file
    ///
    /// The wrap range is read from `max_energy_range_uj` next to it.
    pub fn with_path(energy_path: impl Into<PathBuf>) -> Self {
        let energy_path = energy_path.into();
        let max_range_uj = energy_path
            .parent()
            .map(|dir| dir.join("max_energy_range_uj"))
            .and_then(|p| read_counter(&p).ok());
        Self {
            energy_path,
            max_range_uj,
            start_uj: None,
        }
    }

    pub fn energy_path(&self) -> &Path {
        &self.energy_path
    }
}

impl EnergyMeter for RaplMeter {
    fn name(&self) -> &'static str {
        "rapl"
    }

    fn begin(&mut self) -> Result<(), MeterError> {
        self.start_uj = Some(read_counter(&self.energy_path)?);
        Ok(())
    }

    fn end(&mut self) -> Result<f64, MeterError> {
        let start = self.start_uj.take().ok_or(MeterError::NotStarted)?;
        let end = read_counter(&self.energy_path)?;
        let consumed = counter_delta(start, end, self.max_range_uj)?;
        debug!(start, end, consumed_uj = consumed, "rapl interval");
        Ok(consumed as f64 / 1000.0)
    }
}

fn read_counter(path: &Path) -> Result<u64, MeterError> {
    let content = fs::read_to_string(path)?;
    let trimmed = content.trim();
    trimmed
        .parse::<u64>()
        .map_err(|_| MeterError::Parse(trimmed.to_string()))
}

/// Micro-joules between two counter readings, correcting one wrap-around
pub fn counter_delta(start: u64, end: u64, max_range: Option<u64>) -> Result<u64, MeterError> {
    if end >= start {
        return Ok(end - start);
    }
    match max_range {
        Some(max) if max >= start => Ok(max - start + end),
        _ => Err(MeterError::Unavailable(
            "counter wrapped without a known range".to_string(),
        )),
    }
}
