//! Process measurer
//!
//! Spawns one child, busy-polls its resources until it exits, and folds the
//! observations into a `RunResult`. Every failure is encoded in the result;
//! `measure` itself never errors.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::domain::{
    CommandLine, EnergyMeter, ResourceSampler, SampleError, SampleStats,
    DEFAULT_SAMPLE_INTERVAL,
};
use super::infrastructure::{default_sampler, detect_energy_meter};
use crate::config::MeasurementConfig;
use crate::shared::models::RunResult;

/// Serializes measurements within this process
///
/// Resource and energy accounting assume exclusive use of the host counters,
/// so two measurers must never observe children at the same time.
static MEASUREMENT_LOCK: Mutex<()> = Mutex::new(());

pub struct ProcessMeasurer {
    sampler: Box<dyn ResourceSampler>,
    energy_meter: Option<Box<dyn EnergyMeter>>,
    sample_interval: Duration,
    default_timeout: Option<Duration>,
}

impl Default for ProcessMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessMeasurer {
    /// Measurer with the best sampler and energy meter available on this host
    pub fn new() -> Self {
        Self {
            sampler: default_sampler(),
            energy_meter: detect_energy_meter(),
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            default_timeout: None,
        }
    }

    pub fn from_config(config: &MeasurementConfig) -> Self {
        let mut measurer = Self::new()
            .with_interval(config.sample_interval())
            .with_timeout(config.timeout());
        if !config.energy {
            measurer.energy_meter = None;
        }
        measurer
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.sample_interval = interval;
        self
    }

    /// Timeout used when `measure` is called without one
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn with_sampler(mut self, sampler: Box<dyn ResourceSampler>) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn with_energy_meter(mut self, meter: Option<Box<dyn EnergyMeter>>) -> Self {
        self.energy_meter = meter;
        self
    }

    pub fn has_energy_meter(&self) -> bool {
        self.energy_meter.is_some()
    }

    pub fn sample_interval(&self) -> Duration {
        self.sample_interval
    }

    /// Run `command` to completion and report its resource usage
    ///
    /// Blocks for the lifetime of the child. On spawn failure, polling
    /// failure or timeout the child is killed and reaped, and the result has
    /// no metrics and a diagnostic in `error`/`stderr`.
    pub fn measure(&mut self, command: &CommandLine, timeout: Option<Duration>) -> RunResult {
        let _exclusive = MEASUREMENT_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let timeout = timeout.or(self.default_timeout);

        debug!(command = %command, ?timeout, sampler = self.sampler.name(), "measuring");

        let result = self.measure_exclusive(command, timeout);
        if let Some(diagnostic) = &result.error {
            warn!(command = %command, error = %diagnostic, "measurement failed");
        } else {
            debug!(
                command = %command,
                time_s = ?result.time_s,
                cpu_time_s = ?result.cpu_time_s,
                peak_mem_bytes = ?result.peak_mem_bytes,
                energy_mj = ?result.energy_mj,
                "measurement finished"
            );
        }
        result
    }

    fn measure_exclusive(&mut self, command: &CommandLine, timeout: Option<Duration>) -> RunResult {
        let (stdout_file, stderr_file) = match (tempfile::tempfile(), tempfile::tempfile()) {
            (Ok(out), Ok(err)) => (out, err),
            (Err(e), _) | (_, Err(e)) => {
                return RunResult::failed(0, format!("failed to create capture files: {}", e))
            }
        };

        let energy_started = self.begin_energy();
        let start = Instant::now();

        let mut child = match spawn(command, &stdout_file, &stderr_file) {
            Ok(child) => child,
            Err(e) => {
                self.discard_energy(energy_started);
                return RunResult::failed(0, format!("failed to spawn '{}': {}", command, e));
            }
        };

        let pid = child.id();
        self.sampler.begin(pid);
        let mut stats = SampleStats::default();

        let outcome = self.poll_until_exit(&mut child, pid, start, timeout, &mut stats);
        let elapsed = start.elapsed();
        let energy_mj = self.end_energy(energy_started);

        if let Err(diagnostic) = outcome {
            terminate(&mut child);
            return RunResult::failed(0, diagnostic);
        }

        RunResult {
            time_s: Some(elapsed.as_secs_f64()),
            cpu_time_s: Some(stats.cpu_time_s),
            peak_mem_bytes: Some(stats.peak_rss_bytes),
            energy_mj,
            stdout: read_capture(stdout_file),
            stderr: read_capture(stderr_file),
            run_index: 0,
            error: None,
        }
    }

    /// Sample, check for exit, sleep; repeat
    fn poll_until_exit(
        &mut self,
        child: &mut Child,
        pid: u32,
        start: Instant,
        timeout: Option<Duration>,
        stats: &mut SampleStats,
    ) -> Result<ExitStatus, String> {
        loop {
            match self.sampler.sample(pid) {
                Ok(sample) => stats.absorb(sample),
                // Exited between polls; reaped below
                Err(SampleError::Gone(_)) => {}
                Err(e) => return Err(e.to_string()),
            }

            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {}
                Err(e) => return Err(format!("failed to poll child {}: {}", pid, e)),
            }

            if let Some(limit) = timeout {
                if start.elapsed() >= limit {
                    return Err(format!("timed out after {:.3}s", limit.as_secs_f64()));
                }
            }

            thread::sleep(self.sample_interval);
        }
    }

    fn begin_energy(&mut self) -> bool {
        let Some(meter) = self.energy_meter.as_mut() else {
            return false;
        };
        match meter.begin() {
            Ok(()) => true,
            Err(e) => {
                debug!(meter = meter.name(), error = %e, "energy measurement unavailable");
                false
            }
        }
    }

    fn end_energy(&mut self, started: bool) -> Option<f64> {
        if !started {
            return None;
        }
        let meter = self.energy_meter.as_mut()?;
        match meter.end() {
            Ok(mj) => Some(mj),
            Err(e) => {
                debug!(meter = meter.name(), error = %e, "energy measurement dropped");
                None
            }
        }
    }

    /// Close an energy session that will not be reported
    fn discard_energy(&mut self, started: bool) {
        let _ = self.end_energy(started);
    }
}

fn spawn(command: &CommandLine, stdout: &File, stderr: &File) -> std::io::Result<Child> {
    Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout.try_clone()?))
        .stderr(Stdio::from(stderr.try_clone()?))
        .spawn()
}

/// Kill and reap; errors mean the child already exited
fn terminate(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn read_capture(mut file: File) -> String {
    let mut bytes = Vec::new();
    if file.seek(SeekFrom::Start(0)).is_err() || file.read_to_end(&mut bytes).is_err() {
        return String::new();
    }
    String::from_utf8_lossy(&bytes).into_owned()
}
